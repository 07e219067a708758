use crate::chart::ChartBoard;
use crate::config::Config;
use crate::models::AppData;
use crate::theme::ThemeSelector;
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub data: Arc<Mutex<AppData>>,
    pub theme: ThemeSelector,
    pub charts: Arc<Mutex<ChartBoard>>,
}

impl AppState {
    pub fn new(config: &Config, data: AppData) -> Self {
        Self {
            data_path: config.data_path.clone(),
            data: Arc::new(Mutex::new(data)),
            theme: ThemeSelector::new(config.default_theme, config.transition),
            charts: Arc::new(Mutex::new(ChartBoard::new())),
        }
    }
}
