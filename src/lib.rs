pub mod app;
pub mod chart;
pub mod config;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod models;
pub mod mood;
pub mod state;
pub mod stats;
pub mod storage;
pub mod theme;
pub mod trends;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::load_data;
pub use trends::{Trends, build_trends};
