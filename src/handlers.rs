use crate::errors::AppError;
use crate::models::{LogMoodResponse, MoodInfo, MoodRequest, RawMoodEvent, TrendsResponse};
use crate::mood;
use crate::state::AppState;
use crate::storage::persist_data;
use crate::theme::ThemeSnapshot;
use crate::trends::build_trends;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize, Default)]
pub struct IndexParams {
    #[serde(default)]
    pub expanded: bool,
}

pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    let trends = {
        let data = state.data.lock().await;
        build_trends(&data.events)
    };

    let charts = {
        let mut board = state.charts.lock().await;
        board.refresh(&trends.daily, &trends.counts, params.expanded);
        board.configs()
    };

    let theme = state.theme.snapshot().await;
    Html(render_index(&theme, &charts, trends.is_no_data()))
}

pub async fn get_moods() -> Json<Vec<MoodInfo>> {
    Json(
        mood::vocabulary()
            .map(|name| MoodInfo {
                name,
                label: mood::display_label(name),
                dimension: *mood::dimensions_of(name),
            })
            .collect(),
    )
}

pub async fn get_history(State(state): State<AppState>) -> Json<Vec<RawMoodEvent>> {
    let data = state.data.lock().await;
    Json(data.events.clone())
}

pub async fn get_trends(State(state): State<AppState>) -> Json<TrendsResponse> {
    let data = state.data.lock().await;
    Json(build_trends(&data.events).to_response())
}

pub async fn post_trends(Json(events): Json<Vec<RawMoodEvent>>) -> Json<TrendsResponse> {
    Json(build_trends(&events).to_response())
}

pub async fn log_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<(StatusCode, Json<LogMoodResponse>), AppError> {
    let mood_name = payload.mood.trim();
    if mood_name.is_empty() {
        return Err(AppError::bad_request("Mood data is required."));
    }
    if !mood::is_known(mood_name) {
        return Err(AppError::bad_request("Invalid mood value provided."));
    }

    let theme = apply_mood(&state, mood_name).await?;
    Ok((
        StatusCode::CREATED,
        Json(LogMoodResponse {
            message: "Mood logged successfully!".to_string(),
            mood: mood_name.to_string(),
            theme: theme.theme,
        }),
    ))
}

pub async fn log_mood_form(
    State(state): State<AppState>,
    Path(mood_name): Path<String>,
) -> Result<Redirect, AppError> {
    if !mood::is_known(&mood_name) {
        return Err(AppError::bad_request("Invalid mood value provided."));
    }
    apply_mood(&state, &mood_name).await?;
    Ok(Redirect::to("/"))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeSnapshot> {
    Json(state.theme.snapshot().await)
}

pub async fn select_theme(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Json<ThemeSnapshot> {
    Json(state.theme.select(payload.mood.trim()).await)
}

pub async fn reset_theme(State(state): State<AppState>) -> Json<ThemeSnapshot> {
    Json(state.theme.reset().await)
}

/// Switches the theme right away, then appends the mood to the history.
async fn apply_mood(state: &AppState, mood_name: &str) -> Result<ThemeSnapshot, AppError> {
    let theme = state.theme.select(mood_name).await;

    let mut data = state.data.lock().await;
    data.events.push(RawMoodEvent {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
        mood_name: mood_name.to_string(),
    });
    persist_data(&state.data_path, &data).await?;

    info!(mood = mood_name, total = data.events.len(), "mood logged");
    Ok(theme)
}
