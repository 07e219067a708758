use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/mood/:name", post(handlers::log_mood_form))
        .route("/api/moods", get(handlers::get_moods))
        .route("/api/mood", post(handlers::log_mood))
        .route("/api/mood/history", get(handlers::get_history))
        .route("/api/trends", get(handlers::get_trends).post(handlers::post_trends))
        .route("/api/theme", get(handlers::get_theme).post(handlers::select_theme))
        .route("/api/theme/reset", post(handlers::reset_theme))
        .with_state(state)
}
