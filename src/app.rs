use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/greet", post(handlers::greet_form))
        .route("/api/greet", post(handlers::greet))
        .route("/api/backdrop", get(handlers::get_backdrop))
        .route("/api/mbti/:mbti", get(handlers::get_insight))
        .with_state(state)
}
