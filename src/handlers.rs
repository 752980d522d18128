use crate::dataset::{DEFAULT_TOP_N, HOME_COUNTRY, TypeInsight};
use crate::errors::AppError;
use crate::greeting::{self, Greeting};
use crate::models::{BackdropResponse, GreetRequest, GreetResponse, InsightQuery};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Form, Json,
};

const MAX_TOP_N: usize = 50;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let backdrop = state.session.lock().await.snapshot();
    Html(render_index(&backdrop, None, state.poll_every))
}

pub async fn greet_form(
    State(state): State<AppState>,
    Form(payload): Form<GreetRequest>,
) -> Html<String> {
    let greeting = greeting::greet(&payload.name);
    let backdrop = state.session.lock().await.snapshot();
    Html(render_index(&backdrop, Some(&greeting), state.poll_every))
}

pub async fn greet(Json(payload): Json<GreetRequest>) -> Result<Json<GreetResponse>, AppError> {
    match greeting::greet(&payload.name) {
        Greeting::Success(message) => Ok(Json(GreetResponse { message })),
        Greeting::Warning(message) => Err(AppError::bad_request(message)),
    }
}

pub async fn get_backdrop(State(state): State<AppState>) -> Json<BackdropResponse> {
    Json(state.session.lock().await.snapshot())
}

pub async fn get_insight(
    State(state): State<AppState>,
    Path(mbti): Path<String>,
    Query(query): Query<InsightQuery>,
) -> Result<Json<TypeInsight>, AppError> {
    let Some(dataset) = state.dataset.as_deref() else {
        return Err(AppError::unavailable("dataset not loaded"));
    };

    let top_n = query.top.unwrap_or(DEFAULT_TOP_N).clamp(1, MAX_TOP_N);
    let home = query.home.as_deref().unwrap_or(HOME_COUNTRY);
    Ok(Json(dataset.insight(&mbti, home, top_n)?))
}
