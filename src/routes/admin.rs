use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::{
    error::AppError,
    models::stats::AdminStats,
    services::{
        export::{anonymize, EXPORT_FILENAME},
        stats::summarize,
    },
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats))
        .route("/export", get(export))
}

async fn stats(State(state): State<AppState>) -> Result<Json<AdminStats>, AppError> {
    let trips = state.trips.list_all().await?;
    Ok(Json(summarize(&trips)?))
}

async fn export(State(state): State<AppState>) -> Result<Response, AppError> {
    let trips = state.trips.list_all().await?;
    let records = anonymize(&trips)?;
    let body = serde_json::to_vec(&records).map_err(|err| AppError::Other(err.into()))?;
    let disposition = format!("attachment;filename={EXPORT_FILENAME}");

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
