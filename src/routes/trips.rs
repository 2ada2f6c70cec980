use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::{
    error::AppError,
    models::trip::{Trip, TripSubmission},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_trips).post(add_trip))
}

async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    let trips = state.trips.list_all().await?;
    Ok(Json(trips))
}

async fn add_trip(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let Json(body) = payload?;
    let submission = TripSubmission::from_json(&body).inspect_err(|err| {
        if let AppError::MissingFields(missing) = err {
            warn!(?missing, "rejected trip submission");
        }
    })?;

    let id = state.trips.insert(&submission).await?;
    info!(id, "trip recorded");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Trip added successfully" })),
    ))
}
