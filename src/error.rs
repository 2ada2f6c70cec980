use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("Missing fields in request")]
    MissingFields(Vec<&'static str>),
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
    #[error("trip {id} has a non-numeric {column}")]
    NonNumeric { id: i64, column: &'static str },
    #[error("trip store unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFields(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            AppError::StoreUnavailable(err) => {
                error!("trip store unavailable: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Trip store unavailable".to_string(),
                )
            }
            AppError::Config(_)
            | AppError::NonNumeric { .. }
            | AppError::Io(_)
            | AppError::Database(_)
            | AppError::Migrate(_)
            | AppError::Other(_) => {
                error!("request failed: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
