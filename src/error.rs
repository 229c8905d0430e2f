use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::ValidationErrors;

/// Failure to populate the film table from the catalog provider.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to fetch films from SWAPI: {0}")]
    Request(#[from] reqwest::Error),

    #[error(
        "Failed to fetch films from SWAPI: invalid release date {value:?} for episode {episode_id}"
    )]
    InvalidReleaseDate { episode_id: i32, value: String, source: jiff::Error },

    #[error("failed to store films from SWAPI: {0}")]
    Store(#[from] sea_orm::DbErr),
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found.")]
    NotFound,

    #[error("invalid input: {0:?}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<jiff::Error> for AppError {
    fn from(err: jiff::Error) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => detail(StatusCode::NOT_FOUND, "Not found."),
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            AppError::BadRequest(msg) => detail(StatusCode::BAD_REQUEST, &msg),
            AppError::UnsupportedMediaType(msg) => detail(StatusCode::UNSUPPORTED_MEDIA_TYPE, &msg),
            AppError::Import(err) => {
                tracing::error!(error = %err, "catalog import failed");
                detail(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
            }
            AppError::Database(err) => {
                tracing::error!(error = %err, "database error");
                detail(StatusCode::INTERNAL_SERVER_ERROR, "A server error occurred.")
            }
            AppError::Other(err) => {
                tracing::error!(error = ?err, "unhandled error");
                detail(StatusCode::INTERNAL_SERVER_ERROR, "A server error occurred.")
            }
        }
    }
}

fn detail(status: StatusCode, msg: &str) -> Response {
    (status, Json(json!({ "detail": msg }))).into_response()
}

pub type AppResult<T> = Result<T, AppError>;
