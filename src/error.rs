use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

use crate::forms::FieldErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Referential integrity violation: {0}")]
    ReferentialViolation(String),

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => Self::ReferentialViolation(msg),
            _ => Self::Database(err),
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ReferentialViolation(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Configuration(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = match self {
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                "Database error occurred"
            }
            Self::ReferentialViolation(ref msg) => {
                tracing::warn!("Referential violation: {}", msg);
                "Referenced record is missing or still in use"
            }
            Self::Validation(_) => "Submitted data is invalid",
            Self::NotFound(ref msg) => msg.as_str(),
            Self::Configuration(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                msg.as_str()
            }
            Self::Other(ref e) => {
                tracing::error!("Unexpected error: {}", e);
                "An unexpected error occurred"
            }
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string(),
        }));

        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
