use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::{dto::common::MessageResponse, error::StorageError};

pub const NOT_FOUND_MESSAGE: &str = "Not found";
pub const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    NotFound,
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::NotFound => write!(f, "Resource not found"),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        // Storage internals are logged, never returned
        let (status_code, message) = match &self {
            Self::Storage(StorageError::NotFound) | Self::NotFound => {
                (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                (StatusCode::GATEWAY_TIMEOUT, SERVER_ERROR_MESSAGE)
            }
        };

        (status_code, Json(MessageResponse::new(message))).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
