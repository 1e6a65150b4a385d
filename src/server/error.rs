// file: src/server/error.rs
// description: maps service errors onto JSON error responses
// reference: https://docs.rs/axum/latest/axum/response/trait.IntoResponse.html

use crate::error::ServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Error response for the HTTP surface. Details stay in the logs; callers
/// only see a short fixed message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotReady => {
                warn!("Question received before the index was loaded");
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Index not loaded",
                }
            }
            ServiceError::InvalidInput(_) => ApiError {
                status: StatusCode::BAD_REQUEST,
                message: "No question provided",
            },
            ServiceError::Provider(detail) => {
                error!("Semantic search failed: {}", detail);
                ApiError {
                    status: StatusCode::BAD_GATEWAY,
                    message: "Semantic search unavailable",
                }
            }
            other => {
                error!("Keyword search failed: {}", other);
                ApiError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Failed to read documents",
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}
