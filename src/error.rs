//! Application error taxonomy and its mapping to HTTP responses.
//!
//! Every handler returns `Result<_, AppError>`, so the status code and JSON
//! error envelope for each failure class live in exactly one place. Handlers
//! cannot diverge in how they report the same condition.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Easter egg: the request asked a teapot to brew coffee (RFC 2324).
    /// Not a real error; checked before all other validation.
    #[error("I'm a teapot")]
    Teapot,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    #[error("Request body is not valid JSON")]
    MalformedJson,

    #[error("Missing required parameters: zip and measure_name")]
    MissingParameter,

    #[error("Invalid ZIP code: must be exactly 5 digits")]
    InvalidZip,

    #[error("Invalid measure_name")]
    InvalidMeasure,

    #[error("Invalid limit: must be a positive integer")]
    InvalidLimit,

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Translate an axum JSON extractor rejection into the taxonomy.
    ///
    /// A missing or wrong Content-Type is a 415; anything else (syntax
    /// errors, empty bodies) is a malformed body.
    pub fn from_rejection(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::MissingJsonContentType(_) => AppError::UnsupportedMediaType,
            _ => AppError::MalformedJson,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // The teapot branch is plain text by tradition; everything else
        // carries the structured {error} envelope.
        if matches!(self, AppError::Teapot) {
            return (StatusCode::IM_A_TEAPOT, "I'm a teapot").into_response();
        }

        let (status, message) = match &self {
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::UnsupportedMediaType => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, self.to_string())
            }
            AppError::MalformedJson
            | AppError::MissingParameter
            | AppError::InvalidZip
            | AppError::InvalidMeasure
            | AppError::InvalidLimit => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Storage(_) => {
                // Full detail goes to the log; the caller gets the storage
                // message, which never contains file-system paths.
                tracing::error!("Storage error: {:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::Internal(_) => {
                tracing::error!("Internal error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Teapot => unreachable!(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
