//! Request-scoped failures and their HTTP mapping.
//!
//! Every variant turns into a JSON body of the shape
//! `{"code": "...", "message": "..."}` with the status from
//! [`ApiError::status`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::json::JsonUtf8;
use crate::model::TodoId;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("could not read request body: {0}")]
    UnreadableBody(String),

    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("invalid todo field: {0}")]
    InvalidField(#[source] serde_json::Error),

    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("no todo at /{0}")]
    UnknownPath(String),
}

/// Serialized error payload.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnreadableBody(_)
            | ApiError::MalformedJson(_)
            | ApiError::NotAnObject
            | ApiError::InvalidField(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::UnknownPath(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::UnreadableBody(_) => "UNREADABLE_BODY",
            ApiError::MalformedJson(_) => "MALFORMED_JSON",
            ApiError::NotAnObject => "INVALID_BODY",
            ApiError::InvalidField(_) => "INVALID_FIELD",
            ApiError::NotFound(_) | ApiError::UnknownPath(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_client_error() {
            tracing::warn!(code = self.code(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (status, JsonUtf8(body)).into_response()
    }
}
