//! Request extractors: the todo id in the path, the todo body and the base
//! URL used to build `url`.

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use axum::http::{header, HeaderName};
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{TodoFields, TodoId};
use crate::AppState;

/// The `{id}` segment of a single-todo route.
///
/// Anything that does not name a todo, including segments that fail to
/// percent-decode, is rejected as an unknown path so every miss is the same
/// JSON 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodoPath(pub TodoId);

impl<S> FromRequestParts<S> for TodoPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let unknown = |parts: &Parts| {
            ApiError::UnknownPath(parts.uri.path().trim_start_matches('/').to_string())
        };
        let Ok(Path(raw)) = Path::<String>::from_request_parts(parts, state).await else {
            return Err(unknown(parts));
        };
        raw.parse().map(TodoPath).map_err(|_| unknown(parts))
    }
}

/// The fields of a POST/PATCH body.
///
/// An empty body, or a literal `null`, counts as an empty object. Any other
/// non-object JSON value is rejected. The request content type is not
/// checked.
#[derive(Debug)]
pub struct TodoBody(pub TodoFields);

impl<S> FromRequest<S> for TodoBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::UnreadableBody(rejection.body_text()))?;
        parse_fields(&bytes).map(TodoBody)
    }
}

pub fn parse_fields(body: &[u8]) -> Result<TodoFields, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(TodoFields::default());
    }
    match serde_json::from_slice::<Value>(body).map_err(ApiError::MalformedJson)? {
        Value::Null => Ok(TodoFields::default()),
        object @ Value::Object(_) => serde_json::from_value(object).map_err(ApiError::InvalidField),
        _ => Err(ApiError::NotAnObject),
    }
}

/// Scheme and authority that todo URLs are rooted at, without a trailing
/// slash. Empty when neither a public URL is configured nor a `Host` header
/// was sent, which yields relative URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl FromRequestParts<AppState> for BaseUrl {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(public_url) = state.config.public_url.as_deref() {
            return Ok(BaseUrl(public_url.to_string()));
        }

        let Some(host) = header_str(parts, header::HOST) else {
            return Ok(BaseUrl(String::new()));
        };
        let scheme =
            header_str(parts, HeaderName::from_static("x-forwarded-proto")).unwrap_or("http");
        Ok(BaseUrl(format!("{scheme}://{host}")))
    }
}

fn header_str(parts: &Parts, name: HeaderName) -> Option<&str> {
    parts.headers.get(name).and_then(|value| value.to_str().ok())
}
