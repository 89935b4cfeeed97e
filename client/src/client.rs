//! Stateless HTTP request builder and response parser for the Todo-Backend API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Collection operations address the API
//! root; single-todo operations take the `url` the server handed out.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Todo, UpdateTodo};

/// Synchronous, stateless client for the Todo-Backend API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// The API root, where the collection lives.
    pub fn root_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// URL of the todo with `id`, for servers that root todo URLs at the
    /// same base.
    pub fn todo_url(&self, id: u64) -> String {
        format!("{}/{id}", self.base_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        bodyless(HttpMethod::Get, self.root_url())
    }

    pub fn build_clear_todos(&self) -> HttpRequest {
        bodyless(HttpMethod::Delete, self.root_url())
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.root_url(), input)
    }

    pub fn build_get_todo(&self, url: &str) -> HttpRequest {
        bodyless(HttpMethod::Get, url.to_string())
    }

    pub fn build_update_todo(&self, url: &str, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Patch, url.to_string(), input)
    }

    pub fn build_delete_todo(&self, url: &str) -> HttpRequest {
        bodyless(HttpMethod::Delete, url.to_string())
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response)
    }

    pub fn parse_clear_todos(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn bodyless(method: HttpMethod, url: String) -> HttpRequest {
    HttpRequest {
        method,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: serde::Serialize>(
    method: HttpMethod,
    url: String,
    input: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(ApiError::SerializationError)?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(ApiError::DeserializationError)
}

/// Every successful Todo-Backend call answers 200; map anything else to the
/// appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => {
            tracing::debug!(status, body = %response.body, "unexpected status");
            Err(ApiError::HttpError {
                status,
                body: response.body.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TodoClient {
        TodoClient::new("http://localhost:3000")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn status(code: u16) -> HttpResponse {
        HttpResponse {
            status: code,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    #[test]
    fn build_list_todos_targets_root() {
        let req = client().build_list_todos();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_clear_todos_deletes_root() {
        let req = client().build_clear_todos();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_todo_omits_unset_fields() {
        let req = client().build_create_todo(&CreateTodo::titled("walk the dog")).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "walk the dog"}));
    }

    #[test]
    fn build_update_todo_patches_given_url() {
        let input = UpdateTodo {
            order: Some(95),
            ..UpdateTodo::default()
        };
        let req = client()
            .build_update_todo("http://elsewhere:8080/7", &input)
            .unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.url, "http://elsewhere:8080/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"order": 95}));
    }

    #[test]
    fn build_get_and_delete_follow_url_verbatim() {
        let c = client();
        let url = c.todo_url(3);
        assert_eq!(url, "http://localhost:3000/3");
        assert_eq!(c.build_get_todo(&url).method, HttpMethod::Get);
        let req = c.build_delete_todo(&url);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, url);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_todos_success() {
        let todos = client()
            .parse_list_todos(ok(
                r#"[{"id":1,"title":"Test","completed":false,"url":"http://localhost:3000/1"}]"#,
            ))
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "Test");
        assert_eq!(todos[0].order, None);
    }

    #[test]
    fn parse_list_todos_empty() {
        assert!(client().parse_list_todos(ok("[]")).unwrap().is_empty());
    }

    #[test]
    fn parse_create_todo_reads_order() {
        let todo = client()
            .parse_create_todo(ok(
                r#"{"id":2,"title":"blah","completed":false,"order":523,"url":"/2"}"#,
            ))
            .unwrap();
        assert_eq!(todo.order, Some(523));
        assert_eq!(todo.url, "/2");
    }

    #[test]
    fn parse_create_todo_wrong_status() {
        let err = client()
            .parse_create_todo(HttpResponse {
                status: 400,
                headers: Vec::new(),
                body: "bad".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client().parse_get_todo(status(404)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_update_todo_success() {
        let todo = client()
            .parse_update_todo(ok(
                r#"{"id":1,"title":"Updated","completed":true,"url":"/1"}"#,
            ))
            .unwrap();
        assert_eq!(todo.title, "Updated");
        assert!(todo.completed);
    }

    #[test]
    fn parse_delete_and_clear_ignore_body() {
        assert!(client().parse_delete_todo(status(200)).is_ok());
        assert!(client().parse_clear_todos(ok("ignored")).is_ok());
    }

    #[test]
    fn parse_delete_todo_not_found() {
        let err = client().parse_delete_todo(status(404)).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = TodoClient::new("http://localhost:3000/");
        assert_eq!(client.build_list_todos().url, "http://localhost:3000/");
        assert_eq!(client.todo_url(1), "http://localhost:3000/1");
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
