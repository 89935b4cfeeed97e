//! Todo records, incoming field sets and the outgoing JSON view.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Server-assigned todo identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0:?} is not a todo id")]
pub struct InvalidTodoId(pub String);

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    /// Only canonical decimal is accepted (no sign, no leading zeros), so
    /// each todo is reachable at exactly one URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidTodoId(s.to_string());
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if s.len() > 1 && s.starts_with('0') {
            return Err(invalid());
        }
        s.parse().map(TodoId).map_err(|_| invalid())
    }
}

/// A stored todo. The `url` is not part of it; see [`TodoView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub order: Option<i64>,
}

impl Todo {
    pub fn new(id: TodoId) -> Self {
        Self {
            id,
            title: String::new(),
            completed: false,
            order: None,
        }
    }

    /// Merge the keys present in `fields`, leaving everything else as is.
    pub fn apply(&mut self, fields: TodoFields) {
        if let Some(title) = fields.title {
            self.title = title;
        }
        if let Some(completed) = fields.completed {
            self.completed = completed;
        }
        if let Some(order) = fields.order {
            self.order = order;
        }
    }

    pub fn view(&self, base_url: &str) -> TodoView<'_> {
        TodoView {
            id: self.id,
            title: &self.title,
            completed: self.completed,
            order: self.order,
            url: format!("{base_url}/{}", self.id),
        }
    }
}

/// Fields supplied by a POST or PATCH body. Only keys that were present in
/// the JSON object are `Some`; unknown keys are ignored.
///
/// `order` distinguishes an absent key (`None`) from an explicit `null`
/// (`Some(None)`), which clears the stored order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TodoFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub order: Option<Option<i64>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// JSON representation of a todo as served to clients.
#[derive(Debug, Serialize)]
pub struct TodoView<'a> {
    pub id: TodoId,
    pub title: &'a str,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_absent_keys_are_none() {
        let fields: TodoFields = serde_json::from_str("{}").unwrap();
        assert_eq!(fields, TodoFields::default());
    }

    #[test]
    fn fields_distinguish_null_order_from_absent() {
        let cleared: TodoFields = serde_json::from_str(r#"{"order":null}"#).unwrap();
        assert_eq!(cleared.order, Some(None));

        let set: TodoFields = serde_json::from_str(r#"{"order":523}"#).unwrap();
        assert_eq!(set.order, Some(Some(523)));
    }

    #[test]
    fn fields_ignore_unknown_keys() {
        let fields: TodoFields =
            serde_json::from_str(r#"{"title":"x","url":"http://elsewhere/1","id":9}"#).unwrap();
        assert_eq!(fields.title.as_deref(), Some("x"));
    }

    #[test]
    fn fields_reject_wrong_types() {
        let result: Result<TodoFields, _> = serde_json::from_str(r#"{"completed":"yes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn apply_null_order_clears_it() {
        let mut todo = Todo::new(TodoId(1));
        todo.order = Some(3);
        todo.apply(TodoFields {
            order: Some(None),
            ..TodoFields::default()
        });
        assert_eq!(todo.order, None);
    }

    #[test]
    fn view_serializes_url_and_omits_unset_order() {
        let mut todo = Todo::new(TodoId(4));
        todo.title = "Test".to_string();
        let json = serde_json::to_value(todo.view("http://localhost:3000")).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["url"], "http://localhost:3000/4");
        assert!(json.get("order").is_none());
    }

    #[test]
    fn view_includes_order_when_set() {
        let mut todo = Todo::new(TodoId(1));
        todo.order = Some(95);
        let json = serde_json::to_value(todo.view("")).unwrap();
        assert_eq!(json["order"], 95);
        assert_eq!(json["url"], "/1");
    }

    #[test]
    fn todo_id_parses_from_path_segment() {
        assert_eq!("17".parse::<TodoId>().unwrap(), TodoId(17));
        assert!("abc".parse::<TodoId>().is_err());
        assert!("-1".parse::<TodoId>().is_err());
    }

    #[test]
    fn todo_id_rejects_non_canonical_forms() {
        for raw in ["+1", "01", "00", "", " 1", "1 ", "18446744073709551616"] {
            assert!(raw.parse::<TodoId>().is_err(), "{raw:?} should be rejected");
        }
        assert_eq!("0".parse::<TodoId>().unwrap(), TodoId(0));
    }
}
