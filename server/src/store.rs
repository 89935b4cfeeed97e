//! In-memory, insertion-ordered todo store.
//!
//! # Design
//! `TodoStore` is a handle over `Arc<RwLock<..>>`; clones share the same
//! collection, so the router state can be cloned per request. Reads take the
//! read lock, every mutation takes the write lock, and nothing inside a
//! critical section awaits anything but the lock itself.
//!
//! Ids come from a counter that only ever grows. `clear` empties the
//! collection but leaves the counter alone, so an id is never handed out twice
//! during the lifetime of the process.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::{Todo, TodoFields, TodoId};

#[derive(Debug, Default)]
struct Inner {
    todos: Vec<Todo>,
    last_id: u64,
}

impl Inner {
    fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|todo| todo.id == id)
    }
}

/// Shared handle to the todo collection.
#[derive(Debug, Clone, Default)]
pub struct TodoStore {
    inner: Arc<RwLock<Inner>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id, apply `fields` over the defaults and append the
    /// new todo to the end of the list.
    pub async fn create(&self, fields: TodoFields) -> Todo {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let mut todo = Todo::new(TodoId(inner.last_id));
        todo.apply(fields);
        inner.todos.push(todo.clone());
        todo
    }

    /// Snapshot of every todo in creation order.
    pub async fn list(&self) -> Vec<Todo> {
        self.inner.read().await.todos.clone()
    }

    pub async fn get(&self, id: TodoId) -> Option<Todo> {
        let inner = self.inner.read().await;
        inner.todos.iter().find(|todo| todo.id == id).cloned()
    }

    /// Overwrite only the fields present in `fields`. Returns `None` when no
    /// todo has this id.
    pub async fn update(&self, id: TodoId, fields: TodoFields) -> Option<Todo> {
        let mut inner = self.inner.write().await;
        let todo = inner.todos.iter_mut().find(|todo| todo.id == id)?;
        todo.apply(fields);
        Some(todo.clone())
    }

    /// Remove the todo with this id, keeping the order of the others.
    /// Returns whether anything was removed.
    pub async fn delete(&self, id: TodoId) -> bool {
        let mut inner = self.inner.write().await;
        match inner.position(id) {
            Some(index) => {
                inner.todos.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every todo and return how many there were.
    pub async fn clear(&self) -> usize {
        let mut inner = self.inner.write().await;
        let removed = inner.todos.len();
        inner.todos.clear();
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.todos.is_empty()
    }
}
