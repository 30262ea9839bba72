//! Entity types mirrored from the record store.

use crate::ids::{ListId, TaskId};
use serde::{Deserialize, Serialize};

/// A single to-do item within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// The task identifier, assigned by the store.
    pub id: TaskId,
    /// The task text.
    pub text: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

impl Task {
    /// Create a new, not-yet-completed task.
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// A named collection of tasks owned by one account.
///
/// Task order within a list is insertion order as returned by the store;
/// it is not separately tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    /// The list identifier, assigned by the store.
    pub id: ListId,
    /// The display name of the list.
    pub name: String,
    /// The tasks in this list, in store insertion order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    /// Create a new, empty list.
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Look up a task by identifier.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }
}

/// A partial update to a task.
///
/// Fields set to `None` are left untouched by the store, matching the
/// partial-update shape of the record store's task endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    /// New task text, if renaming.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New completion flag, if toggling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// A patch that only renames the task.
    pub fn rename(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    /// A patch that only sets the completion flag.
    pub fn complete(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }

    /// Apply this patch to a task in place.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}
