//! Record-store abstraction for the sync engine.
//!
//! The record store is the external relational service holding account,
//! list, and task entities. The engine only ever reaches it through this
//! trait, which keeps the engine testable against [`MockStore`] and lets
//! the transport layer (HTTP, in-process, anything) live elsewhere.
//!
//! Ownership enforcement (every task's list belongs to the caller's
//! account) lives behind this trait; the engine assumes it and does not
//! re-verify.

mod mock;

pub use mock::{MockStore, StoreCall};

use async_trait::async_trait;
use deck_types::{AccountId, ListId, StoreError, Task, TaskId, TaskPatch, TodoList};

/// Async interface to the external record store.
///
/// Every call is a network round-trip scoped to one account. Implementations
/// return [`StoreError`] for the full taxonomy: `Unauthenticated`,
/// `NotFound`, `Forbidden`, `Validation`, `Unavailable`.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch all lists owned by `account`, each with its tasks.
    async fn list_lists(&self, account: AccountId) -> Result<Vec<TodoList>, StoreError>;

    /// Fetch a single list with its tasks.
    async fn get_list(&self, account: AccountId, id: ListId) -> Result<TodoList, StoreError>;

    /// Create a list. The store assigns the identifier.
    async fn create_list(&self, account: AccountId, name: &str) -> Result<TodoList, StoreError>;

    /// Rename a list.
    async fn rename_list(
        &self,
        account: AccountId,
        id: ListId,
        name: &str,
    ) -> Result<TodoList, StoreError>;

    /// Delete a list. Deletion cascades to its tasks.
    async fn delete_list(&self, account: AccountId, id: ListId) -> Result<(), StoreError>;

    /// Create a task under a list. The store assigns the identifier.
    async fn create_task(
        &self,
        account: AccountId,
        list_id: ListId,
        text: &str,
    ) -> Result<Task, StoreError>;

    /// Apply a partial update to a task.
    async fn update_task(
        &self,
        account: AccountId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, StoreError>;

    /// Delete a task.
    async fn delete_task(&self, account: AccountId, task_id: TaskId) -> Result<(), StoreError>;
}
