//! Mock record store for testing.
//!
//! Holds lists in memory per account, records every call for exact
//! call accounting, and supports injected failures and hangs.

use super::RecordStore;
use async_trait::async_trait;
use deck_types::{AccountId, ListId, StoreError, Task, TaskId, TaskPatch, TodoList};
use std::sync::{Arc, Mutex};

/// Longest list or task name the mock store accepts.
const MAX_NAME_LEN: usize = 255;

/// A recorded store call, for asserting exact round-trip counts and shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `list_lists` was called.
    ListLists {
        /// The requesting account.
        account: AccountId,
    },
    /// `get_list` was called.
    GetList {
        /// The requesting account.
        account: AccountId,
        /// The requested list.
        id: ListId,
    },
    /// `create_list` was called.
    CreateList {
        /// The requesting account.
        account: AccountId,
        /// The requested name.
        name: String,
    },
    /// `rename_list` was called.
    RenameList {
        /// The requesting account.
        account: AccountId,
        /// The target list.
        id: ListId,
        /// The new name.
        name: String,
    },
    /// `delete_list` was called.
    DeleteList {
        /// The requesting account.
        account: AccountId,
        /// The target list.
        id: ListId,
    },
    /// `create_task` was called.
    CreateTask {
        /// The requesting account.
        account: AccountId,
        /// The owning list.
        list_id: ListId,
        /// The task text.
        text: String,
    },
    /// `update_task` was called.
    UpdateTask {
        /// The requesting account.
        account: AccountId,
        /// The target task.
        task_id: TaskId,
        /// The partial update.
        patch: TaskPatch,
    },
    /// `delete_task` was called.
    DeleteTask {
        /// The requesting account.
        account: AccountId,
        /// The target task.
        task_id: TaskId,
    },
}

#[derive(Debug, Default)]
struct MockStoreInner {
    // (owner, list) pairs in insertion order; insertion order is the
    // store-returned order for list_lists.
    lists: Vec<(AccountId, TodoList)>,
    calls: Vec<StoreCall>,
    fail_next: Option<StoreError>,
    hang_next: bool,
}

/// In-memory mock of the record store.
///
/// Clones share state, so a test can keep a handle for assertions while
/// the engine owns another.
#[derive(Debug, Default)]
pub struct MockStore {
    inner: Arc<Mutex<MockStoreInner>>,
}

impl Clone for MockStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl MockStore {
    /// Create an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a list (with any tasks already attached) under an account.
    pub fn seed(&self, account: AccountId, list: TodoList) {
        let mut inner = self.inner.lock().unwrap();
        inner.lists.push((account, list));
    }

    /// All calls recorded so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Number of calls recorded so far.
    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Cause the next call to fail with the given error.
    pub fn fail_next(&self, error: StoreError) {
        self.inner.lock().unwrap().fail_next = Some(error);
    }

    /// Cause the next call to never resolve (for deadline tests).
    pub fn hang_next(&self) {
        self.inner.lock().unwrap().hang_next = true;
    }

    /// Clear recorded calls, keeping seeded data.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    /// Current lists owned by `account`, in store order (for assertions).
    pub fn lists_for(&self, account: AccountId) -> Vec<TodoList> {
        let inner = self.inner.lock().unwrap();
        inner
            .lists
            .iter()
            .filter(|(owner, _)| *owner == account)
            .map(|(_, list)| list.clone())
            .collect()
    }

    /// Record the call, then honor any injected hang or failure.
    async fn begin(&self, call: StoreCall) -> Result<(), StoreError> {
        let hang = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(call);
            let hang = std::mem::take(&mut inner.hang_next);
            if !hang {
                if let Some(err) = inner.fail_next.take() {
                    return Err(err);
                }
            }
            hang
        };
        if hang {
            std::future::pending::<()>().await;
        }
        Ok(())
    }

    fn validate_name(name: &str) -> Result<(), StoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(StoreError::Validation("name must not be empty".into()));
        }
        if trimmed.len() > MAX_NAME_LEN {
            return Err(StoreError::Validation(format!(
                "name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn list_lists(&self, account: AccountId) -> Result<Vec<TodoList>, StoreError> {
        self.begin(StoreCall::ListLists { account }).await?;
        Ok(self.lists_for(account))
    }

    async fn get_list(&self, account: AccountId, id: ListId) -> Result<TodoList, StoreError> {
        self.begin(StoreCall::GetList { account, id }).await?;
        let inner = self.inner.lock().unwrap();
        match inner.lists.iter().find(|(_, list)| list.id == id) {
            Some((owner, list)) if *owner == account => Ok(list.clone()),
            Some(_) => Err(StoreError::Forbidden(format!("list {id}"))),
            None => Err(StoreError::NotFound(format!("list {id}"))),
        }
    }

    async fn create_list(&self, account: AccountId, name: &str) -> Result<TodoList, StoreError> {
        self.begin(StoreCall::CreateList {
            account,
            name: name.to_string(),
        })
        .await?;
        Self::validate_name(name)?;
        let list = TodoList::new(ListId::new(), name);
        let mut inner = self.inner.lock().unwrap();
        inner.lists.push((account, list.clone()));
        Ok(list)
    }

    async fn rename_list(
        &self,
        account: AccountId,
        id: ListId,
        name: &str,
    ) -> Result<TodoList, StoreError> {
        self.begin(StoreCall::RenameList {
            account,
            id,
            name: name.to_string(),
        })
        .await?;
        Self::validate_name(name)?;
        let mut inner = self.inner.lock().unwrap();
        match inner.lists.iter_mut().find(|(_, list)| list.id == id) {
            Some((owner, list)) if *owner == account => {
                list.name = name.to_string();
                Ok(list.clone())
            }
            Some(_) => Err(StoreError::Forbidden(format!("list {id}"))),
            None => Err(StoreError::NotFound(format!("list {id}"))),
        }
    }

    async fn delete_list(&self, account: AccountId, id: ListId) -> Result<(), StoreError> {
        self.begin(StoreCall::DeleteList { account, id }).await?;
        let mut inner = self.inner.lock().unwrap();
        match inner.lists.iter().position(|(_, list)| list.id == id) {
            Some(pos) if inner.lists[pos].0 == account => {
                // Cascades: the tasks live inside the list entry.
                inner.lists.remove(pos);
                Ok(())
            }
            Some(_) => Err(StoreError::Forbidden(format!("list {id}"))),
            None => Err(StoreError::NotFound(format!("list {id}"))),
        }
    }

    async fn create_task(
        &self,
        account: AccountId,
        list_id: ListId,
        text: &str,
    ) -> Result<Task, StoreError> {
        self.begin(StoreCall::CreateTask {
            account,
            list_id,
            text: text.to_string(),
        })
        .await?;
        Self::validate_name(text)?;
        let mut inner = self.inner.lock().unwrap();
        match inner.lists.iter_mut().find(|(_, list)| list.id == list_id) {
            Some((owner, list)) if *owner == account => {
                let task = Task::new(TaskId::new(), text);
                list.tasks.push(task.clone());
                Ok(task)
            }
            Some(_) => Err(StoreError::Forbidden(format!("list {list_id}"))),
            None => Err(StoreError::NotFound(format!("list {list_id}"))),
        }
    }

    async fn update_task(
        &self,
        account: AccountId,
        task_id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, StoreError> {
        self.begin(StoreCall::UpdateTask {
            account,
            task_id,
            patch: patch.clone(),
        })
        .await?;
        if let Some(text) = &patch.text {
            Self::validate_name(text)?;
        }
        let mut inner = self.inner.lock().unwrap();
        for (owner, list) in inner.lists.iter_mut() {
            if let Some(task) = list.tasks.iter_mut().find(|t| t.id == task_id) {
                if *owner != account {
                    return Err(StoreError::Forbidden(format!("task {task_id}")));
                }
                patch.apply_to(task);
                return Ok(task.clone());
            }
        }
        Err(StoreError::NotFound(format!("task {task_id}")))
    }

    async fn delete_task(&self, account: AccountId, task_id: TaskId) -> Result<(), StoreError> {
        self.begin(StoreCall::DeleteTask { account, task_id }).await?;
        let mut inner = self.inner.lock().unwrap();
        for (owner, list) in inner.lists.iter_mut() {
            if list.tasks.iter().any(|t| t.id == task_id) {
                if *owner != account {
                    return Err(StoreError::Forbidden(format!("task {task_id}")));
                }
                list.tasks.retain(|t| t.id != task_id);
                return Ok(());
            }
        }
        Err(StoreError::NotFound(format!("task {task_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_lists_come_back_in_store_order() {
        let store = MockStore::new();
        let account = AccountId::new();
        store.seed(account, TodoList::new(ListId::new(), "Groceries"));
        store.seed(account, TodoList::new(ListId::new(), "Chores"));

        let lists = store.list_lists(account).await.unwrap();
        let names: Vec<_> = lists.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Groceries", "Chores"]);
    }

    #[tokio::test]
    async fn lists_are_scoped_to_account() {
        let store = MockStore::new();
        let (mine, theirs) = (AccountId::new(), AccountId::new());
        store.seed(mine, TodoList::new(ListId::new(), "Mine"));
        store.seed(theirs, TodoList::new(ListId::new(), "Theirs"));

        let lists = store.list_lists(mine).await.unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].name, "Mine");
    }

    #[tokio::test]
    async fn create_list_rejects_blank_names() {
        let store = MockStore::new();
        let result = store.create_list(AccountId::new(), "   ").await;
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[tokio::test]
    async fn foreign_list_is_forbidden_not_missing() {
        let store = MockStore::new();
        let (mine, theirs) = (AccountId::new(), AccountId::new());
        let foreign = TodoList::new(ListId::new(), "Theirs");
        let foreign_id = foreign.id;
        store.seed(theirs, foreign);

        let result = store.delete_list(mine, foreign_id).await;
        assert!(matches!(result, Err(StoreError::Forbidden(_))));

        let result = store.delete_list(mine, ListId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_list_cascades_tasks() {
        let store = MockStore::new();
        let account = AccountId::new();
        let list = store.create_list(account, "Groceries").await.unwrap();
        let task = store.create_task(account, list.id, "Buy milk").await.unwrap();

        store.delete_list(account, list.id).await.unwrap();

        let result = store
            .update_task(account, task.id, TaskPatch::complete(true))
            .await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn update_task_applies_partial_patch() {
        let store = MockStore::new();
        let account = AccountId::new();
        let list = store.create_list(account, "Groceries").await.unwrap();
        let task = store.create_task(account, list.id, "Buy milk").await.unwrap();

        let updated = store
            .update_task(account, task.id, TaskPatch::complete(true))
            .await
            .unwrap();
        assert!(updated.completed);
        assert_eq!(updated.text, "Buy milk");
    }

    #[tokio::test]
    async fn calls_are_recorded_in_order() {
        let store = MockStore::new();
        let account = AccountId::new();
        store.list_lists(account).await.unwrap();
        let list = store.create_list(account, "Groceries").await.unwrap();

        assert_eq!(
            store.calls(),
            vec![
                StoreCall::ListLists { account },
                StoreCall::CreateList {
                    account,
                    name: "Groceries".into()
                },
            ]
        );
        assert_eq!(store.lists_for(account), vec![list]);
    }

    #[tokio::test]
    async fn fail_next_fails_exactly_once() {
        let store = MockStore::new();
        let account = AccountId::new();
        store.fail_next(StoreError::Unavailable("boom".into()));

        assert!(store.list_lists(account).await.is_err());
        assert!(store.list_lists(account).await.is_ok());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MockStore::new();
        let handle = store.clone();
        let account = AccountId::new();

        store.create_list(account, "Groceries").await.unwrap();

        assert_eq!(handle.call_count(), 1);
        assert_eq!(handle.lists_for(account).len(), 1);
    }
}
