//! The list/task sync engine.
//!
//! [`SyncEngine`] keeps a local mirror of the caller's lists synchronized
//! with the record store and applies a user-controlled display order on
//! top of server order.
//!
//! # Mutation contract
//!
//! Updates and deletes are optimistic: the mirror is patched before the
//! store round-trip, and a failed round-trip restores the pre-call
//! snapshot. Creates are confirm-then-apply, because the store assigns
//! the identifier. Either way an operation fully lands or fully reverts;
//! the mirror is never left partially applied.
//!
//! All mutating operations take `&mut self`, so the single UI actor can
//! only ever have one mutation in flight. That serializes same-entity
//! mutations structurally instead of relying on per-entity queues.

use crate::prefs::PreferenceStore;
use crate::session::SessionService;
use crate::store::RecordStore;
use deck_core::{DisplayOrder, ExpansionSet, Mirror};
use deck_types::{AccountId, ListId, StoreError, Task, TaskId, TaskPatch, TodoList};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Engine errors, surfaced to the calling UI action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// No valid session.
    #[error("not authenticated")]
    Unauthenticated,

    /// The referenced list or task does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The entity exists but is not owned by the caller.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The store rejected an empty or invalid name.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Transport or server failure, including an expired deadline.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// Malformed local call, e.g. a reorder that is not a permutation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unauthenticated => Self::Unauthenticated,
            StoreError::NotFound(what) => Self::NotFound(what),
            StoreError::Forbidden(what) => Self::Forbidden(what),
            StoreError::Validation(why) => Self::Validation(why),
            StoreError::Unavailable(why) => Self::StoreUnavailable(why),
        }
    }
}

/// Configuration for [`SyncEngine`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Preference key the display order is persisted under.
    pub order_key: String,
    /// Deadline for each store round-trip. A hung call surfaces as
    /// [`EngineError::StoreUnavailable`] and rolls back any optimistic
    /// change.
    pub store_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            order_key: "todo-list-order".to_string(),
            store_timeout: Duration::from_secs(10),
        }
    }
}

impl EngineConfig {
    /// Set the preference key for the persisted display order.
    pub fn with_order_key(mut self, key: &str) -> Self {
        self.order_key = key.to_string();
        self
    }

    /// Set the store round-trip deadline.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

/// Bound a store round-trip by the configured deadline.
async fn bounded<T>(
    deadline: Duration,
    fut: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, EngineError> {
    match tokio::time::timeout(deadline, fut).await {
        Ok(result) => result.map_err(EngineError::from),
        Err(_) => Err(EngineError::StoreUnavailable(
            "request deadline exceeded".to_string(),
        )),
    }
}

/// The client-resident sync engine.
///
/// Holds the mirror, the persisted display order, and the ephemeral
/// expansion state, and drives every record-store round-trip.
pub struct SyncEngine<R: RecordStore, P: PreferenceStore, S: SessionService> {
    config: EngineConfig,
    store: R,
    prefs: P,
    session: S,
    mirror: Mirror,
    saved_order: DisplayOrder,
    expansion: ExpansionSet,
}

impl<R: RecordStore, P: PreferenceStore, S: SessionService> SyncEngine<R, P, S> {
    /// Create a new engine.
    ///
    /// The persisted display order is read here, once; a malformed payload
    /// is treated as absent (server order wins) rather than as an error.
    pub fn new(config: EngineConfig, store: R, prefs: P, session: S) -> Self {
        let saved_order = match prefs.get(&config.order_key) {
            Some(payload) => match DisplayOrder::from_json(&payload) {
                Ok(order) => order,
                Err(e) => {
                    warn!(error = %e, "ignoring malformed display order payload");
                    DisplayOrder::new()
                }
            },
            None => DisplayOrder::new(),
        };
        Self {
            config,
            store,
            prefs,
            session,
            mirror: Mirror::new(),
            saved_order,
            expansion: ExpansionSet::new(),
        }
    }

    /// The current mirror, in display order.
    pub fn lists(&self) -> &[TodoList] {
        self.mirror.lists()
    }

    /// Look up one mirrored list.
    pub fn list(&self, id: ListId) -> Option<&TodoList> {
        self.mirror.list(id)
    }

    /// Whether a list is currently expanded.
    pub fn is_expanded(&self, id: ListId) -> bool {
        self.expansion.is_expanded(id)
    }

    async fn caller(&self) -> Result<AccountId, EngineError> {
        self.session.resolve_caller().await.map_err(EngineError::from)
    }

    /// Rewrite the persisted display order to match the mirror.
    ///
    /// Called after every structural change to the list collection, which
    /// keeps the persisted sequence a permutation of exactly the mirrored
    /// identifiers.
    fn persist_order(&mut self) {
        self.saved_order.set(self.mirror.ids());
        self.prefs
            .set(&self.config.order_key, &self.saved_order.to_json());
    }

    /// Fetch all lists for the current account and replace the mirror.
    ///
    /// The persisted display order is applied on top of store order:
    /// ordered identifiers first, unknown fetched lists appended in store
    /// order, stale identifiers ignored. On store failure the mirror keeps
    /// its previous value, so the user sees stale-but-valid data.
    pub async fn load_lists(&mut self) -> Result<Vec<TodoList>, EngineError> {
        let account = self.caller().await?;
        let fetched = bounded(self.config.store_timeout, self.store.list_lists(account)).await?;

        let ordered = self.saved_order.apply(fetched);
        self.mirror.replace_all(ordered.clone());
        debug!(lists = ordered.len(), "loaded lists");
        Ok(ordered)
    }

    /// Re-fetch a single list and replace its mirror entry in place.
    ///
    /// The list keeps its position in the display order. A list the mirror
    /// has never seen is appended at the end.
    pub async fn refresh_list(&mut self, id: ListId) -> Result<TodoList, EngineError> {
        let account = self.caller().await?;
        let list = bounded(self.config.store_timeout, self.store.get_list(account, id)).await?;

        if !self.mirror.replace_list(list.clone()) {
            self.mirror.insert_list(list.clone());
        }
        debug!(%id, "refreshed list");
        Ok(list)
    }

    /// Create a list and append it to the mirror and the display order.
    ///
    /// Confirm-then-apply: the store assigns the identifier, so nothing is
    /// patched locally until the round-trip succeeds. On failure the mirror
    /// is unchanged and the error is surfaced for user display.
    pub async fn create_list(&mut self, name: &str) -> Result<TodoList, EngineError> {
        let account = self.caller().await?;
        let list = bounded(
            self.config.store_timeout,
            self.store.create_list(account, name),
        )
        .await?;

        self.mirror.insert_list(list.clone());
        self.persist_order();
        debug!(id = %list.id, "created list");
        Ok(list)
    }

    /// Rename a list, optimistically.
    pub async fn rename_list(&mut self, id: ListId, name: &str) -> Result<(), EngineError> {
        let account = self.caller().await?;

        let snapshot = self.mirror.clone();
        self.mirror.rename_list(id, name);

        match bounded(
            self.config.store_timeout,
            self.store.rename_list(account, id, name),
        )
        .await
        {
            Ok(updated) => {
                // The store may normalize the name; mirror what it kept.
                self.mirror.rename_list(id, &updated.name);
                debug!(%id, "renamed list");
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "rename_list failed, rolling back");
                self.mirror = snapshot;
                Err(e)
            }
        }
    }

    /// Delete a list, optimistically.
    ///
    /// On success the identifier is also removed from the display order and
    /// the expansion set, and the shrunk order is re-persisted.
    pub async fn delete_list(&mut self, id: ListId) -> Result<(), EngineError> {
        let account = self.caller().await?;

        let snapshot = self.mirror.clone();
        self.mirror.remove_list(id);

        match bounded(
            self.config.store_timeout,
            self.store.delete_list(account, id),
        )
        .await
        {
            Ok(()) => {
                self.expansion.forget(id);
                self.persist_order();
                debug!(%id, "deleted list");
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "delete_list failed, rolling back");
                self.mirror = snapshot;
                Err(e)
            }
        }
    }

    /// Create a task under a list.
    ///
    /// Confirm-then-apply, scoped to one list: on success the task is
    /// appended to exactly that list's mirror entry and the rest of the
    /// mirror is untouched.
    pub async fn create_task(&mut self, list_id: ListId, text: &str) -> Result<Task, EngineError> {
        let account = self.caller().await?;
        let task = bounded(
            self.config.store_timeout,
            self.store.create_task(account, list_id, text),
        )
        .await?;

        if !self.mirror.insert_task(list_id, task.clone()) {
            warn!(%list_id, id = %task.id, "created task under a list the mirror has not loaded");
        }
        debug!(%list_id, id = %task.id, "created task");
        Ok(task)
    }

    /// Set a task's completion flag, optimistically.
    ///
    /// Each call is its own store round-trip; repeated toggles are never
    /// coalesced.
    pub async fn toggle_task(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        completed: bool,
    ) -> Result<(), EngineError> {
        let account = self.caller().await?;

        let snapshot = self.mirror.clone();
        self.mirror
            .patch_task(list_id, task_id, &TaskPatch::complete(completed));

        match bounded(
            self.config.store_timeout,
            self.store
                .update_task(account, task_id, TaskPatch::complete(completed)),
        )
        .await
        {
            Ok(updated) => {
                self.reconcile_task(list_id, task_id, &updated);
                debug!(%task_id, completed, "toggled task");
                Ok(())
            }
            Err(e) => {
                warn!(%task_id, error = %e, "toggle_task failed, rolling back");
                self.mirror = snapshot;
                Err(e)
            }
        }
    }

    /// Rename a task, optimistically.
    ///
    /// The new name is trimmed first; an empty or unchanged trimmed value
    /// is a no-op with zero store calls and an untouched mirror.
    pub async fn rename_task(
        &mut self,
        list_id: ListId,
        task_id: TaskId,
        name: &str,
    ) -> Result<(), EngineError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        if let Some(task) = self.mirror.task(list_id, task_id) {
            if task.text == trimmed {
                return Ok(());
            }
        }

        let account = self.caller().await?;

        let snapshot = self.mirror.clone();
        self.mirror
            .patch_task(list_id, task_id, &TaskPatch::rename(trimmed));

        match bounded(
            self.config.store_timeout,
            self.store
                .update_task(account, task_id, TaskPatch::rename(trimmed)),
        )
        .await
        {
            Ok(updated) => {
                self.reconcile_task(list_id, task_id, &updated);
                debug!(%task_id, "renamed task");
                Ok(())
            }
            Err(e) => {
                warn!(%task_id, error = %e, "rename_task failed, rolling back");
                self.mirror = snapshot;
                Err(e)
            }
        }
    }

    /// Delete a task, optimistically.
    pub async fn delete_task(&mut self, list_id: ListId, task_id: TaskId) -> Result<(), EngineError> {
        let account = self.caller().await?;

        let snapshot = self.mirror.clone();
        self.mirror.remove_task(list_id, task_id);

        match bounded(
            self.config.store_timeout,
            self.store.delete_task(account, task_id),
        )
        .await
        {
            Ok(()) => {
                debug!(%task_id, "deleted task");
                Ok(())
            }
            Err(e) => {
                warn!(%task_id, error = %e, "delete_task failed, rolling back");
                self.mirror = snapshot;
                Err(e)
            }
        }
    }

    /// Reorder the lists. Purely local: ordering is a client preference,
    /// not a shared server attribute, so no store call is made.
    ///
    /// `ids` must be a permutation of the currently mirrored identifiers;
    /// anything else is rejected with `InvalidArgument` and no state change.
    pub fn reorder_lists(&mut self, ids: &[ListId]) -> Result<(), EngineError> {
        DisplayOrder::validate_permutation(ids, &self.mirror.ids())
            .map_err(|e| EngineError::InvalidArgument(e.to_string()))?;

        self.mirror.reorder(ids);
        self.persist_order();
        debug!(lists = ids.len(), "reordered lists");
        Ok(())
    }

    /// Flip a list between expanded and collapsed. Purely local and
    /// ephemeral; returns the new expanded state.
    pub fn toggle_expansion(&mut self, id: ListId) -> bool {
        self.expansion.toggle(id)
    }

    /// Mirror the store-returned task state after a successful update.
    fn reconcile_task(&mut self, list_id: ListId, task_id: TaskId, updated: &Task) {
        let patch = TaskPatch {
            text: Some(updated.text.clone()),
            completed: Some(updated.completed),
        };
        self.mirror.patch_task(list_id, task_id, &patch);
    }
}
