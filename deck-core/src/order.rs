//! Display-order tracking for taskdeck lists.
//!
//! The display order is the only durable client-local state: an ordered
//! sequence of list identifiers that controls render order independently
//! of store-side ordering. It is persisted as a JSON array of identifier
//! strings and re-applied on top of whatever the store returns.
//!
//! The order is tolerant by construction: stored identifiers the store no
//! longer knows are ignored, and fetched lists the order has never seen
//! are appended at the end in store-returned order.

use deck_types::{ListId, TodoList};
use std::collections::HashSet;
use thiserror::Error;

/// Errors from display-order operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    /// A reorder request was not a permutation of the known identifiers.
    #[error("invalid order: {0}")]
    NotAPermutation(String),

    /// The persisted payload could not be decoded.
    #[error("malformed order payload: {0}")]
    Malformed(String),
}

/// An ordered sequence of list identifiers, persisted across reloads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayOrder {
    ids: Vec<ListId>,
}

impl DisplayOrder {
    /// Create an empty order (server order wins until the user reorders).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an order from an identifier sequence.
    pub fn from_ids(ids: Vec<ListId>) -> Self {
        Self { ids }
    }

    /// The identifier sequence.
    pub fn ids(&self) -> &[ListId] {
        &self.ids
    }

    /// Whether the order holds no identifiers.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Apply this order to a fetched list collection.
    ///
    /// Lists whose identifiers appear in the order come first, in stored
    /// relative order. Fetched lists unknown to the order are appended,
    /// preserving store-returned order. Stored identifiers absent from the
    /// fetched set are skipped, not treated as errors.
    pub fn apply(&self, fetched: Vec<TodoList>) -> Vec<TodoList> {
        if self.ids.is_empty() {
            return fetched;
        }

        let mut remaining: Vec<Option<TodoList>> = fetched.into_iter().map(Some).collect();
        let mut ordered = Vec::with_capacity(remaining.len());

        for id in &self.ids {
            let found = remaining.iter_mut().find_map(|slot| {
                if slot.as_ref().is_some_and(|l| l.id == *id) {
                    slot.take()
                } else {
                    None
                }
            });
            if let Some(list) = found {
                ordered.push(list);
            }
        }

        ordered.extend(remaining.into_iter().flatten());
        ordered
    }

    /// Append an identifier (new list created).
    pub fn push(&mut self, id: ListId) {
        self.ids.push(id);
    }

    /// Remove an identifier (list deleted). Unknown identifiers are a no-op.
    pub fn remove(&mut self, id: ListId) {
        self.ids.retain(|&existing| existing != id);
    }

    /// Replace the whole sequence (user reorder, or resync to mirror order).
    pub fn set(&mut self, ids: Vec<ListId>) {
        self.ids = ids;
    }

    /// Validate that `candidate` is a permutation of `known`.
    ///
    /// Rejects duplicates, missing identifiers, and identifiers outside the
    /// known set.
    pub fn validate_permutation(candidate: &[ListId], known: &[ListId]) -> Result<(), OrderError> {
        if candidate.len() != known.len() {
            return Err(OrderError::NotAPermutation(format!(
                "expected {} ids, got {}",
                known.len(),
                candidate.len()
            )));
        }

        let known_set: HashSet<ListId> = known.iter().copied().collect();
        let mut seen = HashSet::with_capacity(candidate.len());
        for id in candidate {
            if !known_set.contains(id) {
                return Err(OrderError::NotAPermutation(format!("unknown id {id}")));
            }
            if !seen.insert(*id) {
                return Err(OrderError::NotAPermutation(format!("duplicate id {id}")));
            }
        }
        Ok(())
    }

    /// Encode the order as its persisted JSON payload.
    pub fn to_json(&self) -> String {
        // Vec<ListId> serializes as an array of UUID strings; this cannot fail.
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// Decode an order from its persisted JSON payload.
    pub fn from_json(payload: &str) -> Result<Self, OrderError> {
        let ids: Vec<ListId> =
            serde_json::from_str(payload).map_err(|e| OrderError::Malformed(e.to_string()))?;
        Ok(Self { ids })
    }
}
