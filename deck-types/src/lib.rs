//! # deck-types
//!
//! Foundational types for the taskdeck client sync engine.
//!
//! This crate provides the types shared across all taskdeck crates:
//! - [`AccountId`], [`ListId`], [`TaskId`] - Identifier newtypes
//! - [`TodoList`], [`Task`], [`TaskPatch`] - Entity types
//! - [`StoreError`] - The record-store error taxonomy

#![warn(missing_docs)]
#![warn(clippy::all)]

mod entities;
mod error;
mod ids;

pub use entities::{Task, TaskPatch, TodoList};
pub use error::StoreError;
pub use ids::{AccountId, ListId, TaskId};
