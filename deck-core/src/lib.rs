//! # deck-core
//!
//! Pure logic for the taskdeck sync engine. No I/O lives here, so every
//! test in this crate runs instantly.
//!
//! - [`DisplayOrder`] - the client-local list ordering and its persistence
//!   payload
//! - [`Mirror`] - the in-memory copy of server-authoritative list/task data
//! - [`ExpansionSet`] - ephemeral expanded/collapsed UI state

#![warn(missing_docs)]
#![warn(clippy::all)]

mod expansion;
mod mirror;
mod order;

pub use expansion::ExpansionSet;
pub use mirror::Mirror;
pub use order::{DisplayOrder, OrderError};
