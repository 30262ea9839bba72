//! # deck-engine
//!
//! The client-resident sync engine for taskdeck.
//!
//! [`SyncEngine`] keeps a local mirror of `{ list -> [task] }` synchronized
//! with an injected record store, applies a user-controlled display order on
//! top of server order, and persists that order across reloads.
//!
//! # Architecture
//!
//! ```text
//! Presentation -> SyncEngine -> RecordStore -> server
//!                     |
//!                deck-core (pure mirror/order logic)
//! ```
//!
//! Every mutation is optimistic-then-confirm: the local mirror is patched
//! eagerly (where the store does not assign the identifier), the store
//! round-trip is awaited under a deadline, and a failed round-trip restores
//! the pre-call snapshot. Mutations take `&mut self`, so the single UI actor
//! can never have two of them in flight.
//!
//! # Example
//!
//! ```ignore
//! use taskdeck_engine::{EngineConfig, MemoryPrefs, MockSession, MockStore, SyncEngine};
//!
//! let store = MockStore::new();
//! let prefs = MemoryPrefs::new();
//! let session = MockSession::with_account(account);
//! let mut engine = SyncEngine::new(EngineConfig::default(), store, prefs, session);
//!
//! let lists = engine.load_lists().await?;
//! let groceries = engine.create_list("Groceries").await?;
//! engine.create_task(groceries.id, "Buy milk").await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod prefs;
pub mod session;
pub mod store;

pub use engine::{EngineConfig, EngineError, SyncEngine};
pub use prefs::{MemoryPrefs, PreferenceStore};
pub use session::{MockSession, SessionService};
pub use store::{MockStore, RecordStore, StoreCall};
