//! Dialogue record store.
//!
//! # Mental Model
//!
//! 1. **Records:** A [`Dialogue`] owns an ordered list of [`DialInfo`]
//!    responses. Both are immutable once published.
//! 2. **Publication:** [`DialogueStore`] holds the current [`Snapshot`] behind an
//!    atomic pointer. [`DialogueStore::insert`] and [`DialogueStore::remove`]
//!    build the next snapshot and swap it in.
//! 3. **Consumption:** Readers load the current snapshot per call. Iterators pin
//!    the snapshot they started on; a fresh call always sees the latest one.
//!
//! # Invariants
//!
//! - Identities are case-normalized at construction ([`RefId::new`]), so a
//!   lookup never depends on the caller's casing.
//! - Every [`DialInfo`] reachable through a [`Dialogue`] carries its parent's
//!   [`DialogueKind`] in [`InfoData::kind`].
//! - Iteration order is insertion order; replacing a record keeps its slot.

mod dialogue;
mod error;
mod ref_id;
pub mod resource;
mod store;

pub use dialogue::{DialInfo, Dialogue, DialogueKind, InfoData, QuestStatus, Record};
pub use error::{Result, StoreError};
pub use ref_id::RefId;
pub use resource::ResourcePaths;
pub use store::{DialogueStore, Records, Snapshot};
