//! Script bindings for dialogue records.
//!
//! # Purpose
//!
//! Exposes a [`DialogueStore`](quill_store::DialogueStore) to scripts as a
//! read-only API table with one sub-table per [`DialogueKind`]:
//!
//! ```text
//! dialogue.journal.records      -- filtered store of journal dialogues
//! dialogue.journal.record(id)   -- lookup restricted to journals
//! dialogue.topic.records[1]     -- first topic, in store order
//! dialogue.topic.records["x"]   -- topic with id "x" (case-insensitive)
//! rec.infos[2].filterActorId    -- second response's actor condition
//! ```
//!
//! # Invariants
//!
//! - Projections hold the store and a key, never a record. Every call
//!   re-derives from the store's current snapshot; nothing is cached.
//!   - Enforced in: [`FilteredDialogueStore`], [`DialogueInfos::resolve_parent`].
//! - Every miss is [`Value::Nothing`](quill_host::Value::Nothing): unknown id,
//!   wrong kind, index outside `1..=len`, parent removed.
//! - Each info property applies its own presence gate from [`fields::INFO_FIELDS`].
//!
//! [`DialogueKind`]: quill_store::DialogueKind

mod config;
mod error;
pub mod fields;
mod projection;
mod registrar;

pub use config::BindingsConfig;
pub use error::{ConfigError, RegistrarError};
pub use projection::{DialogueInfos, FilteredDialogueStore, FilteredIter, KeyedProjection, Projection};
pub use registrar::register_dialogue_bindings;
