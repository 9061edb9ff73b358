//! Lazy views over the dialogue store.
//!
//! # Role
//!
//! [`FilteredDialogueStore`] restricts the store to one [`DialogueKind`];
//! [`DialogueInfos`] exposes one dialogue's infos. Neither caches: every call
//! reads the store's current snapshot, so a view created before a store write
//! answers according to the store after it.
//!
//! # Indexing
//!
//! `at` takes the script's 1-based index. `0` and anything past `len()` are
//! `None`.

use std::any::Any;
use std::sync::Arc;

use quill_store::{DialInfo, Dialogue, DialogueKind, DialogueStore, Records, RefId};

use crate::config::BindingsConfig;

/// Read-only, indexable, countable sequence exposed to scripts.
///
/// One generic registration routine in [`crate::registrar`] binds any
/// implementor to the host.
pub trait Projection: Any + Send + Sync {
	type Item: Any + Send + Sync;

	/// Number of items right now. May change between calls.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// 1-based positional access.
	fn at(&self, index: usize) -> Option<Arc<Self::Item>>;

	/// `tostring` text, or `None` when the projection no longer resolves.
	fn describe(&self, config: &BindingsConfig) -> Option<String>;
}

/// A [`Projection`] that also answers identity lookups.
pub trait KeyedProjection: Projection {
	/// Looks up by the script's id text. Casing does not matter.
	fn lookup(&self, id: &str) -> Option<Arc<Self::Item>>;
}

/// Store restricted to dialogues of one kind.
#[derive(Clone)]
pub struct FilteredDialogueStore {
	store: Arc<DialogueStore>,
	kind: DialogueKind,
}

impl FilteredDialogueStore {
	pub fn new(store: Arc<DialogueStore>, kind: DialogueKind) -> Self {
		Self { store, kind }
	}

	pub fn kind(&self) -> DialogueKind {
		self.kind
	}

	/// Exact lookup; `None` when the id is unknown or belongs to another kind.
	pub fn search(&self, id: &RefId) -> Option<Arc<Dialogue>> {
		self.store.search(id).filter(|d| d.kind() == self.kind)
	}

	pub fn iter(&self) -> FilteredIter {
		FilteredIter {
			records: self.store.iter(),
			kind: self.kind,
		}
	}
}

impl Projection for FilteredDialogueStore {
	type Item = Dialogue;

	fn len(&self) -> usize {
		self.iter().count()
	}

	fn at(&self, index: usize) -> Option<Arc<Dialogue>> {
		self.iter().nth(index.checked_sub(1)?)
	}

	fn describe(&self, config: &BindingsConfig) -> Option<String> {
		Some(format!("{{{} {} records}}", self.len(), config.kind_type_name(self.kind)))
	}
}

impl KeyedProjection for FilteredDialogueStore {
	fn lookup(&self, id: &str) -> Option<Arc<Dialogue>> {
		self.search(&RefId::new(id))
	}
}

/// Forward iterator over the dialogues of one kind.
///
/// Walks one pinned store snapshot, skipping records of other kinds. After the
/// last match it keeps returning `None`.
pub struct FilteredIter {
	records: Records,
	kind: DialogueKind,
}

impl Iterator for FilteredIter {
	type Item = Arc<Dialogue>;

	fn next(&mut self) -> Option<Self::Item> {
		let kind = self.kind;
		self.records.find(|d| d.kind() == kind)
	}
}

/// Infos of one dialogue, held by id.
///
/// The parent is looked up again on every call. Once it is removed from the
/// store the view is empty and `tostring` yields nothing.
#[derive(Clone)]
pub struct DialogueInfos {
	store: Arc<DialogueStore>,
	dialogue_id: RefId,
}

impl DialogueInfos {
	pub fn new(store: Arc<DialogueStore>, dialogue_id: RefId) -> Self {
		Self { store, dialogue_id }
	}

	pub fn dialogue_id(&self) -> &RefId {
		&self.dialogue_id
	}

	pub fn resolve_parent(&self) -> Option<Arc<Dialogue>> {
		self.store.search(&self.dialogue_id)
	}
}

impl Projection for DialogueInfos {
	type Item = DialInfo;

	fn len(&self) -> usize {
		self.resolve_parent().map_or(0, |d| d.infos().len())
	}

	fn at(&self, index: usize) -> Option<Arc<DialInfo>> {
		let parent = self.resolve_parent()?;
		parent.infos().get(index.checked_sub(1)?).cloned()
	}

	fn describe(&self, config: &BindingsConfig) -> Option<String> {
		let parent = self.resolve_parent()?;
		Some(format!(
			"{{{} {}[{}] info elements}}",
			parent.infos().len(),
			config.type_prefix,
			parent.id().to_debug_string()
		))
	}
}
