//! Snapshot-published dialogue store.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current snapshot).
//! - **Writes:** Copy-on-write; the next snapshot is built from the current
//!   one and swapped in with an RCU loop, so concurrent writers never lose
//!   updates.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

use crate::dialogue::Dialogue;
use crate::error::{Result, StoreError};
use crate::ref_id::RefId;

/// Immutable state of the store at one point in time.
#[derive(Clone, Default)]
pub struct Snapshot {
	records: Vec<Arc<Dialogue>>,
	by_id: FxHashMap<RefId, usize>,
}

impl Snapshot {
	pub fn get(&self, id: &RefId) -> Option<&Arc<Dialogue>> {
		self.by_id.get(id).map(|&slot| &self.records[slot])
	}

	pub fn records(&self) -> &[Arc<Dialogue>] {
		&self.records
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	fn with_inserted(&self, dialogue: Arc<Dialogue>) -> Self {
		let mut next = self.clone();
		match next.by_id.get(dialogue.id()) {
			Some(&slot) => next.records[slot] = dialogue,
			None => {
				next.by_id.insert(dialogue.id().clone(), next.records.len());
				next.records.push(dialogue);
			}
		}
		next
	}

	fn with_removed(&self, id: &RefId) -> Self {
		let records: Vec<_> = self.records.iter().filter(|d| d.id() != id).cloned().collect();
		let by_id = records
			.iter()
			.enumerate()
			.map(|(slot, d)| (d.id().clone(), slot))
			.collect();
		Self { records, by_id }
	}
}

/// Ordered store of [`Dialogue`] records keyed by [`RefId`].
pub struct DialogueStore {
	snap: ArcSwap<Snapshot>,
}

impl Default for DialogueStore {
	fn default() -> Self {
		Self::new()
	}
}

impl DialogueStore {
	pub fn new() -> Self {
		Self {
			snap: ArcSwap::from_pointee(Snapshot::default()),
		}
	}

	/// Builds a store from records in order. A later record replaces an earlier
	/// one with the same id, keeping the earlier slot.
	pub fn from_records(records: impl IntoIterator<Item = Dialogue>) -> Self {
		let snap = records
			.into_iter()
			.fold(Snapshot::default(), |snap, d| snap.with_inserted(Arc::new(d)));
		Self {
			snap: ArcSwap::from_pointee(snap),
		}
	}

	/// Pins the current snapshot.
	pub fn snapshot(&self) -> Arc<Snapshot> {
		self.snap.load_full()
	}

	/// Exact identity lookup against the current snapshot.
	pub fn search(&self, id: &RefId) -> Option<Arc<Dialogue>> {
		self.snap.load().get(id).cloned()
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}

	/// Forward iteration over the current snapshot, in store order.
	pub fn iter(&self) -> Records {
		Records {
			snap: self.snapshot(),
			pos: 0,
		}
	}

	/// Publishes `dialogue`, replacing any record with the same id in place.
	/// Returns the replaced record.
	pub fn insert(&self, dialogue: Dialogue) -> Option<Arc<Dialogue>> {
		let dialogue = Arc::new(dialogue);
		let previous = self.snap.rcu(|current| current.with_inserted(dialogue.clone()));
		tracing::trace!(id = %dialogue.id(), kind = %dialogue.kind(), "published dialogue");
		previous.get(dialogue.id()).cloned()
	}

	/// Publishes `dialogue` only if its id is not present yet.
	pub fn insert_new(&self, dialogue: Dialogue) -> Result<Arc<Dialogue>> {
		if self.snap.load().get(dialogue.id()).is_some() {
			return Err(StoreError::DuplicateId(dialogue.id().clone()));
		}
		let dialogue = Arc::new(dialogue);
		self.snap.rcu(|current| current.with_inserted(dialogue.clone()));
		tracing::trace!(id = %dialogue.id(), kind = %dialogue.kind(), "published dialogue");
		Ok(dialogue)
	}

	/// Unpublishes the record with `id`. Later records move up one slot.
	pub fn remove(&self, id: &RefId) -> Option<Arc<Dialogue>> {
		if self.snap.load().get(id).is_none() {
			tracing::debug!(%id, "remove: no such dialogue");
			return None;
		}
		let previous = self.snap.rcu(|current| current.with_removed(id));
		tracing::trace!(%id, "unpublished dialogue");
		previous.get(id).cloned()
	}
}

/// Iterator over one pinned [`Snapshot`].
pub struct Records {
	snap: Arc<Snapshot>,
	pos: usize,
}

impl Iterator for Records {
	type Item = Arc<Dialogue>;

	fn next(&mut self) -> Option<Self::Item> {
		let record = self.snap.records.get(self.pos)?.clone();
		self.pos += 1;
		Some(record)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let rest = self.snap.records.len().saturating_sub(self.pos);
		(rest, Some(rest))
	}
}

impl ExactSizeIterator for Records {}
