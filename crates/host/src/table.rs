use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::error::{HostError, Result};
use crate::value::Value;

#[derive(Default)]
struct TableInner {
	entries: RwLock<IndexMap<String, Value>>,
	read_only: AtomicBool,
}

/// Shared, string-keyed, insertion-ordered script table.
///
/// Clones alias the same storage, so a table stored in two places observes
/// every assignment made through either handle.
#[derive(Clone, Default)]
pub struct Table {
	inner: Arc<TableInner>,
}

impl Table {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value under `key`, or [`Value::Nothing`].
	pub fn get(&self, key: &str) -> Value {
		self.inner.entries.read().get(key).cloned().unwrap_or_default()
	}

	pub fn set(&self, key: impl Into<String>, value: Value) -> Result<()> {
		let key = key.into();
		if self.is_read_only() {
			return Err(HostError::ReadOnly(key));
		}
		self.inner.entries.write().insert(key, value);
		Ok(())
	}

	pub fn contains(&self, key: &str) -> bool {
		self.inner.entries.read().contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.inner.entries.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.entries.read().is_empty()
	}

	/// Copies out the current entries in insertion order.
	pub fn entries(&self) -> Vec<(String, Value)> {
		self.inner
			.entries
			.read()
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect()
	}

	/// Freezes the table. Further [`Table::set`] calls fail with [`HostError::ReadOnly`].
	///
	/// Freezing is shallow: nested tables keep their own mutability.
	pub fn make_read_only(self) -> Self {
		self.inner.read_only.store(true, Ordering::Release);
		self
	}

	pub fn is_read_only(&self) -> bool {
		self.inner.read_only.load(Ordering::Acquire)
	}

	pub(crate) fn addr(&self) -> *const () {
		Arc::as_ptr(&self.inner).cast::<()>()
	}
}

impl PartialEq for Table {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.inner, &other.inner)
	}
}

impl fmt::Debug for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_map().entries(self.inner.entries.read().iter()).finish()
	}
}
