use thiserror::Error;

use crate::ref_id::RefId;

/// Errors raised by store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	/// [`crate::DialogueStore::insert_new`] found the id already published.
	#[error("dialogue {0} is already present")]
	DuplicateId(RefId),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
