//! Error types for host protocol violations.

use thiserror::Error;

use crate::value::{ValueType, ValueTypeError};

/// Raised when a script uses the object protocol in a way no registered
/// dispatch slot accepts.
///
/// Domain-level misses (unknown id, index out of range) are never reported
/// here; they come back as [`crate::Value::Nothing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	/// The target has no notion of indexing.
	#[error("attempt to index a {0} value")]
	NotIndexable(ValueType),

	/// The usertype defines `__index` overloads, none of which accept the key type.
	#[error("no matching overload of '__index' on {type_name} for a {key} key")]
	NoMatchingOverload {
		/// Registered name of the usertype.
		type_name: String,
		/// Type of the rejected key.
		key: ValueType,
	},

	/// The usertype does not define the requested metamethod.
	#[error("'{metamethod}' is not defined for {type_name}")]
	NoMetamethod {
		/// Registered name of the usertype.
		type_name: String,
		/// Metamethod that was requested.
		metamethod: &'static str,
	},

	/// The target has no length.
	#[error("attempt to get length of a {0} value")]
	NoLength(ValueType),

	/// An object reached the host whose Rust type was never registered.
	#[error("no usertype registered for {0}")]
	UnregisteredType(&'static str),

	/// A dispatch table for this Rust type already exists.
	#[error("usertype for {rust_type} is already registered as '{existing}'")]
	DuplicateUserType {
		/// Rust type name of the rejected registration.
		rust_type: &'static str,
		/// Name under which the type was first registered.
		existing: String,
	},

	/// Assignment into a read-only table or a read-only property.
	#[error("attempt to modify read-only field '{0}'")]
	ReadOnly(String),

	/// The target is not a function.
	#[error("attempt to call a {0} value")]
	NotCallable(ValueType),

	/// A native function rejected one of its arguments.
	#[error("bad argument #{position} to '{function}' ({message})")]
	BadArgument {
		/// Name of the native function.
		function: String,
		/// 1-based argument position.
		position: usize,
		/// What was expected.
		message: String,
	},

	/// No iteration adapter was installed under the requested name.
	#[error("iteration adapter '{0}' is not installed")]
	MissingIterAdapter(String),

	/// A typed accessor was used on a value of another type.
	#[error(transparent)]
	Type(#[from] ValueTypeError),
}

/// Result type for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
