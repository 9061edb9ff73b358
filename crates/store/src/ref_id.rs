use std::fmt;
use std::sync::Arc;

/// Stable, case-normalized record identity.
///
/// The text is lowercased (ASCII) on construction. Cloning is cheap.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(Arc<str>);

impl RefId {
	pub fn new(text: &str) -> Self {
		Self(Arc::from(text.to_ascii_lowercase()))
	}

	/// The unset identity. Serializes to `""`.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Text form handed to scripts.
	pub fn serialize_text(&self) -> &str {
		&self.0
	}

	/// Quoted, escaped form used inside `tostring` results.
	pub fn to_debug_string(&self) -> String {
		format!("{:?}", &*self.0)
	}
}

impl fmt::Debug for RefId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RefId({:?})", &*self.0)
	}
}

impl fmt::Display for RefId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for RefId {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<String> for RefId {
	fn from(text: String) -> Self {
		Self::new(&text)
	}
}
