//! Per-type dispatch tables.

use std::any::Any;

use indexmap::IndexMap;

use crate::error::{HostError, Result};
use crate::iter::IterAdapter;
use crate::value::{Object, Value};

type Getter<T> = Box<dyn Fn(&T) -> Value + Send + Sync>;
type LenFn<T> = Box<dyn Fn(&T) -> usize + Send + Sync>;
type IndexIntFn<T> = Box<dyn Fn(&T, i64) -> Value + Send + Sync>;
type IndexStrFn<T> = Box<dyn Fn(&T, &str) -> Value + Send + Sync>;

/// Dispatch table describing how scripts interact with values of type `T`.
///
/// Built once, then handed to [`crate::Host::register`]. All slots are
/// optional; an unset slot makes the corresponding script operation fail with
/// [`HostError::NoMetamethod`] (or, for indexing, resolve to
/// [`Value::Nothing`] when no index slot exists at all).
pub struct UserType<T> {
	name: String,
	properties: IndexMap<String, Getter<T>>,
	to_string: Option<Getter<T>>,
	len: Option<LenFn<T>>,
	index_int: Option<IndexIntFn<T>>,
	index_str: Option<IndexStrFn<T>>,
	pairs: Option<IterAdapter>,
	ipairs: Option<IterAdapter>,
}

impl<T> UserType<T>
where
	T: Any + Send + Sync,
{
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			properties: IndexMap::new(),
			to_string: None,
			len: None,
			index_int: None,
			index_str: None,
			pairs: None,
			ipairs: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Adds a computed, read-only property. Later registrations under the same
	/// name replace earlier ones.
	pub fn readonly_property<F>(&mut self, name: impl Into<String>, getter: F) -> &mut Self
	where
		F: Fn(&T) -> Value + Send + Sync + 'static,
	{
		self.properties.insert(name.into(), Box::new(getter));
		self
	}

	/// `__tostring`. The callback may return [`Value::Nothing`].
	pub fn to_string<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(&T) -> Value + Send + Sync + 'static,
	{
		self.to_string = Some(Box::new(f));
		self
	}

	/// `__len`.
	pub fn len<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(&T) -> usize + Send + Sync + 'static,
	{
		self.len = Some(Box::new(f));
		self
	}

	/// `__index` overload for integer keys. Receives the script's raw key.
	pub fn index_int<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(&T, i64) -> Value + Send + Sync + 'static,
	{
		self.index_int = Some(Box::new(f));
		self
	}

	/// `__index` overload for string keys that do not name a property.
	pub fn index_str<F>(&mut self, f: F) -> &mut Self
	where
		F: Fn(&T, &str) -> Value + Send + Sync + 'static,
	{
		self.index_str = Some(Box::new(f));
		self
	}

	/// `__pairs`.
	pub fn pairs(&mut self, adapter: IterAdapter) -> &mut Self {
		self.pairs = Some(adapter);
		self
	}

	/// `__ipairs`.
	pub fn ipairs(&mut self, adapter: IterAdapter) -> &mut Self {
		self.ipairs = Some(adapter);
		self
	}

	pub fn property_names(&self) -> impl Iterator<Item = &str> {
		self.properties.keys().map(String::as_str)
	}

	fn this<'a>(&self, object: &'a Object) -> Result<&'a T> {
		object
			.downcast_ref::<T>()
			.ok_or(HostError::UnregisteredType(object.rust_type()))
	}

	fn no_overload(&self, key: &Value) -> HostError {
		HostError::NoMatchingOverload {
			type_name: self.name.clone(),
			key: key.get_type(),
		}
	}

	fn has_index(&self) -> bool {
		self.index_int.is_some() || self.index_str.is_some()
	}
}

/// Type-erased view of a [`UserType`], stored by the host.
pub(crate) trait ErasedUserType: Send + Sync {
	fn name(&self) -> &str;
	fn index(&self, object: &Object, key: &Value) -> Result<Value>;
	fn length(&self, object: &Object) -> Result<usize>;
	fn tostring(&self, object: &Object) -> Result<Option<Value>>;
	fn pairs(&self) -> Option<IterAdapter>;
	fn ipairs(&self) -> Option<IterAdapter>;
}

impl<T> ErasedUserType for UserType<T>
where
	T: Any + Send + Sync,
{
	fn name(&self) -> &str {
		&self.name
	}

	fn index(&self, object: &Object, key: &Value) -> Result<Value> {
		let this = self.this(object)?;
		match key {
			Value::String(name) => {
				if let Some(getter) = self.properties.get(name.as_str()) {
					return Ok(getter(this));
				}
				match &self.index_str {
					Some(index) => Ok(index(this, name)),
					None if self.index_int.is_some() => Err(self.no_overload(key)),
					None => {
						tracing::trace!(type_name = %self.name, key = %name, "unknown field");
						Ok(Value::Nothing)
					}
				}
			}
			Value::Int(i) => match &self.index_int {
				Some(index) => Ok(index(this, *i)),
				None if self.index_str.is_some() => Err(self.no_overload(key)),
				None => Ok(Value::Nothing),
			},
			_ if self.has_index() => Err(self.no_overload(key)),
			_ => Ok(Value::Nothing),
		}
	}

	fn length(&self, object: &Object) -> Result<usize> {
		let this = self.this(object)?;
		match &self.len {
			Some(len) => Ok(len(this)),
			None => Err(HostError::NoMetamethod {
				type_name: self.name.clone(),
				metamethod: "__len",
			}),
		}
	}

	fn tostring(&self, object: &Object) -> Result<Option<Value>> {
		let this = self.this(object)?;
		Ok(self.to_string.as_ref().map(|f| f(this)))
	}

	fn pairs(&self) -> Option<IterAdapter> {
		self.pairs
	}

	fn ipairs(&self) -> Option<IterAdapter> {
		self.ipairs
	}
}
