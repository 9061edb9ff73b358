use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::error::{HostError, Result};
use crate::iter::{IPAIRS_FOR_ARRAY, IterAdapter, Pairs, ipairs_for_array};
use crate::table::Table;
use crate::usertype::{ErasedUserType, UserType};
use crate::value::{Object, Value, ValueType};

/// The scripting host: usertype registry, globals and the protocol entry
/// points scripts go through.
///
/// Dispatch tables are cloned out of the registry before a callback runs, so
/// callbacks may call back into the host.
pub struct Host {
	types: RwLock<FxHashMap<TypeId, Arc<dyn ErasedUserType>>>,
	adapters: RwLock<FxHashMap<String, IterAdapter>>,
	globals: Table,
}

impl Default for Host {
	fn default() -> Self {
		Self::new()
	}
}

impl Host {
	/// Creates a host with the [`IPAIRS_FOR_ARRAY`] adapter installed.
	pub fn new() -> Self {
		let host = Self {
			types: RwLock::new(FxHashMap::default()),
			adapters: RwLock::new(FxHashMap::default()),
			globals: Table::new(),
		};
		host.install_iter_adapter(IPAIRS_FOR_ARRAY, ipairs_for_array);
		host
	}

	/// Registers the dispatch table for `T`. A Rust type can be registered once
	/// per host.
	pub fn register<T>(&self, usertype: UserType<T>) -> Result<()>
	where
		T: Any + Send + Sync,
	{
		let mut types = self.types.write();
		match types.entry(TypeId::of::<T>()) {
			Entry::Occupied(existing) => Err(HostError::DuplicateUserType {
				rust_type: std::any::type_name::<T>(),
				existing: existing.get().name().to_owned(),
			}),
			Entry::Vacant(slot) => {
				tracing::debug!(name = usertype.name(), rust_type = std::any::type_name::<T>(), "registered usertype");
				slot.insert(Arc::new(usertype));
				Ok(())
			}
		}
	}

	pub fn is_registered<T: Any>(&self) -> bool {
		self.types.read().contains_key(&TypeId::of::<T>())
	}

	/// Registered name of the object's usertype, if any.
	pub fn type_name(&self, value: &Value) -> Option<String> {
		let Value::Object(obj) = value else {
			return None;
		};
		self.types.read().get(&obj.type_id()).map(|ut| ut.name().to_owned())
	}

	pub fn install_iter_adapter(&self, name: impl Into<String>, adapter: IterAdapter) {
		self.adapters.write().insert(name.into(), adapter);
	}

	pub fn iter_adapter(&self, name: &str) -> Result<IterAdapter> {
		self.adapters
			.read()
			.get(name)
			.copied()
			.ok_or_else(|| HostError::MissingIterAdapter(name.to_owned()))
	}

	pub fn globals(&self) -> &Table {
		&self.globals
	}

	/// `target[key]`.
	pub fn index(&self, target: &Value, key: &Value) -> Result<Value> {
		match target {
			Value::Object(obj) => self.usertype(obj)?.index(obj, key),
			Value::Table(table) => Ok(match key {
				Value::String(name) => table.get(name),
				_ => Value::Nothing,
			}),
			other => Err(HostError::NotIndexable(other.get_type())),
		}
	}

	/// `target.key = value`. Usertype properties are always read-only.
	pub fn set(&self, target: &Value, key: &str, value: Value) -> Result<()> {
		match target {
			Value::Table(table) => table.set(key, value),
			Value::Object(_) => Err(HostError::ReadOnly(key.to_owned())),
			other => Err(HostError::NotIndexable(other.get_type())),
		}
	}

	/// `#target`.
	pub fn len(&self, target: &Value) -> Result<usize> {
		match target {
			Value::Object(obj) => self.usertype(obj)?.length(obj),
			Value::Table(table) => Ok(table.len()),
			Value::String(s) => Ok(s.len()),
			other => Err(HostError::NoLength(other.get_type())),
		}
	}

	/// `tostring(target)`.
	///
	/// A usertype's `__tostring` may produce [`Value::Nothing`]; that result is
	/// passed through unchanged.
	pub fn stringify(&self, target: &Value) -> Result<Value> {
		let text = match target {
			Value::Nothing => "nil".to_owned(),
			Value::Bool(b) => b.to_string(),
			Value::Int(i) => i.to_string(),
			Value::String(s) => s.clone(),
			Value::Table(table) => format!("table: {:p}", table.addr()),
			Value::Function(f) => format!("function: {}", f.name()),
			Value::Object(obj) => {
				let usertype = self.usertype(obj)?;
				if let Some(value) = usertype.tostring(obj)? {
					return Ok(value);
				}
				format!("{}: {:p}", usertype.name(), obj.addr())
			}
		};
		Ok(Value::String(text))
	}

	/// `pairs(target)`.
	pub fn pairs(&self, target: &Value) -> Result<Pairs<'_>> {
		match target {
			Value::Object(obj) => {
				let usertype = self.usertype(obj)?;
				let adapter = usertype.pairs().ok_or_else(|| HostError::NoMetamethod {
					type_name: usertype.name().to_owned(),
					metamethod: "__pairs",
				})?;
				Ok(adapter(self, target.clone()))
			}
			Value::Table(table) => Ok(Pairs::entries(self, table)),
			other => Err(iteration_argument("pairs", other.get_type())),
		}
	}

	/// `ipairs(target)`.
	pub fn ipairs(&self, target: &Value) -> Result<Pairs<'_>> {
		match target {
			Value::Object(obj) => {
				let usertype = self.usertype(obj)?;
				let adapter = usertype.ipairs().ok_or_else(|| HostError::NoMetamethod {
					type_name: usertype.name().to_owned(),
					metamethod: "__ipairs",
				})?;
				Ok(adapter(self, target.clone()))
			}
			Value::Table(_) => Ok(Pairs::array(self, target.clone())),
			other => Err(iteration_argument("ipairs", other.get_type())),
		}
	}

	/// `function(args...)`.
	pub fn call(&self, function: &Value, args: &[Value]) -> Result<Value> {
		match function {
			Value::Function(f) => f.invoke(self, args),
			other => Err(HostError::NotCallable(other.get_type())),
		}
	}

	fn usertype(&self, obj: &Object) -> Result<Arc<dyn ErasedUserType>> {
		self.types
			.read()
			.get(&obj.type_id())
			.cloned()
			.ok_or(HostError::UnregisteredType(obj.rust_type()))
	}
}

fn iteration_argument(function: &str, got: ValueType) -> HostError {
	HostError::BadArgument {
		function: function.to_owned(),
		position: 1,
		message: format!("table expected, got {got}"),
	}
}
