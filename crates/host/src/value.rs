//! Host value model.
//!
//! This is the compact set of values that crosses the script boundary. It
//! supports only what the bindings need: scalars, strings, shared tables,
//! native functions and opaque Rust objects.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::host::Host;
use crate::table::Table;

type NativeFn = dyn Fn(&Host, &[Value]) -> Result<Value> + Send + Sync;

/// Native function callable from scripts.
#[derive(Clone)]
pub struct Function {
	name: Arc<str>,
	f: Arc<NativeFn>,
}

impl Function {
	pub fn new<F>(name: impl Into<Arc<str>>, f: F) -> Self
	where
		F: Fn(&Host, &[Value]) -> Result<Value> + Send + Sync + 'static,
	{
		Self {
			name: name.into(),
			f: Arc::new(f),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub(crate) fn invoke(&self, host: &Host, args: &[Value]) -> Result<Value> {
		(self.f)(host, args)
	}
}

impl fmt::Debug for Function {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Function({})", self.name)
	}
}

impl PartialEq for Function {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.f, &other.f)
	}
}

/// Opaque handle to a Rust value exposed to scripts as userdata.
///
/// Cloning an object shares the underlying value. Behavior is resolved by the
/// [`Host`] from the value's Rust type.
#[derive(Clone)]
pub struct Object {
	type_id: TypeId,
	rust_type: &'static str,
	data: Arc<dyn Any + Send + Sync>,
}

impl Object {
	pub fn new<T>(value: T) -> Self
	where
		T: Any + Send + Sync,
	{
		Self::from_arc(Arc::new(value))
	}

	/// Wraps an already shared value without copying it.
	pub fn from_arc<T>(value: Arc<T>) -> Self
	where
		T: Any + Send + Sync,
	{
		Self {
			type_id: TypeId::of::<T>(),
			rust_type: std::any::type_name::<T>(),
			data: value,
		}
	}

	pub fn type_id(&self) -> TypeId {
		self.type_id
	}

	pub fn rust_type(&self) -> &'static str {
		self.rust_type
	}

	pub fn is<T: Any>(&self) -> bool {
		self.type_id == TypeId::of::<T>()
	}

	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		(*self.data).downcast_ref::<T>()
	}

	pub(crate) fn addr(&self) -> *const () {
		Arc::as_ptr(&self.data).cast::<()>()
	}
}

impl fmt::Debug for Object {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Object({} @ {:p})", self.rust_type, self.addr())
	}
}

impl PartialEq for Object {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::addr_eq(self.addr(), other.addr())
	}
}

/// A value as seen by scripts.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
	/// The host's "no value". Returned for every absent field and every miss.
	#[default]
	Nothing,
	Bool(bool),
	Int(i64),
	String(String),
	Table(Table),
	Object(Object),
	Function(Function),
}

impl Value {
	pub fn string(val: impl Into<String>) -> Self {
		Self::String(val.into())
	}

	pub fn object<T>(val: T) -> Self
	where
		T: Any + Send + Sync,
	{
		Self::Object(Object::new(val))
	}

	pub fn object_arc<T>(val: Arc<T>) -> Self
	where
		T: Any + Send + Sync,
	{
		Self::Object(Object::from_arc(val))
	}

	pub fn get_type(&self) -> ValueType {
		match self {
			Self::Nothing => ValueType::Nothing,
			Self::Bool(_) => ValueType::Bool,
			Self::Int(_) => ValueType::Int,
			Self::String(_) => ValueType::String,
			Self::Table(_) => ValueType::Table,
			Self::Object(_) => ValueType::Object,
			Self::Function(_) => ValueType::Function,
		}
	}

	pub fn is_nothing(&self) -> bool {
		matches!(self, Self::Nothing)
	}

	pub fn as_bool(&self) -> std::result::Result<bool, ValueTypeError> {
		match self {
			Self::Bool(val) => Ok(*val),
			other => Err(ValueTypeError::new("bool", other.get_type())),
		}
	}

	pub fn as_int(&self) -> std::result::Result<i64, ValueTypeError> {
		match self {
			Self::Int(val) => Ok(*val),
			other => Err(ValueTypeError::new("int", other.get_type())),
		}
	}

	pub fn as_str(&self) -> std::result::Result<&str, ValueTypeError> {
		match self {
			Self::String(val) => Ok(val),
			other => Err(ValueTypeError::new("string", other.get_type())),
		}
	}

	pub fn as_table(&self) -> std::result::Result<&Table, ValueTypeError> {
		match self {
			Self::Table(val) => Ok(val),
			other => Err(ValueTypeError::new("table", other.get_type())),
		}
	}

	pub fn as_object(&self) -> std::result::Result<&Object, ValueTypeError> {
		match self {
			Self::Object(val) => Ok(val),
			other => Err(ValueTypeError::new("object", other.get_type())),
		}
	}

	/// Borrows the wrapped Rust value if this is an object of type `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Self::Object(obj) => obj.downcast_ref::<T>(),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(val: bool) -> Self {
		Self::Bool(val)
	}
}

impl From<i64> for Value {
	fn from(val: i64) -> Self {
		Self::Int(val)
	}
}

impl From<i32> for Value {
	fn from(val: i32) -> Self {
		Self::Int(i64::from(val))
	}
}

impl From<usize> for Value {
	fn from(val: usize) -> Self {
		Self::Int(i64::try_from(val).unwrap_or(i64::MAX))
	}
}

impl From<String> for Value {
	fn from(val: String) -> Self {
		Self::String(val)
	}
}

impl From<&str> for Value {
	fn from(val: &str) -> Self {
		Self::String(val.to_owned())
	}
}

impl From<Table> for Value {
	fn from(val: Table) -> Self {
		Self::Table(val)
	}
}

impl From<Object> for Value {
	fn from(val: Object) -> Self {
		Self::Object(val)
	}
}

impl From<Function> for Value {
	fn from(val: Function) -> Self {
		Self::Function(val)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(val: Option<T>) -> Self {
		val.map_or(Self::Nothing, Into::into)
	}
}

/// Coarse value type used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
	Nothing,
	Bool,
	Int,
	String,
	Table,
	Object,
	Function,
}

impl fmt::Display for ValueType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Nothing => "nil",
			Self::Bool => "boolean",
			Self::Int => "number",
			Self::String => "string",
			Self::Table => "table",
			Self::Object => "userdata",
			Self::Function => "function",
		};
		f.write_str(name)
	}
}

/// Error returned by typed accessors like [`Value::as_str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {got}")]
pub struct ValueTypeError {
	expected: &'static str,
	got: ValueType,
}

impl ValueTypeError {
	pub fn new(expected: &'static str, got: ValueType) -> Self {
		Self { expected, got }
	}
}
