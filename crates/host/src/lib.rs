//! Object protocol of the embedded scripting host.
//!
//! Scripts never see Rust types directly. Every Rust value handed to a script
//! is wrapped in an [`Object`] whose behavior is looked up, by Rust type, in a
//! dispatch table ([`UserType`]) registered on the [`Host`]. The dispatch
//! table carries the metamethods a script can trigger:
//!
//! | Script operation | Dispatch slot |
//! |------------------|---------------|
//! | `tostring(v)` | [`UserType::to_string`] |
//! | `#v` | [`UserType::len`] |
//! | `v.name` | [`UserType::readonly_property`], then [`UserType::index_str`] |
//! | `v[i]` | [`UserType::index_int`] |
//! | `pairs(v)` / `ipairs(v)` | [`UserType::pairs`] / [`UserType::ipairs`] |
//!
//! # Conventions
//!
//! - Indices seen by scripts are 1-based.
//! - [`Value::Nothing`] is a first-class result, distinct from every domain
//!   value. Lookups that miss return it; they do not fail.
//! - A [`HostError`] means the script misused the protocol (indexed a number,
//!   used a key type no overload accepts, wrote to a read-only table).

mod error;
mod host;
mod iter;
mod table;
mod usertype;
mod value;

pub use error::{HostError, Result};
pub use host::Host;
pub use iter::{IPAIRS_FOR_ARRAY, IterAdapter, Pairs, ipairs_for_array};
pub use table::Table;
pub use usertype::UserType;
pub use value::{Function, Object, Value, ValueType, ValueTypeError};
