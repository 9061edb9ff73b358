//! Iteration adapters.
//!
//! An adapter turns a value into a [`Pairs`] iterator. The host keeps adapters
//! by name so several usertypes can point their `__pairs`/`__ipairs` slots at
//! the same helper.

use std::vec;

use crate::error::Result;
use crate::host::Host;
use crate::table::Table;
use crate::value::Value;

/// Name under which [`Host::new`] installs [`ipairs_for_array`].
pub const IPAIRS_FOR_ARRAY: &str = "ipairsForArray";

/// Shared iteration helper stored in a usertype's `__pairs`/`__ipairs` slot.
pub type IterAdapter = for<'h> fn(&'h Host, Value) -> Pairs<'h>;

enum State {
	Array { target: Value, next: i64 },
	Entries(vec::IntoIter<(String, Value)>),
	Done,
}

/// Key/value iterator produced by `pairs`/`ipairs`.
///
/// Array-style iteration re-indexes the live target on every step, so it
/// observes changes made to the target's backing data between steps.
pub struct Pairs<'h> {
	host: &'h Host,
	state: State,
}

impl<'h> Pairs<'h> {
	/// Yields `(1, t[1]), (2, t[2]), ...` up to the first [`Value::Nothing`].
	pub fn array(host: &'h Host, target: Value) -> Self {
		Self {
			host,
			state: State::Array { target, next: 1 },
		}
	}

	pub(crate) fn entries(host: &'h Host, table: &Table) -> Self {
		Self {
			host,
			state: State::Entries(table.entries().into_iter()),
		}
	}
}

impl Iterator for Pairs<'_> {
	type Item = Result<(Value, Value)>;

	fn next(&mut self) -> Option<Self::Item> {
		let (key, result) = match &mut self.state {
			State::Done => return None,
			State::Entries(entries) => {
				return entries.next().map(|(k, v)| Ok((Value::String(k), v)));
			}
			State::Array { target, next } => {
				let key = *next;
				*next += 1;
				(key, self.host.index(target, &Value::Int(key)))
			}
		};
		match result {
			Ok(Value::Nothing) => {
				self.state = State::Done;
				None
			}
			Ok(value) => Some(Ok((Value::Int(key), value))),
			Err(err) => {
				self.state = State::Done;
				Some(Err(err))
			}
		}
	}
}

/// Array-style iteration for any value with an integer `__index`.
pub fn ipairs_for_array(host: &Host, target: Value) -> Pairs<'_> {
	Pairs::array(host, target)
}
