//! Installs the dialogue usertypes on a host and builds the API table.

use std::sync::Arc;

use quill_host::{Function, Host, HostError, IterAdapter, Table, UserType, Value};
use quill_store::{Dialogue, DialogueKind, DialogueStore, Record, ResourcePaths};

use crate::config::BindingsConfig;
use crate::error::RegistrarError;
use crate::fields::{DIALOGUE_FIELDS, FieldContext, FieldSpec, INFO_FIELDS};
use crate::projection::{DialogueInfos, FilteredDialogueStore, KeyedProjection, Projection};

/// Sub-table order of the API table.
const API_KINDS: [DialogueKind; 5] = [
	DialogueKind::Journal,
	DialogueKind::Topic,
	DialogueKind::Greeting,
	DialogueKind::Persuasion,
	DialogueKind::Voice,
];

/// Registers every dialogue usertype on `host` and returns the read-only API
/// table (`journal`, `topic`, `greeting`, `persuasion`, `voice`).
///
/// Fails if any of the types is already registered on this host or if the
/// configured iteration adapter is not installed.
pub fn register_dialogue_bindings(
	host: &Host,
	store: Arc<DialogueStore>,
	config: &BindingsConfig,
) -> Result<Table, RegistrarError> {
	let adapter = host.iter_adapter(&config.iter_adapter)?;
	let config = Arc::new(config.clone());
	let ctx = Arc::new(FieldContext {
		store: store.clone(),
		paths: ResourcePaths::new(&config.sound_root),
	});

	let prefix = config.type_prefix.as_str();
	host.register(record_usertype(prefix.to_owned(), DIALOGUE_FIELDS, &ctx))?;
	host.register(record_usertype(format!("{prefix}_Info"), INFO_FIELDS, &ctx))?;

	let mut filtered = projection_usertype::<FilteredDialogueStore>(format!("{prefix}_Store"), &config, adapter);
	keyed(&mut filtered);
	host.register(filtered)?;
	host.register(projection_usertype::<DialogueInfos>(format!("{prefix}_Infos"), &config, adapter))?;

	let api = Table::new();
	for kind in API_KINDS {
		let records = FilteredDialogueStore::new(store.clone(), kind);
		let sub = Table::new();
		sub.set("records", Value::object(records.clone()))?;
		sub.set("record", Value::Function(record_function(records, prefix)))?;
		api.set(kind.to_string(), Value::Table(sub.make_read_only()))?;
	}

	tracing::info!(
		prefix = %config.type_prefix,
		iter_adapter = %config.iter_adapter,
		dialogues = store.len(),
		"dialogue bindings registered"
	);
	Ok(api.make_read_only())
}

/// Usertype for a record type, one read-only property per field row.
fn record_usertype<T>(name: String, fields: &'static [FieldSpec<T>], ctx: &Arc<FieldContext>) -> UserType<T>
where
	T: Record + Send + Sync + 'static,
{
	let mut ut = UserType::<T>::new(name.clone());
	for field in fields {
		let ctx = ctx.clone();
		ut.readonly_property(field.name, move |record| field.project(record, &ctx));
	}
	ut.to_string(move |record| Value::string(format!("{name}[{}]", record.ref_id().to_debug_string())));
	ut
}

/// Usertype for any [`Projection`]: `tostring`, `#`, integer index and both
/// iteration slots.
fn projection_usertype<P: Projection>(name: String, config: &Arc<BindingsConfig>, adapter: IterAdapter) -> UserType<P> {
	let mut ut = UserType::<P>::new(name);
	let config = config.clone();
	ut.to_string(move |p| Value::from(p.describe(&config)))
		.len(|p| p.len())
		.index_int(|p, index| {
			usize::try_from(index)
				.ok()
				.and_then(|index| p.at(index))
				.map_or(Value::Nothing, Value::object_arc)
		})
		.pairs(adapter)
		.ipairs(adapter);
	ut
}

/// Adds the string overload of `__index` for projections keyed by id.
fn keyed<P: KeyedProjection>(ut: &mut UserType<P>) {
	ut.index_str(|p, id| p.lookup(id).map_or(Value::Nothing, Value::object_arc));
}

/// `record(id)` / `record(dialogue)` restricted to one kind.
fn record_function(records: FilteredDialogueStore, prefix: &str) -> Function {
	let expected = format!("string or {prefix} expected");
	Function::new(format!("{}.record", records.kind()), move |_host, args| {
		let found = match args.first() {
			Some(Value::String(id)) => records.lookup(id),
			Some(Value::Object(obj)) if obj.is::<Dialogue>() => {
				obj.downcast_ref::<Dialogue>().and_then(|d| records.search(d.id()))
			}
			other => {
				let got = other.map_or(quill_host::ValueType::Nothing, Value::get_type);
				return Err(HostError::BadArgument {
					function: "record".to_owned(),
					position: 1,
					message: format!("{expected}, got {got}"),
				});
			}
		};
		Ok(found.map_or(Value::Nothing, Value::object_arc))
	})
}

#[cfg(test)]
mod tests;
