//! Declarative field tables for dialogue records and infos.
//!
//! Each script-visible property is one [`FieldSpec`] row: a presence gate on
//! the record's kind, a sentinel that marks the raw value as unset, and a
//! reader. The registrar turns every row into a read-only property; there is
//! no shared visibility flag, each row gates itself.

use std::sync::Arc;

use quill_host::Value;
use quill_store::DialogueKind::Journal;
use quill_store::{DialInfo, Dialogue, DialogueKind, DialogueStore, QuestStatus, Record, RefId, ResourcePaths};

use self::Presence::{Always, ExceptKind, OnlyKind};
use self::Sentinel::{Empty, MinusOne, Never};
use crate::projection::DialogueInfos;

/// When a field exists at all, by the record's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
	Always,
	OnlyKind(DialogueKind),
	ExceptKind(DialogueKind),
}

impl Presence {
	pub fn admits(self, kind: DialogueKind) -> bool {
		match self {
			Self::Always => true,
			Self::OnlyKind(k) => kind == k,
			Self::ExceptKind(k) => kind != k,
		}
	}
}

/// Raw value that means "unset" for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
	Never,
	MinusOne,
	Empty,
}

impl Sentinel {
	pub fn matches(self, value: &Value) -> bool {
		match (self, value) {
			(Self::MinusOne, Value::Int(-1)) => true,
			(Self::Empty, Value::String(s)) => s.is_empty(),
			_ => false,
		}
	}
}

/// Shared state field readers may need.
pub struct FieldContext {
	pub store: Arc<DialogueStore>,
	pub paths: ResourcePaths,
}

type Reader<T> = fn(&T, &FieldContext) -> Value;

/// One script-visible property of `T`.
pub struct FieldSpec<T> {
	pub name: &'static str,
	pub presence: Presence,
	pub sentinel: Sentinel,
	read: Reader<T>,
}

impl<T> FieldSpec<T> {
	const fn new(name: &'static str, presence: Presence, sentinel: Sentinel, read: Reader<T>) -> Self {
		Self {
			name,
			presence,
			sentinel,
			read,
		}
	}
}

impl<T: Record> FieldSpec<T> {
	/// Value scripts see: [`Value::Nothing`] when gated out or when the raw
	/// value is the sentinel.
	pub fn project(&self, record: &T, ctx: &FieldContext) -> Value {
		if !self.presence.admits(record.kind()) {
			return Value::Nothing;
		}
		let value = (self.read)(record, ctx);
		if self.sentinel.matches(&value) { Value::Nothing } else { value }
	}
}

fn id_text(id: &RefId) -> Value {
	Value::string(id.serialize_text())
}

/// Properties of a dialogue record.
pub static DIALOGUE_FIELDS: &[FieldSpec<Dialogue>] = &[
	FieldSpec::new("id", Always, Never, |d, _| id_text(d.id())),
	FieldSpec::new("name", Always, Never, |d, _| Value::string(d.name())),
	FieldSpec::new("questName", OnlyKind(Journal), Never, |d, _| Value::from(d.quest_name())),
	FieldSpec::new("infos", Always, Never, |d, ctx| {
		Value::object(DialogueInfos::new(ctx.store.clone(), d.id().clone()))
	}),
];

/// Properties of a dialogue info.
pub static INFO_FIELDS: &[FieldSpec<DialInfo>] = &[
	FieldSpec::new("id", Always, Never, |i, _| id_text(&i.id)),
	FieldSpec::new("text", Always, Never, |i, _| Value::string(&i.response)),
	FieldSpec::new("questStage", OnlyKind(Journal), Never, |i, _| Value::from(i.data.journal_index())),
	FieldSpec::new("questFinished", OnlyKind(Journal), Never, |i, _| {
		Value::Bool(i.quest_status == QuestStatus::Finished)
	}),
	FieldSpec::new("questRestart", OnlyKind(Journal), Never, |i, _| {
		Value::Bool(i.quest_status == QuestStatus::Restart)
	}),
	FieldSpec::new("filterActorId", ExceptKind(Journal), Empty, |i, _| id_text(&i.actor)),
	FieldSpec::new("filterActorRace", ExceptKind(Journal), Empty, |i, _| id_text(&i.race)),
	FieldSpec::new("filterActorClass", ExceptKind(Journal), Empty, |i, _| id_text(&i.class)),
	FieldSpec::new("filterActorFaction", ExceptKind(Journal), Empty, |i, _| id_text(&i.faction)),
	FieldSpec::new("filterActorFactionRank", ExceptKind(Journal), MinusOne, |i, _| Value::from(i.data.rank)),
	FieldSpec::new("filterActorCell", ExceptKind(Journal), Empty, |i, _| id_text(&i.cell)),
	FieldSpec::new("filterActorDisposition", ExceptKind(Journal), Never, |i, _| {
		Value::from(i.data.disposition())
	}),
	FieldSpec::new("filterActorGender", ExceptKind(Journal), MinusOne, |i, _| Value::from(i.data.gender)),
	FieldSpec::new("filterPlayerFaction", ExceptKind(Journal), Empty, |i, _| id_text(&i.pc_faction)),
	FieldSpec::new("filterPlayerFactionRank", ExceptKind(Journal), MinusOne, |i, _| Value::from(i.data.pc_rank)),
	FieldSpec::new("sound", ExceptKind(Journal), Empty, |i, ctx| {
		if i.sound.is_empty() {
			return Value::string("");
		}
		Value::string(ctx.paths.correct_sound_path(&i.sound))
	}),
	FieldSpec::new("resultScript", Always, Empty, |i, _| Value::string(&i.result_script)),
];

/// Looks up a row by script name.
pub fn find<T>(fields: &'static [FieldSpec<T>], name: &str) -> Option<&'static FieldSpec<T>> {
	fields.iter().find(|f| f.name == name)
}
