//! Dialogue records and their info responses.

use std::fmt;
use std::sync::Arc;

use crate::ref_id::RefId;

/// Discriminator of a [`Dialogue`].
///
/// The numeric codes are the on-disk values and appear in script-facing type
/// names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DialogueKind {
	Topic,
	Voice,
	Greeting,
	Persuasion,
	Journal,
	#[default]
	Unknown,
}

impl DialogueKind {
	/// Every kind a dialogue can be published under.
	pub const ALL: [DialogueKind; 5] = [
		DialogueKind::Topic,
		DialogueKind::Voice,
		DialogueKind::Greeting,
		DialogueKind::Persuasion,
		DialogueKind::Journal,
	];

	pub const fn code(self) -> i32 {
		match self {
			Self::Topic => 0,
			Self::Voice => 1,
			Self::Greeting => 2,
			Self::Persuasion => 3,
			Self::Journal => 4,
			Self::Unknown => -1,
		}
	}

	pub const fn from_code(code: i32) -> Self {
		match code {
			0 => Self::Topic,
			1 => Self::Voice,
			2 => Self::Greeting,
			3 => Self::Persuasion,
			4 => Self::Journal,
			_ => Self::Unknown,
		}
	}
}

impl fmt::Display for DialogueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Topic => "topic",
			Self::Voice => "voice",
			Self::Greeting => "greeting",
			Self::Persuasion => "persuasion",
			Self::Journal => "journal",
			Self::Unknown => "unknown",
		};
		f.write_str(name)
	}
}

/// Journal bookkeeping attached to an info.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QuestStatus {
	#[default]
	None,
	/// The info's response is the quest's display name.
	Name,
	Finished,
	Restart,
}

/// Fixed-size numeric block of a [`DialInfo`].
///
/// `-1` in `rank`, `gender` and `pc_rank` means the condition is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoData {
	/// Copy of the owning dialogue's kind.
	pub kind: DialogueKind,
	/// Disposition for conversation kinds, journal index for [`DialogueKind::Journal`].
	pub index: i32,
	pub rank: i32,
	pub gender: i32,
	pub pc_rank: i32,
}

impl Default for InfoData {
	fn default() -> Self {
		Self {
			kind: DialogueKind::Unknown,
			index: 0,
			rank: -1,
			gender: -1,
			pc_rank: -1,
		}
	}
}

impl InfoData {
	pub fn disposition(&self) -> i32 {
		self.index
	}

	pub fn journal_index(&self) -> i32 {
		self.index
	}
}

/// One response of a dialogue, with the conditions that select it.
///
/// Empty ids and empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialInfo {
	pub id: RefId,
	pub data: InfoData,
	pub quest_status: QuestStatus,
	pub actor: RefId,
	pub race: RefId,
	pub class: RefId,
	pub faction: RefId,
	pub cell: RefId,
	pub pc_faction: RefId,
	pub sound: String,
	pub response: String,
	pub result_script: String,
}

impl DialInfo {
	pub fn new(id: &str) -> Self {
		Self {
			id: RefId::new(id),
			..Self::default()
		}
	}
}

/// A dialogue record: a topic, greeting, journal quest, etc.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialogue {
	id: RefId,
	name: String,
	kind: DialogueKind,
	infos: Vec<Arc<DialInfo>>,
}

impl Dialogue {
	/// Creates an empty dialogue. The id is the normalized `name`.
	pub fn new(name: impl Into<String>, kind: DialogueKind) -> Self {
		let name = name.into();
		Self {
			id: RefId::new(&name),
			name,
			kind,
			infos: Vec::new(),
		}
	}

	pub fn with_infos(mut self, infos: impl IntoIterator<Item = DialInfo>) -> Self {
		for info in infos {
			self.push_info(info);
		}
		self
	}

	/// Appends an info, stamping it with this dialogue's kind.
	pub fn push_info(&mut self, mut info: DialInfo) {
		info.data.kind = self.kind;
		self.infos.push(Arc::new(info));
	}

	pub fn id(&self) -> &RefId {
		&self.id
	}

	/// Display text, in its original casing.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn kind(&self) -> DialogueKind {
		self.kind
	}

	pub fn infos(&self) -> &[Arc<DialInfo>] {
		&self.infos
	}

	/// Response of the first [`QuestStatus::Name`] info. Journals only.
	pub fn quest_name(&self) -> Option<&str> {
		if self.kind != DialogueKind::Journal {
			return None;
		}
		self.infos
			.iter()
			.find(|info| info.quest_status == QuestStatus::Name)
			.map(|info| info.response.as_str())
	}
}

/// Anything carrying an identity and a discriminator.
pub trait Record {
	fn ref_id(&self) -> &RefId;
	fn kind(&self) -> DialogueKind;
}

impl Record for Dialogue {
	fn ref_id(&self) -> &RefId {
		&self.id
	}

	fn kind(&self) -> DialogueKind {
		self.kind
	}
}

impl Record for DialInfo {
	fn ref_id(&self) -> &RefId {
		&self.id
	}

	fn kind(&self) -> DialogueKind {
		self.data.kind
	}
}

#[cfg(test)]
mod tests;
