//! Drives the dialogue bindings the way a script would: through host indexing,
//! length, `tostring` and the iteration adapters only.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use quill_dialogue::{BindingsConfig, register_dialogue_bindings};
use quill_host::{Host, HostError, Result, Table, Value, ValueType};
use quill_store::{DialInfo, Dialogue, DialogueKind, DialogueStore, QuestStatus, RefId};

struct Session {
	host: Host,
	store: Arc<DialogueStore>,
	api: Table,
}

impl Session {
	fn new(records: impl IntoIterator<Item = Dialogue>) -> Self {
		let _ = tracing_subscriber::fmt().with_test_writer().try_init();
		let host = Host::new();
		let store = Arc::new(DialogueStore::from_records(records));
		let api = register_dialogue_bindings(&host, store.clone(), &BindingsConfig::default()).expect("register");
		Self { host, store, api }
	}

	fn records(&self, kind: &str) -> Value {
		self.api.get(kind).as_table().expect("kind table").get("records")
	}

	fn get(&self, target: &Value, key: impl Into<Value>) -> Value {
		self.host.index(target, &key.into()).expect("index")
	}

	fn text(&self, target: &Value) -> Value {
		self.host.stringify(target).expect("tostring")
	}

	fn ipairs_ids(&self, target: &Value) -> Vec<(i64, String)> {
		self.host
			.ipairs(target)
			.expect("ipairs")
			.collect::<Result<Vec<_>>>()
			.expect("iteration")
			.into_iter()
			.map(|(k, v)| {
				let id = self.get(&v, "id");
				(k.as_int().unwrap(), id.as_str().unwrap().to_owned())
			})
			.collect()
	}
}

fn mixed() -> Vec<Dialogue> {
	vec![
		Dialogue::new("a", DialogueKind::Topic),
		Dialogue::new("b", DialogueKind::Journal),
		Dialogue::new("c", DialogueKind::Topic),
	]
}

fn ring_quest() -> Dialogue {
	let mut name = DialInfo::new("19511310302976825065");
	name.quest_status = QuestStatus::Name;
	name.response = "The Ring of Fargoth".to_owned();

	let mut stage = DialInfo::new("28032118321458930911");
	stage.data.index = 5;
	stage.quest_status = QuestStatus::Finished;
	stage.response = "I returned the ring.".to_owned();

	Dialogue::new("MS_FargothRing", DialogueKind::Journal).with_infos([name, stage])
}

fn greeting() -> Dialogue {
	let mut plain = DialInfo::new("g1");
	plain.data.rank = -1;
	plain.response = "Hello, outlander.".to_owned();

	let mut ranked = DialInfo::new("g2");
	ranked.data.rank = 3;
	ranked.data.index = 40;
	ranked.faction = RefId::new("Hlaalu");
	ranked.sound = "Vo\\D\\m\\Hlo_DM001.mp3".to_owned();

	Dialogue::new("Greeting 5", DialogueKind::Greeting).with_infos([plain, ranked])
}

#[test]
fn topic_store_over_mixed_records() {
	let s = Session::new(mixed());
	let topics = s.records("topic");

	assert_eq!(s.host.len(&topics).unwrap(), 2);
	assert_eq!(s.text(&topics), Value::string("{2 ESM3_Dialogue_Type0 records}"));
	assert_eq!(s.get(&s.get(&topics, 1), "id"), Value::string("a"));
	assert_eq!(s.get(&s.get(&topics, 2), "id"), Value::string("c"));
	assert_eq!(s.get(&topics, 3), Value::Nothing);
	assert_eq!(s.get(&topics, 0), Value::Nothing);
	assert_eq!(s.get(&topics, -1), Value::Nothing);
	assert_eq!(s.get(&topics, "b"), Value::Nothing);
	assert_eq!(s.get(&s.get(&topics, "C"), "name"), Value::string("c"));
	assert_eq!(s.ipairs_ids(&topics), [(1, "a".to_owned()), (2, "c".to_owned())]);
}

#[test]
fn pairs_and_ipairs_agree() {
	let s = Session::new(mixed());
	let topics = s.records("topic");
	let pairs: Vec<_> = s.host.pairs(&topics).unwrap().collect::<Result<_>>().unwrap();
	let ipairs: Vec<_> = s.host.ipairs(&topics).unwrap().collect::<Result<_>>().unwrap();
	assert_eq!(pairs, ipairs);
}

#[test]
fn record_tostring_and_fields() {
	let s = Session::new([ring_quest()]);
	let quest = s.get(&s.records("journal"), "ms_fargothring");

	assert_eq!(s.text(&quest), Value::string("ESM3_Dialogue[\"ms_fargothring\"]"));
	assert_eq!(s.get(&quest, "name"), Value::string("MS_FargothRing"));
	assert_eq!(s.get(&quest, "questName"), Value::string("The Ring of Fargoth"));
	assert_eq!(s.get(&quest, "unknownField"), Value::Nothing);
	assert_eq!(
		s.host.set(&quest, "name", Value::string("x")),
		Err(HostError::ReadOnly("name".to_owned()))
	);
}

#[test]
fn journal_infos_expose_quest_fields_only() {
	let s = Session::new([ring_quest()]);
	let infos = s.get(&s.get(&s.records("journal"), 1), "infos");

	assert_eq!(s.host.len(&infos).unwrap(), 2);
	assert_eq!(
		s.text(&infos),
		Value::string("{2 ESM3_Dialogue[\"ms_fargothring\"] info elements}")
	);

	let stage = s.get(&infos, 2);
	assert_eq!(s.text(&stage), Value::string("ESM3_Dialogue_Info[\"28032118321458930911\"]"));
	assert_eq!(s.get(&stage, "questStage"), Value::Int(5));
	assert_eq!(s.get(&stage, "questFinished"), Value::Bool(true));
	assert_eq!(s.get(&stage, "questRestart"), Value::Bool(false));
	assert_eq!(s.get(&stage, "text"), Value::string("I returned the ring."));
	assert_eq!(s.get(&stage, "filterActorDisposition"), Value::Nothing);
	assert_eq!(s.get(&stage, "filterActorFactionRank"), Value::Nothing);
	assert_eq!(s.get(&stage, "sound"), Value::Nothing);
}

#[test]
fn greeting_infos_expose_filters() {
	let s = Session::new([greeting()]);
	let infos = s.get(&s.get(&s.records("greeting"), "greeting 5"), "infos");
	let plain = s.get(&infos, 1);
	let ranked = s.get(&infos, 2);

	assert_eq!(s.get(&plain, "filterActorFactionRank"), Value::Nothing);
	assert_eq!(s.get(&plain, "filterActorFaction"), Value::Nothing);
	assert_eq!(s.get(&plain, "sound"), Value::Nothing);
	assert_eq!(s.get(&plain, "questStage"), Value::Nothing);

	assert_eq!(s.get(&ranked, "filterActorFactionRank"), Value::Int(3));
	assert_eq!(s.get(&ranked, "filterActorFaction"), Value::string("hlaalu"));
	assert_eq!(s.get(&ranked, "filterActorDisposition"), Value::Int(40));
	assert_eq!(s.get(&ranked, "sound"), Value::string("sound/vo/d/m/hlo_dm001.mp3"));
	assert_eq!(s.get(&ranked, "questFinished"), Value::Nothing);
}

#[test]
fn infos_reject_string_keys() {
	let s = Session::new([greeting()]);
	let infos = s.get(&s.get(&s.records("greeting"), 1), "infos");
	let err = s.host.index(&infos, &Value::string("g1")).unwrap_err();
	assert_eq!(
		err,
		HostError::NoMatchingOverload {
			type_name: "ESM3_Dialogue_Infos".to_owned(),
			key: ValueType::String,
		}
	);
}

#[test]
fn infos_go_stale_after_parent_removal() {
	let s = Session::new([ring_quest()]);
	let infos = s.get(&s.get(&s.records("journal"), 1), "infos");

	s.store.remove(&RefId::new("ms_fargothring"));

	assert_eq!(s.host.len(&infos).unwrap(), 0);
	assert_eq!(s.get(&infos, 1), Value::Nothing);
	assert_eq!(s.text(&infos), Value::Nothing);
	assert!(s.ipairs_ids(&infos).is_empty());
	assert_eq!(s.host.len(&s.records("journal")).unwrap(), 0);
}

#[test]
fn projections_follow_store_writes() {
	let s = Session::new(mixed());
	let topics = s.records("topic");
	s.store.insert(Dialogue::new("d", DialogueKind::Topic));
	s.store.remove(&RefId::new("a"));

	assert_eq!(s.text(&topics), Value::string("{2 ESM3_Dialogue_Type0 records}"));
	assert_eq!(s.ipairs_ids(&topics), [(1, "c".to_owned()), (2, "d".to_owned())]);
}

#[test]
fn api_table_is_read_only() {
	let s = Session::new(mixed());
	let api = Value::Table(s.api.clone());

	assert_eq!(
		s.host.set(&api, "journal", Value::Nothing),
		Err(HostError::ReadOnly("journal".to_owned()))
	);
	let journal = s.api.get("journal");
	assert_eq!(
		s.host.set(&journal, "records", Value::Int(1)),
		Err(HostError::ReadOnly("records".to_owned()))
	);
	assert!(s.api.get("journal").as_table().is_ok());
}

#[test]
fn non_integer_keys_on_store_are_rejected() {
	let s = Session::new(mixed());
	let err = s.host.index(&s.records("topic"), &Value::Bool(true)).unwrap_err();
	assert_eq!(
		err,
		HostError::NoMatchingOverload {
			type_name: "ESM3_Dialogue_Store".to_owned(),
			key: ValueType::Bool,
		}
	);
}
