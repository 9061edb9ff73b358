use pretty_assertions::assert_eq;

use super::*;

#[test]
fn push_info_stamps_parent_kind() {
	let mut info = DialInfo::new("1");
	info.data.kind = DialogueKind::Topic;
	let journal = Dialogue::new("A2_1_MeetSellusGravius", DialogueKind::Journal).with_infos([info]);

	assert_eq!(journal.infos()[0].data.kind, DialogueKind::Journal);
	assert_eq!(Record::kind(journal.infos()[0].as_ref()), DialogueKind::Journal);
}

#[test]
fn dialogue_id_is_normalized_name_is_not() {
	let topic = Dialogue::new("Little Advice", DialogueKind::Topic);
	assert_eq!(topic.id().serialize_text(), "little advice");
	assert_eq!(topic.name(), "Little Advice");
}

#[test]
fn quest_name_is_first_name_info_of_a_journal() {
	let infos = [
		DialInfo {
			response: "entry".into(),
			..DialInfo::new("1")
		},
		DialInfo {
			quest_status: QuestStatus::Name,
			response: "Report to Caius".into(),
			..DialInfo::new("2")
		},
		DialInfo {
			quest_status: QuestStatus::Name,
			response: "later".into(),
			..DialInfo::new("3")
		},
	];
	let journal = Dialogue::new("a1_1", DialogueKind::Journal).with_infos(infos.clone());
	assert_eq!(journal.quest_name(), Some("Report to Caius"));

	let topic = Dialogue::new("a1_1", DialogueKind::Topic).with_infos(infos);
	assert_eq!(topic.quest_name(), None);
}

#[test]
fn kind_codes_round_trip() {
	for kind in DialogueKind::ALL {
		assert_eq!(DialogueKind::from_code(kind.code()), kind);
	}
	assert_eq!(DialogueKind::from_code(17), DialogueKind::Unknown);
	assert_eq!(DialogueKind::Unknown.code(), -1);
}

#[test]
fn info_defaults_use_unset_sentinels() {
	let info = DialInfo::new("x");
	assert_eq!(info.data.rank, -1);
	assert_eq!(info.data.gender, -1);
	assert_eq!(info.data.pc_rank, -1);
	assert!(info.actor.is_empty());
}

#[test]
fn ref_id_forms() {
	let id = RefId::new("Caius \"Cosades\"");
	assert_eq!(id.serialize_text(), "caius \"cosades\"");
	assert_eq!(id.to_debug_string(), "\"caius \\\"cosades\\\"\"");
	assert_eq!(RefId::from("ABC"), RefId::new("abc"));
	assert_eq!(RefId::empty().serialize_text(), "");
}
