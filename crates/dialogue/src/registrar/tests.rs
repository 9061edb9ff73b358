use pretty_assertions::assert_eq;
use quill_host::ValueType;
use quill_store::RefId;

use super::*;

fn store() -> Arc<DialogueStore> {
	Arc::new(DialogueStore::from_records([
		Dialogue::new("a", DialogueKind::Topic),
		Dialogue::new("b", DialogueKind::Journal),
	]))
}

fn register(host: &Host) -> Table {
	register_dialogue_bindings(host, store(), &BindingsConfig::default()).expect("bindings register")
}

#[test]
fn api_has_one_read_only_sub_table_per_kind() {
	let host = Host::new();
	let api = register(&host);

	let keys: Vec<_> = api.entries().into_iter().map(|(k, _)| k).collect();
	assert_eq!(keys, ["journal", "topic", "greeting", "persuasion", "voice"]);
	assert!(api.is_read_only());

	for (_, sub) in api.entries() {
		let sub = sub.as_table().expect("sub-table").clone();
		assert!(sub.is_read_only());
		assert!(sub.get("records").as_object().is_ok());
		assert!(matches!(sub.get("record"), Value::Function(_)));
	}
}

#[test]
fn every_usertype_is_registered() {
	let host = Host::new();
	register(&host);
	assert!(host.is_registered::<Dialogue>());
	assert!(host.is_registered::<quill_store::DialInfo>());
	assert!(host.is_registered::<FilteredDialogueStore>());
	assert!(host.is_registered::<DialogueInfos>());
}

#[test]
fn type_names_follow_prefix() {
	let host = Host::new();
	let config = BindingsConfig {
		type_prefix: "Dlg".to_owned(),
		..BindingsConfig::default()
	};
	let api = register_dialogue_bindings(&host, store(), &config).unwrap();
	let records = api.get("topic").as_table().unwrap().get("records");
	assert_eq!(host.type_name(&records).as_deref(), Some("Dlg_Store"));

	let first = host.index(&records, &Value::Int(1)).unwrap();
	assert_eq!(host.type_name(&first).as_deref(), Some("Dlg"));
	assert_eq!(host.stringify(&first).unwrap(), Value::string("Dlg[\"a\"]"));
}

#[test]
fn second_registration_fails() {
	let host = Host::new();
	register(&host);
	let err = register_dialogue_bindings(&host, store(), &BindingsConfig::default()).unwrap_err();
	assert!(
		matches!(err, RegistrarError::Host(HostError::DuplicateUserType { .. })),
		"{err}"
	);
}

#[test]
fn missing_adapter_fails_before_registering() {
	let host = Host::new();
	let config = BindingsConfig {
		iter_adapter: "pairsForMap".to_owned(),
		..BindingsConfig::default()
	};
	let err = register_dialogue_bindings(&host, store(), &config).unwrap_err();
	assert!(
		matches!(&err, RegistrarError::Host(HostError::MissingIterAdapter(name)) if name == "pairsForMap"),
		"{err}"
	);
	assert!(!host.is_registered::<Dialogue>());
}

#[test]
fn record_accepts_id_or_dialogue() {
	let host = Host::new();
	let api = register(&host);
	let journal = api.get("journal").as_table().unwrap().clone();
	let topic = api.get("topic").as_table().unwrap().clone();
	let record = journal.get("record");

	let b = host.call(&record, &[Value::string("B")]).unwrap();
	assert_eq!(b.downcast_ref::<Dialogue>().map(|d| d.id().clone()), Some(RefId::new("b")));
	assert_eq!(host.call(&record, &[b.clone()]).unwrap(), b);
	assert_eq!(host.call(&topic.get("record"), &[b]).unwrap(), Value::Nothing);
	assert_eq!(host.call(&record, &[Value::string("a")]).unwrap(), Value::Nothing);
}

#[test]
fn record_rejects_other_arguments() {
	let host = Host::new();
	let api = register(&host);
	let record = api.get("voice").as_table().unwrap().get("record");

	for (args, got) in [
		(vec![Value::Int(1)], ValueType::Int),
		(vec![], ValueType::Nothing),
		(vec![Value::Table(Table::new())], ValueType::Table),
	] {
		match host.call(&record, &args) {
			Err(HostError::BadArgument { function, position, message }) => {
				assert_eq!(function, "record");
				assert_eq!(position, 1);
				assert_eq!(message, format!("string or ESM3_Dialogue expected, got {got}"));
			}
			other => panic!("expected bad argument, got {other:?}"),
		}
	}
}
