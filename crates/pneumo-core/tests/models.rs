use pneumo_core::models::patient::{PatientContext, Sex};
use pneumo_core::models::record::PathologyRecord;
use uuid::Uuid;

#[test]
fn sex_uses_single_letter_codes_on_the_wire() {
    assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"F\"");
    assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"M\"");
    let parsed: Sex = serde_json::from_str("\"F\"").unwrap();
    assert_eq!(parsed, Sex::Female);
}

#[test]
fn sex_parsing_matches_the_wire_format() {
    for raw in ["M", "F", "m", "f", " M ", "X", ""] {
        let parsed = raw.parse::<Sex>().ok();
        let decoded = serde_json::from_value::<Sex>(serde_json::json!(raw)).ok();
        assert_eq!(parsed, decoded, "{raw:?}");
    }
    assert_eq!("F".parse::<Sex>().unwrap(), Sex::Female);
    assert_eq!(Sex::Male.to_string().parse::<Sex>().unwrap(), Sex::Male);
}

#[test]
fn patient_context_fields_are_optional() {
    let ctx: PatientContext = serde_json::from_str("{}").unwrap();
    assert_eq!(ctx, PatientContext::default());

    let ctx: PatientContext = serde_json::from_str(r#"{"sex":"F"}"#).unwrap();
    assert_eq!(ctx.sex, Some(Sex::Female));
    assert!(ctx.patient_id.is_none());
}

#[test]
fn replacing_record_data_keeps_identity() {
    let patient = Uuid::new_v4();
    let mut record = PathologyRecord::new(patient, "copd", serde_json::json!({"a": 1}));
    let id = record.id;
    let created = record.created_at;

    record.replace_data(serde_json::json!({"a": 2}));

    assert_eq!(record.id, id);
    assert_eq!(record.created_at, created);
    assert!(record.updated_at >= created);
    assert_eq!(record.data["a"], 2);
}
