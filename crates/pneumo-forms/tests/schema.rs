use pneumo_forms::path::FieldPath;
use pneumo_forms::pathologies::copd::Copd;
use pneumo_forms::pathologies::pleural_effusion::PleuralEffusion;
use pneumo_forms::schema::validate;
use pneumo_forms::value::FieldKind;
use pneumo_forms::{Pathology, all_pathologies};
use serde_json::{Value, json};

fn p(raw: &str) -> FieldPath {
    FieldPath::parse(raw).unwrap()
}

#[test]
fn empty_submission_validates_with_every_default() {
    for pathology in all_pathologies() {
        for input in [json!({}), Value::Null] {
            let record = pathology
                .validate(&input)
                .unwrap_or_else(|e| panic!("{}: {e}", pathology.id()));
            assert_eq!(record.pathology_id, pathology.id());

            for descriptor in pathology.catalog().descriptors() {
                let stored = record
                    .get(&descriptor.path)
                    .unwrap_or_else(|| panic!("{} missing", descriptor.path));
                assert_eq!(*stored, descriptor.kind.default_value().to_json(), "{}", descriptor.path);
                if matches!(descriptor.kind, FieldKind::Boolean) {
                    assert_eq!(*stored, json!(false));
                }

                let mut ancestor = descriptor.path.parent();
                while let Some(prefix) = ancestor {
                    assert!(record.get(&prefix).is_some_and(Value::is_object), "{prefix}");
                    ancestor = prefix.parent();
                }
            }
        }
    }
}

#[test]
fn validating_a_validated_record_changes_nothing() {
    let input = json!({
        "generalSigns": {
            "fever": { "present": true, "temperature": "38.9" },
            "weightLoss": { "present": true, "quantified": { "present": true, "value": 7 } }
        },
        "functionalSigns": {
            "cough": { "present": true, "type": "Productive", "timing": ["Matinale"] }
        },
        "spirometry": { "performed": true, "fev1": "abc", "ratio": 52.4 },
        "treatment": { "inhaled": ["LAMA", "LABA"] },
        "history": { "smoking": { "status": "Ex-fumeur", "packYears": "" } }
    });

    let first = Copd.validate(&input).unwrap();
    let second = Copd.validate(&first.to_value()).unwrap();
    assert_eq!(first, second);

    for pathology in all_pathologies() {
        let empty = pathology.validate(&json!({})).unwrap();
        assert_eq!(pathology.validate(&empty.to_value()).unwrap(), empty);
    }
}

#[test]
fn numeric_fields_never_fail_validation() {
    let record = Copd
        .validate(&json!({
            "spirometry": {
                "fev1": "1.8",
                "fvc": "n/a",
                "ratio": true,
                "fev1Percent": ["48"],
                "goldGrade": "3"
            },
            "scores": { "cat": 22 },
            "exacerbations": { "lastYear": null }
        }))
        .unwrap();

    assert_eq!(record.get(&p("spirometry.fev1")).and_then(Value::as_f64), Some(1.8));
    assert_eq!(record.get(&p("spirometry.fvc")), Some(&Value::Null));
    assert_eq!(record.get(&p("spirometry.ratio")), Some(&Value::Null));
    assert_eq!(record.get(&p("spirometry.fev1Percent")), Some(&Value::Null));
    assert_eq!(record.get(&p("scores.cat")).and_then(Value::as_f64), Some(22.0));
    assert_eq!(record.get(&p("exacerbations.lastYear")), Some(&Value::Null));
    assert_eq!(record.get(&p("spirometry.goldGrade")), Some(&json!("3")));
}

#[test]
fn every_bad_field_is_reported_without_stopping_at_the_first() {
    let failure = Copd
        .validate(&json!({
            "functionalSigns": { "cough": { "present": "yes", "type": "Grasse" } },
            "treatment": { "inhaled": ["LAMA", 3], "inhalerTechnique": 1 },
            "scores": { "goldGroup": "" }
        }))
        .unwrap_err();

    assert_eq!(failure.pathology_id, "copd");
    assert_eq!(failure.issues.len(), 4);
    assert!(failure.issue("functionalSigns.cough.present").is_some());
    assert!(
        failure
            .issue("functionalSigns.cough.type")
            .is_some_and(|i| i.message.contains("Grasse") && i.message.contains("Sèche"))
    );
    assert!(failure.issue("treatment.inhaled").is_some());
    assert!(failure.issue("treatment.inhalerTechnique").is_some());
    assert!(failure.issue("scores.goldGroup").is_none());
}

#[test]
fn a_scalar_where_an_object_belongs_is_reported_once() {
    let failure = PleuralEffusion
        .validate(&json!({ "thoracentesis": 12, "clinicalExam": { "side": "Droite" } }))
        .unwrap_err();

    assert_eq!(failure.issues.len(), 1);
    let issue = failure.issue("thoracentesis").unwrap();
    assert!(issue.message.contains("number"));
}

#[test]
fn a_non_object_record_is_rejected_at_the_root() {
    let failure = validate(Copd.catalog(), &json!([1, 2])).unwrap_err();
    assert_eq!(failure.issues.len(), 1);
    assert_eq!(failure.issues[0].path, "");
}

#[test]
fn undeclared_keys_are_dropped() {
    let record = Copd
        .validate(&json!({
            "spirometry": { "fev1": 1.1, "comment": "x" },
            "legacy": { "flag": true }
        }))
        .unwrap();

    assert!(record.data.get("legacy").is_none());
    assert!(record.get(&p("spirometry.comment")).is_none());
}

#[test]
fn hidden_values_survive_submission() {
    let record = PleuralEffusion
        .validate(&json!({
            "thoracentesis": { "performed": false, "appearance": "Citrin", "proteins": "42" },
            "diagnosisType": { "other": { "present": false, "details": "Syndrome de Meigs" } }
        }))
        .unwrap();

    assert_eq!(record.get(&p("thoracentesis.appearance")), Some(&json!("Citrin")));
    assert_eq!(record.get(&p("thoracentesis.proteins")).and_then(Value::as_f64), Some(42.0));
    assert_eq!(
        record.get(&p("diagnosisType.other.details")),
        Some(&json!("Syndrome de Meigs"))
    );
}

#[test]
fn other_diagnosis_details_default_to_blank() {
    for id in ["ild", "pleural_effusion"] {
        let pathology = pneumo_forms::get_pathology(id).unwrap();
        let record = pathology
            .validate(&json!({ "diagnosisType": { "other": { "present": true } } }))
            .unwrap();
        assert_eq!(record.get(&p("diagnosisType.other.details")), Some(&json!("")));
    }
}
