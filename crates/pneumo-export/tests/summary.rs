use pneumo_export::docx::generate_docx;
use pneumo_export::error::ExportError;
use pneumo_export::render::{render_summary, render_template};
use pneumo_core::models::patient::Sex;
use pneumo_export::summary::{SummaryOptions, UNANSWERED, build_summary};
use pneumo_forms::Pathology;
use pneumo_forms::display::DisplayColor;
use pneumo_forms::pathologies::copd::Copd;
use serde_json::{Value, json};

fn copd_record() -> Value {
    Copd.validate(&json!({
        "generalSigns": {
            "fever": { "present": true, "temperature": 38.5 },
            "weightLoss": { "present": true, "quantified": { "present": true, "value": "4" } }
        },
        "spirometry": { "performed": true, "fev1": "1.2", "ratio": 55, "goldGrade": "3" },
        "exacerbations": { "lastYear": 2 },
        "treatment": { "inhaled": ["LAMA", "LABA"], "ventilation": { "present": false } },
        "history": { "smoking": { "status": "Ex-fumeur", "packYears": 40 } }
    }))
    .unwrap()
    .to_value()
}

#[test]
fn answered_fields_are_formatted() {
    let summary = build_summary("BPCO", Copd.display(), &copd_record(), &SummaryOptions::default());

    assert_eq!(summary.title, "BPCO");
    assert_eq!(summary.entry("VEMS/CVF").unwrap().value, "55 %");
    assert_eq!(summary.entry("Traitement inhalé").unwrap().value, "LAMA, LABA");
    assert_eq!(summary.entry("Tabagisme").unwrap().value, "Ex-fumeur");

    let grade = summary.entry("Grade GOLD").unwrap();
    assert_eq!(grade.value, "3");
    assert_eq!(grade.color, DisplayColor::Info);

    let exacerbations = summary.entry("Exacerbations sur 12 mois").unwrap();
    assert_eq!(exacerbations.value, "2");
    assert_eq!(exacerbations.color, DisplayColor::Warning);
}

#[test]
fn unanswered_fields_are_skipped_by_default() {
    let summary = build_summary("BPCO", Copd.display(), &copd_record(), &SummaryOptions::default());

    assert!(summary.entry("Score CAT").is_none());
    assert!(summary.entry("Ventilation non invasive").is_none());
    assert!(summary.entry("Hospitalisations").is_none());
    for group in &summary.groups {
        assert!(!group.entries.is_empty(), "{} kept empty", group.title);
    }
}

#[test]
fn unanswered_fields_can_be_shown() {
    let options = SummaryOptions {
        show_unanswered: true,
        sex: Some(Sex::Female),
    };
    let summary = build_summary("BPCO", Copd.display(), &copd_record(), &options);

    assert_eq!(summary.entry("Score CAT").unwrap().value, UNANSWERED);
    assert_eq!(summary.entry("Ventilation non invasive").unwrap().value, "Non");
    assert_eq!(summary.groups.len(), Copd.display().groups.len());
}

#[test]
fn sex_gated_groups_follow_the_patient() {
    let shown = |sex: Option<Sex>| {
        let options = SummaryOptions {
            show_unanswered: true,
            sex,
        };
        build_summary("BPCO", Copd.display(), &copd_record(), &options)
    };

    for sex in [Some(Sex::Male), None] {
        let summary = shown(sex);
        assert!(summary.entry("Grossesse").is_none(), "{sex:?}");
        assert!(summary.groups.iter().all(|g| g.title != "Gynéco-obstétrique"));
        assert_eq!(summary.entry("Tabagisme").unwrap().value, "Ex-fumeur");
    }

    let summary = shown(Some(Sex::Female));
    assert_eq!(summary.entry("Grossesse").unwrap().value, UNANSWERED);

    let pregnant = Copd
        .validate(&json!({ "gynecoObstetric": { "pregnancy": { "present": true, "weeks": 22 } } }))
        .unwrap()
        .to_value();
    let options = SummaryOptions {
        show_unanswered: false,
        sex: Some(Sex::Female),
    };
    let summary = build_summary("BPCO", Copd.display(), &pregnant, &options);
    let weeks = summary.entry("Grossesse").unwrap();
    assert_eq!(weeks.value, "22 SA");
    assert_eq!(weeks.color, DisplayColor::Warning);

    let options = SummaryOptions {
        show_unanswered: false,
        sex: Some(Sex::Male),
    };
    let summary = build_summary("BPCO", Copd.display(), &pregnant, &options);
    assert!(summary.entry("Grossesse").is_none());
}

#[test]
fn an_empty_record_has_no_groups() {
    let empty = Copd.validate(&json!({})).unwrap().to_value();
    let summary = build_summary("BPCO", Copd.display(), &empty, &SummaryOptions::default());
    assert!(summary.groups.is_empty());

    let summary = build_summary("BPCO", Copd.display(), &Value::Null, &SummaryOptions::default());
    assert!(summary.groups.is_empty());
}

#[test]
fn markdown_lists_groups_and_entries() {
    let summary = build_summary("BPCO", Copd.display(), &copd_record(), &SummaryOptions::default());
    let rendered = render_summary(&summary).unwrap();

    assert!(rendered.starts_with("# BPCO\n"));
    assert!(rendered.contains("## Sévérité"));
    assert!(rendered.contains("- **VEMS/CVF** : 55 %"));
    assert!(rendered.contains("- **Traitement inhalé** : LAMA, LABA"));
    assert!(!rendered.contains("Score CAT"));
}

#[test]
fn caller_templates_see_the_summary() {
    let summary = build_summary("BPCO", Copd.display(), &copd_record(), &SummaryOptions::default());
    let rendered = render_template(
        "groups.txt",
        "{{ title }}:{% for group in groups %} {{ group.title }}{% endfor %}",
        &summary,
    )
    .unwrap();
    assert!(rendered.starts_with("BPCO: Sévérité Exacerbations Traitement"));

    let err = render_template("broken.txt", "{% for %}", &summary).unwrap_err();
    assert!(matches!(err, ExportError::TemplateParse(_)));
}

#[test]
fn docx_is_a_zip_package() {
    let summary = build_summary("BPCO", Copd.display(), &copd_record(), &SummaryOptions::default());
    let bytes = generate_docx(&summary).unwrap();
    assert!(bytes.starts_with(b"PK"));
}
