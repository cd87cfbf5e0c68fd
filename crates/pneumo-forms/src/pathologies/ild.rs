use std::sync::LazyLock;

use crate::Pathology;
use crate::catalog::{Catalog, FieldDescriptor as Field, Section};
use crate::display::{DisplayColor, DisplayConfig, DisplayEntry as Entry, group};
use crate::pathologies::{build, common};

/// Interstitial lung disease (pneumopathie interstitielle diffuse).
/// Etiological work-up, exposures, pulmonary function and HRCT pattern.
pub struct InterstitialLungDisease;

impl Pathology for InterstitialLungDisease {
    fn id(&self) -> &str {
        "ild"
    }

    fn name(&self) -> &str {
        "Pneumopathie interstitielle diffuse"
    }

    fn catalog(&self) -> &'static Catalog {
        static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
            let mut sections = common::shared_sections();
            sections.extend([
                diagnosis_type(),
                exposures(),
                clinical_exam(),
                functional_tests(),
                imaging(),
            ]);
            build("ild", sections)
        });
        &CATALOG
    }

    fn display(&self) -> &'static DisplayConfig {
        static DISPLAY: LazyLock<DisplayConfig> = LazyLock::new(|| DisplayConfig {
            groups: vec![
                group(
                    "Diagnostic",
                    vec![
                        Entry::new("diagnosisType.ipf.present", "Fibrose pulmonaire idiopathique"),
                        Entry::new("diagnosisType.sarcoidosis.present", "Sarcoïdose"),
                        Entry::new("diagnosisType.hypersensitivity.antigen", "Pneumopathie d'hypersensibilité"),
                        Entry::new("diagnosisType.connectiveTissue.disease", "Connectivite"),
                        Entry::new("diagnosisType.other.details", "Autre diagnostic"),
                    ],
                ),
                common::presentation_group(),
                group(
                    "Explorations",
                    vec![
                        Entry::new("functionalTests.fvc", "CVF").unit("% théorique"),
                        Entry::new("functionalTests.dlco", "DLCO")
                            .unit("% théorique")
                            .color(DisplayColor::Warning),
                        Entry::new("functionalTests.sixMinuteWalk.distance", "TM6").unit("m"),
                        Entry::new("functionalTests.sixMinuteWalk.minSpo2", "SpO2 minimale").unit("%"),
                        Entry::new("imaging.hrct.pattern", "Pattern TDM").color(DisplayColor::Info),
                        Entry::new("imaging.hrct.honeycombing", "Rayon de miel").color(DisplayColor::Danger),
                    ],
                ),
                common::history_group(),
                common::gyneco_group(),
            ],
        });
        &DISPLAY
    }
}

fn diagnosis_type() -> Section {
    Section::new(
        "diagnosisType",
        "Orientation diagnostique",
        vec![
            Field::boolean("diagnosisType.ipf.present", "Fibrose pulmonaire idiopathique"),
            Field::boolean("diagnosisType.sarcoidosis.present", "Sarcoïdose").reveals(vec![
                Field::choice(
                    "diagnosisType.sarcoidosis.stage",
                    "Stade radiologique",
                    &["0", "I", "II", "III", "IV"],
                ),
            ]),
            Field::boolean("diagnosisType.hypersensitivity.present", "Pneumopathie d'hypersensibilité")
                .reveals(vec![Field::text("diagnosisType.hypersensitivity.antigen", "Antigène suspecté")]),
            Field::boolean("diagnosisType.connectiveTissue.present", "Connectivite").reveals(vec![
                Field::choice(
                    "diagnosisType.connectiveTissue.disease",
                    "Maladie",
                    &[
                        "Polyarthrite rhumatoïde",
                        "Sclérodermie",
                        "Myopathie inflammatoire",
                        "Syndrome de Sjögren",
                        "Lupus",
                    ],
                ),
            ]),
            Field::boolean("diagnosisType.other.present", "Autre")
                .reveals(vec![Field::textarea("diagnosisType.other.details", "Préciser")]),
        ],
    )
}

fn exposures() -> Section {
    Section::new(
        "exposures",
        "Expositions",
        vec![
            Field::multi_choice(
                "exposures.drugs",
                "Médicaments pneumotoxiques",
                &["Amiodarone", "Méthotrexate", "Nitrofurantoïne", "Bléomycine", "Immunothérapie"],
            ),
            Field::boolean("exposures.birds.present", "Contact aviaire"),
            Field::boolean("exposures.molds.present", "Moisissures"),
            Field::boolean("exposures.radiotherapy.present", "Radiothérapie thoracique")
                .reveals(vec![Field::number("exposures.radiotherapy.year", "Année", None)]),
        ],
    )
}

fn clinical_exam() -> Section {
    Section::new(
        "clinicalExam",
        "Examen clinique",
        vec![
            Field::boolean("clinicalExam.crackles.present", "Crépitants").reveals(vec![
                Field::choice("clinicalExam.crackles.location", "Localisation", &["Bases", "Diffus"]),
            ]),
            Field::boolean("clinicalExam.clubbing.present", "Hippocratisme digital"),
            Field::multi_choice(
                "clinicalExam.extrapulmonarySigns",
                "Signes extra-respiratoires",
                &["Raynaud", "Arthralgies", "Sclérodactylie", "Mains de mécanicien", "Éruption cutanée"],
            ),
            Field::number("clinicalExam.spo2", "SpO2 au repos", Some("%")),
        ],
    )
}

fn functional_tests() -> Section {
    Section::new(
        "functionalTests",
        "Explorations fonctionnelles",
        vec![
            Field::number("functionalTests.fvc", "CVF", Some("% théorique")),
            Field::number("functionalTests.tlc", "CPT", Some("% théorique")),
            Field::number("functionalTests.dlco", "DLCO", Some("% théorique")),
            Field::boolean("functionalTests.sixMinuteWalk.performed", "Test de marche de 6 minutes")
                .reveals(vec![
                    Field::number("functionalTests.sixMinuteWalk.distance", "Distance", Some("m")),
                    Field::number("functionalTests.sixMinuteWalk.minSpo2", "SpO2 minimale", Some("%")),
                ]),
        ],
    )
}

fn imaging() -> Section {
    Section::new(
        "imaging",
        "Imagerie",
        vec![
            Field::choice(
                "imaging.hrct.pattern",
                "Pattern TDM haute résolution",
                &["PIC typique", "PIC probable", "Indéterminé", "Diagnostic alternatif"],
            )
            .reveals_when(
                "Diagnostic alternatif",
                vec![Field::text("imaging.hrct.alternative", "Diagnostic évoqué")],
            ),
            Field::boolean("imaging.hrct.honeycombing", "Rayon de miel"),
            Field::boolean("imaging.hrct.tractionBronchiectasis", "Bronchectasies de traction"),
            Field::boolean("imaging.hrct.groundGlass", "Verre dépoli"),
        ],
    )
}
