use std::sync::LazyLock;

use crate::Pathology;
use crate::catalog::{Catalog, FieldDescriptor as Field, Section};
use crate::display::{DisplayColor, DisplayConfig, DisplayEntry as Entry, group};
use crate::pathologies::{build, common};

const SIDE: &[&str] = &["Droite", "Gauche", "Bilatérale"];

/// Pleural effusion (pleurésie): imaging, thoracentesis and fluid analysis,
/// etiological orientation.
pub struct PleuralEffusion;

impl Pathology for PleuralEffusion {
    fn id(&self) -> &str {
        "pleural_effusion"
    }

    fn name(&self) -> &str {
        "Épanchement pleural liquidien"
    }

    fn catalog(&self) -> &'static Catalog {
        static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
            let mut sections = common::shared_sections();
            sections.extend([clinical_exam(), imaging(), thoracentesis(), diagnosis_type()]);
            build("pleural_effusion", sections)
        });
        &CATALOG
    }

    fn display(&self) -> &'static DisplayConfig {
        static DISPLAY: LazyLock<DisplayConfig> = LazyLock::new(|| DisplayConfig {
            groups: vec![
                common::presentation_group(),
                group(
                    "Épanchement",
                    vec![
                        Entry::new("clinicalExam.side", "Côté"),
                        Entry::new("imaging.chestXray.abundance", "Abondance"),
                        Entry::new("imaging.ultrasound.septations", "Cloisonnement").color(DisplayColor::Warning),
                    ],
                ),
                group(
                    "Ponction pleurale",
                    vec![
                        Entry::new("thoracentesis.appearance", "Aspect"),
                        Entry::new("thoracentesis.proteins", "Protides").unit("g/L"),
                        Entry::new("thoracentesis.ldh", "LDH").unit("UI/L"),
                        Entry::new("thoracentesis.glucose", "Glucose").unit("g/L"),
                        Entry::new("thoracentesis.ph", "pH"),
                        Entry::new("thoracentesis.lightCriteria", "Critères de Light").color(DisplayColor::Info),
                        Entry::new("thoracentesis.cytology", "Cytologie"),
                    ],
                ),
                group(
                    "Orientation",
                    vec![
                        Entry::new("diagnosisType.heartFailure.present", "Insuffisance cardiaque"),
                        Entry::new("diagnosisType.tuberculosis.present", "Tuberculose").color(DisplayColor::Danger),
                        Entry::new("diagnosisType.malignant.primary", "Néoplasique").color(DisplayColor::Danger),
                        Entry::new("diagnosisType.parapneumonic.present", "Parapneumonique"),
                        Entry::new("diagnosisType.other.details", "Autre diagnostic"),
                    ],
                ),
                common::history_group(),
                common::gyneco_group(),
            ],
        });
        &DISPLAY
    }
}

fn clinical_exam() -> Section {
    Section::new(
        "clinicalExam",
        "Examen clinique",
        vec![
            Field::choice("clinicalExam.side", "Côté", SIDE),
            Field::boolean("clinicalExam.dullness.present", "Matité"),
            Field::boolean("clinicalExam.decreasedBreathSounds.present", "Abolition du murmure vésiculaire"),
            Field::boolean("clinicalExam.pleuralRub.present", "Frottement pleural"),
            Field::boolean("clinicalExam.heartFailureSigns.present", "Signes d'insuffisance cardiaque")
                .reveals(vec![Field::multi_choice(
                    "clinicalExam.heartFailureSigns.signs",
                    "Signes",
                    &["Œdèmes des membres inférieurs", "Turgescence jugulaire", "Reflux hépato-jugulaire"],
                )]),
        ],
    )
}

fn imaging() -> Section {
    Section::new(
        "imaging",
        "Imagerie",
        vec![
            Field::choice(
                "imaging.chestXray.abundance",
                "Abondance à la radiographie",
                &["Minime", "Moyenne", "Grande abondance"],
            ),
            Field::boolean("imaging.ultrasound.performed", "Échographie pleurale").reveals(vec![
                Field::boolean("imaging.ultrasound.septations", "Cloisons"),
                Field::choice(
                    "imaging.ultrasound.echogenicity",
                    "Échogénicité",
                    &["Anéchogène", "Échogène homogène", "Échogène hétérogène"],
                ),
            ]),
            Field::boolean("imaging.ct.performed", "Scanner thoracique")
                .reveals(vec![Field::textarea("imaging.ct.findings", "Résultats")]),
        ],
    )
}

fn thoracentesis() -> Section {
    Section::new(
        "thoracentesis",
        "Ponction pleurale",
        vec![Field::boolean("thoracentesis.performed", "Ponction réalisée").reveals(vec![
            Field::choice(
                "thoracentesis.appearance",
                "Aspect du liquide",
                &["Citrin", "Séro-hématique", "Hémorragique", "Trouble", "Purulent", "Chyleux"],
            ),
            Field::number("thoracentesis.volume", "Volume évacué", Some("mL")),
            Field::number("thoracentesis.proteins", "Protides", Some("g/L")),
            Field::number("thoracentesis.ldh", "LDH", Some("UI/L")),
            Field::number("thoracentesis.glucose", "Glucose", Some("g/L")),
            Field::number("thoracentesis.ph", "pH", None),
            Field::choice("thoracentesis.lightCriteria", "Critères de Light", &["Exsudat", "Transsudat"]),
            Field::multi_choice(
                "thoracentesis.cytology",
                "Cytologie",
                &["Lymphocytaire", "Neutrophilique", "Éosinophilique", "Cellules malignes"],
            ),
            Field::boolean("thoracentesis.culture.positive", "Culture positive")
                .reveals(vec![Field::text("thoracentesis.culture.organism", "Germe")]),
        ])],
    )
}

fn diagnosis_type() -> Section {
    Section::new(
        "diagnosisType",
        "Orientation étiologique",
        vec![
            Field::boolean("diagnosisType.heartFailure.present", "Insuffisance cardiaque"),
            Field::boolean("diagnosisType.tuberculosis.present", "Tuberculose pleurale"),
            Field::boolean("diagnosisType.malignant.present", "Pleurésie néoplasique").reveals(vec![
                Field::choice(
                    "diagnosisType.malignant.primary",
                    "Néoplasie primitive",
                    &["Poumon", "Sein", "Mésothéliome", "Lymphome", "Autre", "Inconnue"],
                ),
            ]),
            Field::boolean("diagnosisType.parapneumonic.present", "Épanchement parapneumonique")
                .reveals(vec![Field::boolean("diagnosisType.parapneumonic.empyema", "Empyème")]),
            Field::boolean("diagnosisType.other.present", "Autre")
                .reveals(vec![Field::textarea("diagnosisType.other.details", "Préciser")]),
        ],
    )
}
