use std::sync::LazyLock;

use crate::Pathology;
use crate::catalog::{Catalog, FieldDescriptor as Field, Section};
use crate::condition::Condition;
use crate::display::{DisplayColor, DisplayConfig, DisplayEntry as Entry, group};
use crate::path::path;
use crate::pathologies::{build, common};

pub struct Pneumothorax;

impl Pathology for Pneumothorax {
    fn id(&self) -> &str {
        "pneumothorax"
    }

    fn name(&self) -> &str {
        "Pneumothorax"
    }

    fn catalog(&self) -> &'static Catalog {
        static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
            let mut sections = common::shared_sections();
            sections.extend([episode(), clinical_exam(), imaging(), management()]);
            build("pneumothorax", sections)
        });
        &CATALOG
    }

    fn display(&self) -> &'static DisplayConfig {
        static DISPLAY: LazyLock<DisplayConfig> = LazyLock::new(|| DisplayConfig {
            groups: vec![
                group(
                    "Épisode",
                    vec![
                        Entry::new("episode.type", "Mécanisme"),
                        Entry::new("episode.side", "Côté"),
                        Entry::new("episode.recurrence.count", "Épisodes antérieurs").color(DisplayColor::Warning),
                    ],
                ),
                group(
                    "Gravité",
                    vec![
                        Entry::new("clinicalExam.tension.present", "Signes de tension").color(DisplayColor::Danger),
                        Entry::new("clinicalExam.spo2", "SpO2").unit("%"),
                        Entry::new("clinicalExam.respiratoryRate", "Fréquence respiratoire").unit("/min"),
                        Entry::new("imaging.size", "Taille"),
                        Entry::new("imaging.apexDistance", "Distance apex-coupole").unit("cm"),
                    ],
                ),
                group(
                    "Prise en charge",
                    vec![
                        Entry::new("management.strategy", "Stratégie"),
                        Entry::new("management.drainage.durationDays", "Durée du drainage").unit("j"),
                        Entry::new("management.surgery.procedure", "Chirurgie"),
                    ],
                ),
                common::presentation_group(),
                common::history_group(),
                common::gyneco_group(),
            ],
        });
        &DISPLAY
    }
}

fn episode() -> Section {
    Section::new(
        "episode",
        "Épisode actuel",
        vec![
            Field::choice(
                "episode.type",
                "Mécanisme",
                &["Spontané primaire", "Spontané secondaire", "Traumatique", "Iatrogène", "Cataménial"],
            )
            .reveals_when(
                "Spontané secondaire",
                vec![Field::text("episode.underlyingDisease", "Pathologie sous-jacente")],
            ),
            Field::choice("episode.side", "Côté", &["Droit", "Gauche", "Bilatéral"]),
            Field::boolean("episode.recurrence.present", "Récidive").reveals(vec![
                Field::number("episode.recurrence.count", "Nombre d'épisodes antérieurs", None),
                Field::choice("episode.recurrence.sameSide", "Côté des épisodes", &["Homolatéral", "Controlatéral"]),
            ]),
        ],
    )
}

fn clinical_exam() -> Section {
    Section::new(
        "clinicalExam",
        "Examen clinique",
        vec![
            Field::number("clinicalExam.spo2", "SpO2", Some("%")),
            Field::number("clinicalExam.respiratoryRate", "Fréquence respiratoire", Some("/min")),
            Field::number("clinicalExam.heartRate", "Fréquence cardiaque", Some("/min")),
            Field::boolean("clinicalExam.tension.present", "Signes de tension").reveals(vec![
                Field::multi_choice(
                    "clinicalExam.tension.signs",
                    "Signes",
                    &["Hypotension", "Turgescence jugulaire", "Déviation trachéale", "Détresse respiratoire"],
                ),
            ]),
            Field::boolean("clinicalExam.subcutaneousEmphysema.present", "Emphysème sous-cutané"),
        ],
    )
}

fn imaging() -> Section {
    Section::new(
        "imaging",
        "Imagerie",
        vec![
            Field::choice("imaging.size", "Taille", &["Partiel", "Complet", "Compressif"]),
            Field::number("imaging.apexDistance", "Distance apex-coupole", Some("cm")),
            Field::boolean("imaging.hydropneumothorax", "Niveau hydro-aérique"),
            Field::boolean("imaging.blebs.present", "Blebs / bulles au scanner"),
        ],
    )
}

fn management() -> Section {
    Section::new(
        "management",
        "Prise en charge",
        vec![
            Field::choice(
                "management.strategy",
                "Stratégie initiale",
                &["Surveillance", "Exsufflation", "Drainage"],
            )
            .reveals_when(
                "Exsufflation",
                vec![Field::choice(
                    "management.exsufflation.outcome",
                    "Résultat",
                    &["Succès", "Échec"],
                )],
            ),
            Field::number("management.drainage.durationDays", "Durée du drainage", Some("j")).when(
                Condition::Any {
                    conditions: vec![
                        Condition::equals(path("management.strategy"), "Drainage"),
                        Condition::equals(path("management.exsufflation.outcome"), "Échec"),
                    ],
                },
            ),
            Field::boolean("management.oxygen.present", "Oxygénothérapie"),
            Field::boolean("management.surgery.present", "Chirurgie").reveals(vec![
                Field::choice(
                    "management.surgery.procedure",
                    "Geste",
                    &["Pleurodèse au talc", "Abrasion pleurale", "Pleurectomie", "Résection de bulles"],
                ),
            ]),
        ],
    )
}
