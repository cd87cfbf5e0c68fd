use std::sync::LazyLock;

use crate::Pathology;
use crate::catalog::{Catalog, FieldDescriptor as Field, Section};
use crate::condition::Condition;
use crate::display::{DisplayColor, DisplayConfig, DisplayEntry as Entry, group};
use crate::path::path;
use crate::pathologies::{build, common};

/// Chronic obstructive pulmonary disease (BPCO).
/// Spirometry, GOLD staging, exacerbation history and long-term treatment.
pub struct Copd;

impl Pathology for Copd {
    fn id(&self) -> &str {
        "copd"
    }

    fn name(&self) -> &str {
        "Bronchopneumopathie chronique obstructive"
    }

    fn catalog(&self) -> &'static Catalog {
        static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
            let mut sections = common::shared_sections();
            sections.extend([spirometry(), exacerbations(), scores(), treatment()]);
            build("copd", sections)
        });
        &CATALOG
    }

    fn display(&self) -> &'static DisplayConfig {
        static DISPLAY: LazyLock<DisplayConfig> = LazyLock::new(|| DisplayConfig {
            groups: vec![
                group(
                    "Sévérité",
                    vec![
                        Entry::new("spirometry.fev1", "VEMS").unit("L"),
                        Entry::new("spirometry.fev1Percent", "VEMS").unit("% théorique"),
                        Entry::new("spirometry.ratio", "VEMS/CVF").unit("%"),
                        Entry::new("spirometry.goldGrade", "Grade GOLD").color(DisplayColor::Info),
                        Entry::new("scores.cat", "Score CAT"),
                        Entry::new("scores.goldGroup", "Groupe GOLD").color(DisplayColor::Info),
                    ],
                ),
                group(
                    "Exacerbations",
                    vec![
                        Entry::new("exacerbations.lastYear", "Exacerbations sur 12 mois").color(DisplayColor::Warning),
                        Entry::new("exacerbations.hospitalizations.count", "Hospitalisations")
                            .color(DisplayColor::Danger),
                    ],
                ),
                group(
                    "Traitement",
                    vec![
                        Entry::new("treatment.inhaled", "Traitement inhalé"),
                        Entry::new("treatment.oxygen.flow", "Oxygénothérapie").unit("L/min"),
                        Entry::new("treatment.oxygen.hoursPerDay", "Durée quotidienne").unit("h/j"),
                        Entry::new("treatment.ventilation.present", "Ventilation non invasive"),
                        Entry::new("treatment.rehabilitation.present", "Réhabilitation respiratoire"),
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

fn spirometry() -> Section {
    Section::new(
        "spirometry",
        "Spirométrie",
        vec![
            Field::boolean("spirometry.performed", "Spirométrie réalisée").reveals(vec![
                Field::number("spirometry.fev1", "VEMS post-bronchodilatateur", Some("L")),
                Field::number("spirometry.fev1Percent", "VEMS", Some("% théorique")),
                Field::number("spirometry.fvc", "CVF", Some("L")),
                Field::number("spirometry.ratio", "VEMS/CVF", Some("%")),
                Field::choice("spirometry.goldGrade", "Grade GOLD", &["1", "2", "3", "4"]),
                Field::boolean("spirometry.reversibility", "Réversibilité significative"),
            ]),
        ],
    )
}

fn exacerbations() -> Section {
    Section::new(
        "exacerbations",
        "Exacerbations",
        vec![
            Field::number("exacerbations.lastYear", "Exacerbations sur les 12 derniers mois", None),
            Field::boolean("exacerbations.hospitalizations.present", "Hospitalisation pour exacerbation")
                .reveals(vec![
                    Field::number("exacerbations.hospitalizations.count", "Nombre", None),
                    Field::boolean("exacerbations.hospitalizations.icu", "Séjour en réanimation"),
                ]),
            Field::multi_choice(
                "exacerbations.triggers",
                "Facteurs déclenchants",
                &["Infection virale", "Infection bactérienne", "Pollution", "Arrêt du traitement", "Inconnu"],
            ),
        ],
    )
}

fn scores() -> Section {
    Section::new(
        "scores",
        "Scores",
        vec![
            Field::number("scores.cat", "Score CAT", None),
            Field::choice("scores.goldGroup", "Groupe GOLD", &["A", "B", "E"]),
        ],
    )
}

fn treatment() -> Section {
    let inhaled = path("treatment.inhaled");
    Section::new(
        "treatment",
        "Traitement",
        vec![
            Field::multi_choice(
                "treatment.inhaled",
                "Traitement inhalé",
                &["BDCA", "LABA", "LAMA", "CSI"],
            ),
            Field::choice(
                "treatment.inhalerTechnique",
                "Technique d'inhalation",
                &["Correcte", "À revoir"],
            )
            .when(Condition::Any {
                conditions: ["LABA", "LAMA", "CSI"]
                    .into_iter()
                    .map(|drug| Condition::includes(inhaled.clone(), drug))
                    .collect(),
            }),
            Field::boolean("treatment.oxygen.present", "Oxygénothérapie de longue durée").reveals(vec![
                Field::number("treatment.oxygen.flow", "Débit", Some("L/min")),
                Field::number("treatment.oxygen.hoursPerDay", "Durée quotidienne", Some("h/j")),
            ]),
            Field::boolean("treatment.ventilation.present", "Ventilation non invasive"),
            Field::boolean("treatment.rehabilitation.present", "Réhabilitation respiratoire"),
            Field::multi_choice(
                "treatment.vaccinations",
                "Vaccinations",
                &["Grippe", "Pneumocoque", "COVID-19", "VRS"],
            ),
            Field::boolean("treatment.smokingCessation.present", "Sevrage tabagique en cours")
                .when(Condition::equals(path("history.smoking.status"), "Fumeur actif")),
        ],
    )
}
