use pneumo_core::models::patient::Sex;

use crate::catalog::{FieldDescriptor as Field, PatientGate, Section};
use crate::condition::Condition;
use crate::display::{DisplayColor, DisplayEntry as Entry, DisplayGroup, group};
use crate::path::path;

pub const GENERAL_SIGNS: &str = "generalSigns";
pub const FUNCTIONAL_SIGNS: &str = "functionalSigns";
pub const HISTORY: &str = "history";
pub const GYNECO_OBSTETRIC: &str = "gynecoObstetric";

const INTENSITY: &[&str] = &["Légère", "Modérée", "Sévère"];
const SIDE: &[&str] = &["Droite", "Gauche", "Bilatérale"];

pub fn general_signs() -> Section {
    Section::new(
        GENERAL_SIGNS,
        "Signes généraux",
        vec![
            Field::boolean("generalSigns.fever.present", "Fièvre").reveals(vec![Field::number(
                "generalSigns.fever.temperature",
                "Température maximale",
                Some("°C"),
            )]),
            Field::boolean("generalSigns.weightLoss.present", "Amaigrissement").reveals(vec![
                Field::boolean("generalSigns.weightLoss.quantified.present", "Quantifié").reveals(
                    vec![Field::number(
                        "generalSigns.weightLoss.quantified.value",
                        "Perte de poids",
                        Some("kg"),
                    )],
                ),
                Field::text("generalSigns.weightLoss.duration", "Sur une durée de"),
            ]),
            Field::boolean("generalSigns.asthenia.present", "Asthénie"),
            Field::boolean("generalSigns.anorexia.present", "Anorexie"),
            Field::boolean("generalSigns.nightSweats.present", "Sueurs nocturnes"),
        ],
    )
}

pub fn functional_signs() -> Section {
    Section::new(
        FUNCTIONAL_SIGNS,
        "Signes fonctionnels",
        vec![
            Field::boolean("functionalSigns.cough.present", "Toux").reveals(vec![
                Field::choice("functionalSigns.cough.type", "Type", &["Sèche", "Productive"])
                    .reveals_when(
                        "Productive",
                        vec![Field::choice(
                            "functionalSigns.cough.sputum",
                            "Expectoration",
                            &["Muqueuse", "Muco-purulente", "Purulente", "Hémoptoïque"],
                        )],
                    ),
                Field::choice("functionalSigns.cough.intensity", "Intensité", INTENSITY),
                Field::choice(
                    "functionalSigns.cough.frequency",
                    "Fréquence",
                    &["Occasionnelle", "Fréquente", "Permanente"],
                ),
                Field::multi_choice(
                    "functionalSigns.cough.timing",
                    "Horaire",
                    &["Matinale", "Diurne", "Nocturne"],
                ),
                Field::multi_choice(
                    "functionalSigns.cough.triggers",
                    "Facteurs déclenchants",
                    &["Effort", "Froid", "Décubitus", "Repas", "Parole", "Poussières"],
                ),
            ]),
            Field::boolean("functionalSigns.dyspnea.present", "Dyspnée").reveals(vec![
                Field::choice("functionalSigns.dyspnea.mmrc", "Stade mMRC", &["0", "1", "2", "3", "4"]),
                Field::choice("functionalSigns.dyspnea.onset", "Installation", &["Brutale", "Progressive"]),
            ]),
            Field::boolean("functionalSigns.chestPain.present", "Douleur thoracique").reveals(vec![
                Field::choice("functionalSigns.chestPain.side", "Côté", SIDE),
                Field::choice(
                    "functionalSigns.chestPain.character",
                    "Caractère",
                    &["Pleurétique", "Constrictive", "Atypique"],
                ),
            ]),
            Field::boolean("functionalSigns.hemoptysis.present", "Hémoptysie").reveals(vec![
                Field::choice(
                    "functionalSigns.hemoptysis.abundance",
                    "Abondance",
                    &["Minime", "Moyenne", "Massive"],
                ),
            ]),
        ],
    )
}

pub fn history() -> Section {
    let smoking_status = path("history.smoking.status");
    Section::new(
        HISTORY,
        "Antécédents et terrain",
        vec![
            Field::choice(
                "history.smoking.status",
                "Tabagisme",
                &["Non-fumeur", "Fumeur actif", "Ex-fumeur"],
            )
            .reveals_when(
                "Ex-fumeur",
                vec![Field::number("history.smoking.quitYear", "Année de sevrage", None)],
            ),
            Field::number("history.smoking.packYears", "Consommation", Some("PA")).when(Condition::Any {
                conditions: vec![
                    Condition::equals(smoking_status.clone(), "Fumeur actif"),
                    Condition::equals(smoking_status, "Ex-fumeur"),
                ],
            }),
            Field::boolean("history.occupationalExposure.present", "Exposition professionnelle")
                .reveals(vec![
                    Field::multi_choice(
                        "history.occupationalExposure.agents",
                        "Agents",
                        &["Amiante", "Silice", "Poussières organiques", "Métaux durs", "Solvants"],
                    ),
                    Field::textarea("history.occupationalExposure.details", "Précisions"),
                ]),
            Field::multi_choice(
                "history.comorbidities",
                "Comorbidités",
                &[
                    "HTA",
                    "Diabète",
                    "Cardiopathie",
                    "Insuffisance rénale",
                    "Reflux gastro-œsophagien",
                    "Néoplasie",
                ],
            ),
            Field::boolean("history.allergies.present", "Allergies")
                .reveals(vec![Field::text("history.allergies.details", "Allergènes")]),
        ],
    )
}

/// Only mounted for female patients.
pub fn gyneco_obstetric() -> Section {
    Section::new(
        GYNECO_OBSTETRIC,
        "Antécédents gynéco-obstétricaux",
        vec![
            Field::number("gynecoObstetric.gravidity", "Gestité", None),
            Field::number("gynecoObstetric.parity", "Parité", None),
            Field::boolean("gynecoObstetric.pregnancy.present", "Grossesse en cours").reveals(vec![
                Field::number("gynecoObstetric.pregnancy.weeks", "Terme", Some("SA")),
            ]),
            Field::boolean("gynecoObstetric.contraception.present", "Contraception").reveals(vec![
                Field::choice(
                    "gynecoObstetric.contraception.method",
                    "Méthode",
                    &["Oestroprogestative", "Progestative", "DIU", "Autre"],
                ),
            ]),
            Field::boolean("gynecoObstetric.menopause.present", "Ménopause").reveals(vec![
                Field::number("gynecoObstetric.menopause.age", "Âge de la ménopause", Some("ans")),
            ]),
        ],
    )
    .gated(PatientGate::Sex { sex: Sex::Female })
}

/// The four shared sections, in display order.
pub fn shared_sections() -> Vec<Section> {
    vec![general_signs(), functional_signs(), history(), gyneco_obstetric()]
}

/// Summary group for the shared clinical presentation.
pub fn presentation_group() -> DisplayGroup {
    group(
        "Présentation clinique",
        vec![
            Entry::new("generalSigns.fever.temperature", "Fièvre").unit("°C"),
            Entry::new("generalSigns.weightLoss.quantified.value", "Amaigrissement")
                .unit("kg")
                .color(DisplayColor::Warning),
            Entry::new("functionalSigns.cough.present", "Toux"),
            Entry::new("functionalSigns.cough.type", "Type de toux"),
            Entry::new("functionalSigns.dyspnea.mmrc", "Dyspnée (mMRC)").color(DisplayColor::Info),
            Entry::new("functionalSigns.hemoptysis.abundance", "Hémoptysie").color(DisplayColor::Danger),
        ],
    )
}

pub fn history_group() -> DisplayGroup {
    group(
        "Terrain",
        vec![
            Entry::new("history.smoking.status", "Tabagisme"),
            Entry::new("history.smoking.packYears", "Consommation").unit("PA"),
            Entry::new("history.occupationalExposure.agents", "Expositions"),
            Entry::new("history.comorbidities", "Comorbidités"),
        ],
    )
}

/// Shown only on a female patient's summary, like the section it reads.
pub fn gyneco_group() -> DisplayGroup {
    group(
        "Gynéco-obstétrique",
        vec![
            Entry::new("gynecoObstetric.pregnancy.weeks", "Grossesse").unit("SA").color(DisplayColor::Warning),
            Entry::new("gynecoObstetric.contraception.method", "Contraception"),
        ],
    )
    .gated(PatientGate::Sex { sex: Sex::Female })
}
