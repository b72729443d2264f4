//! Step annotations: "why this is recommended" bullets and phenotype notes.
//!
//! Every step has general bullets. Some steps add one bullet per phenotype;
//! that bullet's text doubles as the step's phenotype note.

use curie_common::Phenotype;
use serde::{Deserialize, Serialize};

/// Bullets shown per step, general and phenotype-specific combined.
pub const MAX_WHY_BULLETS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhyBullet {
    pub text: String,
    /// Citation ids, e.g. `G1` for guidelines and `T1` for trials.
    pub citations: Vec<String>,
}

struct BulletDef {
    text: &'static str,
    citations: &'static [&'static str],
}

impl BulletDef {
    fn to_bullet(&self) -> WhyBullet {
        WhyBullet {
            text: self.text.to_string(),
            citations: self.citations.iter().map(|c| c.to_string()).collect(),
        }
    }
}

struct StepAnnotations {
    step_number: u8,
    why: &'static [BulletDef],
    by_phenotype: &'static [(Phenotype, BulletDef)],
}

static ANNOTATIONS: [StepAnnotations; 3] = [
    StepAnnotations {
        step_number: 1,
        why: &[
            BulletDef { text: "Guideline: ACC/AHA Class I, LOE A for HFpEF.", citations: &["G1"] },
            BulletDef {
                text: "Evidence: Supported by EMPEROR-Preserved and DELIVER trials.",
                citations: &["T1", "T2"],
            },
        ],
        by_phenotype: &[
            (
                Phenotype::FrailtyDominant,
                BulletDef {
                    text: "Well tolerated in frail patients; supports early initiation in this phenotype.",
                    citations: &[],
                },
            ),
            (
                Phenotype::CkdModified,
                BulletDef {
                    text: "SGLT2 inhibitors provide renal and cardiovascular protection in CKD-modified HFpEF.",
                    citations: &[],
                },
            ),
            (
                Phenotype::MetabolicObesity,
                BulletDef {
                    text: "Particularly beneficial in metabolic/obesity phenotype due to dual cardiorenal and metabolic benefits.",
                    citations: &[],
                },
            ),
        ],
    },
    StepAnnotations {
        step_number: 2,
        why: &[
            BulletDef { text: "Guideline: ACC/AHA Class IIa, LOE B-R for HFpEF.", citations: &["G3"] },
            BulletDef {
                text: "Evidence: PARAGON-HF trial demonstrated benefit in selected patients.",
                citations: &["T3"],
            },
        ],
        by_phenotype: &[
            (
                Phenotype::FrailtyDominant,
                BulletDef {
                    text: "In frailty-dominant HFpEF, consider slower titration and closer BP monitoring.",
                    citations: &[],
                },
            ),
            (
                Phenotype::CkdModified,
                BulletDef {
                    text: "In CKD-modified HFpEF, monitor renal function and potassium closely when initiating ARNI.",
                    citations: &[],
                },
            ),
            (
                Phenotype::Hypertensive,
                BulletDef {
                    text: "ARNI may provide additional benefit in patients with uncontrolled hypertension.",
                    citations: &[],
                },
            ),
        ],
    },
    StepAnnotations {
        step_number: 3,
        why: &[
            BulletDef { text: "Guideline: ACC/AHA Class IIb, LOE C-LD for HFpEF.", citations: &["G1"] },
            BulletDef {
                text: "Evidence: Individualized approach based on comorbidities and patient factors.",
                citations: &[],
            },
        ],
        by_phenotype: &[
            (
                Phenotype::AfibPredominant,
                BulletDef {
                    text: "Beta-blockers for rate control are a priority in AFib-predominant HFpEF.",
                    citations: &[],
                },
            ),
            (
                Phenotype::FrailtyDominant,
                BulletDef {
                    text: "Consider frailty assessment when titrating medications; may require dose reduction.",
                    citations: &[],
                },
            ),
            (
                Phenotype::Hypertensive,
                BulletDef {
                    text: "Focus on optimal blood pressure control as part of comorbidity management.",
                    citations: &[],
                },
            ),
        ],
    },
];

fn annotations_for(step_number: u8) -> Option<&'static StepAnnotations> {
    ANNOTATIONS.iter().find(|a| a.step_number == step_number)
}

fn phenotype_bullets(
    annotations: &'static StepAnnotations,
    phenotype: Phenotype,
) -> impl Iterator<Item = &'static BulletDef> {
    annotations
        .by_phenotype
        .iter()
        .filter(move |(p, _)| *p == phenotype)
        .map(|(_, bullet)| bullet)
}

/// Whether the step has any annotation entry.
pub fn is_annotated_step(step_number: u8) -> bool {
    annotations_for(step_number).is_some()
}

/// Phenotype-specific note for a step, if one exists.
pub fn step_phenotype_note(step_number: u8, phenotype: Option<Phenotype>) -> Option<&'static str> {
    let annotations = annotations_for(step_number)?;
    phenotype_bullets(annotations, phenotype?).next().map(|b| b.text)
}

/// General bullets for the step followed by any phenotype-specific ones,
/// capped at [`MAX_WHY_BULLETS`]. Unknown steps have no bullets.
pub fn why_bullets_for_step(step_number: u8, phenotype: Option<Phenotype>) -> Vec<WhyBullet> {
    let Some(annotations) = annotations_for(step_number) else {
        return Vec::new();
    };

    let mut bullets: Vec<WhyBullet> = annotations.why.iter().map(BulletDef::to_bullet).collect();
    if let Some(p) = phenotype {
        bullets.extend(phenotype_bullets(annotations, p).map(BulletDef::to_bullet));
    }
    bullets.truncate(MAX_WHY_BULLETS);
    bullets
}
