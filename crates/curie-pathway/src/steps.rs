//! Pathway step templates and modifier-driven adjustments.

use curie_common::{Modifier, ModifierSet, Phenotype};
use serde::{Deserialize, Serialize};

use crate::annotations::{step_phenotype_note, why_bullets_for_step, WhyBullet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayStep {
    pub step_number: u8,
    pub step_name: String,
    pub therapy_class: String,
    /// Class I, IIa, IIb or III.
    pub recommendation_class: String,
    /// A, B-R, B-NR, C-LD or C-EO.
    pub level_of_evidence: String,
    pub rationale: String,
    #[serde(default)]
    pub contraindicated: bool,
    #[serde(default)]
    pub priority: bool,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub why_recommended: Vec<WhyBullet>,
    #[serde(default)]
    pub phenotype_note: Option<String>,
}

struct StepTemplate {
    step_number: u8,
    step_name: &'static str,
    therapy_class: &'static str,
    recommendation_class: &'static str,
    level_of_evidence: &'static str,
    rationale: &'static str,
}

static BASE_STEPS: [StepTemplate; 3] = [
    StepTemplate {
        step_number: 1,
        step_name: "Foundational Therapy",
        therapy_class: "SGLT2 Inhibitor",
        recommendation_class: "Class I",
        level_of_evidence: "A",
        rationale: "SGLT2 inhibitors reduce heart failure hospitalizations and cardiovascular death in HFpEF regardless of diabetes status.",
    },
    StepTemplate {
        step_number: 2,
        step_name: "Neurohormonal Modulation",
        therapy_class: "ARNI or ACEi/ARB",
        recommendation_class: "Class IIa",
        level_of_evidence: "B-R",
        rationale: "ARNI may provide benefit in selected HFpEF patients; ACEi/ARB are considered when ARNI is not appropriate.",
    },
    StepTemplate {
        step_number: 3,
        step_name: "Comorbidity Optimization",
        therapy_class: "MRA, Beta-blocker, or Rate Control",
        recommendation_class: "Class IIb",
        level_of_evidence: "C-LD",
        rationale: "MRA may be considered in select patients; beta-blockers for rate control in AFib; optimize comorbidities.",
    },
];

const CKD_WARNING: &str = "Monitor eGFR and potassium; dose adjustment may be required";
const HYPOTENSION_WARNING: &str = "Use with caution; monitor blood pressure closely";
const FRAILTY_WARNING: &str = "Consider frailty assessment; may need dose reduction or slower titration";
const AFIB_RATIONALE: &str =
    "Beta-blocker for rate control in atrial fibrillation; consider rhythm control in select patients";

impl StepTemplate {
    fn instantiate(&self, phenotype: Option<Phenotype>) -> PathwayStep {
        PathwayStep {
            step_number: self.step_number,
            step_name: self.step_name.to_string(),
            therapy_class: self.therapy_class.to_string(),
            recommendation_class: self.recommendation_class.to_string(),
            level_of_evidence: self.level_of_evidence.to_string(),
            rationale: self.rationale.to_string(),
            contraindicated: false,
            priority: false,
            warning: None,
            why_recommended: why_bullets_for_step(self.step_number, phenotype),
            phenotype_note: step_phenotype_note(self.step_number, phenotype).map(str::to_string),
        }
    }
}

/// Build the pathway steps for a patient.
pub fn build_steps(modifiers: &ModifierSet, phenotype: Option<Phenotype>) -> Vec<PathwayStep> {
    BASE_STEPS
        .iter()
        .map(|template| {
            let mut step = template.instantiate(phenotype);
            apply_modifiers(&mut step, modifiers);
            step
        })
        .collect()
}

/// Warnings are applied in modifier order, so a later modifier's warning
/// replaces an earlier one on the same step. Hypotension never marks a step
/// contraindicated; it is a caution only.
fn apply_modifiers(step: &mut PathwayStep, modifiers: &ModifierSet) {
    let n = step.step_number;
    for modifier in modifiers.active() {
        match modifier {
            Modifier::Ckd if n == 2 => {
                step.warning = Some(CKD_WARNING.to_string());
            }
            Modifier::Hypotension if n == 2 || n == 3 => {
                step.contraindicated = false;
                step.warning = Some(HYPOTENSION_WARNING.to_string());
            }
            Modifier::Afib if n == 3 => {
                step.priority = true;
                step.rationale = AFIB_RATIONALE.to_string();
            }
            Modifier::Diabetes if n == 1 => {
                step.priority = true;
            }
            Modifier::Frailty if n == 2 || n == 3 => {
                step.warning = Some(FRAILTY_WARNING.to_string());
            }
            _ => {}
        }
    }
}
