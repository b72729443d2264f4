//! Scoring rule table for phenotype inference.
//! Each set modifier credits fixed integer points to one or more phenotypes.

use curie_common::{CurieError, Modifier, Phenotype, Result};
use serde::{Deserialize, Serialize};

/// One row of the rule table: `modifier` credits `points` to `phenotype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub modifier: Modifier,
    pub phenotype: Phenotype,
    pub points: u32,
}

impl ScoringRule {
    pub const fn new(modifier: Modifier, phenotype: Phenotype, points: u32) -> Self {
        Self { modifier, phenotype, points }
    }
}

/// Standard HFpEF rule table.
pub const STANDARD_RULES: [ScoringRule; 12] = [
    ScoringRule::new(Modifier::Ckd,                      Phenotype::FrailtyDominant,  1),
    ScoringRule::new(Modifier::Ckd,                      Phenotype::CkdModified,      3),
    ScoringRule::new(Modifier::Ckd,                      Phenotype::Hypertensive,     1),
    ScoringRule::new(Modifier::Hypotension,              Phenotype::FrailtyDominant,  2),
    ScoringRule::new(Modifier::Afib,                     Phenotype::AfibPredominant,  3),
    ScoringRule::new(Modifier::Diabetes,                 Phenotype::MetabolicObesity, 2),
    ScoringRule::new(Modifier::Frailty,                  Phenotype::FrailtyDominant,  3),
    ScoringRule::new(Modifier::Frailty,                  Phenotype::CkdModified,      1),
    ScoringRule::new(Modifier::Obesity,                  Phenotype::MetabolicObesity, 3),
    ScoringRule::new(Modifier::Obesity,                  Phenotype::Hypertensive,     1),
    ScoringRule::new(Modifier::UncontrolledHypertension, Phenotype::Hypertensive,     3),
    ScoringRule::new(Modifier::UncontrolledHypertension, Phenotype::CkdModified,      1),
];

/// The set of rules a classifier scores with.
/// Serialises as a plain list of rules so it can be overridden from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<ScoringRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self { rules: STANDARD_RULES.to_vec() }
    }
}

impl RuleTable {
    pub fn new(rules: Vec<ScoringRule>) -> Self {
        Self { rules }
    }

    /// Reject rules that could never contribute.
    pub fn validate(&self) -> Result<()> {
        if let Some(rule) = self.rules.iter().find(|r| r.points == 0) {
            return Err(CurieError::Config(format!(
                "scoring rule {} -> {} has zero points",
                rule.modifier, rule.phenotype
            )));
        }
        Ok(())
    }

    /// Rules for one modifier, in table order.
    pub fn rules_for(&self, modifier: Modifier) -> impl Iterator<Item = &ScoringRule> + '_ {
        self.rules.iter().filter(move |r| r.modifier == modifier)
    }

    pub fn rules(&self) -> &[ScoringRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
