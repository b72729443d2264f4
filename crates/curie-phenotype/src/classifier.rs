//! Primary phenotype selection and driver ranking.
//!
//! Selection order:
//! 1. no phenotype scored → none
//! 2. highest-priority phenotype that is both max-scoring and valid
//! 3. otherwise the highest-scoring valid phenotype (earlier priority wins ties)
//! 4. otherwise none
//!
//! A phenotype is valid only when one of its required modifiers is set, so a
//! score inherited from unrelated modifiers can never make it primary.

use curie_common::{CurieError, Modifier, ModifierSet, Phenotype, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::RuleTable;
use crate::scorer::{score, ContributionLedger, ScoreTable};

/// Number of drivers reported unless configured otherwise.
pub const DEFAULT_MAX_DRIVERS: usize = 3;

/// Which selection branch produced the primary phenotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionBasis {
    /// Every phenotype scored zero.
    NoSignal,
    /// A valid phenotype held the maximum score.
    TopScoring,
    /// All max-scoring phenotypes were invalid; best valid one chosen instead.
    ValidFallback,
    /// Some phenotype scored, but none was valid.
    NoValidCandidate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub primary_phenotype: Option<Phenotype>,
    pub scores: ScoreTable,
    /// Top contributing modifiers to the primary phenotype, strongest first.
    pub drivers: Vec<Modifier>,
    pub selection: SelectionBasis,
}

/// Stateless classifier over a rule table. Every call builds its own
/// score table and ledger, so one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct PhenotypeClassifier {
    rules: RuleTable,
    max_drivers: usize,
}

impl Default for PhenotypeClassifier {
    fn default() -> Self {
        Self { rules: RuleTable::default(), max_drivers: DEFAULT_MAX_DRIVERS }
    }
}

impl PhenotypeClassifier {
    pub fn new(rules: RuleTable, max_drivers: usize) -> Result<Self> {
        rules.validate()?;
        if max_drivers == 0 {
            return Err(CurieError::Config("max_drivers must be at least 1".to_string()));
        }
        Ok(Self { rules, max_drivers })
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn max_drivers(&self) -> usize {
        self.max_drivers
    }

    pub fn classify(&self, modifiers: &ModifierSet) -> ClassificationResult {
        let (scores, ledger) = score(modifiers, &self.rules);
        let (primary, selection) = select_primary(&scores, modifiers);

        let drivers = match primary {
            Some(p) => rank_drivers(p, modifiers, &ledger, self.max_drivers),
            None => Vec::new(),
        };

        debug!(
            primary = primary.map(Phenotype::as_str).unwrap_or("none"),
            ?selection,
            max_score = scores.max(),
            drivers = drivers.len(),
            "Classified HFpEF phenotype"
        );

        ClassificationResult { primary_phenotype: primary, scores, drivers, selection }
    }
}

/// Classify with the standard rule table and driver limit.
pub fn classify(modifiers: &ModifierSet) -> ClassificationResult {
    PhenotypeClassifier::default().classify(modifiers)
}

fn select_primary(scores: &ScoreTable, modifiers: &ModifierSet) -> (Option<Phenotype>, SelectionBasis) {
    if scores.is_all_zero() {
        return (None, SelectionBasis::NoSignal);
    }

    let max_score = scores.max();
    let top = Phenotype::PRIORITY
        .into_iter()
        .find(|p| scores.get(*p) == max_score && p.is_valid_for(modifiers));
    if let Some(p) = top {
        return (Some(p), SelectionBasis::TopScoring);
    }

    // Stable max: a later entry only replaces the best when strictly greater.
    let fallback = Phenotype::PRIORITY
        .into_iter()
        .filter(|p| p.is_valid_for(modifiers))
        .fold(None, |best: Option<Phenotype>, p| match best {
            Some(b) if scores.get(b) >= scores.get(p) => Some(b),
            _ => Some(p),
        });

    match fallback {
        Some(p) => (Some(p), SelectionBasis::ValidFallback),
        None => (None, SelectionBasis::NoValidCandidate),
    }
}

fn rank_drivers(
    primary: Phenotype,
    modifiers: &ModifierSet,
    ledger: &ContributionLedger,
    limit: usize,
) -> Vec<Modifier> {
    let mut contributors: Vec<(Modifier, u32)> = modifiers
        .active()
        .map(|m| (m, ledger.contribution(m, primary)))
        .filter(|(_, points)| *points > 0)
        .collect();

    // sort_by is stable, so equal contributions keep evaluation order
    contributors.sort_by(|a, b| b.1.cmp(&a.1));
    contributors.truncate(limit);
    contributors.into_iter().map(|(m, _)| m).collect()
}
