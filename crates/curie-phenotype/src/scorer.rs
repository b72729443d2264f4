//! Additive phenotype scoring.
//! One pass over the set modifiers fills both the score table and the
//! contribution ledger used later for driver ranking.

use std::collections::BTreeMap;

use curie_common::{Modifier, ModifierSet, Phenotype};
use serde::{Deserialize, Serialize};

use crate::rules::RuleTable;

/// Per-phenotype point totals. Always holds all five phenotypes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreTable(BTreeMap<Phenotype, u32>);

impl Default for ScoreTable {
    fn default() -> Self {
        Self(Phenotype::PRIORITY.into_iter().map(|p| (p, 0)).collect())
    }
}

impl ScoreTable {
    pub fn get(&self, phenotype: Phenotype) -> u32 {
        self.0.get(&phenotype).copied().unwrap_or(0)
    }

    pub fn add(&mut self, phenotype: Phenotype, points: u32) {
        *self.0.entry(phenotype).or_insert(0) += points;
    }

    pub fn max(&self) -> u32 {
        self.0.values().copied().max().unwrap_or(0)
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.values().all(|&s| s == 0)
    }

    /// Scores in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Phenotype, u32)> + '_ {
        self.0.iter().map(|(p, s)| (*p, *s))
    }
}

/// Points each modifier contributed to each phenotype.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionLedger(BTreeMap<Modifier, BTreeMap<Phenotype, u32>>);

impl ContributionLedger {
    pub fn record(&mut self, modifier: Modifier, phenotype: Phenotype, points: u32) {
        *self.0.entry(modifier).or_default().entry(phenotype).or_insert(0) += points;
    }

    pub fn contribution(&self, modifier: Modifier, phenotype: Phenotype) -> u32 {
        self.0
            .get(&modifier)
            .and_then(|by_phenotype| by_phenotype.get(&phenotype))
            .copied()
            .unwrap_or(0)
    }
}

/// Apply every rule of every set modifier, in evaluation order.
pub fn score(modifiers: &ModifierSet, rules: &RuleTable) -> (ScoreTable, ContributionLedger) {
    let mut scores = ScoreTable::default();
    let mut ledger = ContributionLedger::default();

    for modifier in modifiers.active() {
        for rule in rules.rules_for(modifier) {
            scores.add(rule.phenotype, rule.points);
            ledger.record(modifier, rule.phenotype, rule.points);
        }
    }

    (scores, ledger)
}
