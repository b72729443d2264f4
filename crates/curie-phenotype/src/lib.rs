//! curie-phenotype: HFpEF phenotype inference engine.
//! Maps a patient modifier set to a primary phenotype plus the modifiers that drove it.

pub mod rules;
pub mod scorer;
pub mod classifier;

pub use classifier::{classify, ClassificationResult, PhenotypeClassifier, SelectionBasis, DEFAULT_MAX_DRIVERS};
pub use rules::{RuleTable, ScoringRule};
pub use scorer::{ContributionLedger, ScoreTable};
