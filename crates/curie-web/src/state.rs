//! Shared application state for the web server.

use std::sync::Arc;

use curie_common::Result;
use curie_pathway::{GuidelineDocument, TrialCatalog};
use curie_phenotype::PhenotypeClassifier;
use tracing::info;

use crate::config::Config;

/// Shared state injected into every Axum handler. Built once at start-up
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    pub classifier: PhenotypeClassifier,
    pub trials: TrialCatalog,
    pub guidelines: GuidelineDocument,
}

impl AppState {
    pub fn new(classifier: PhenotypeClassifier, trials: TrialCatalog, guidelines: GuidelineDocument) -> Self {
        Self { classifier, trials, guidelines }
    }

    /// Standard rules, built-in trials, empty guideline document.
    pub fn builtin() -> Self {
        Self::new(PhenotypeClassifier::default(), TrialCatalog::builtin(), GuidelineDocument::default())
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let classifier = config.classifier()?;
        let trials = TrialCatalog::load(&config.data.dir)?;
        let guidelines = GuidelineDocument::load(&config.data.dir)?;
        info!(
            rules = classifier.rules().len(),
            max_drivers = classifier.max_drivers(),
            trials = trials.trials().len(),
            "Application state ready"
        );
        Ok(Self::new(classifier, trials, guidelines))
    }
}

pub type SharedState = Arc<AppState>;
