//! Supporting trial catalog.
//! Loaded once from `trials.json` in the data directory; the built-in list is
//! used when no file is present.

use std::collections::BTreeMap;
use std::path::Path;

use curie_common::{Phenotype, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const TRIALS_FILE: &str = "trials.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Citation id used by step bullets, e.g. `T1`.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub population: String,
    pub intervention: String,
    pub comparator: String,
    pub primary_endpoint: String,
    pub outcome: String,
    #[serde(default)]
    pub abstract_link: Option<String>,
    #[serde(default)]
    pub relevance_general: Option<String>,
    #[serde(default)]
    pub relevance_by_phenotype: Option<BTreeMap<Phenotype, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrialCatalog {
    trials: Vec<Trial>,
}

impl TrialCatalog {
    pub fn new(trials: Vec<Trial>) -> Self {
        Self { trials }
    }

    /// Load `<dir>/trials.json`, or fall back to the built-in catalog when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(TRIALS_FILE);
        if !path.exists() {
            info!(path = %path.display(), "No trial data file, using built-in catalog");
            return Ok(Self::builtin());
        }
        let content = std::fs::read_to_string(&path)?;
        let trials: Vec<Trial> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), count = trials.len(), "Loaded trial catalog");
        Ok(Self { trials })
    }

    pub fn builtin() -> Self {
        Self { trials: builtin_trials() }
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// First `n` trials, in catalog order.
    pub fn top(&self, n: usize) -> &[Trial] {
        &self.trials[..n.min(self.trials.len())]
    }

    pub fn by_citation_id(&self, id: &str) -> Option<&Trial> {
        self.trials.iter().find(|t| t.id.as_deref() == Some(id))
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

fn trial(id: &str, name: &str, population: &str, intervention: &str, comparator: &str, endpoint: &str, outcome: &str) -> Trial {
    Trial {
        id: Some(id.to_string()),
        name: name.to_string(),
        population: population.to_string(),
        intervention: intervention.to_string(),
        comparator: comparator.to_string(),
        primary_endpoint: endpoint.to_string(),
        outcome: outcome.to_string(),
        abstract_link: None,
        relevance_general: None,
        relevance_by_phenotype: None,
    }
}

fn builtin_trials() -> Vec<Trial> {
    let mut emperor = trial(
        "T1",
        "EMPEROR-Preserved",
        "Chronic heart failure with LVEF > 40%",
        "Empagliflozin 10 mg daily",
        "Placebo",
        "Cardiovascular death or heart failure hospitalization",
        "21% relative risk reduction in the primary endpoint, driven by fewer HF hospitalizations",
    );
    emperor.relevance_general = Some("Established SGLT2 inhibition as foundational therapy in HFpEF.".to_string());
    emperor.relevance_by_phenotype = Some(BTreeMap::from([(
        Phenotype::CkdModified,
        "Benefit was consistent across baseline kidney function.".to_string(),
    )]));

    let mut deliver = trial(
        "T2",
        "DELIVER",
        "Heart failure with LVEF > 40%, including improved EF",
        "Dapagliflozin 10 mg daily",
        "Placebo",
        "Worsening heart failure or cardiovascular death",
        "18% relative risk reduction in the primary endpoint",
    );
    deliver.relevance_general = Some("Confirmed the SGLT2 inhibitor class effect across the HFpEF spectrum.".to_string());
    deliver.relevance_by_phenotype = Some(BTreeMap::from([(
        Phenotype::MetabolicObesity,
        "Benefit was seen with and without diabetes.".to_string(),
    )]));

    let mut paragon = trial(
        "T3",
        "PARAGON-HF",
        "Heart failure with LVEF ≥ 45% and structural heart disease",
        "Sacubitril-valsartan",
        "Valsartan",
        "Total HF hospitalizations and cardiovascular death",
        "Primary endpoint narrowly missed significance; benefit suggested in lower EF range and in women",
    );
    paragon.relevance_general = Some("Basis for the Class IIa ARNI recommendation in selected patients.".to_string());

    let topcat = trial(
        "T4",
        "TOPCAT",
        "Heart failure with LVEF ≥ 45%",
        "Spironolactone",
        "Placebo",
        "Cardiovascular death, aborted cardiac arrest, or HF hospitalization",
        "Neutral overall; fewer HF hospitalizations, with regional variation in enrollment",
    );

    vec![emperor, deliver, paragon, topcat]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_resolves_bullet_citations() {
        let catalog = TrialCatalog::builtin();
        assert_eq!(catalog.trials().len(), 4);
        assert_eq!(catalog.by_citation_id("T1").map(|t| t.name.as_str()), Some("EMPEROR-Preserved"));
        assert_eq!(catalog.by_citation_id("T3").map(|t| t.name.as_str()), Some("PARAGON-HF"));
        assert!(catalog.by_citation_id("G1").is_none());
    }

    #[test]
    fn test_top_is_bounded() {
        let catalog = TrialCatalog::builtin();
        assert_eq!(catalog.top(2).len(), 2);
        assert_eq!(catalog.top(10).len(), 4);
        assert!(TrialCatalog::default().top(4).is_empty());
    }

    #[test]
    fn test_missing_file_uses_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = TrialCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog, TrialCatalog::builtin());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(TRIALS_FILE)).unwrap();
        write!(
            file,
            r#"[{{"name": "I-PRESERVE", "population": "HFpEF", "intervention": "Irbesartan",
                "comparator": "Placebo", "primary_endpoint": "Death or CV hospitalization",
                "outcome": "Neutral", "relevance_by_phenotype": {{"hypertensive": "ARB in hypertensive HFpEF"}}}}]"#
        )
        .unwrap();

        let catalog = TrialCatalog::load(dir.path()).unwrap();
        assert_eq!(catalog.trials().len(), 1);
        let t = &catalog.trials()[0];
        assert_eq!(t.id, None);
        assert_eq!(
            t.relevance_by_phenotype.as_ref().and_then(|r| r.get(&Phenotype::Hypertensive)).map(String::as_str),
            Some("ARB in hypertensive HFpEF")
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TRIALS_FILE), "{ not json").unwrap();
        assert!(TrialCatalog::load(dir.path()).is_err());
    }
}
