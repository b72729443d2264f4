//! Pathway assembly: classification, steps, summary and evidence in one response.

use std::fmt;

use chrono::NaiveDate;
use curie_common::{CurieError, Modifier, ModifierSet, Phenotype, Result};
use curie_phenotype::{ClassificationResult, PhenotypeClassifier, ScoreTable, SelectionBasis};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::info;

use crate::citations::format_drivers;
use crate::guidelines::{last_updated, EVIDENCE_CONFIDENCE, GUIDELINE_SOURCES};
use crate::steps::{build_steps, PathwayStep};
use crate::trials::{Trial, TrialCatalog};

pub const SUPPORTED_DISEASE: &str = "HFpEF";

/// Trials attached to each pathway.
pub const TRIAL_SUPPORT_LIMIT: usize = 4;

const NO_PHENOTYPE_LABEL: &str = "Phenotype not specified";

const MECHANISTIC_RATIONALE: &str = "HFpEF management focuses on three pillars: \
(1) SGLT2 inhibitors as foundational therapy with proven CV and renal benefits, \
(2) Neurohormonal modulation with ARNI or ACEi/ARB to address remodeling, and \
(3) Comorbidity optimization including blood pressure control, rate/rhythm management in AFib, \
and volume optimization. Patient-specific factors modify the sequence and intensity of these interventions.";

fn default_disease() -> String {
    SUPPORTED_DISEASE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayRequest {
    #[serde(default = "default_disease")]
    pub disease: String,
    #[serde(default)]
    pub modifiers: ModifierSet,
}

impl PathwayRequest {
    pub fn new(modifiers: ModifierSet) -> Self {
        Self { disease: default_disease(), modifiers }
    }
}

/// Classification result with its display strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhenotypeSummary {
    pub primary_phenotype: Option<Phenotype>,
    pub label: String,
    pub scores: ScoreTable,
    pub drivers: Vec<Modifier>,
    /// Drivers as shown next to the phenotype badge; empty when there are none.
    pub drivers_display: String,
    pub selection: SelectionBasis,
}

impl From<ClassificationResult> for PhenotypeSummary {
    fn from(result: ClassificationResult) -> Self {
        Self {
            label: result
                .primary_phenotype
                .map(Phenotype::label)
                .unwrap_or(NO_PHENOTYPE_LABEL)
                .to_string(),
            drivers_display: format_drivers(&result.drivers),
            primary_phenotype: result.primary_phenotype,
            scores: result.scores,
            drivers: result.drivers,
            selection: result.selection,
        }
    }
}

/// Summary label of every modifier and whether it is set.
/// Serialised as a JSON object whose keys follow evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyModifiers(Vec<(String, bool)>);

impl KeyModifiers {
    pub fn from_set(modifiers: &ModifierSet) -> Self {
        Self(
            Modifier::ALL
                .into_iter()
                .map(|m| (m.summary_label().to_string(), modifiers.is_set(m)))
                .collect(),
        )
    }

    pub fn get(&self, label: &str) -> Option<bool> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, set)| *set)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.0.iter().map(|(l, set)| (l.as_str(), *set))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for KeyModifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(l, set)| (l, set)))
    }
}

impl<'de> Deserialize<'de> for KeyModifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct KeyModifiersVisitor;

        impl<'de> Visitor<'de> for KeyModifiersVisitor {
            type Value = KeyModifiers;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of modifier labels to booleans")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<KeyModifiers, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, bool>()? {
                    entries.push(entry);
                }
                Ok(KeyModifiers(entries))
            }
        }

        deserializer.deserialize_map(KeyModifiersVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwayResponse {
    pub clinical_summary: String,
    pub steps: Vec<PathwayStep>,
    pub key_modifiers: KeyModifiers,
    pub phenotype: PhenotypeSummary,
    pub mechanistic_rationale: String,
    pub trial_support: Vec<Trial>,
    pub evidence_confidence: String,
    pub guideline_sources: Vec<String>,
    pub last_updated: NaiveDate,
}

/// Generate the management pathway for a request.
///
/// Fails for diseases other than HFpEF, and when the assembled pathway has
/// no steps or no supporting trials.
pub fn generate_pathway(
    request: &PathwayRequest,
    classifier: &PhenotypeClassifier,
    trials: &TrialCatalog,
) -> Result<PathwayResponse> {
    if request.disease != SUPPORTED_DISEASE {
        return Err(CurieError::UnsupportedDisease {
            requested: request.disease.clone(),
            supported: SUPPORTED_DISEASE.to_string(),
        });
    }

    let modifiers = &request.modifiers;
    let classification = classifier.classify(modifiers);
    let steps = build_steps(modifiers, classification.primary_phenotype);

    let response = PathwayResponse {
        clinical_summary: clinical_summary(modifiers),
        steps,
        key_modifiers: KeyModifiers::from_set(modifiers),
        phenotype: classification.into(),
        mechanistic_rationale: MECHANISTIC_RATIONALE.to_string(),
        trial_support: trials.top(TRIAL_SUPPORT_LIMIT).to_vec(),
        evidence_confidence: EVIDENCE_CONFIDENCE.to_string(),
        guideline_sources: GUIDELINE_SOURCES.iter().map(|s| s.to_string()).collect(),
        last_updated: last_updated(),
    };

    if response.steps.is_empty() {
        return Err(CurieError::PathwayValidation("no pathway steps".to_string()));
    }
    if response.trial_support.is_empty() {
        return Err(CurieError::PathwayValidation("no supporting trials".to_string()));
    }

    info!(
        active_modifiers = modifiers.active().count(),
        phenotype = response.phenotype.primary_phenotype.map(Phenotype::as_str).unwrap_or("none"),
        "Generated HFpEF pathway"
    );
    Ok(response)
}

pub fn clinical_summary(modifiers: &ModifierSet) -> String {
    let labels: Vec<&str> = modifiers.active().map(Modifier::summary_label).collect();
    if labels.is_empty() {
        "For a patient with HFpEF, the following standard management pathway is recommended:".to_string()
    } else {
        format!(
            "For a patient with HFpEF and {}, the following management pathway is recommended:",
            labels.join(", ")
        )
    }
}
