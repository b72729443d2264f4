//! Guideline metadata and the raw guideline document.

use std::path::Path;

use chrono::NaiveDate;
use curie_common::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

pub const GUIDELINES_FILE: &str = "guidelines.json";

pub const GUIDELINE_VERSION: &str = "ACC/AHA/HFSA 2022, ESC 2021";

pub const GUIDELINE_SOURCES: [&str; 2] = [
    "ACC/AHA/HFSA Heart Failure Guideline 2022",
    "ESC Heart Failure Guidelines 2021",
];

pub const EVIDENCE_CONFIDENCE: &str = "High";

/// Date the pathway content was last reviewed.
pub fn last_updated() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineMetadata {
    pub disease: String,
    pub guideline_version: String,
    pub last_updated: NaiveDate,
    pub evidence_confidence: String,
}

impl GuidelineMetadata {
    pub fn current() -> Self {
        Self {
            disease: crate::pathway::SUPPORTED_DISEASE.to_string(),
            guideline_version: GUIDELINE_VERSION.to_string(),
            last_updated: last_updated(),
            evidence_confidence: EVIDENCE_CONFIDENCE.to_string(),
        }
    }
}

/// Free-form guideline content served as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuidelineDocument(pub Value);

impl Default for GuidelineDocument {
    fn default() -> Self {
        Self(Value::Object(Default::default()))
    }
}

impl GuidelineDocument {
    /// Load `<dir>/guidelines.json`; an absent file yields an empty document.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(GUIDELINES_FILE);
        if !path.exists() {
            info!(path = %path.display(), "No guideline data file, serving empty document");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(Self(serde_json::from_str(&content)?))
    }
}
