//! Guideline citations and driver formatting.

use curie_common::Modifier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub id: String,
    pub source_name: String,
    pub section: String,
    pub excerpt: String,
    pub location: String,
    pub url: Option<String>,
}

struct CitationDef {
    id: &'static str,
    source_name: &'static str,
    section: &'static str,
    excerpt: &'static str,
    location: &'static str,
}

static GUIDELINE_CITATIONS: [CitationDef; 3] = [
    CitationDef {
        id: "G1",
        source_name: "ACC/AHA/HFSA Heart Failure Guideline 2022",
        section: "HFpEF – Pharmacologic therapy",
        excerpt: "SGLT2 inhibitors are recommended (Class I, LOE A) in HFpEF to reduce heart failure hospitalizations and cardiovascular mortality.",
        location: "HFpEF section",
    },
    CitationDef {
        id: "G2",
        source_name: "ESC Heart Failure Guidelines 2021",
        section: "HFpEF treatment",
        excerpt: "SGLT2 inhibitors are recommended in patients with HFpEF to reduce the risk of HF hospitalizations and cardiovascular death.",
        location: "HFpEF section",
    },
    CitationDef {
        id: "G3",
        source_name: "ACC/AHA/HFSA Heart Failure Guideline 2022",
        section: "HFpEF – ARNI therapy",
        excerpt: "ARNI (sacubitril-valsartan) may be beneficial (Class IIa, LOE B-R) to reduce heart failure hospitalizations in selected patients with HFpEF.",
        location: "HFpEF section",
    },
];

impl From<&CitationDef> for Citation {
    fn from(def: &CitationDef) -> Self {
        Self {
            id: def.id.to_string(),
            source_name: def.source_name.to_string(),
            section: def.section.to_string(),
            excerpt: def.excerpt.to_string(),
            location: def.location.to_string(),
            url: None,
        }
    }
}

pub fn guideline_citations() -> Vec<Citation> {
    GUIDELINE_CITATIONS.iter().map(Citation::from).collect()
}

/// Look up a guideline citation. Only `G`-prefixed ids are guideline
/// citations; anything else resolves to `None`.
pub fn citation_by_id(id: &str) -> Option<Citation> {
    if !id.starts_with('G') {
        return None;
    }
    GUIDELINE_CITATIONS.iter().find(|c| c.id == id).map(Citation::from)
}

/// Drivers shown in full up to three; beyond that, "A, B, C + n more".
pub fn format_drivers(drivers: &[Modifier]) -> String {
    let labels: Vec<&str> = drivers.iter().map(|m| m.short_label()).collect();
    if labels.len() <= 3 {
        return labels.join(", ");
    }
    format!("{} + {} more", labels[..3].join(", "), labels.len() - 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_guideline() {
        let c = citation_by_id("G3").unwrap();
        assert_eq!(c.source_name, "ACC/AHA/HFSA Heart Failure Guideline 2022");
        assert!(c.url.is_none());
    }

    #[test]
    fn test_non_guideline_ids_unresolved() {
        assert!(citation_by_id("T1").is_none());
        assert!(citation_by_id("G9").is_none());
        assert!(citation_by_id("").is_none());
    }

    #[test]
    fn test_all_guidelines_listed() {
        let ids: Vec<_> = guideline_citations().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["G1", "G2", "G3"]);
    }

    #[test]
    fn test_format_drivers_joins_up_to_three() {
        assert_eq!(format_drivers(&[]), "");
        assert_eq!(format_drivers(&[Modifier::Frailty]), "Frailty");
        assert_eq!(
            format_drivers(&[Modifier::Frailty, Modifier::Hypotension, Modifier::Ckd]),
            "Frailty, Hypotension, CKD"
        );
    }

    #[test]
    fn test_format_drivers_summarises_overflow() {
        let drivers = [
            Modifier::UncontrolledHypertension,
            Modifier::Ckd,
            Modifier::Frailty,
            Modifier::Obesity,
            Modifier::Afib,
        ];
        assert_eq!(format_drivers(&drivers), "Uncontrolled HTN, CKD, Frailty + 2 more");
    }
}
