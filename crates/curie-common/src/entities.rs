/// Core clinical types shared by the classifier, the pathway tables and the API.
/// Wire names match the JSON the front end sends and receives.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Modifier
// ---------------------------------------------------------------------------

/// A boolean patient attribute used as classifier input.
///
/// Declaration order is the evaluation order used during scoring and for
/// breaking ties between drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Modifier {
    Ckd,
    Hypotension,
    Afib,
    Diabetes,
    Frailty,
    Obesity,
    UncontrolledHypertension,
}

impl Modifier {
    /// All modifiers in evaluation order.
    pub const ALL: [Modifier; 7] = [
        Modifier::Ckd,
        Modifier::Hypotension,
        Modifier::Afib,
        Modifier::Diabetes,
        Modifier::Frailty,
        Modifier::Obesity,
        Modifier::UncontrolledHypertension,
    ];

    /// Wire key, e.g. `uncontrolledHypertension`.
    pub fn key(self) -> &'static str {
        match self {
            Modifier::Ckd => "ckd",
            Modifier::Hypotension => "hypotension",
            Modifier::Afib => "afib",
            Modifier::Diabetes => "diabetes",
            Modifier::Frailty => "frailty",
            Modifier::Obesity => "obesity",
            Modifier::UncontrolledHypertension => "uncontrolledHypertension",
        }
    }

    /// Label used in active-modifier lists.
    pub fn label(self) -> &'static str {
        match self {
            Modifier::Ckd => "CKD",
            Modifier::Hypotension => "Hypotension",
            Modifier::Afib => "Atrial fibrillation",
            Modifier::Diabetes => "Diabetes",
            Modifier::Frailty => "Frailty",
            Modifier::Obesity => "Obesity",
            Modifier::UncontrolledHypertension => "Uncontrolled hypertension",
        }
    }

    /// Compact label used when listing phenotype drivers.
    pub fn short_label(self) -> &'static str {
        match self {
            Modifier::UncontrolledHypertension => "Uncontrolled HTN",
            other => other.label(),
        }
    }

    /// Label used in the clinical summary and the `key_modifiers` map.
    pub fn summary_label(self) -> &'static str {
        match self {
            Modifier::Ckd => "CKD",
            Modifier::Hypotension => "Hypotension",
            Modifier::Afib => "Atrial Fibrillation",
            Modifier::Diabetes => "Diabetes",
            Modifier::Frailty => "Advanced Frailty",
            Modifier::Obesity => "Obesity",
            Modifier::UncontrolledHypertension => "Uncontrolled Hypertension",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// Modifier set
// ---------------------------------------------------------------------------

/// The seven patient flags. Missing or `null` keys deserialize as `false`,
/// unknown keys are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierSet {
    #[serde(default, deserialize_with = "null_as_false")]
    pub ckd: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub hypotension: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub afib: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub diabetes: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub frailty: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub obesity: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub uncontrolled_hypertension: bool,
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, modifier: Modifier) -> Self {
        self.set(modifier, true);
        self
    }

    pub fn is_set(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ckd => self.ckd,
            Modifier::Hypotension => self.hypotension,
            Modifier::Afib => self.afib,
            Modifier::Diabetes => self.diabetes,
            Modifier::Frailty => self.frailty,
            Modifier::Obesity => self.obesity,
            Modifier::UncontrolledHypertension => self.uncontrolled_hypertension,
        }
    }

    pub fn set(&mut self, modifier: Modifier, value: bool) {
        let slot = match modifier {
            Modifier::Ckd => &mut self.ckd,
            Modifier::Hypotension => &mut self.hypotension,
            Modifier::Afib => &mut self.afib,
            Modifier::Diabetes => &mut self.diabetes,
            Modifier::Frailty => &mut self.frailty,
            Modifier::Obesity => &mut self.obesity,
            Modifier::UncontrolledHypertension => &mut self.uncontrolled_hypertension,
        };
        *slot = value;
    }

    /// Set modifiers, in evaluation order.
    pub fn active(&self) -> impl Iterator<Item = Modifier> + '_ {
        Modifier::ALL.into_iter().filter(move |m| self.is_set(*m))
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }

    /// Display labels of the set modifiers.
    pub fn active_labels(&self) -> Vec<&'static str> {
        self.active().map(Modifier::label).collect()
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        iter.into_iter().fold(ModifierSet::default(), ModifierSet::with)
    }
}

// ---------------------------------------------------------------------------
// Phenotype
// ---------------------------------------------------------------------------

/// HFpEF clinical phenotype.
///
/// Declaration order is clinical priority, highest first. It is only used to
/// break ties between equally scored phenotypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phenotype {
    FrailtyDominant,
    CkdModified,
    AfibPredominant,
    MetabolicObesity,
    Hypertensive,
}

impl Phenotype {
    /// All phenotypes, highest priority first.
    pub const PRIORITY: [Phenotype; 5] = [
        Phenotype::FrailtyDominant,
        Phenotype::CkdModified,
        Phenotype::AfibPredominant,
        Phenotype::MetabolicObesity,
        Phenotype::Hypertensive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Phenotype::FrailtyDominant => "frailty_dominant",
            Phenotype::CkdModified => "ckd_modified",
            Phenotype::AfibPredominant => "afib_predominant",
            Phenotype::MetabolicObesity => "metabolic_obesity",
            Phenotype::Hypertensive => "hypertensive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phenotype::FrailtyDominant => "Frailty-dominant HFpEF",
            Phenotype::CkdModified => "CKD-modified HFpEF",
            Phenotype::AfibPredominant => "AFib-predominant HFpEF",
            Phenotype::MetabolicObesity => "Metabolic/obesity HFpEF",
            Phenotype::Hypertensive => "Hypertensive HFpEF",
        }
    }

    /// Modifiers of which at least one must be set for the phenotype to be
    /// eligible as primary.
    pub fn required_modifiers(self) -> &'static [Modifier] {
        match self {
            Phenotype::FrailtyDominant => &[Modifier::Frailty],
            Phenotype::CkdModified => &[Modifier::Ckd],
            Phenotype::AfibPredominant => &[Modifier::Afib],
            Phenotype::MetabolicObesity => &[Modifier::Obesity, Modifier::Diabetes],
            Phenotype::Hypertensive => &[Modifier::UncontrolledHypertension],
        }
    }

    pub fn is_valid_for(self, modifiers: &ModifierSet) -> bool {
        self.required_modifiers().iter().any(|m| modifiers.is_set(*m))
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
