//! curie-pathway: Stepwise HFpEF management pathway.
//! Static step templates, modifier adjustments, per-phenotype annotations,
//! citations and the trial catalog, assembled into a pathway response.

pub mod annotations;
pub mod citations;
pub mod guidelines;
pub mod pathway;
pub mod steps;
pub mod trials;

pub use annotations::{step_phenotype_note, why_bullets_for_step, WhyBullet};
pub use citations::{citation_by_id, format_drivers, Citation};
pub use guidelines::{GuidelineDocument, GuidelineMetadata};
pub use pathway::{generate_pathway, KeyModifiers, PathwayRequest, PathwayResponse, PhenotypeSummary, SUPPORTED_DISEASE};
pub use steps::PathwayStep;
pub use trials::{Trial, TrialCatalog};
