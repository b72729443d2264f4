//! Evidence endpoints: trials, guideline document, citations, step annotations.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use curie_common::{error::ApiError, Phenotype};
use curie_pathway::{
    annotations::is_annotated_step, citation_by_id, step_phenotype_note, why_bullets_for_step, Citation,
    GuidelineDocument, Trial, WhyBullet,
};
use serde::{Deserialize, Serialize};

use crate::state::SharedState;

#[derive(Debug, Serialize, Deserialize)]
pub struct TrialList {
    pub trials: Vec<Trial>,
}

/// GET /api/trials
pub async fn api_trials(State(state): State<SharedState>) -> Json<TrialList> {
    Json(TrialList { trials: state.trials.trials().to_vec() })
}

/// GET /api/guidelines
pub async fn api_guidelines(State(state): State<SharedState>) -> Json<GuidelineDocument> {
    Json(state.guidelines.clone())
}

/// A resolved citation chip: a guideline excerpt or a supporting trial.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CitationDetail {
    Guideline(Citation),
    Trial(Trial),
}

/// GET /api/citations/{id}
pub async fn api_citation(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<CitationDetail>, ApiError> {
    if let Some(citation) = citation_by_id(&id) {
        return Ok(Json(CitationDetail::Guideline(citation)));
    }
    state
        .trials
        .by_citation_id(&id)
        .map(|trial| Json(CitationDetail::Trial(trial.clone())))
        .ok_or_else(|| ApiError::not_found(format!("Unknown citation: {id}")))
}

#[derive(Debug, Deserialize)]
pub struct AnnotationQuery {
    pub phenotype: Option<Phenotype>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StepAnnotations {
    pub step_number: u8,
    pub phenotype_note: Option<String>,
    pub why: Vec<WhyBullet>,
}

/// GET /api/steps/{step}/annotations?phenotype=...
pub async fn api_step_annotations(
    Path(step): Path<u8>,
    Query(query): Query<AnnotationQuery>,
) -> Result<Json<StepAnnotations>, ApiError> {
    if !is_annotated_step(step) {
        return Err(ApiError::not_found(format!("Unknown pathway step: {step}")));
    }
    Ok(Json(StepAnnotations {
        step_number: step,
        phenotype_note: step_phenotype_note(step, query.phenotype).map(str::to_string),
        why: why_bullets_for_step(step, query.phenotype),
    }))
}
