//! Pathway generation and phenotype classification.

use axum::{extract::State, Json};
use curie_common::{error::ApiError, ModifierSet};
use curie_pathway::{generate_pathway, PathwayRequest, PathwayResponse, PhenotypeSummary};

use crate::state::SharedState;

/// POST /api/pathway: Stepwise pathway for a patient modifier set
pub async fn api_pathway(
    State(state): State<SharedState>,
    Json(request): Json<PathwayRequest>,
) -> Result<Json<PathwayResponse>, ApiError> {
    let pathway = generate_pathway(&request, &state.classifier, &state.trials)?;
    Ok(Json(pathway))
}

/// POST /api/phenotype: Classification only
pub async fn api_phenotype(
    State(state): State<SharedState>,
    Json(modifiers): Json<ModifierSet>,
) -> Json<PhenotypeSummary> {
    Json(state.classifier.classify(&modifiers).into())
}
