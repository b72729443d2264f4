//! Axum router: maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    evidence::{api_citation, api_guidelines, api_step_annotations, api_trials},
    pathway::{api_pathway, api_phenotype},
    system::{guideline_metadata, health, root},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/",       get(root))
        .route("/health", get(health))

        // API endpoints
        .route("/api/guidelines/metadata",      get(guideline_metadata))
        .route("/api/guidelines",               get(api_guidelines))
        .route("/api/pathway",                  post(api_pathway))
        .route("/api/phenotype",                post(api_phenotype))
        .route("/api/trials",                   get(api_trials))
        .route("/api/citations/{id}",           get(api_citation))
        .route("/api/steps/{step}/annotations", get(api_step_annotations))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
