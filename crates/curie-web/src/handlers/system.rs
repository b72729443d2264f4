//! Service banner, health check and guideline metadata.

use axum::Json;
use curie_pathway::{GuidelineMetadata, SUPPORTED_DISEASE};
use serde_json::{json, Value};

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Curie CDS API",
        "version": env!("CARGO_PKG_VERSION"),
        "disease": SUPPORTED_DISEASE,
    }))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "cors": "enabled" }))
}

/// GET /api/guidelines/metadata
pub async fn guideline_metadata() -> Json<GuidelineMetadata> {
    Json(GuidelineMetadata::current())
}
