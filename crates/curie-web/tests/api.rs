//! End-to-end tests of the HTTP API against the built-in data.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use curie_common::Modifier;
use curie_test_utils::modifiers_json;
use curie_web::{router::build_router, state::AppState};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    build_router(AppState::builtin())
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test]
async fn banner_and_health() {
    let (status, body) = send(app(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["disease"], "HFpEF");

    let (status, body) = send(app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "cors": "enabled" }));
}

#[tokio::test]
async fn guideline_metadata() {
    let (status, body) = send(app(), Method::GET, "/api/guidelines/metadata", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "disease": "HFpEF",
            "guideline_version": "ACC/AHA/HFSA 2022, ESC 2021",
            "last_updated": "2024-01-15",
            "evidence_confidence": "High",
        })
    );
}

#[tokio::test]
async fn pathway_for_frail_patient() {
    let request = json!({
        "disease": "HFpEF",
        "modifiers": modifiers_json(&[Modifier::Ckd, Modifier::Frailty, Modifier::Hypotension]),
    });
    let (status, body) = send(app(), Method::POST, "/api/pathway", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phenotype"]["primaryPhenotype"], "frailty_dominant");
    assert_eq!(body["phenotype"]["drivers"], json!(["frailty", "hypotension", "ckd"]));
    assert_eq!(body["phenotype"]["driversDisplay"], "Frailty, Hypotension, CKD");
    assert_eq!(body["phenotype"]["scores"]["frailty_dominant"], 6);
    assert_eq!(body["steps"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        body["steps"][1]["warning"],
        "Consider frailty assessment; may need dose reduction or slower titration"
    );
    assert_eq!(body["trial_support"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["key_modifiers"]["Advanced Frailty"], true);
}

#[tokio::test]
async fn pathway_defaults_disease_and_missing_flags() {
    let (status, body) = send(app(), Method::POST, "/api/pathway", Some(json!({ "modifiers": {} }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phenotype"]["primaryPhenotype"], Value::Null);
    assert_eq!(body["phenotype"]["label"], "Phenotype not specified");
    assert_eq!(
        body["clinical_summary"],
        "For a patient with HFpEF, the following standard management pathway is recommended:"
    );
}

#[tokio::test]
async fn pathway_rejects_other_diseases() {
    let request = json!({ "disease": "HFrEF", "modifiers": {} });
    let (status, body) = send(app(), Method::POST, "/api/pathway", Some(request)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap_or_default().contains("Only HFpEF is supported"));
}

#[tokio::test]
async fn pathway_without_trials_fails_validation() {
    let state = AppState::new(
        Default::default(),
        curie_pathway::TrialCatalog::default(),
        Default::default(),
    );
    let request = json!({ "modifiers": { "afib": true } });
    let (status, _) = send(build_router(state), Method::POST, "/api/pathway", Some(request)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn phenotype_classification_endpoint() {
    let request = modifiers_json(&[Modifier::Diabetes]);
    let (status, body) = send(app(), Method::POST, "/api/phenotype", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["primaryPhenotype"], "metabolic_obesity");
    assert_eq!(body["label"], "Metabolic/obesity HFpEF");
    assert_eq!(body["drivers"], json!(["diabetes"]));
    assert_eq!(body["selection"], "top_scoring");
}

#[tokio::test]
async fn phenotype_classification_tolerates_nulls() {
    let request = json!({ "hypotension": true, "frailty": null });
    let (status, body) = send(app(), Method::POST, "/api/phenotype", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["primaryPhenotype"], Value::Null);
    assert_eq!(body["selection"], "no_valid_candidate");
    assert_eq!(body["scores"]["frailty_dominant"], 2);
}

#[tokio::test]
async fn trials_and_guidelines() {
    let (status, body) = send(app(), Method::GET, "/api/trials", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trials"][0]["name"], "EMPEROR-Preserved");

    let (status, body) = send(app(), Method::GET, "/api/guidelines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn citations_resolve_guidelines_and_trials() {
    let (status, body) = send(app(), Method::GET, "/api/citations/G1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "guideline");
    assert_eq!(body["source_name"], "ACC/AHA/HFSA Heart Failure Guideline 2022");

    let (status, body) = send(app(), Method::GET, "/api/citations/T2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kind"], "trial");
    assert_eq!(body["name"], "DELIVER");

    let (status, _) = send(app(), Method::GET, "/api/citations/X1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn step_annotations() {
    let (status, body) =
        send(app(), Method::GET, "/api/steps/2/annotations?phenotype=hypertensive", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["phenotype_note"],
        "ARNI may provide additional benefit in patients with uncontrolled hypertension."
    );
    assert_eq!(body["why"].as_array().map(Vec::len), Some(3));

    let (status, body) = send(app(), Method::GET, "/api/steps/1/annotations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phenotype_note"], Value::Null);
    assert_eq!(body["why"].as_array().map(Vec::len), Some(2));

    let (status, _) = send(app(), Method::GET, "/api/steps/7/annotations", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn state_loads_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("guidelines.json"),
        r#"{"hfpef": {"sglt2i": "Class I"}}"#,
    )
    .unwrap();
    let mut config = curie_web::config::Config::default();
    config.data.dir = dir.path().to_path_buf();

    let state = AppState::from_config(&config).unwrap();
    let (status, body) = send(build_router(state), Method::GET, "/api/guidelines", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hfpef"]["sglt2i"], "Class I");
}
