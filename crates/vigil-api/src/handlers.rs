//! API Handlers
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;
use vigil_core::{ApiEntry, Project, VIGIL_VERSION};
use vigil_probe::grouper::observe;

/// Project id used for ad-hoc compliance checks that arrive as bare
/// URL/environment lists rather than configured entries.
const AD_HOC_PROJECT_ID: i64 = 0;

#[derive(Debug, Deserialize)]
pub struct ComplianceCheckRequest {
    pub urls: Vec<String>,
    /// Environment label per URL, same length as `urls`
    pub environments: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProbeCheckRequest {
    pub url: String,
    #[serde(default)]
    pub environment: String,
    #[serde(default)]
    pub region: String,
}

/// POST /v1/compliance/check
///
/// Runs one compliance cycle over an ad-hoc list of URLs and
/// environment labels and returns the full report.
pub async fn compliance_check(
    State(state): State<AppState>,
    Json(payload): Json<ComplianceCheckRequest>,
) -> (StatusCode, Json<Value>) {
    if payload.urls.len() != payload.environments.len() {
        return bad("URLs and environments arrays must be provided and have the same length");
    }

    let entries: Vec<ApiEntry> = payload
        .urls
        .iter()
        .zip(payload.environments.iter())
        .enumerate()
        .map(|(i, (url, environment))| ApiEntry {
            id: i as i64 + 1,
            project_id: AD_HOC_PROJECT_ID,
            url: url.clone(),
            environment: environment.clone(),
            region: String::new(),
        })
        .collect();
    let projects = vec![Project {
        id: AD_HOC_PROJECT_ID,
        name: "Ad-hoc".to_string(),
    }];

    state.metrics.cycles_total.inc();
    match state.engine.check(&entries, &projects).await {
        Ok(report) => match serde_json::to_value(&report) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(err) => server_error(&err.to_string()),
        },
        Err(err) => {
            state.metrics.cycle_failures_total.inc();
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": err.to_string() })),
            )
        }
    }
}

/// GET /v1/compliance/report — the last successfully published report.
pub async fn last_report(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.engine.last_report().await {
        Some(report) => match serde_json::to_value(&report) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(err) => server_error(&err.to_string()),
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "no compliance cycle has completed yet" })),
        ),
    }
}

/// POST /v1/probe/check — probe a single endpoint and return the
/// observation.
pub async fn probe_check(
    State(state): State<AppState>,
    Json(payload): Json<ProbeCheckRequest>,
) -> (StatusCode, Json<Value>) {
    if payload.url.trim().is_empty() {
        return bad("Missing required property 'url'. Send: {\"url\":\"https://service/health\"}");
    }

    state.metrics.probes_total.inc();
    let outcome = state.prober.probe_with_fallback(&payload.url).await;
    let entry = ApiEntry {
        id: 0,
        project_id: AD_HOC_PROJECT_ID,
        url: payload.url,
        environment: payload.environment,
        region: payload.region,
    };
    let observation = observe(&entry, &outcome, &[]);

    match serde_json::to_value(&observation) {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(err) => server_error(&err.to_string()),
    }
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": VIGIL_VERSION })),
    )
}

pub async fn metrics(State(state): State<AppState>) -> (StatusCode, String) {
    match state.metrics.encode() {
        Ok(body) => (StatusCode::OK, body),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

fn bad(message: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn server_error(message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
}
