//! Liveness and readiness endpoints
//!
//! `/health` and `/health/live` answer as long as the process serves
//! requests. `/health/ready` additionally pings the task store.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Body shared by all probe endpoints
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub status: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreStatus>,
}

#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProbeReport {
    fn bare(status: &'static str) -> Self {
        Self {
            status,
            version: VERSION,
            store: None,
        }
    }
}

pub async fn health_check() -> Json<ProbeReport> {
    Json(ProbeReport::bare("healthy"))
}

pub async fn liveness_check() -> Json<ProbeReport> {
    Json(ProbeReport::bare("alive"))
}

/// 200 when the store answers a ping, 503 otherwise
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ProbeReport>) {
    let (code, status, store) = match state.stores().ping().await {
        Ok(()) => (
            StatusCode::OK,
            "ready",
            StoreStatus {
                reachable: true,
                error: None,
            },
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "not_ready",
            StoreStatus {
                reachable: false,
                error: Some(e.to_string()),
            },
        ),
    };

    let report = ProbeReport {
        status,
        version: VERSION,
        store: Some(store),
    };
    (code, Json(report))
}
