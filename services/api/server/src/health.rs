use std::collections::HashMap;
use std::time::Instant;

use axum::Json;
use axum::http::StatusCode;
use request_history::HistoryLog;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize, Debug)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub uptime_seconds: u64,
    pub components: HashMap<String, ComponentHealth>,
}

pub async fn handler(state: AppState) -> (StatusCode, Json<HealthResponse>) {
    let mut components = HashMap::new();
    components.insert("history_log".to_string(), check_history(&state.history));

    let is_shutting_down = state.shutdown.is_shutting_down();

    let any_unhealthy = components
        .values()
        .any(|c| c.status == HealthStatus::Unhealthy);

    let overall = if is_shutting_down || any_unhealthy {
        HealthStatus::Unhealthy
    } else {
        HealthStatus::Healthy
    };

    let status_code = if overall == HealthStatus::Unhealthy {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };

    (
        status_code,
        Json(HealthResponse {
            status: overall,
            uptime_seconds: state.telemetry.uptime_seconds(),
            components,
        }),
    )
}

fn check_history(history: &HistoryLog) -> ComponentHealth {
    let start = Instant::now();
    let probe = history.probe();
    let latency_ms = start.elapsed().as_millis() as u64;

    match probe {
        Some(records) => ComponentHealth {
            status: HealthStatus::Healthy,
            latency_ms: Some(latency_ms),
            records: Some(records),
            error: None,
        },
        None => ComponentHealth {
            status: HealthStatus::Unhealthy,
            latency_ms: Some(latency_ms),
            records: None,
            error: Some("history log is locked".to_string()),
        },
    }
}
