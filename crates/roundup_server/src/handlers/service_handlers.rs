use std::time::Duration;

use axum::{Json, extract::State, http::Uri};
use serde::Serialize;
use serde_json::{Value, json};

use super::AppState;
use crate::error::ApiError;
use crate::routes::API_BASE;

/// Process statistics reported by `/performance`
#[derive(Debug, Serialize)]
pub struct PerformanceReport {
    /// Uptime as `HH:MM:SS.mmm`
    pub time: String,
    /// Resident memory as `<n> MB`
    pub memory: String,
    pub threads: usize,
}

pub async fn index() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "roundup_server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            format!("POST {API_BASE}/transactions/parse"),
            format!("POST {API_BASE}/transactions/validator"),
            format!("POST {API_BASE}/transactions/filter"),
            format!("POST {API_BASE}/returns/nps"),
            format!("POST {API_BASE}/returns/index"),
            format!("GET {API_BASE}/performance"),
            "GET /health".to_string(),
        ],
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn performance(State(state): State<AppState>) -> Json<PerformanceReport> {
    let memory = resident_memory_mb().unwrap_or(0.0);
    let threads = tokio::runtime::Handle::current().metrics().num_workers();

    Json(PerformanceReport {
        time: format_uptime(state.started_at.elapsed()),
        memory: format!("{memory:.2} MB"),
        threads,
    })
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}

fn format_uptime(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let hours = millis / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;
    let seconds = (millis % 60_000) / 1_000;
    let fraction = millis % 1_000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{fraction:03}")
}

/// Resident set size from `/proc/self/status`; `None` where that is unavailable
fn resident_memory_mb() -> Option<f64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|line| line.starts_with("VmRSS:"))?;
    let kilobytes: f64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kilobytes / 1024.0)
}
