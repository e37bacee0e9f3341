// src/probe/result.rs
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::time::Duration;

/// Outcome of one probe of one host in one cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    #[serde(rename = "Time")]
    pub observed_at: DateTime<Local>,
    #[serde(rename = "Host")]
    pub host: String,
    /// Decimal HTTP status, or the transport error text.
    #[serde(rename = "StatusCode")]
    pub status_code: String,
    #[serde(rename = "Latency", serialize_with = "as_seconds")]
    pub latency: Duration,
    #[serde(rename = "ContentLength")]
    pub content_length: usize,
    #[serde(rename = "SSR")]
    pub ssr: Option<bool>,
}

impl ProbeResult {
    pub fn is_ok(&self) -> bool {
        self.status_code == "200"
    }
}

fn as_seconds<S: Serializer>(latency: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(latency.as_secs_f64())
}

/// SSR verdict for a body of `content_length` bytes. Strictly greater than
/// the threshold counts as rendered.
pub fn ssr_flag(content_length: usize, threshold: Option<usize>) -> Option<bool> {
    threshold.map(|threshold| content_length > threshold)
}
