// src/probe/executor.rs
use super::result::{ssr_flag, ProbeResult};
use super::Probe;
use crate::metrics::MetricsCollector;
use crate::namespace::ProbeTarget;
use async_trait::async_trait;
use chrono::Local;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Full-request budget for a single probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Issues one GET per target and turns whatever happens into a
/// [`ProbeResult`]. Never retries.
pub struct ProbeExecutor {
    client: Client,
    metrics: Option<Arc<MetricsCollector>>,
}

impl ProbeExecutor {
    pub fn new(
        timeout: Duration,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Result<Self, reqwest::Error> {
        // Certificates are not checked and idle connections are never kept,
        // so every probe pays for a fresh handshake.
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self { client, metrics })
    }
}

#[async_trait]
impl Probe for ProbeExecutor {
    async fn probe(&self, target: &ProbeTarget) -> ProbeResult {
        info!(host = %target.host, "Request url: {}", target.url);

        let observed_at = Local::now();
        let start = Instant::now();
        let response = self.client.get(&target.url).send().await;
        let latency = start.elapsed();

        let mut result = ProbeResult {
            observed_at,
            host: target.host.clone(),
            status_code: String::new(),
            latency,
            content_length: 0,
            ssr: None,
        };

        match response {
            Ok(response) if response.status() == StatusCode::OK => {
                result.status_code = StatusCode::OK.as_u16().to_string();
                match response.bytes().await {
                    Ok(body) => {
                        result.content_length = body.len();
                        result.ssr = ssr_flag(body.len(), target.ssr_threshold);
                    }
                    Err(e) => debug!("Reading body from {} failed: {}", target.host, e),
                }
            }
            Ok(response) => {
                result.status_code = response.status().as_u16().to_string();
            }
            Err(e) => {
                debug!("Probe of {} ({}) failed: {}", target.host, target.address, e);
                result.status_code = e.to_string();
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record_probe(&target.namespace, &result);
        }

        result
    }
}
