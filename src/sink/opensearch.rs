// src/sink/opensearch.rs
use super::{ResultSink, SinkError};
use crate::config::OpenSearchConfig;
use crate::probe::ProbeResult;
use async_trait::async_trait;
use reqwest::{tls, Client};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Indexes each result as one document via `POST /<index>/_doc`.
pub struct OpenSearchSink {
    client: Client,
    endpoints: Vec<Url>,
    username: String,
    password: String,
    counter: AtomicUsize,
}

impl OpenSearchSink {
    pub fn new(config: &OpenSearchConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .min_tls_version(tls::Version::TLS_1_1)
            .build()?;

        let endpoints = config
            .hosts
            .iter()
            .map(|host| document_endpoint(host, &config.index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            client,
            endpoints,
            username: config.username.clone(),
            password: config.password.clone(),
            counter: AtomicUsize::new(0),
        })
    }

    /// Round-robin over the configured nodes.
    fn next_endpoint(&self) -> Option<&Url> {
        if self.endpoints.is_empty() {
            return None;
        }
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % self.endpoints.len();
        self.endpoints.get(index)
    }
}

fn document_endpoint(host: &str, index: &str) -> Result<Url, SinkError> {
    let mut base =
        Url::parse(host).map_err(|e| SinkError::InvalidAddress(host.to_string(), e))?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("{index}/_doc"))
        .map_err(|e| SinkError::InvalidAddress(host.to_string(), e))
}

#[async_trait]
impl ResultSink for OpenSearchSink {
    async fn send(&self, result: &ProbeResult) -> Result<(), SinkError> {
        let Some(endpoint) = self.next_endpoint() else {
            return Ok(());
        };
        debug!("Indexing result for {} at {}", result.host, endpoint);

        let mut request = self.client.post(endpoint.clone()).json(result);
        if !self.username.is_empty() {
            request = request.basic_auth(&self.username, Some(&self.password));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected { status, body });
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "opensearch"
    }
}
