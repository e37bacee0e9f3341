// src/sink/mod.rs
mod opensearch;

pub use opensearch::OpenSearchSink;

use crate::probe::ProbeResult;
use async_trait::async_trait;

/// Somewhere a copy of each probe result is shipped to.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn send(&self, result: &ProbeResult) -> Result<(), SinkError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Invalid sink address {0}: {1}")]
    InvalidAddress(String, #[source] url::ParseError),

    #[error("Sink request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Sink rejected document with {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}
