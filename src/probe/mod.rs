// src/probe/mod.rs
mod executor;
mod result;

pub use executor::{ProbeExecutor, PROBE_TIMEOUT};
pub use result::{ssr_flag, ProbeResult};

use crate::namespace::ProbeTarget;
use crate::store::ResultStore;
use async_trait::async_trait;

/// Turns one target into one result. Failures are data, never errors.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, target: &ProbeTarget) -> ProbeResult;

    /// Probe `target` and publish the result. The store write is the only
    /// shared mutation a probe performs.
    async fn execute(&self, target: &ProbeTarget, store: &ResultStore) {
        let result = self.probe(target).await;
        store.put(result).await;
    }
}
