// src/store/mod.rs
use crate::probe::ProbeResult;
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::warn;

/// Latest probe result per host for the cycle in flight.
///
/// Every writer goes through the same lock. Readers only call
/// [`ResultStore::snapshot_and_clear`] once all writers of the cycle have
/// been joined.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: Mutex<HashMap<String, ProbeResult>>,
}

impl ResultStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    pub async fn put(&self, result: ProbeResult) {
        let mut results = self.results.lock().await;
        if let Some(previous) = results.insert(result.host.clone(), result) {
            warn!("Result for {} written twice in one cycle", previous.host);
        }
    }

    /// Hand the collected results off, leaving the store empty.
    pub async fn snapshot_and_clear(&self) -> HashMap<String, ProbeResult> {
        std::mem::take(&mut *self.results.lock().await)
    }
}
