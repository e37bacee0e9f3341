// src/scheduler/mod.rs
use crate::metrics::MetricsCollector;
use crate::namespace::ProbeTarget;
use crate::probe::{Probe, ProbeResult};
use crate::report::Reporter;
use crate::store::ResultStore;
use crate::CheckerError;
use chrono::Local;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::{debug, error, info};

/// Probes every target once per cycle, reports, then sleeps for the
/// interval. A zero interval means a single cycle.
pub struct Scheduler {
    targets: Arc<[ProbeTarget]>,
    prober: Arc<dyn Probe>,
    reporter: Reporter,
    interval: Duration,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Scheduler {
    pub fn new<P: Probe + 'static>(
        targets: Vec<ProbeTarget>,
        prober: P,
        reporter: Reporter,
        interval: Duration,
        metrics: Option<Arc<MetricsCollector>>,
    ) -> Self {
        Self {
            targets: targets.into(),
            prober: Arc::new(prober),
            reporter,
            interval,
            metrics,
        }
    }

    /// Run cycles until the process ends, or exactly one when the interval
    /// is zero. Only reporting errors stop the loop.
    pub async fn run(&self) -> Result<(), CheckerError> {
        info!(
            "Checking {} hosts, interval: {:?}",
            self.targets.len(),
            self.interval
        );

        loop {
            self.run_cycle().await?;

            if self.interval.is_zero() {
                return Ok(());
            }
            debug!("Sleeping {:?} until next cycle", self.interval);
            sleep(self.interval).await;
        }
    }

    pub async fn run_cycle(&self) -> Result<(), CheckerError> {
        let results = self.probe_all().await;
        self.reporter.report(&self.targets, &results).await
    }

    /// Fan out one probe per target and wait for every one of them.
    pub async fn probe_all(&self) -> HashMap<String, ProbeResult> {
        let started = Instant::now();
        let store = Arc::new(ResultStore::with_capacity(self.targets.len()));
        let mut tasks = Vec::with_capacity(self.targets.len());

        for index in 0..self.targets.len() {
            let targets = self.targets.clone();
            let prober = self.prober.clone();
            let store = store.clone();
            let task = tokio::spawn(async move {
                prober.execute(&targets[index], &store).await;
            });
            tasks.push(task);
        }

        // Wait for all probes to complete
        let joined = futures::future::join_all(tasks).await;

        for (target, outcome) in self.targets.iter().zip(joined) {
            if let Err(e) = outcome {
                error!("Probe task for {} failed: {}", target.host, e);
                store.put(task_failure(target, &e)).await;
            }
        }

        let results = store.snapshot_and_clear().await;
        let ok = results.values().filter(|r| r.is_ok()).count();

        if let Some(metrics) = &self.metrics {
            metrics.record_cycle(started.elapsed(), ok, results.len());
        }

        info!(
            "Cycle complete in {:?}: {} ok, {} failing",
            started.elapsed(),
            ok,
            results.len() - ok
        );

        results
    }
}

fn task_failure(target: &ProbeTarget, e: &tokio::task::JoinError) -> ProbeResult {
    ProbeResult {
        observed_at: Local::now(),
        host: target.host.clone(),
        status_code: format!("probe task failed: {e}"),
        latency: Duration::ZERO,
        content_length: 0,
        ssr: None,
    }
}
