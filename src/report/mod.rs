// src/report/mod.rs
mod console;
mod csv_output;

pub use console::ConsoleReporter;
pub use csv_output::{csv_row, CsvOutput};

use crate::metrics::MetricsCollector;
use crate::namespace::ProbeTarget;
use crate::probe::ProbeResult;
use crate::sink::ResultSink;
use crate::CheckerError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, warn};

/// Renders a finished cycle: console always, CSV when an output path is
/// set, and the sink only alongside CSV output.
pub struct Reporter {
    console: ConsoleReporter,
    output: Option<PathBuf>,
    sink: Option<Arc<dyn ResultSink>>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl Reporter {
    pub fn new(console: ConsoleReporter, output: Option<PathBuf>) -> Self {
        Self {
            console,
            output,
            sink: None,
            metrics: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Report `results` in configured host order.
    pub async fn report(
        &self,
        targets: &[ProbeTarget],
        results: &HashMap<String, ProbeResult>,
    ) -> Result<(), CheckerError> {
        let mut output = self.output.as_deref().map(CsvOutput::open).transpose()?;

        for target in targets {
            let Some(result) = results.get(&target.host) else {
                error!("No result recorded for {}", target.host);
                continue;
            };

            self.console.print(result);

            if let Some(output) = output.as_mut() {
                if let Some(sink) = &self.sink {
                    if let Err(e) = sink.send(result).await {
                        warn!("Sending {} to {} failed: {}", result.host, sink.name(), e);
                        if let Some(metrics) = &self.metrics {
                            metrics.record_sink_failure();
                        }
                    }
                }
                output.write(result)?;
            }
        }

        if let Some(output) = output.as_mut() {
            output.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SinkError;
    use async_trait::async_trait;
    use chrono::Local;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct RecordingSink {
        hosts: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ResultSink for RecordingSink {
        async fn send(&self, result: &ProbeResult) -> Result<(), SinkError> {
            self.hosts.lock().unwrap().push(result.host.clone());
            if self.fail {
                return Err(SinkError::Rejected {
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                    body: String::new(),
                });
            }
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn target(host: &str) -> ProbeTarget {
        ProbeTarget {
            host: host.to_string(),
            namespace: "web".to_string(),
            address: host.trim_start_matches("web-").to_string(),
            url: format!("http://{host}/"),
            ssr_threshold: None,
        }
    }

    fn results(latencies: &[(&str, u64)]) -> HashMap<String, ProbeResult> {
        latencies
            .iter()
            .map(|(host, ms)| {
                let result = ProbeResult {
                    observed_at: Local::now(),
                    host: host.to_string(),
                    status_code: "200".to_string(),
                    latency: Duration::from_millis(*ms),
                    content_length: 10,
                    ssr: None,
                };
                (host.to_string(), result)
            })
            .collect()
    }

    #[tokio::test]
    async fn test_rows_follow_configured_order_with_own_latency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let reporter = Reporter::new(ConsoleReporter::new(false), Some(path.clone()));

        let targets = [target("web-b"), target("web-a")];
        reporter
            .report(&targets, &results(&[("web-a", 120), ("web-b", 450)]))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(",web-b,200,0.450000,10,-"));
        assert!(lines[1].contains(",web-a,200,0.120000,10,-"));
    }

    #[tokio::test]
    async fn test_sink_only_used_with_csv_output() {
        let sink = Arc::new(RecordingSink::default());
        let reporter = Reporter::new(ConsoleReporter::new(false), None).with_sink(sink.clone());

        reporter
            .report(&[target("web-a")], &results(&[("web-a", 1)]))
            .await
            .unwrap();

        assert!(sink.hosts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let sink = Arc::new(RecordingSink {
            fail: true,
            ..Default::default()
        });
        let reporter =
            Reporter::new(ConsoleReporter::new(false), Some(path.clone())).with_sink(sink.clone());

        let targets = [target("web-a"), target("web-b")];
        reporter
            .report(&targets, &results(&[("web-a", 1), ("web-b", 2)]))
            .await
            .unwrap();

        assert_eq!(*sink.hosts.lock().unwrap(), vec!["web-a", "web-b"]);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
