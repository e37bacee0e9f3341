// src/metrics/collector.rs
use crate::probe::ProbeResult;
use anyhow::Result;
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

pub struct MetricsRegistry {
    registry: Registry,
    collector: Arc<MetricsCollector>,
}

impl MetricsRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let collector = Arc::new(MetricsCollector::new(&registry)?);

        Ok(Self {
            registry,
            collector,
        })
    }

    pub fn collector(&self) -> Arc<MetricsCollector> {
        self.collector.clone()
    }

    pub fn gather(&self) -> Result<Vec<u8>> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(buffer)
    }
}

pub struct MetricsCollector {
    // Probe metrics
    pub probes_total: IntCounterVec,
    pub probe_duration_seconds: HistogramVec,
    pub probe_content_length_bytes: HistogramVec,

    // Cycle metrics
    pub cycles_total: IntCounter,
    pub cycle_duration_seconds: Histogram,
    pub hosts_ok: IntGauge,
    pub hosts_total: IntGauge,

    // Sink metrics
    pub sink_failures_total: IntCounter,
}

impl MetricsCollector {
    pub fn new(registry: &Registry) -> Result<Self> {
        let probes_total = IntCounterVec::new(
            Opts::new("checker_probes_total", "Total number of probes"),
            &["namespace", "outcome"],
        )?;
        registry.register(Box::new(probes_total.clone()))?;

        let probe_duration_seconds = HistogramVec::new(
            HistogramOpts::new("checker_probe_duration_seconds", "Probe latency in seconds"),
            &["namespace"],
        )?;
        registry.register(Box::new(probe_duration_seconds.clone()))?;

        let probe_content_length_bytes = HistogramVec::new(
            HistogramOpts::new(
                "checker_probe_content_length_bytes",
                "Body size of successful probes",
            )
            .buckets(prometheus::exponential_buckets(256.0, 4.0, 8)?),
            &["namespace"],
        )?;
        registry.register(Box::new(probe_content_length_bytes.clone()))?;

        let cycles_total = IntCounter::new("checker_cycles_total", "Completed probe cycles")?;
        registry.register(Box::new(cycles_total.clone()))?;

        let cycle_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "checker_cycle_duration_seconds",
            "Wall time from fan-out to the last probe finishing",
        ))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;

        let hosts_ok = IntGauge::new("checker_hosts_ok", "Hosts answering 200 last cycle")?;
        registry.register(Box::new(hosts_ok.clone()))?;

        let hosts_total = IntGauge::new("checker_hosts_total", "Hosts probed last cycle")?;
        registry.register(Box::new(hosts_total.clone()))?;

        let sink_failures_total =
            IntCounter::new("checker_sink_failures_total", "Results the sink rejected")?;
        registry.register(Box::new(sink_failures_total.clone()))?;

        Ok(Self {
            probes_total,
            probe_duration_seconds,
            probe_content_length_bytes,
            cycles_total,
            cycle_duration_seconds,
            hosts_ok,
            hosts_total,
            sink_failures_total,
        })
    }

    pub fn record_probe(&self, namespace: &str, result: &ProbeResult) {
        let outcome = if result.is_ok() {
            "ok"
        } else if result.status_code.parse::<u16>().is_ok() {
            "http_error"
        } else {
            "transport_error"
        };
        self.probes_total
            .with_label_values(&[namespace, outcome])
            .inc();

        self.probe_duration_seconds
            .with_label_values(&[namespace])
            .observe(result.latency.as_secs_f64());

        if result.is_ok() {
            self.probe_content_length_bytes
                .with_label_values(&[namespace])
                .observe(result.content_length as f64);
        }
    }

    pub fn record_cycle(&self, duration: Duration, ok: usize, total: usize) {
        self.cycles_total.inc();
        self.cycle_duration_seconds.observe(duration.as_secs_f64());
        self.hosts_ok.set(ok as i64);
        self.hosts_total.set(total as i64);
    }

    pub fn record_sink_failure(&self) {
        self.sink_failures_total.inc();
    }
}
