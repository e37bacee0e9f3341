// src/main.rs
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use service_checker::{
    cli::Args,
    config,
    metrics::MetricsRegistry,
    namespace,
    probe::{ProbeExecutor, PROBE_TIMEOUT},
    report::{ConsoleReporter, Reporter},
    scheduler::Scheduler,
    server::start_metrics_server,
    sink::OpenSearchSink,
    CheckerError,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose { "info" } else { "error" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("service_checker={level}").parse()?),
        )
        .init();

    let config_path = args.config.ok_or(CheckerError::MissingConfig)?;

    info!("Loading configuration from: {}", config_path.display());
    let config = config::load_config(&config_path).await?;

    // Every host must resolve before anything is probed.
    let targets = namespace::resolve_all(&config.hosts, &config.namespaces)?;

    let metrics = match args.metrics_addr {
        Some(addr) => {
            let registry = Arc::new(MetricsRegistry::new()?);
            let collector = registry.collector();
            start_metrics_server(addr, registry, "/metrics")?;
            Some(collector)
        }
        None => None,
    };

    let mut reporter = Reporter::new(ConsoleReporter::detect(), args.output);
    if let Some(opensearch) = config.active_opensearch() {
        reporter = reporter.with_sink(Arc::new(OpenSearchSink::new(opensearch)?));
    }
    if let Some(metrics) = &metrics {
        reporter = reporter.with_metrics(metrics.clone());
    }

    let executor = ProbeExecutor::new(PROBE_TIMEOUT, metrics.clone())?;
    let scheduler = Scheduler::new(
        targets,
        executor,
        reporter,
        Duration::from_secs(args.interval),
        metrics,
    );

    scheduler.run().await?;
    Ok(())
}
