// src/cli/mod.rs
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "service-checker",
    about = "Poll a fleet of HTTP(S) endpoints and report status, latency and size",
    after_help = "\
EXAMPLES:
    service-checker -c hosts.yaml                    Probe every host once
    service-checker -c hosts.yaml -i 60 -o out.csv   Probe every minute, append to CSV
    cat hosts.yaml | service-checker -c -            Read config from stdin"
)]
pub struct Args {
    /// Config file (`-` reads standard input)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append results to this CSV file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Seconds between cycles (0 = run once)
    #[arg(short = 'i', long = "interval", default_value = "0")]
    pub interval: u64,

    /// Log request URLs and sink failures
    #[arg(short, long)]
    pub verbose: bool,

    /// Serve Prometheus metrics on this address
    #[arg(long, value_name = "ADDR")]
    pub metrics_addr: Option<SocketAddr>,
}
