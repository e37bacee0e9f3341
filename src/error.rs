// src/error.rs
use std::path::PathBuf;

/// Errors that terminate the whole run.
///
/// Per-probe failures never show up here: they are recorded as the
/// status text of that host's [`crate::probe::ProbeResult`].
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("Config file is required")]
    MissingConfig,

    #[error("Error reading config: {0}")]
    ConfigRead(#[source] std::io::Error),

    #[error("Error reading config: no data on standard input within {0} seconds")]
    StdinTimeout(u64),

    #[error("Error reading config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("No hosts found")]
    NoHosts,

    #[error("Malformed host identifier {0}: expected <namespace>-<address>")]
    MalformedHost(String),

    #[error("Namespace not found for {0}")]
    NamespaceNotFound(String),

    #[error("Error opening output file {}: {source}", path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing to output file: {0}")]
    OutputWrite(#[from] csv::Error),
}
