// src/config/mod.rs
mod models;

pub use models::*;

use models::ConfigDocument;

use crate::CheckerError;
use serde::Deserialize;
use std::path::Path;
use std::io::Read;
use tokio::sync::oneshot;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// How long standard input may take to deliver the configuration.
pub const STDIN_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Load configuration from a YAML file, or from standard input when the
/// path is `-`.
pub async fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, CheckerError> {
    let path = path.as_ref();
    let contents = if path == Path::new("-") {
        read_stdin(STDIN_READ_TIMEOUT).await?
    } else {
        tokio::fs::read_to_string(path)
            .await
            .map_err(CheckerError::ConfigRead)?
    };

    let config = parse_config(&contents)?;
    config.validate()?;
    Ok(config)
}

/// Decode every YAML document in `contents`, later documents overriding
/// the keys they set.
pub fn parse_config(contents: &str) -> Result<Config, CheckerError> {
    let mut config = Config::default();

    for (n, document) in serde_yaml::Deserializer::from_str(contents).enumerate() {
        let value = serde_yaml::Value::deserialize(document)?;
        if value.is_null() {
            debug!("Skipping empty config document #{}", n);
            continue;
        }
        let doc: ConfigDocument = serde_yaml::from_value(value)?;
        config.merge(doc);
    }

    Ok(config)
}

async fn read_stdin(limit: Duration) -> Result<String, CheckerError> {
    let (tx, rx) = oneshot::channel();

    // A blocking read cannot be cancelled. Keep it on a detached thread so
    // giving up on it does not hold the runtime open at shutdown.
    std::thread::spawn(move || {
        let mut contents = String::new();
        let read = std::io::stdin()
            .read_to_string(&mut contents)
            .map(|_| contents);
        let _ = tx.send(read);
    });

    match timeout(limit, rx).await {
        Ok(Ok(Ok(contents))) => Ok(contents),
        Ok(Ok(Err(e))) => Err(CheckerError::ConfigRead(e)),
        Ok(Err(_)) => Err(CheckerError::ConfigRead(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "standard input reader exited",
        ))),
        Err(_) => Err(CheckerError::StdinTimeout(limit.as_secs())),
    }
}
