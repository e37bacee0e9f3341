// src/report/csv_output.rs
use crate::probe::ProbeResult;
use crate::CheckerError;
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Appends one headerless row per result.
pub struct CsvOutput {
    writer: csv::Writer<File>,
}

impl CsvOutput {
    pub fn open(path: &Path) -> Result<Self, CheckerError> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|source| CheckerError::OutputOpen {
                path: path.to_path_buf(),
                source,
            })?;

        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        Ok(Self { writer })
    }

    pub fn write(&mut self, result: &ProbeResult) -> Result<(), CheckerError> {
        self.writer.write_record(csv_row(result))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), CheckerError> {
        self.writer
            .flush()
            .map_err(|e| CheckerError::OutputWrite(e.into()))
    }
}

/// observedAt, host, statusCode, latency (s), contentLength (bytes), ssr.
pub fn csv_row(result: &ProbeResult) -> [String; 6] {
    [
        result.observed_at.to_string(),
        result.host.clone(),
        result.status_code.clone(),
        format!("{:.6}", result.latency.as_secs_f64()),
        result.content_length.to_string(),
        match result.ssr {
            Some(ssr) => ssr.to_string(),
            None => "-".to_string(),
        },
    ]
}
