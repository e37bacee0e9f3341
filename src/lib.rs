// src/lib.rs
pub mod cli;
pub mod config;
pub mod error;
pub mod metrics;
pub mod namespace;
pub mod probe;
pub mod report;
pub mod scheduler;
pub mod server;
pub mod sink;
pub mod store;

pub use error::CheckerError;
