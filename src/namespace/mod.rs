// src/namespace/mod.rs
mod resolver;

pub use resolver::{resolve, resolve_all, ProbeTarget};
