//! Unit tests, one module per component.

/// Aging counters and eviction.
pub mod aging;


/// Configuration defaults, parsing and validation.
pub mod config;

/// End-to-end simulator runs.
pub mod simulator;
