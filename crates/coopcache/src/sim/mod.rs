//! Workload driver.
//!
//! Provides the request generator and the simulator that builds a cluster
//! from configuration, warms it up and runs a request stream against it.

/// Simulator: owns the cluster, the block catalogue and the run statistics.
pub mod simulator;

/// Seeded request generators.
pub mod workload;

pub use simulator::Simulator;
pub use workload::Workload;
