//! Shared test infrastructure.


/// Instrumented collaborators.
pub mod mocks;
