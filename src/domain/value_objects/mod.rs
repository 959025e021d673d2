//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

pub mod environment;
mod inventory;

pub use environment::{DeployEnvironment, EnvironmentInputs, RepoDefaults};
pub use inventory::Inventory;
