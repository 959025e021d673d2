//! Shipyard - single-host deployment orchestrator
//!
//! Shipyard provisions a host with Terraform against a shared remote state,
//! configures it with Ansible, and verifies the public endpoint. State locks
//! left behind by interrupted runs are detected and released only with
//! operator consent.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{DeployOptions, DeployResult, DeployUseCase};
pub use config::Config;
pub use domain::entities::{DeploymentRun, LockInfo, Phase, ResourceSet};
pub use error::{ShipyardError, ShipyardResult};
