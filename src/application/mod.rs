//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT spawn processes or touch the network itself
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - One orchestrator run, preconditions to verification
//! - `UnlockUseCase` - Detect and force-release a stale state lock
//! - `TeardownUseCase` - Destroy everything the shared state tracks
//! - `StatusUseCase` - Read-only view of lock and tracked resources
//!
//! ## Services
//!
//! - `destroy_and_clean` - Destroy with per-resource state removal fallback
//! - `clear_lock` - Consent-gated lock release
//! - `check_deploy` - Collect every precondition problem at once

pub mod cleanup;
pub mod deploy;
pub mod locks;
pub mod preconditions;
pub mod status;
pub mod teardown;

pub use cleanup::{destroy_and_clean, CleanupReport};
pub use deploy::{DeployOptions, DeployPorts, DeployResult, DeployUseCase};
pub use locks::{clear_lock, UnlockOutcome, UnlockUseCase};
pub use preconditions::{check_deploy, missing_tools, require_tools};
pub use status::{StatusReport, StatusUseCase};
pub use teardown::{TeardownOutcome, TeardownUseCase};
