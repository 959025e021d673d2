//! Domain Entities
//!
//! - `DeploymentRun` - One orchestrator invocation and its phase
//! - `LockInfo` - Snapshot of a held state lock
//! - `ResourceSet` - Resource addresses tracked in remote state

mod lock_info;
mod resource_set;
mod run;

pub use lock_info::{LockInfo, LockOperation};
pub use resource_set::ResourceSet;
pub use run::{DeploymentRun, Phase};
