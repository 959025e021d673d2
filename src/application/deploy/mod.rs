//! Deploy Module
//!
//! The orchestrator: one run from preconditions to verification, with
//! failure recovery.
//!
//! ## Structure
//!
//! - `options` - Inputs of a run (`DeployOptions`)
//! - `result` - Outcome of a run (`DeployResult`)
//! - `use_case` - The state machine (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use shipyard::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(terraform.clone(), terraform, ansible, ports);
//! let result = use_case.execute_with(&options, events, confirmer);
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::{DeployPorts, DeployUseCase};
