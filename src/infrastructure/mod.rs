//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `process` - External command execution (`CommandRunner`)
//! - `terraform` / `ansible` / `aws` - Tool adapters
//! - `events/` - Event sinks (NDJSON)
//! - `confirm/` - Operator confirmation

pub mod ansible;
pub mod artifacts;
pub mod aws;
pub mod confirm;
pub mod events;
pub mod http_probe;
pub mod preflight;
pub mod process;
pub mod run_guard;
pub mod terraform;

// Re-export for convenience
pub use ansible::{AnsiblePlaybook, AnsibleSettings};
pub use artifacts::LocalArtifacts;
pub use aws::{AwsBackend, AwsSettings};
pub use confirm::InteractiveConfirmer;
pub use events::JsonEventSink;
pub use http_probe::HttpsProbe;
pub use preflight::SystemPreflight;
pub use process::{CommandOutput, CommandRunner, SystemRunner, ToolCommand};
pub use run_guard::RunGuard;
pub use terraform::{TerraformCli, TerraformSettings};
