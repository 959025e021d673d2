//! Deploy Event Port
//!
//! Observable interface for orchestrator runs. The console sink renders
//! leveled log lines; the JSON sink streams NDJSON for CI.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::entities::{LockInfo, Phase, ResourceSet};
use crate::domain::ports::Verification;

/// Event emitted during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DeployEvent {
    /// A new phase began
    Step { phase: Phase, message: String },

    Info { message: String },

    Warning { message: String },

    Error { message: String },

    /// A held lock was found
    LockFound { lock: LockInfo },

    /// Lock released (forced)
    LockReleased { id: String },

    /// Tracked resources found in remote state
    ExistingResources { resources: ResourceSet },

    /// One resource was dropped from state after a failed destroy
    RemovedFromState { id: String, error: Option<String> },

    /// Generated local files were removed
    ArtifactsCleared { paths: Vec<PathBuf> },

    /// Endpoint probe finished
    Verified { url: String, verification: Verification },

    /// Run finished
    Completed {
        success: bool,
        exit_code: i32,
        address: Option<String>,
        /// Raw backend output behind the failure, when it could not be interpreted
        diagnostics: Option<String>,
    },
}

impl DeployEvent {
    pub fn step(phase: Phase, message: impl Into<String>) -> Self {
        Self::Step {
            phase,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::Info {
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Trait for receiving deploy events
pub trait DeployEventSink: Send + Sync {
    fn on_event(&self, event: DeployEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}
}
