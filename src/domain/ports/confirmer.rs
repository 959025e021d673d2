//! Confirmer Port
//!
//! Every destructive or lock-overriding action goes through a confirmation.
//! Implementations can be interactive (prompting the operator) or answer from
//! explicit flags in non-interactive runs.

use crate::domain::entities::{LockInfo, ResourceSet};

/// The only input accepted as consent.
pub const AFFIRMATIVE_TOKEN: &str = "yes";

/// What is being confirmed
#[derive(Debug, Clone, Copy)]
pub enum ConfirmRequest<'a> {
    /// Destroy existing infrastructure before provisioning
    CleanSlate { resources: &'a ResourceSet },
    /// Release a lock held by another run
    ForceUnlock { lock: &'a LockInfo },
    /// Tear down after a failed run
    FailureCleanup { exit_code: i32 },
    /// Explicit teardown requested by the operator
    Teardown { resources: &'a ResourceSet },
}

impl ConfirmRequest<'_> {
    pub fn prompt(&self) -> String {
        match self {
            Self::CleanSlate { resources } => format!(
                "Destroy the {} existing resource(s) and start from a clean slate?",
                resources.len()
            ),
            Self::ForceUnlock { lock } => format!(
                "Force-release lock {} held by {}? Only do this if that run is dead.",
                lock.id, lock.who
            ),
            Self::FailureCleanup { exit_code } => format!(
                "Run failed (exit code {}). Destroy everything and clean up?",
                exit_code
            ),
            Self::Teardown { resources } => {
                format!("Destroy all {} tracked resource(s)?", resources.len())
            }
        }
    }
}

/// Whether `input` is exact consent. Surrounding whitespace is ignored;
/// case and everything else is not.
pub fn is_affirmative(input: &str) -> bool {
    input.trim() == AFFIRMATIVE_TOKEN
}

pub trait Confirmer: Send + Sync {
    /// Returns `true` only on explicit consent.
    fn confirm(&self, request: &ConfirmRequest<'_>) -> bool;
}

/// Confirmer that declines everything.
pub struct DeclineAll;

impl Confirmer for DeclineAll {
    fn confirm(&self, _request: &ConfirmRequest<'_>) -> bool {
        false
    }
}

/// Answers taken from command-line flags, for runs without a terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagAnswers {
    pub clean_slate: bool,
    pub force_unlock: bool,
    pub failure_cleanup: bool,
    pub teardown: bool,
}

impl Confirmer for FlagAnswers {
    fn confirm(&self, request: &ConfirmRequest<'_>) -> bool {
        match request {
            ConfirmRequest::CleanSlate { .. } => self.clean_slate,
            ConfirmRequest::ForceUnlock { .. } => self.force_unlock,
            ConfirmRequest::FailureCleanup { .. } => self.failure_cleanup,
            ConfirmRequest::Teardown { .. } => self.teardown,
        }
    }
}
