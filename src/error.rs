//! Error types for Shipyard
//!
//! Library code returns `ShipyardError`; the binary wraps it in `anyhow` and
//! downcasts at the edge to pick an exit code and next-step guidance.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::entities::LockInfo;

/// Result type alias for Shipyard operations
pub type ShipyardResult<T> = Result<T, ShipyardError>;

/// Exit code used when a failure carries no external process status.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for precondition failures (nothing was mutated).
pub const EXIT_PRECONDITION: i32 = 2;
/// Exit code when the operator declined to override a held lock.
pub const EXIT_LOCK_DECLINED: i32 = 3;

/// Main error type for Shipyard operations
#[derive(Error, Debug)]
pub enum ShipyardError {
    /// Missing tool, credential or required environment key
    #[error("precondition failed: {}", problems.join("; "))]
    PreconditionFailure { problems: Vec<String> },

    /// The state backend could not be queried for reasons other than a lock
    #[error("state backend unreachable: {diagnostics}")]
    BackendUnreachable { diagnostics: String },

    /// A held lock was found and the operator did not confirm the override
    #[error("state is locked by {} (lock {}); override declined", lock.who, lock.id)]
    LockOverrideDeclined { lock: LockInfo },

    /// Lock contention was reported but its metadata could not be read
    #[error("could not parse lock metadata from backend output")]
    ParseFailure { raw: String },

    /// Releasing a lock failed
    #[error("failed to release lock {id}: {message}")]
    UnlockFailed { id: String, message: String },

    /// Creating or checking the state bucket / lock table failed
    #[error("backend bootstrap failed for {object}: {message}")]
    BootstrapFailed { object: String, message: String },

    #[error("terraform init failed (exit code {code})")]
    InitFailed { code: i32 },

    #[error("terraform validate failed (exit code {code})")]
    ValidateFailed { code: i32 },

    #[error("terraform plan failed (exit code {code})")]
    PlanFailed { code: i32 },

    #[error("terraform apply failed (exit code {code})")]
    ApplyFailed { code: i32 },

    #[error("terraform destroy failed (exit code {code})")]
    DestroyFailed { code: i32 },

    /// Dropping a resource from tracked state failed
    #[error("failed to remove {id} from state: {message}")]
    StateRemoveFailed { id: String, message: String },

    /// The remote configuration step exited non-zero
    #[error("remote configuration failed (exit code {code})")]
    ConfigFailed { code: i32 },

    /// Apply succeeded but the expected output was absent
    #[error("terraform output '{name}' is missing or empty")]
    MissingOutput { name: String },

    /// Another local run holds the run guard
    #[error("another shipyard run is active in this checkout ({path})")]
    RunInProgress { path: PathBuf },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ShipyardError {
    /// Process exit code for this error.
    ///
    /// Failures of external commands propagate the command's own status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::PreconditionFailure { .. } => EXIT_PRECONDITION,
            Self::LockOverrideDeclined { .. } => EXIT_LOCK_DECLINED,
            Self::InitFailed { code }
            | Self::ValidateFailed { code }
            | Self::PlanFailed { code }
            | Self::ApplyFailed { code }
            | Self::DestroyFailed { code }
            | Self::ConfigFailed { code } => nonzero(*code),
            _ => EXIT_FAILURE,
        }
    }

    /// Raw backend text worth showing verbatim under the error message.
    ///
    /// Only set where the message itself cannot carry it.
    pub fn diagnostics(&self) -> Option<&str> {
        match self {
            Self::ParseFailure { raw } => Some(raw.as_str()),
            _ => None,
        }
    }

    /// Operator guidance printed under the error.
    pub fn next_steps(&self) -> Vec<String> {
        match self {
            Self::PreconditionFailure { .. } => vec![
                "Install the missing tools or export the missing variables, then re-run.".into(),
                "Nothing was changed.".into(),
            ],
            Self::BackendUnreachable { .. } => vec![
                "Check cloud credentials and network access to the state bucket.".into(),
                "If the diagnostics show a configuration or variable error, fix the Terraform module instead.".into(),
                "This is not a lock problem; do not force-unlock.".into(),
            ],
            Self::LockOverrideDeclined { lock } => vec![
                "Wait for the other run to finish, or confirm it is dead and run:".into(),
                format!("  shipyard unlock {}", lock.id),
            ],
            Self::ParseFailure { .. } => vec![
                "Find the lock ID in the backend output above and release it:".into(),
                "  shipyard unlock <LOCK_ID>".into(),
            ],
            Self::UnlockFailed { .. } => {
                vec!["Verify the lock id with `shipyard status` and retry.".into()]
            }
            Self::RunInProgress { .. } => {
                vec!["Wait for the other run to finish before starting a new one.".into()]
            }
            Self::InvalidConfig { .. } => vec!["Fix the configuration file and re-run.".into()],
            _ => vec!["Fix the underlying error and re-run `shipyard`; it re-evaluates state from scratch.".into()],
        }
    }
}

fn nonzero(code: i32) -> i32 {
    if code == 0 {
        EXIT_FAILURE
    } else {
        code
    }
}
