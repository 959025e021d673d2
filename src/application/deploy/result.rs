//! Deploy Result

use crate::application::cleanup::CleanupReport;
use crate::domain::entities::{DeploymentRun, LockInfo, ResourceSet};
use crate::domain::ports::Verification;
use crate::error::ShipyardError;

/// Outcome of one orchestrator run
#[derive(Debug)]
pub struct DeployResult {
    pub run: DeploymentRun,
    /// Resources found before provisioning
    pub existing: ResourceSet,
    /// Lock released during the run, if any
    pub released_lock: Option<LockInfo>,
    /// Host address from apply
    pub address: Option<String>,
    pub verification: Verification,
    /// Clean-slate or recovery teardown, whichever ran last
    pub cleanup: Option<CleanupReport>,
    /// Error that moved the run to `Failed`
    pub error: Option<ShipyardError>,
}

impl DeployResult {
    pub fn new(force_clean: bool) -> Self {
        Self {
            run: DeploymentRun::new(force_clean),
            existing: ResourceSet::default(),
            released_lock: None,
            address: None,
            verification: Verification::Skipped,
            cleanup: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.run.succeeded()
    }

    pub fn exit_code(&self) -> i32 {
        self.run.exit_code
    }
}
