//! Teardown Use Case
//!
//! Explicit destroy of everything the shared state tracks. Runs the same
//! destroy-and-clean as failure recovery, behind a lock check and one
//! confirmation.

use crate::application::cleanup::{destroy_and_clean, CleanupReport};
use crate::application::locks::clear_lock;
use crate::domain::entities::ResourceSet;
use crate::domain::ports::{
    ArtifactStore, ConfirmRequest, Confirmer, DeployEvent, DeployEventSink, InfrastructureDriver,
    LockClient,
};
use crate::error::{ShipyardResult, EXIT_FAILURE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// State tracked nothing; only local artifacts were cleared
    NothingTracked { report: CleanupReport },
    Destroyed {
        resources: ResourceSet,
        report: CleanupReport,
    },
    /// Operator said no; nothing was touched
    Declined { resources: ResourceSet },
}

impl TeardownOutcome {
    /// Non-zero whenever resources may remain: declined, or `destroy` failed.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Declined { .. } => EXIT_FAILURE,
            Self::Destroyed { report, .. } if !report.destroyed => {
                report.destroy_exit_code.unwrap_or(EXIT_FAILURE)
            }
            _ => 0,
        }
    }
}

pub struct TeardownUseCase<I, L>
where
    I: InfrastructureDriver,
    L: LockClient,
{
    infra: I,
    locks: L,
    artifacts: Box<dyn ArtifactStore>,
}

impl<I, L> TeardownUseCase<I, L>
where
    I: InfrastructureDriver,
    L: LockClient,
{
    pub fn new(infra: I, locks: L, artifacts: Box<dyn ArtifactStore>) -> Self {
        Self {
            infra,
            locks,
            artifacts,
        }
    }

    pub fn execute(
        &self,
        confirmer: &dyn Confirmer,
        events: &dyn DeployEventSink,
    ) -> ShipyardResult<TeardownOutcome> {
        self.infra.init()?;
        clear_lock(&self.locks, confirmer, events)?;

        let resources = self.infra.list_resources()?;
        if resources.is_empty() {
            events.on_event(DeployEvent::info("State tracks no resources"));
            let cleared = self.artifacts.clear()?;
            events.on_event(DeployEvent::ArtifactsCleared {
                paths: cleared.clone(),
            });
            return Ok(TeardownOutcome::NothingTracked {
                report: CleanupReport {
                    destroyed: true,
                    cleared,
                    ..Default::default()
                },
            });
        }

        events.on_event(DeployEvent::ExistingResources {
            resources: resources.clone(),
        });
        if !confirmer.confirm(&ConfirmRequest::Teardown {
            resources: &resources,
        }) {
            events.on_event(DeployEvent::info("Teardown declined; nothing was changed"));
            return Ok(TeardownOutcome::Declined { resources });
        }

        let report = destroy_and_clean(&self.infra, self.artifacts.as_ref(), &resources, events)?;
        Ok(TeardownOutcome::Destroyed { resources, report })
    }
}
