//! Status Use Case
//!
//! Who holds the lock and what the shared state tracks. Read-only with
//! respect to infrastructure and state; `init` still refreshes the local
//! `.terraform/` directory and the lock probe holds the remote lock briefly.

use serde::Serialize;

use crate::domain::entities::{LockInfo, ResourceSet};
use crate::domain::ports::{InfrastructureDriver, LockClient};
use crate::error::ShipyardResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub lock: Option<LockInfo>,
    pub resources: ResourceSet,
}

pub struct StatusUseCase<I, L>
where
    I: InfrastructureDriver,
    L: LockClient,
{
    infra: I,
    locks: L,
}

impl<I, L> StatusUseCase<I, L>
where
    I: InfrastructureDriver,
    L: LockClient,
{
    pub fn new(infra: I, locks: L) -> Self {
        Self { infra, locks }
    }

    pub fn execute(&self) -> ShipyardResult<StatusReport> {
        self.infra.init()?;
        let lock = self.locks.detect_lock()?;
        let resources = self.infra.list_resources()?;
        Ok(StatusReport { lock, resources })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{Outputs, PlanHandle};
    use crate::error::ShipyardError;

    struct ReadOnly {
        tracked: Vec<&'static str>,
    }

    impl InfrastructureDriver for ReadOnly {
        fn init(&self) -> ShipyardResult<()> {
            Ok(())
        }
        fn validate(&self) -> ShipyardResult<()> {
            Ok(())
        }
        fn plan(&self) -> ShipyardResult<PlanHandle> {
            unreachable!()
        }
        fn apply(&self, _plan: &PlanHandle) -> ShipyardResult<Outputs> {
            unreachable!()
        }
        fn destroy(&self) -> ShipyardResult<()> {
            unreachable!()
        }
        fn list_resources(&self) -> ShipyardResult<ResourceSet> {
            Ok(ResourceSet::new(
                self.tracked.iter().map(|s| s.to_string()).collect(),
            ))
        }
        fn remove_from_state(&self, _id: &str) -> ShipyardResult<()> {
            unreachable!()
        }
    }

    struct Unreachable;

    impl LockClient for Unreachable {
        fn detect_lock(&self) -> ShipyardResult<Option<LockInfo>> {
            Err(ShipyardError::BackendUnreachable {
                diagnostics: "AccessDenied".into(),
            })
        }
        fn force_unlock(&self, _id: &str) -> ShipyardResult<()> {
            unreachable!()
        }
    }

    struct Free;

    impl LockClient for Free {
        fn detect_lock(&self) -> ShipyardResult<Option<LockInfo>> {
            Ok(None)
        }
        fn force_unlock(&self, _id: &str) -> ShipyardResult<()> {
            unreachable!()
        }
    }

    #[test]
    fn reports_lock_and_resources() {
        let use_case = StatusUseCase::new(
            ReadOnly {
                tracked: vec!["aws_instance.app"],
            },
            Free,
        );

        let report = use_case.execute().unwrap();

        assert_eq!(report.lock, None);
        assert!(report.resources.contains("aws_instance.app"));
    }

    #[test]
    fn backend_errors_propagate() {
        let use_case = StatusUseCase::new(ReadOnly { tracked: vec![] }, Unreachable);
        assert!(matches!(
            use_case.execute(),
            Err(ShipyardError::BackendUnreachable { .. })
        ));
    }
}
