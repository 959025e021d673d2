//! Destroy-and-clean
//!
//! Shared by the clean-slate branch, failure recovery and explicit teardown.
//! A failed destroy falls back to dropping every known resource from state,
//! one at a time; local artifacts are cleared in every case.

use std::path::PathBuf;

use crate::domain::entities::ResourceSet;
use crate::domain::ports::{ArtifactStore, DeployEvent, DeployEventSink, InfrastructureDriver};
use crate::error::ShipyardResult;

/// What destroy-and-clean actually did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// `destroy` completed
    pub destroyed: bool,
    /// Exit code of the failed `destroy`
    pub destroy_exit_code: Option<i32>,
    /// Identifiers dropped from state after a failed destroy
    pub removed: Vec<String>,
    /// Identifiers that could not be dropped, with the reason
    pub failed: Vec<(String, String)>,
    /// Local artifacts that were deleted
    pub cleared: Vec<PathBuf>,
}

impl CleanupReport {
    /// Whether cloud resources may have been orphaned.
    pub fn needs_manual_cleanup(&self) -> bool {
        !self.destroyed
    }
}

pub fn destroy_and_clean<I>(
    infra: &I,
    artifacts: &dyn ArtifactStore,
    known: &ResourceSet,
    events: &dyn DeployEventSink,
) -> ShipyardResult<CleanupReport>
where
    I: InfrastructureDriver + ?Sized,
{
    let mut report = CleanupReport::default();

    match infra.destroy() {
        Ok(()) => {
            report.destroyed = true;
            events.on_event(DeployEvent::info("Infrastructure destroyed"));
        }
        Err(e) => {
            report.destroy_exit_code = Some(e.exit_code());
            events.on_event(DeployEvent::warning(format!(
                "Destroy failed ({}); removing {} resource(s) from state individually",
                e,
                known.len()
            )));
            for id in known {
                match infra.remove_from_state(id) {
                    Ok(()) => {
                        report.removed.push(id.to_string());
                        events.on_event(DeployEvent::RemovedFromState {
                            id: id.to_string(),
                            error: None,
                        });
                    }
                    Err(err) => {
                        report.failed.push((id.to_string(), err.to_string()));
                        events.on_event(DeployEvent::RemovedFromState {
                            id: id.to_string(),
                            error: Some(err.to_string()),
                        });
                    }
                }
            }
            events.on_event(DeployEvent::warning(
                "Resources may still exist in the cloud account; remove them out of band",
            ));
        }
    }

    report.cleared = artifacts.clear()?;
    events.on_event(DeployEvent::ArtifactsCleared {
        paths: report.cleared.clone(),
    });
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{NoopEventSink, Outputs, PlanHandle};
    use crate::domain::value_objects::Inventory;
    use crate::error::ShipyardError;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FlakyInfra {
        destroy_fails: bool,
        remove_fails_for: Option<&'static str>,
        removed: RefCell<Vec<String>>,
    }

    impl InfrastructureDriver for FlakyInfra {
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
            if self.destroy_fails {
                Err(ShipyardError::DestroyFailed { code: 1 })
            } else {
                Ok(())
            }
        }
        fn list_resources(&self) -> ShipyardResult<ResourceSet> {
            Ok(ResourceSet::default())
        }
        fn remove_from_state(&self, id: &str) -> ShipyardResult<()> {
            self.removed.borrow_mut().push(id.to_string());
            if self.remove_fails_for == Some(id) {
                return Err(ShipyardError::StateRemoveFailed {
                    id: id.to_string(),
                    message: "boom".into(),
                });
            }
            Ok(())
        }
    }

    struct NoArtifacts;

    impl ArtifactStore for NoArtifacts {
        fn write_inventory(&self, _inventory: &Inventory) -> ShipyardResult<PathBuf> {
            unreachable!()
        }
        fn clear(&self) -> ShipyardResult<Vec<PathBuf>> {
            Ok(vec![PathBuf::from("tfplan")])
        }
    }

    fn four() -> ResourceSet {
        ResourceSet::new(vec![
            "aws_security_group.web".into(),
            "aws_key_pair.deploy".into(),
            "aws_instance.app".into(),
            "aws_eip.app".into(),
        ])
    }

    #[test]
    fn successful_destroy_skips_state_removal() {
        let infra = FlakyInfra::default();
        let report = destroy_and_clean(&infra, &NoArtifacts, &four(), &NoopEventSink).unwrap();
        assert!(report.destroyed);
        assert!(infra.removed.borrow().is_empty());
        assert_eq!(report.cleared, vec![PathBuf::from("tfplan")]);
    }

    #[test]
    fn failed_destroy_removes_every_resource_even_after_one_fails() {
        let infra = FlakyInfra {
            destroy_fails: true,
            remove_fails_for: Some("aws_key_pair.deploy"),
            ..Default::default()
        };

        let report = destroy_and_clean(&infra, &NoArtifacts, &four(), &NoopEventSink).unwrap();

        assert_eq!(infra.removed.borrow().len(), 4);
        assert_eq!(report.removed.len(), 3);
        assert_eq!(report.failed[0].0, "aws_key_pair.deploy");
        assert!(report.needs_manual_cleanup());
        assert!(!report.cleared.is_empty());
    }
}
