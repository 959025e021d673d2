//! Lock Recovery
//!
//! A held lock is never released without a human saying so. The release
//! targets the id that was displayed, so a lock that changed hands between
//! detection and release is not touched.

use crate::domain::entities::LockInfo;
use crate::domain::ports::{ConfirmRequest, Confirmer, DeployEvent, DeployEventSink, LockClient};
use crate::error::{ShipyardError, ShipyardResult};

/// Detect a held lock and force-release it only on explicit consent.
///
/// Returns the released lock, or `None` when nothing was held. Declining is
/// `LockOverrideDeclined`; the caller aborts rather than retrying.
pub fn clear_lock<L>(
    locks: &L,
    confirmer: &dyn Confirmer,
    events: &dyn DeployEventSink,
) -> ShipyardResult<Option<LockInfo>>
where
    L: LockClient + ?Sized,
{
    let Some(lock) = locks.detect_lock()? else {
        events.on_event(DeployEvent::info("No state lock held"));
        return Ok(None);
    };

    events.on_event(DeployEvent::LockFound { lock: lock.clone() });
    if !confirmer.confirm(&ConfirmRequest::ForceUnlock { lock: &lock }) {
        return Err(ShipyardError::LockOverrideDeclined { lock });
    }

    locks.force_unlock(&lock.id)?;
    events.on_event(DeployEvent::LockReleased {
        id: lock.id.clone(),
    });
    Ok(Some(lock))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// Detection found no lock
    NoLock,
    Released { id: String },
}

/// The `unlock` sub-command
pub struct UnlockUseCase<L: LockClient> {
    locks: L,
}

impl<L: LockClient> UnlockUseCase<L> {
    pub fn new(locks: L) -> Self {
        Self { locks }
    }

    /// With an explicit id, release it directly without querying the backend.
    /// Without one, detect, display, confirm, release.
    pub fn execute(
        &self,
        explicit_id: Option<&str>,
        confirmer: &dyn Confirmer,
        events: &dyn DeployEventSink,
    ) -> ShipyardResult<UnlockOutcome> {
        if let Some(id) = explicit_id.map(str::trim).filter(|id| !id.is_empty()) {
            self.locks.force_unlock(id)?;
            events.on_event(DeployEvent::LockReleased { id: id.to_string() });
            return Ok(UnlockOutcome::Released { id: id.to_string() });
        }

        Ok(match clear_lock(&self.locks, confirmer, events)? {
            Some(lock) => UnlockOutcome::Released { id: lock.id },
            None => UnlockOutcome::NoLock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::LockOperation;
    use crate::domain::ports::{DeclineAll, FlagAnswers, NoopEventSink};
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeLocks {
        held: Option<LockInfo>,
        detections: Cell<usize>,
        released: RefCell<Vec<String>>,
    }

    impl LockClient for FakeLocks {
        fn detect_lock(&self) -> ShipyardResult<Option<LockInfo>> {
            self.detections.set(self.detections.get() + 1);
            Ok(self.held.clone())
        }

        fn force_unlock(&self, id: &str) -> ShipyardResult<()> {
            self.released.borrow_mut().push(id.to_string());
            Ok(())
        }
    }

    fn held(id: &str) -> LockInfo {
        LockInfo {
            id: id.to_string(),
            path: "state-bucket/app/terraform.tfstate".into(),
            operation: LockOperation::Apply,
            who: "ci@runner".into(),
            created_at: None,
            created_raw: String::new(),
            version: "1.7.5".into(),
        }
    }

    #[test]
    fn explicit_id_is_released_without_detection() {
        let use_case = UnlockUseCase::new(FakeLocks::default());

        let outcome = use_case
            .execute(
                Some("e550de88-751a-3bda-ebf3-b9af189935af"),
                &DeclineAll,
                &NoopEventSink,
            )
            .unwrap();

        assert_eq!(
            outcome,
            UnlockOutcome::Released {
                id: "e550de88-751a-3bda-ebf3-b9af189935af".into()
            }
        );
        assert_eq!(use_case.locks.detections.get(), 0);
        assert_eq!(
            *use_case.locks.released.borrow(),
            vec!["e550de88-751a-3bda-ebf3-b9af189935af"]
        );
    }

    #[test]
    fn detection_without_lock_releases_nothing() {
        let use_case = UnlockUseCase::new(FakeLocks::default());
        let outcome = use_case.execute(None, &DeclineAll, &NoopEventSink).unwrap();
        assert_eq!(outcome, UnlockOutcome::NoLock);
        assert!(use_case.locks.released.borrow().is_empty());
    }

    #[test]
    fn declined_override_is_an_error_and_releases_nothing() {
        let locks = FakeLocks {
            held: Some(held("abc")),
            ..Default::default()
        };

        let err = clear_lock(&locks, &DeclineAll, &NoopEventSink).unwrap_err();

        assert!(matches!(err, ShipyardError::LockOverrideDeclined { .. }));
        assert!(locks.released.borrow().is_empty());
    }

    #[test]
    fn confirmed_override_releases_displayed_id() {
        let use_case = UnlockUseCase::new(FakeLocks {
            held: Some(held("abc")),
            ..Default::default()
        });
        let confirmer = FlagAnswers {
            force_unlock: true,
            ..Default::default()
        };

        let outcome = use_case.execute(None, &confirmer, &NoopEventSink).unwrap();

        assert_eq!(outcome, UnlockOutcome::Released { id: "abc".into() });
        assert_eq!(*use_case.locks.released.borrow(), vec!["abc"]);
    }

    #[test]
    fn blank_explicit_id_falls_back_to_detection() {
        let use_case = UnlockUseCase::new(FakeLocks::default());
        use_case.execute(Some("  "), &DeclineAll, &NoopEventSink).unwrap();
        assert_eq!(use_case.locks.detections.get(), 1);
    }
}
