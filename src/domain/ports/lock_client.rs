//! Lock Client Port
//!
//! Typed access to the shared state lock. Adapters that can only see
//! diagnostic text parse it behind this interface.

use crate::domain::entities::LockInfo;
use crate::error::ShipyardResult;

pub trait LockClient {
    /// Query for an active lock with a short bounded wait.
    ///
    /// Returns `Ok(None)` only when the query completed and found no lock.
    /// Failures unrelated to contention are errors (`BackendUnreachable`),
    /// and contention with unreadable metadata is `ParseFailure`.
    fn detect_lock(&self) -> ShipyardResult<Option<LockInfo>>;

    /// Force-release the lock with this id.
    fn force_unlock(&self, id: &str) -> ShipyardResult<()>;
}
