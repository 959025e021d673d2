//! State Backend Port
//!
//! Bootstrap of the objects the remote state lives in: an object-storage
//! bucket and a lock table. Creation is check-then-create and tolerates
//! losing a creation race.

use crate::error::ShipyardResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    /// Already present
    Existing,
    /// Created by this call
    Created,
}

pub trait StateBackend {
    /// Human-readable name of the bucket and table, for logs.
    fn describe(&self) -> String;

    /// Resolve cloud credentials; returns the caller identity.
    fn check_credentials(&self) -> ShipyardResult<String>;

    fn ensure_bucket(&self) -> ShipyardResult<BootstrapStatus>;

    fn ensure_lock_table(&self) -> ShipyardResult<BootstrapStatus>;
}
