//! Infrastructure Driver Port
//!
//! Opaque provisioning capability operating on the shared remote state.
//! Re-applying against existing state converges; that guarantee belongs to
//! the resource declarations, not to this interface.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::entities::ResourceSet;
use crate::error::ShipyardResult;

/// A saved plan ready to apply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanHandle {
    pub path: PathBuf,
    /// Whether the plan contains changes
    pub has_changes: bool,
}

/// Values produced by a successful apply
#[derive(Debug, Clone, PartialEq)]
pub struct Outputs {
    /// Reachable network address of the host
    pub address: String,
    pub values: BTreeMap<String, serde_json::Value>,
}

pub trait InfrastructureDriver {
    fn init(&self) -> ShipyardResult<()>;

    fn validate(&self) -> ShipyardResult<()>;

    fn plan(&self) -> ShipyardResult<PlanHandle>;

    fn apply(&self, plan: &PlanHandle) -> ShipyardResult<Outputs>;

    fn destroy(&self) -> ShipyardResult<()>;

    fn list_resources(&self) -> ShipyardResult<ResourceSet>;

    /// Drop one resource from tracked state. "Not found" counts as success.
    fn remove_from_state(&self, id: &str) -> ShipyardResult<()>;
}
