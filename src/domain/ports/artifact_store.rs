//! Artifact Store Port
//!
//! Locally generated files: the cached plan and the host inventory.

use std::path::PathBuf;

use crate::domain::value_objects::Inventory;
use crate::error::ShipyardResult;

pub trait ArtifactStore {
    /// Write the inventory, replacing any previous one. Returns its path.
    fn write_inventory(&self, inventory: &Inventory) -> ShipyardResult<PathBuf>;

    /// Remove every generated file. Returns what was actually removed.
    fn clear(&self) -> ShipyardResult<Vec<PathBuf>>;
}
