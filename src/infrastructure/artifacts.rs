//! Local Artifact Store
//!
//! The saved plan and the generated inventory. Both are disposable and
//! regenerated on every run.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::domain::ports::ArtifactStore;
use crate::domain::value_objects::Inventory;
use crate::error::ShipyardResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifacts {
    plan_file: PathBuf,
    inventory_file: PathBuf,
}

impl LocalArtifacts {
    pub fn new(plan_file: PathBuf, inventory_file: PathBuf) -> Self {
        Self {
            plan_file,
            inventory_file,
        }
    }
}

impl ArtifactStore for LocalArtifacts {
    fn write_inventory(&self, inventory: &Inventory) -> ShipyardResult<PathBuf> {
        if let Some(parent) = self.inventory_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.inventory_file, inventory.render())?;
        Ok(self.inventory_file.clone())
    }

    fn clear(&self) -> ShipyardResult<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for path in [&self.plan_file, &self.inventory_file] {
            match fs::remove_file(path) {
                Ok(()) => removed.push(path.clone()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn inventory() -> Inventory {
        Inventory {
            address: "203.0.113.7".into(),
            user: "ubuntu".into(),
            private_key: PathBuf::from("/home/ops/.ssh/id_ed25519"),
        }
    }

    #[test]
    fn write_inventory_creates_parent_and_overwrites() {
        let dir = tempdir().unwrap();
        let store = LocalArtifacts::new(
            dir.path().join("terraform/tfplan"),
            dir.path().join("ansible/inventory.ini"),
        );

        fs::create_dir_all(dir.path().join("ansible")).unwrap();
        fs::write(dir.path().join("ansible/inventory.ini"), "stale").unwrap();

        let path = store.write_inventory(&inventory()).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("203.0.113.7 ansible_user=ubuntu"));
        assert!(!content.contains("stale"));
    }

    #[test]
    fn clear_removes_only_existing_files() {
        let dir = tempdir().unwrap();
        let plan = dir.path().join("tfplan");
        fs::write(&plan, "plan").unwrap();
        let store = LocalArtifacts::new(plan.clone(), dir.path().join("inventory.ini"));

        let removed = store.clear().unwrap();

        assert_eq!(removed, vec![plan.clone()]);
        assert!(!plan.exists());
        assert!(store.clear().unwrap().is_empty());
    }
}
