//! Host Inventory Value Object
//!
//! The generated inventory consumed by the configuration step. Regenerated
//! on every run; never edited by hand.

use std::path::PathBuf;

/// Inventory group the playbook targets
pub const INVENTORY_GROUP: &str = "app";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    pub address: String,
    pub user: String,
    pub private_key: PathBuf,
}

impl Inventory {
    /// Render as an Ansible INI inventory.
    pub fn render(&self) -> String {
        format!(
            "# Generated by shipyard. Do not edit; regenerated on every run.\n\
             [{group}]\n\
             {address} ansible_user={user} ansible_ssh_private_key_file={key}\n",
            group = INVENTORY_GROUP,
            address = self.address,
            user = self.user,
            key = self.private_key.display(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn renders_ini_inventory() {
        let inventory = Inventory {
            address: "203.0.113.10".into(),
            user: "ubuntu".into(),
            private_key: PathBuf::from("/home/ops/.ssh/deploy"),
        };
        assert_snapshot!(inventory.render(), @r"
        # Generated by shipyard. Do not edit; regenerated on every run.
        [app]
        203.0.113.10 ansible_user=ubuntu ansible_ssh_private_key_file=/home/ops/.ssh/deploy
        ");
    }
}
