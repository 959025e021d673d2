//! Ansible Playbook Adapter
//!
//! Runs the configuration playbook against the generated inventory. The
//! child environment is rebuilt from scratch: process plumbing plus the
//! application variables handed in by the orchestrator, nothing else.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::ports::ConfigurationApplier;
use crate::error::{ShipyardError, ShipyardResult};

use super::process::{CommandRunner, ToolCommand};

/// Variables the playbook runner needs to function at all.
const PLUMBING_VARS: &[&str] = &["PATH", "HOME", "LANG", "SSH_AUTH_SOCK"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnsibleSettings {
    pub binary: String,
    pub playbook: PathBuf,
    pub inventory: PathBuf,
    pub timeout_secs: u64,
}

pub struct AnsiblePlaybook {
    settings: AnsibleSettings,
    plumbing: Vec<(String, String)>,
    runner: Rc<dyn CommandRunner>,
}

impl AnsiblePlaybook {
    /// Create an applier that forwards plumbing variables from this process.
    pub fn new(settings: AnsibleSettings, runner: Rc<dyn CommandRunner>) -> Self {
        let plumbing = PLUMBING_VARS
            .iter()
            .filter_map(|k| std::env::var(k).ok().map(|v| (k.to_string(), v)))
            .collect();
        Self::with_plumbing(settings, plumbing, runner)
    }

    pub fn with_plumbing(
        settings: AnsibleSettings,
        plumbing: Vec<(String, String)>,
        runner: Rc<dyn CommandRunner>,
    ) -> Self {
        Self {
            settings,
            plumbing,
            runner,
        }
    }

    fn command(&self, working_dir: &Path, env: BTreeMap<String, String>) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.settings.binary)
            .arg("-i")
            .arg(self.settings.inventory.display().to_string())
            .arg(self.settings.playbook.display().to_string())
            .arg("--timeout")
            .arg(self.settings.timeout_secs.to_string())
            .current_dir(working_dir)
            .env_clear();
        for (key, value) in &self.plumbing {
            cmd = cmd.env(key, value);
        }
        // Fresh hosts are unknown to known_hosts by definition.
        cmd = cmd.env("ANSIBLE_HOST_KEY_CHECKING", "False");
        for (key, value) in env {
            cmd = cmd.env(key, value);
        }
        cmd
    }
}

impl ConfigurationApplier for AnsiblePlaybook {
    fn run(&self, working_dir: &Path, env: BTreeMap<String, String>) -> ShipyardResult<()> {
        let cmd = self.command(working_dir, env);
        match self.runner.stream(&cmd)? {
            0 => Ok(()),
            code => Err(ShipyardError::ConfigFailed { code }),
        }
    }
}
