//! Deploy Options

use std::path::PathBuf;
use std::time::Duration;

use crate::domain::value_objects::{EnvironmentInputs, RepoDefaults};

/// Options for one orchestrator run
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Destroy before planning without asking
    pub force_clean: bool,
    /// Snapshot of the relevant environment variables
    pub inputs: EnvironmentInputs,
    pub repo_defaults: RepoDefaults,
    /// Executables that must resolve before anything runs
    pub required_tools: Vec<String>,
    /// Login user written to the inventory
    pub ssh_user: String,
    pub private_key: PathBuf,
    /// Working directory of the configuration step
    pub config_dir: PathBuf,
    /// Probe the public endpoint after configuration
    pub verify: bool,
    /// Wait before probing
    pub settle: Duration,
}

impl DeployOptions {
    pub fn new(inputs: EnvironmentInputs, repo_defaults: RepoDefaults) -> Self {
        Self {
            force_clean: false,
            inputs,
            repo_defaults,
            required_tools: Vec::new(),
            ssh_user: "ubuntu".to_string(),
            private_key: PathBuf::new(),
            config_dir: PathBuf::from("."),
            verify: true,
            settle: Duration::ZERO,
        }
    }

    pub fn with_force_clean(mut self, force_clean: bool) -> Self {
        self.force_clean = force_clean;
        self
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_tools = tools.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ssh(mut self, user: impl Into<String>, private_key: impl Into<PathBuf>) -> Self {
        self.ssh_user = user.into();
        self.private_key = private_key.into();
        self
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn with_verify(mut self, verify: bool, settle: Duration) -> Self {
        self.verify = verify;
        self.settle = settle;
        self
    }
}
