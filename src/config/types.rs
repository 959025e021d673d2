//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RepoDefaults;

/// Root configuration (`shipyard.toml`)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub backend: BackendConfig,
    pub terraform: TerraformConfig,
    pub ansible: AnsibleConfig,
    pub app: AppConfig,
    pub verify: VerifyConfig,
    pub output: OutputConfig,
}

/// Repository layout, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    pub terraform_dir: PathBuf,
    pub ansible_dir: PathBuf,
    /// Saved plan, relative to `terraform_dir`
    pub plan_file: PathBuf,
    /// Generated inventory, relative to `ansible_dir`
    pub inventory_file: PathBuf,
    /// Local run guard
    pub run_lock: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            terraform_dir: PathBuf::from("terraform"),
            ansible_dir: PathBuf::from("ansible"),
            plan_file: PathBuf::from("tfplan"),
            inventory_file: PathBuf::from("inventory.ini"),
            run_lock: PathBuf::from(".shipyard/run.lock"),
        }
    }
}

/// Remote state location (S3 bucket + DynamoDB lock table)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub bucket: String,
    pub lock_table: String,
    pub region: String,
    /// Object key of the state file inside the bucket
    pub key: String,
    /// AWS CLI executable
    pub cli: String,
    pub profile: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            bucket: "shipyard-tfstate".to_string(),
            lock_table: "shipyard-tflock".to_string(),
            region: "us-east-1".to_string(),
            key: "shipyard/terraform.tfstate".to_string(),
            cli: "aws".to_string(),
            profile: None,
            connect_timeout_secs: 10,
            read_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerraformConfig {
    pub binary: String,
    /// Bounded wait for the lock probe
    pub lock_timeout_secs: u64,
    /// Output holding the host's public address
    pub address_output: String,
    /// Extra `-var` assignments for plan and destroy
    pub vars: BTreeMap<String, String>,
}

impl Default for TerraformConfig {
    fn default() -> Self {
        Self {
            binary: "terraform".to_string(),
            lock_timeout_secs: 5,
            address_output: "public_ip".to_string(),
            vars: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnsibleConfig {
    pub binary: String,
    pub playbook: PathBuf,
    /// Login user written to the inventory
    pub user: String,
    pub private_key: PathBuf,
    /// SSH connection timeout
    pub timeout_secs: u64,
}

impl Default for AnsibleConfig {
    fn default() -> Self {
        Self {
            binary: "ansible-playbook".to_string(),
            playbook: PathBuf::from("site.yml"),
            user: "ubuntu".to_string(),
            private_key: PathBuf::from("~/.ssh/id_ed25519"),
            timeout_secs: 30,
        }
    }
}

/// Application repository defaults; `REPO_URL`/`REPO_BRANCH` override them
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub repo_url: String,
    pub repo_branch: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            repo_url: String::new(),
            repo_branch: "main".to_string(),
        }
    }
}

impl AppConfig {
    pub fn repo_defaults(&self) -> RepoDefaults {
        RepoDefaults {
            url: self.repo_url.clone(),
            branch: self.repo_branch.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VerifyConfig {
    pub enabled: bool,
    /// Wait before probing, giving the proxy time to obtain certificates
    pub settle_secs: u64,
    pub timeout_secs: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settle_secs: 15,
            timeout_secs: 10,
        }
    }
}

impl VerifyConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_secs(self.settle_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub const VALUES: &'static [&'static str] = &["auto", "always", "never"];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub color: ColorMode,
    pub unicode: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            unicode: true,
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Resolve a configured path against the project root.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        expanded
    } else {
        root.join(expanded)
    }
}
