//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ShipyardError, ShipyardResult};

use super::env_validator::{closest, EnvVarValidator};
use super::types::{ColorMode, Config};

/// Project config file name, looked up in the project root
pub const PROJECT_CONFIG: &str = "shipyard.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Configuration plus where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ConfigWarning>,
    /// File the config was read from; `None` means defaults
    pub source: Option<PathBuf>,
}

/// Load one file and collect unknown keys as warnings.
pub fn load_with_warnings(path: &Path) -> ShipyardResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ShipyardError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(&content, &key),
                suggestion: closest(&key, KNOWN_KEYS).map(str::to_string),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration: explicit file, else project file, else user file,
/// else defaults; then `SHIPYARD_*` overrides.
///
/// An explicit file must exist. Invalid files are errors, never silently skipped.
pub fn load(project_root: &Path, explicit: Option<&Path>) -> ShipyardResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => [
            Some(project_root.join(PROJECT_CONFIG)),
            dirs::config_dir().map(|d| d.join("shipyard/config.toml")),
        ]
        .into_iter()
        .flatten()
        .find(|p| p.is_file()),
    };

    let (config, warnings) = match &candidate {
        Some(path) => load_with_warnings(path)?,
        None => (Config::default(), Vec::new()),
    };

    Ok(LoadedConfig {
        config: with_env_overrides(config, |k| std::env::var(k).ok()),
        warnings,
        source: candidate,
    })
}

/// Apply `SHIPYARD_*` environment overrides.
pub fn with_env_overrides(mut config: Config, get_env: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(bucket) = get_env("SHIPYARD_STATE_BUCKET").filter(|v| !v.trim().is_empty()) {
        config.backend.bucket = bucket.trim().to_string();
    }

    if let Some(table) = get_env("SHIPYARD_LOCK_TABLE").filter(|v| !v.trim().is_empty()) {
        config.backend.lock_table = table.trim().to_string();
    }

    if let Some(region) = get_env("SHIPYARD_REGION").filter(|v| !v.trim().is_empty()) {
        config.backend.region = region.trim().to_string();
    }

    if let Some(secs) = get_env("SHIPYARD_SETTLE_SECS") {
        match secs.trim().parse::<u64>() {
            Ok(secs) => config.verify.settle_secs = secs,
            Err(_) => eprintln!(
                "[WARN] ignoring SHIPYARD_SETTLE_SECS='{}'; expected a number of seconds",
                secs
            ),
        }
    }

    if let Some(val) = get_env("SHIPYARD_VERIFY") {
        config.verify.enabled = val.to_lowercase() != "false" && val != "0";
    }

    if let Some(color) = get_env("SHIPYARD_COLOR") {
        let current = config.output.color;
        config.output.color =
            EnvVarValidator::new("SHIPYARD_COLOR", ColorMode::VALUES).parse(&color, ColorMode::parse, current);
    }

    config
}

const KNOWN_KEYS: &[&str] = &[
    "paths",
    "terraform_dir",
    "ansible_dir",
    "plan_file",
    "inventory_file",
    "run_lock",
    "backend",
    "bucket",
    "lock_table",
    "region",
    "key",
    "cli",
    "profile",
    "connect_timeout_secs",
    "read_timeout_secs",
    "terraform",
    "binary",
    "lock_timeout_secs",
    "address_output",
    "vars",
    "ansible",
    "playbook",
    "user",
    "private_key",
    "timeout_secs",
    "app",
    "repo_url",
    "repo_branch",
    "verify",
    "enabled",
    "settle_secs",
    "output",
    "color",
    "unicode",
];

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}
