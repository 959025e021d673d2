//! Configuration module
//!
//! Precedence, highest first:
//! 1. CLI flags
//! 2. Environment variables (`SHIPYARD_*`)
//! 3. `--config <file>`, else project config (`./shipyard.toml`)
//! 4. User config (`~/.config/shipyard/config.toml`)
//! 5. Built-in defaults
//!
//! Deployment secrets are not configuration: they come from the environment
//! only (see `domain::value_objects::environment`).

mod env_validator;
mod loader;
mod types;

pub use env_validator::{levenshtein, EnvVarValidator};
pub use loader::{load, load_with_warnings, with_env_overrides, ConfigWarning, LoadedConfig, PROJECT_CONFIG};
pub use types::{
    expand_home, resolve_path, AnsibleConfig, AppConfig, BackendConfig, ColorMode, Config,
    OutputConfig, PathsConfig, TerraformConfig, VerifyConfig,
};
