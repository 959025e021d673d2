//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//!
//! ## Structure
//!
//! - `cli` - Command-line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//!
//! ## Usage
//!
//! ```ignore
//! use shipyard::presentation::factory::{self, Workspace};
//!
//! let workspace = Workspace::new(".", config);
//! let use_case = factory::create_deploy_use_case(&workspace, false);
//! let result = use_case.execute(&options);
//! ```

pub mod cli;
pub mod factory;

pub use cli::{Cli, ColorWhen, Commands};
pub use factory::{create_deploy_use_case, Workspace};
