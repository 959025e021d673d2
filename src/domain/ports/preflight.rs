//! Preflight Port
//!
//! Resolution of local prerequisites before anything is mutated.

use std::path::Path;

pub trait Preflight {
    /// Whether an executable can be run.
    fn tool_available(&self, tool: &str) -> bool;

    /// Whether a file exists and is readable.
    fn file_readable(&self, path: &Path) -> bool;
}
