//! Common test utilities for Shipyard CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project and home directories with a scrubbed environment
//! - `TestResult`: Captured exit code and output

pub mod env;

pub use env::*;
