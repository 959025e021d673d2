//! Domain Services
//!
//! Pure logic with no I/O dependencies.

pub mod lock_parser;

pub use lock_parser::{interpret_probe_failure, is_lock_contention, parse_lock_info, strip_ansi};
