//! Property tests for Shipyard.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "never misreads a failure as
//! no lock".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/lock_parser.rs"]
mod lock_parser;

#[path = "properties/resource_set.rs"]
mod resource_set;
