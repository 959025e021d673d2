//! Command handlers for the `shipyard` binary.
//!
//! Each handler returns the process exit code. Errors that escape are
//! printed by `main` and mapped through `ShipyardError::exit_code`.

pub mod deploy;
pub mod destroy;
pub mod status;
pub mod unlock;

use std::sync::Arc;

use shipyard::domain::ports::{DeployEventSink, FlagAnswers};
use shipyard::infrastructure::JsonEventSink;

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;

/// Consent given on the command line for runs that cannot prompt
#[derive(Debug, Clone, Copy, Default)]
pub struct Consent {
    pub force_unlock: bool,
    pub cleanup_on_failure: bool,
}

impl Consent {
    pub fn answers(&self) -> FlagAnswers {
        FlagAnswers {
            clean_slate: false,
            force_unlock: self.force_unlock,
            failure_cleanup: self.cleanup_on_failure,
            teardown: false,
        }
    }
}

/// NDJSON on stdout with `--json`, leveled console lines otherwise.
pub fn event_sink(ui: &UiContext, command: &'static str) -> Arc<dyn DeployEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout(command))
    } else {
        Arc::new(ConsoleEventSink::stdout(ui))
    }
}
