use std::io::Write;

use shipyard::error::EXIT_FAILURE;
use shipyard::ShipyardError;

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::summary::{render_diagnostics, render_next_steps};

/// Exit code for an error that escaped a command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ShipyardError>()
        .map(ShipyardError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

pub fn format_error(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        ColoredText::error("[ERROR]").bold().render(supports_color),
        err
    );

    let Some(shipyard) = err.downcast_ref::<ShipyardError>() else {
        return out;
    };
    if let ShipyardError::PreconditionFailure { problems } = shipyard {
        for problem in problems {
            out.push_str(&format!("  - {}\n", problem));
        }
    }
    if let Some(raw) = shipyard.diagnostics() {
        out.push_str(&render_diagnostics(raw, supports_color));
    }
    out.push_str(&render_next_steps(shipyard, supports_color, supports_unicode));
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let diagnostics = err
            .downcast_ref::<ShipyardError>()
            .and_then(ShipyardError::diagnostics);
        let output = serde_json::json!({
            "event": "error",
            "message": err.to_string(),
            "diagnostics": diagnostics,
            "exit_code": exit_code(err),
        });
        let mut stdout = std::io::stdout().lock();
        let _ = writeln!(stdout, "{}", output);
        return;
    }

    let caps = crate::ui::terminal::detect_capabilities();
    if caps.is_github_actions {
        println!(
            "{}",
            github_actions_annotation(AnnotationLevel::Error, &err.to_string(), Some("Shipyard"))
        );
    }

    eprint!(
        "{}",
        format_error(err, caps.supports_color, caps.supports_unicode)
    );
}
