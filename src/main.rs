//! Shipyard CLI - single-host deployment orchestrator
//!
//! Usage: shipyard [-c] [COMMAND]
//!
//! Commands:
//!   deploy   Provision, configure and verify (the default)
//!   unlock   Release a stale state lock
//!   destroy  Destroy everything the shared state tracks
//!   status   Show the lock holder and tracked resources

mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use shipyard::presentation::{Cli, Commands, Workspace};

use crate::commands::Consent;
use crate::ui::context::UiContext;

/// Exit status after an interrupt, as shells report SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

fn main() {
    let cli = Cli::parse();

    install_interrupt_handler(cli.json);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            ui::error::print_error(&err, cli.json);
            ui::error::exit_code(&err)
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let loaded = shipyard::config::load(&cli.project, cli.config.as_deref())?;
    let ui = UiContext::new(
        cli.json,
        cli.verbose,
        cli.color,
        cli.non_interactive,
        &loaded.config,
    );

    if !ui.json {
        for warning in &loaded.warnings {
            let hint = warning
                .suggestion
                .as_deref()
                .map(|s| format!(" (did you mean '{}'?)", s))
                .unwrap_or_default();
            let line = warning
                .line
                .map(|l| format!(":{}", l))
                .unwrap_or_default();
            eprintln!(
                "[WARN] unknown config key '{}' in {}{}{}",
                warning.key,
                warning.file.display(),
                line,
                hint
            );
        }
        if ui.verbose > 0 {
            match &loaded.source {
                Some(path) => eprintln!("[INFO] config: {}", path.display()),
                None => eprintln!("[INFO] config: built-in defaults"),
            }
        }
    }

    let workspace = Workspace::new(cli.project.clone(), loaded.config);
    let consent = Consent {
        force_unlock: cli.force_unlock,
        cleanup_on_failure: cli.cleanup_on_failure,
    };

    match cli.resolved_command() {
        Commands::Deploy { clean } => commands::deploy::cmd_deploy(clean, consent, &workspace, &ui),
        Commands::Unlock { lock_id } => {
            commands::unlock::cmd_unlock(lock_id.as_deref(), consent, &workspace, &ui)
        }
        Commands::Destroy { yes } => commands::destroy::cmd_destroy(yes, consent, &workspace, &ui),
        Commands::Status => commands::status::cmd_status(&workspace, &ui),
    }
}

/// An interrupted run may leave the remote state lock held; say how to recover.
fn install_interrupt_handler(json: bool) {
    let result = ctrlc::set_handler(move || {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "event": "interrupted",
                    "exit_code": EXIT_INTERRUPTED,
                })
            );
        } else {
            eprintln!(
                "\n[WARN] Interrupted. If the state lock was left behind, run \
                 `shipyard status` and then `shipyard unlock <LOCK_ID>`."
            );
        }
        std::process::exit(EXIT_INTERRUPTED);
    });
    if let Err(e) = result {
        eprintln!("[WARN] could not install Ctrl+C handler: {}", e);
    }
}
