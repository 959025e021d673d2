use anyhow::Result;
use shipyard::application::{require_tools, UnlockOutcome};
use shipyard::infrastructure::SystemPreflight;
use shipyard::presentation::factory::{self, Workspace};

use super::{event_sink, Consent};
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn cmd_unlock(
    lock_id: Option<&str>,
    consent: Consent,
    workspace: &Workspace,
    ui: &UiContext,
) -> Result<i32> {
    require_tools(&SystemPreflight, &workspace.infra_tools())?;

    let use_case = factory::create_unlock_use_case(workspace, ui.json);
    let confirmer = factory::create_confirmer(ui.interactive, consent.answers());
    let events = event_sink(ui, "unlock");

    let outcome = use_case.execute(lock_id, confirmer.as_ref(), events.as_ref())?;

    if !ui.json {
        match outcome {
            UnlockOutcome::NoLock => println!(
                "{} No state lock held; nothing to release",
                Icon::Success.colored(ui.color, ui.unicode)
            ),
            UnlockOutcome::Released { id } => println!(
                "{} Lock {} released",
                Icon::Success.colored(ui.color, ui.unicode),
                id
            ),
        }
    }
    Ok(0)
}
