use std::sync::Arc;

use anyhow::Result;
use shipyard::application::require_tools;
use shipyard::domain::ports::Confirmer;
use shipyard::infrastructure::{RunGuard, SystemPreflight};
use shipyard::presentation::factory::{self, Workspace};

use super::{event_sink, Consent};
use crate::ui::context::UiContext;
use crate::ui::views::summary::render_teardown_summary;

pub fn cmd_destroy(yes: bool, consent: Consent, workspace: &Workspace, ui: &UiContext) -> Result<i32> {
    let _guard = RunGuard::acquire(&workspace.run_lock())?;
    require_tools(&SystemPreflight, &workspace.infra_tools())?;

    // `--yes` answers the teardown question only; a held lock still needs
    // `--force-unlock`.
    let confirmer: Arc<dyn Confirmer> = if yes {
        let mut answers = consent.answers();
        answers.teardown = true;
        Arc::new(answers)
    } else {
        factory::create_confirmer(ui.interactive, consent.answers())
    };

    let use_case = factory::create_teardown_use_case(workspace, ui.json);
    let outcome = use_case.execute(confirmer.as_ref(), event_sink(ui, "destroy").as_ref())?;

    if !ui.json {
        print!("{}", render_teardown_summary(&outcome, ui.color, ui.unicode));
    }
    Ok(outcome.exit_code())
}
