use anyhow::Result;
use shipyard::domain::value_objects::EnvironmentInputs;
use shipyard::infrastructure::RunGuard;
use shipyard::presentation::factory::{self, Workspace};

use super::{event_sink, Consent};
use crate::ui::context::UiContext;
use crate::ui::views::summary::{render_deploy_header, render_deploy_summary};

pub fn cmd_deploy(clean: bool, consent: Consent, workspace: &Workspace, ui: &UiContext) -> Result<i32> {
    let _guard = RunGuard::acquire(&workspace.run_lock())?;

    if !ui.json {
        print!(
            "{}",
            render_deploy_header(
                &workspace.root.display().to_string(),
                clean,
                ui.color,
                ui.unicode
            )
        );
    }

    let inputs = EnvironmentInputs::capture(|key| std::env::var(key).ok());
    let options = factory::deploy_options(workspace, clean, inputs);
    let use_case = factory::create_deploy_use_case(workspace, ui.json);
    let confirmer = factory::create_confirmer(ui.interactive, consent.answers());

    let result = use_case.execute_with(&options, event_sink(ui, "deploy"), confirmer);

    if !ui.json {
        print!("{}", render_deploy_summary(&result, ui.color, ui.unicode));
    }
    Ok(result.exit_code())
}
