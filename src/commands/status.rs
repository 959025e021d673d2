use anyhow::Result;
use chrono::Utc;
use shipyard::application::require_tools;
use shipyard::infrastructure::SystemPreflight;
use shipyard::presentation::factory::{self, Workspace};

use crate::ui::context::UiContext;
use crate::ui::views::status::render_status;

pub fn cmd_status(workspace: &Workspace, ui: &UiContext) -> Result<i32> {
    require_tools(&SystemPreflight, &workspace.infra_tools())?;

    let report = factory::create_status_use_case(workspace, ui.json).execute()?;

    if ui.json {
        let output = serde_json::json!({
            "command": "status",
            "event": "status",
            "lock": report.lock,
            "resources": report.resources,
        });
        println!("{}", output);
    } else {
        print!("{}", render_status(&report, Utc::now(), ui.color, ui.unicode));
    }
    Ok(0)
}
