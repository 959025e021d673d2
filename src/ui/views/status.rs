use chrono::{DateTime, Utc};
use shipyard::application::StatusReport;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::lock::render_lock_info;

pub fn render_status(
    report: &StatusReport,
    now: DateTime<Utc>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();

    match &report.lock {
        Some(lock) => out.push_str(&render_lock_info(lock, now, supports_color, supports_unicode)),
        None => out.push_str(&format!(
            "{} No state lock held\n",
            Icon::Success.colored(supports_color, supports_unicode)
        )),
    }

    if report.resources.is_empty() {
        out.push_str(&format!(
            "{}\n",
            ColoredText::dim("No tracked resources").render(supports_color)
        ));
        return out;
    }

    out.push_str(&format!("Tracked resources ({}):\n", report.resources.len()));
    for id in report.resources.iter() {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            id
        ));
    }
    out
}
