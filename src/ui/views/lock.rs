use chrono::{DateTime, Utc};
use shipyard::domain::entities::LockInfo;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Lock metadata as a labelled table, with the lock's age when known.
pub fn render_lock_info(
    lock: &LockInfo,
    now: DateTime<Utc>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Lock.colored(supports_color, supports_unicode),
        ColoredText::warning("State lock held").bold().render(supports_color)
    );

    let rows = lock.display_rows();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in rows {
        let value = match (label, lock.age(now)) {
            ("Created", Some(age)) => format!("{} ({} ago)", value, age),
            _ => value,
        };
        out.push_str(&format!(
            "  {:<width$}  {}\n",
            label,
            value,
            width = width
        ));
    }
    out
}
