use crossterm::style::Color;

/// Design tokens for Shipyard CLI output.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const STEP: &str = "●";
    pub const ARROW: &str = "↳";
    pub const LOCK: &str = "🔒";
    pub const DEPLOY: &str = "🚀";
    pub const TRASH: &str = "🗑";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const STEP: &str = "[..]";
    pub const ARROW: &str = "[>]";
    pub const LOCK: &str = "[LOCK]";
    pub const DEPLOY: &str = "[DEPLOY]";
    pub const TRASH: &str = "[DEL]";
}

/// Level tags prefixed to every console line; stable for log scraping.
pub mod levels {
    pub const STEP: &str = "STEP";
    pub const INFO: &str = "INFO";
    pub const WARN: &str = "WARN";
    pub const ERROR: &str = "ERROR";
}
