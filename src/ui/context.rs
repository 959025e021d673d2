use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use shipyard::config::{ColorMode, Config};
use shipyard::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    /// Confirmations are prompted rather than answered from flags
    pub interactive: bool,
}

impl UiContext {
    pub fn new(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        non_interactive: bool,
        config: &Config,
    ) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, non_interactive, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        non_interactive: bool,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match config.output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        let interactive = !non_interactive && caps.stdin_is_tty && !caps.is_ci;

        Self {
            json,
            verbose,
            caps,
            color,
            unicode,
            interactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_caps(is_ci: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            is_tty: true,
            stdin_is_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci,
            is_github_actions: false,
        }
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, 0, None, false, &config, tty_caps(true));
        assert!(!ui.color);
    }

    #[test]
    fn ci_allows_explicit_color_always_flag() {
        let config = Config::default();
        let ui = UiContext::from_caps(
            false,
            0,
            Some(ColorWhen::Always),
            false,
            &config,
            tty_caps(true),
        );
        assert!(ui.color);
    }

    #[test]
    fn ci_never_prompts() {
        let ui = UiContext::from_caps(false, 0, None, false, &Config::default(), tty_caps(true));
        assert!(!ui.interactive);
    }

    #[test]
    fn non_interactive_flag_disables_prompts_on_a_terminal() {
        let config = Config::default();
        assert!(UiContext::from_caps(false, 0, None, false, &config, tty_caps(false)).interactive);
        assert!(!UiContext::from_caps(false, 0, None, true, &config, tty_caps(false)).interactive);
    }

    #[test]
    fn config_can_disable_unicode() {
        let mut config = Config::default();
        config.output.unicode = false;
        let ui = UiContext::from_caps(false, 0, None, false, &config, tty_caps(false));
        assert!(!ui.unicode);
    }
}
