use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Step,
    Arrow,
    Lock,
    Deploy,
    Trash,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Step) => theme::icons::STEP,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Lock) => theme::icons::LOCK,
            (true, Icon::Deploy) => theme::icons::DEPLOY,
            (true, Icon::Trash) => theme::icons::TRASH,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Step) => theme::icons_ascii::STEP,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Lock) => theme::icons_ascii::LOCK,
            (false, Icon::Deploy) => theme::icons_ascii::DEPLOY,
            (false, Icon::Trash) => theme::icons_ascii::TRASH,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Lock | Icon::Trash => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Step | Icon::Deploy => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
