#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationLevel {
    Warning,
    Error,
}

/// Render a GitHub Actions workflow command so the message shows up on the run summary.
pub fn github_actions_annotation(level: AnnotationLevel, message: &str, title: Option<&str>) -> String {
    let level_str = match level {
        AnnotationLevel::Warning => "warning",
        AnnotationLevel::Error => "error",
    };

    let prop_str = match title {
        Some(title) => format!(" title={}", escape_property(title)),
        None => String::new(),
    };

    format!("::{}{}::{}", level_str, prop_str, escape_data(message))
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25").replace('\r', "%0D").replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn annotation_escapes_newlines() {
        let rendered =
            github_actions_annotation(AnnotationLevel::Error, "Line1\nLine2", Some("Shipyard"));
        assert!(rendered.contains("%0A"));
        assert!(rendered.starts_with("::error title=Shipyard::"));
    }

    #[test]
    fn annotation_escapes_title_separators() {
        let rendered =
            github_actions_annotation(AnnotationLevel::Warning, "drift", Some("lock: held, stale"));
        assert_eq!(rendered, "::warning title=lock%3A held%2C stale::drift");
    }
}
