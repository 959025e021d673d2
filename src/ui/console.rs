//! Console event sink
//!
//! Renders orchestrator events as leveled lines (`[STEP]`, `[INFO]`,
//! `[WARN]`, `[ERROR]`). Under GitHub Actions, warnings and errors are
//! additionally emitted as workflow annotations.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Utc;
use shipyard::domain::ports::{DeployEvent, DeployEventSink};

use crate::ui::ci::{github_actions_annotation, AnnotationLevel};
use crate::ui::context::UiContext;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::levels;
use crate::ui::views::lock::render_lock_info;

pub struct ConsoleEventSink {
    color: bool,
    unicode: bool,
    verbose: u8,
    annotate: bool,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: &UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: &UiContext, writer: W) -> Self {
        Self {
            color: ui.color,
            unicode: ui.unicode,
            verbose: ui.verbose,
            annotate: ui.caps.is_github_actions,
            out: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, level: &str, message: &str) -> String {
        let tag = format!("[{}]", level);
        let tag = match level {
            levels::STEP => ColoredText::info(tag).bold(),
            levels::WARN => ColoredText::warning(tag),
            levels::ERROR => ColoredText::error(tag).bold(),
            _ => ColoredText::dim(tag),
        };
        format!("{} {}\n", tag.render(self.color), message)
    }

    fn render(&self, event: &DeployEvent) -> String {
        match event {
            DeployEvent::Step { message, .. } => self.line(levels::STEP, message),
            DeployEvent::Info { message } => self.line(levels::INFO, message),
            DeployEvent::Warning { message } => self.annotated(AnnotationLevel::Warning, message),
            DeployEvent::Error { message } => self.annotated(AnnotationLevel::Error, message),
            DeployEvent::LockFound { lock } => render_lock_info(lock, Utc::now(), self.color, self.unicode),
            DeployEvent::LockReleased { id } => {
                self.line(levels::INFO, &format!("Released lock {}", id))
            }
            DeployEvent::ExistingResources { resources } => {
                let mut out = self.line(
                    levels::INFO,
                    &format!("Found {} tracked resource(s)", resources.len()),
                );
                for id in resources.iter() {
                    out.push_str(&format!("       {}\n", id));
                }
                out
            }
            DeployEvent::RemovedFromState { id, error: None } => {
                self.line(levels::INFO, &format!("Removed {} from state", id))
            }
            DeployEvent::RemovedFromState {
                id,
                error: Some(reason),
            } => self.line(
                levels::WARN,
                &format!("Could not remove {} from state: {}", id, reason),
            ),
            DeployEvent::ArtifactsCleared { paths } => {
                let mut out = self.line(
                    levels::INFO,
                    &format!("Cleared {} local artifact(s)", paths.len()),
                );
                if self.verbose > 0 {
                    for path in paths {
                        out.push_str(&format!("       {}\n", path.display()));
                    }
                }
                out
            }
            // Rendered by the info/warning that precedes it and by the summary.
            DeployEvent::Verified { .. } | DeployEvent::Completed { .. } => String::new(),
        }
    }

    fn annotated(&self, level: AnnotationLevel, message: &str) -> String {
        let tag = match level {
            AnnotationLevel::Warning => levels::WARN,
            AnnotationLevel::Error => levels::ERROR,
        };
        let mut out = self.line(tag, message);
        if self.annotate {
            out.push_str(&github_actions_annotation(level, message, Some("Shipyard")));
            out.push('\n');
        }
        out
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        let rendered = self.render(&event);
        if rendered.is_empty() {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            let _ = out.write_all(rendered.as_bytes());
            let _ = out.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::terminal::TerminalCapabilities;
    use shipyard::config::Config;
    use shipyard::domain::entities::{Phase, ResourceSet};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuf {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn ui(github: bool) -> UiContext {
        let caps = TerminalCapabilities {
            is_tty: false,
            stdin_is_tty: false,
            supports_color: false,
            supports_unicode: false,
            is_ci: github,
            is_github_actions: github,
        };
        UiContext::from_caps(false, 0, None, true, &Config::default(), caps)
    }

    #[test]
    fn events_render_as_leveled_lines() {
        let buf = SharedBuf::default();
        let sink = ConsoleEventSink::with_writer(&ui(false), buf.clone());

        sink.on_event(DeployEvent::step(Phase::Plan, "Validating and planning"));
        sink.on_event(DeployEvent::info("Plan has no changes"));
        sink.on_event(DeployEvent::warning("endpoint not healthy"));
        sink.on_event(DeployEvent::error("apply failed"));

        assert_eq!(
            buf.text(),
            "[STEP] Validating and planning\n\
             [INFO] Plan has no changes\n\
             [WARN] endpoint not healthy\n\
             [ERROR] apply failed\n"
        );
    }

    #[test]
    fn resources_are_listed_under_the_count() {
        let buf = SharedBuf::default();
        let sink = ConsoleEventSink::with_writer(&ui(false), buf.clone());

        sink.on_event(DeployEvent::ExistingResources {
            resources: ResourceSet::new(vec!["aws_instance.app".into()]),
        });

        assert!(buf.text().contains("[INFO] Found 1 tracked resource(s)\n       aws_instance.app\n"));
    }

    #[test]
    fn github_actions_gets_annotations_for_warnings() {
        let buf = SharedBuf::default();
        let sink = ConsoleEventSink::with_writer(&ui(true), buf.clone());

        sink.on_event(DeployEvent::warning("drift"));
        sink.on_event(DeployEvent::info("quiet"));

        let text = buf.text();
        assert!(text.contains("::warning title=Shipyard::drift"));
        assert!(!text.contains("::notice"));
    }

    #[test]
    fn completion_is_left_to_the_summary() {
        let buf = SharedBuf::default();
        let sink = ConsoleEventSink::with_writer(&ui(false), buf.clone());
        sink.on_event(DeployEvent::Completed {
            success: true,
            exit_code: 0,
            address: None,
            diagnostics: None,
        });
        assert!(buf.text().is_empty());
    }
}
