use shipyard::application::{CleanupReport, DeployResult, TeardownOutcome};
use shipyard::domain::ports::Verification;
use shipyard::ShipyardError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub fn render_deploy_header(
    project: &str,
    force_clean: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mode = if force_clean { " (clean slate)" } else { "" };
    format!(
        "{} {}{}\n",
        Icon::Deploy.colored(supports_color, supports_unicode),
        ColoredText::info(format!("Shipyard deploy: {}", project))
            .bold()
            .render(supports_color),
        mode
    )
}

fn verification_line(verification: &Verification) -> String {
    match verification {
        Verification::Healthy { status } => format!("healthy (HTTP {})", status),
        Verification::UnexpectedStatus { status } => format!("not healthy yet (HTTP {})", status),
        Verification::Unreachable { reason } => format!("unreachable ({})", reason),
        Verification::Skipped => "not checked".to_string(),
    }
}

pub fn render_deploy_summary(
    result: &DeployResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::from("\n");

    if result.is_success() {
        out.push_str(&format!(
            "{} {}\n",
            Icon::Success.colored(supports_color, supports_unicode),
            ColoredText::success("Deployment complete").bold().render(supports_color)
        ));
        if let Some(address) = &result.address {
            out.push_str(&format!("  Address   {}\n", address));
        }
        let endpoint = verification_line(&result.verification);
        let endpoint = if result.verification.is_healthy() {
            ColoredText::success(endpoint)
        } else {
            ColoredText::warning(endpoint)
        };
        out.push_str(&format!("  Endpoint  {}\n", endpoint.render(supports_color)));
    } else {
        let phase = result
            .run
            .failed_in
            .map(|p| p.label())
            .unwrap_or("run");
        out.push_str(&format!(
            "{} {}\n",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error(format!(
                "Deployment failed during {} (exit code {})",
                phase,
                result.exit_code()
            ))
            .bold()
            .render(supports_color)
        ));
        if let Some(err) = &result.error {
            out.push_str(&format!("  {}\n", err));
            if let Some(raw) = err.diagnostics() {
                out.push_str(&render_diagnostics(raw, supports_color));
            }
        }
    }

    if let Some(cleanup) = &result.cleanup {
        out.push_str(&render_cleanup(cleanup, supports_color, supports_unicode));
    }

    if let Some(err) = &result.error {
        out.push_str(&render_next_steps(err, supports_color, supports_unicode));
    }
    out
}

pub fn render_cleanup(
    report: &CleanupReport,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if !report.needs_manual_cleanup() {
        return String::new();
    }
    let mut out = format!(
        "{} {}\n",
        Icon::Warning.colored(supports_color, supports_unicode),
        ColoredText::warning("Destroy did not complete; cloud resources may be orphaned")
            .render(supports_color)
    );
    for id in &report.removed {
        out.push_str(&format!("  dropped from state: {}\n", id));
    }
    for (id, reason) in &report.failed {
        out.push_str(&format!("  still tracked: {} ({})\n", id, reason));
    }
    out
}

/// Backend output quoted line by line under an error.
pub fn render_diagnostics(raw: &str, supports_color: bool) -> String {
    let mut out = format!("{}\n", ColoredText::dim("Backend output:").render(supports_color));
    for line in raw.lines() {
        out.push_str(&format!("  | {}\n", line));
    }
    out
}

pub fn render_next_steps(
    err: &ShipyardError,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let steps = err.next_steps();
    if steps.is_empty() {
        return String::new();
    }
    let mut out = format!("{}\n", ColoredText::plain("Next steps:").bold().render(supports_color));
    for step in steps {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            step
        ));
    }
    out
}

pub fn render_teardown_summary(
    outcome: &TeardownOutcome,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    match outcome {
        TeardownOutcome::NothingTracked { .. } => format!(
            "{} Nothing to destroy; local artifacts cleared\n",
            Icon::Success.colored(supports_color, supports_unicode)
        ),
        TeardownOutcome::Declined { resources } => format!(
            "{} Teardown declined; {} resource(s) left in place\n",
            Icon::Warning.colored(supports_color, supports_unicode),
            resources.len()
        ),
        TeardownOutcome::Destroyed { resources, report } => {
            let mut out = if report.destroyed {
                format!(
                    "{} Destroyed {} resource(s)\n",
                    Icon::Trash.colored(supports_color, supports_unicode),
                    resources.len()
                )
            } else {
                String::new()
            };
            out.push_str(&render_cleanup(report, supports_color, supports_unicode));
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use shipyard::domain::entities::{Phase, ResourceSet};

    #[test]
    fn success_summary_shows_address_and_endpoint() {
        let mut result = DeployResult::new(false);
        result.address = Some("203.0.113.7".into());
        result.verification = Verification::UnexpectedStatus { status: 503 };
        result.run.complete();

        assert_snapshot!(render_deploy_summary(&result, false, false).trim_start().to_string(), @r"
        [OK] Deployment complete
          Address   203.0.113.7
          Endpoint  not healthy yet (HTTP 503)
        ");
    }

    #[test]
    fn failure_summary_names_phase_and_next_steps() {
        let mut result = DeployResult::new(false);
        result.run.advance(Phase::Apply);
        result.run.fail(7);
        result.error = Some(ShipyardError::ApplyFailed { code: 7 });

        let rendered = render_deploy_summary(&result, false, false);
        assert!(rendered.contains("Deployment failed during apply (exit code 7)"));
        assert!(rendered.contains("Next steps:"));
    }

    #[test]
    fn failure_summary_quotes_unparseable_lock_output() {
        let mut result = DeployResult::new(false);
        result.run.advance(Phase::LockCheck);
        result.run.fail(1);
        result.error = Some(ShipyardError::ParseFailure {
            raw: "Error: Error acquiring the state lock\n\nLock Info:\n  ID:\n  Who: alice@host-9".into(),
        });

        let rendered = render_deploy_summary(&result, false, false);
        assert!(rendered.contains("Backend output:\n"));
        assert!(rendered.contains("  |   Who: alice@host-9\n"));
        assert!(rendered.contains("shipyard unlock <LOCK_ID>"));
    }

    #[test]
    fn partial_destroy_lists_orphans() {
        let report = CleanupReport {
            destroyed: false,
            removed: vec!["aws_instance.app".into()],
            failed: vec![("aws_eip.app".into(), "locked".into())],
            destroy_exit_code: Some(1),
            cleared: vec![],
        };
        let rendered = render_teardown_summary(
            &TeardownOutcome::Destroyed {
                resources: ResourceSet::new(vec!["aws_instance.app".into(), "aws_eip.app".into()]),
                report,
            },
            false,
            false,
        );
        assert!(rendered.contains("still tracked: aws_eip.app (locked)"));
        assert!(!rendered.contains("Destroyed 2"));
    }
}
