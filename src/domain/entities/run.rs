//! Deployment Run Entity
//!
//! One invocation of the orchestrator, advanced phase by phase.

use std::fmt;

use serde::Serialize;

/// Orchestrator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Init,
    PreconditionCheck,
    BackendBootstrap,
    ExistingInfraCheck,
    CleanSlate,
    LockCheck,
    Plan,
    Apply,
    Configure,
    Verify,
    Done,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Done | Phase::Failed)
    }

    /// Whether a failure in this phase offers the destructive clean-up.
    ///
    /// Precondition failures mutate nothing, so there is nothing to clean.
    pub fn offers_cleanup(self) -> bool {
        matches!(
            self,
            Phase::BackendBootstrap
                | Phase::LockCheck
                | Phase::Plan
                | Phase::Apply
                | Phase::Configure
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::PreconditionCheck => "precondition check",
            Phase::BackendBootstrap => "backend bootstrap",
            Phase::ExistingInfraCheck => "existing infrastructure check",
            Phase::CleanSlate => "clean slate",
            Phase::LockCheck => "lock check",
            Phase::Plan => "plan",
            Phase::Apply => "apply",
            Phase::Configure => "configure",
            Phase::Verify => "verify",
            Phase::Done => "done",
            Phase::Failed => "failed",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State of a single orchestrator invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRun {
    pub force_clean: bool,
    pub phase: Phase,
    /// Phase that was active when the run failed
    pub failed_in: Option<Phase>,
    pub exit_code: i32,
}

impl DeploymentRun {
    pub fn new(force_clean: bool) -> Self {
        Self {
            force_clean,
            phase: Phase::Init,
            failed_in: None,
            exit_code: 0,
        }
    }

    /// Move to the next phase. Terminal runs stay terminal.
    pub fn advance(&mut self, phase: Phase) {
        if !self.phase.is_terminal() {
            self.phase = phase;
        }
    }

    pub fn complete(&mut self) {
        self.advance(Phase::Done);
        self.exit_code = 0;
    }

    pub fn fail(&mut self, exit_code: i32) {
        if self.phase.is_terminal() {
            return;
        }
        self.failed_in = Some(self.phase);
        self.phase = Phase::Failed;
        self.exit_code = exit_code;
    }

    pub fn succeeded(&self) -> bool {
        self.phase == Phase::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_records_the_active_phase() {
        let mut run = DeploymentRun::new(false);
        run.advance(Phase::Apply);
        run.fail(5);
        assert_eq!(run.phase, Phase::Failed);
        assert_eq!(run.failed_in, Some(Phase::Apply));
        assert_eq!(run.exit_code, 5);
    }

    #[test]
    fn terminal_runs_do_not_move() {
        let mut run = DeploymentRun::new(true);
        run.complete();
        run.advance(Phase::Plan);
        run.fail(1);
        assert_eq!(run.phase, Phase::Done);
        assert_eq!(run.exit_code, 0);
        assert!(run.succeeded());
    }

    #[test]
    fn precondition_failures_offer_no_cleanup() {
        assert!(!Phase::PreconditionCheck.offers_cleanup());
        assert!(Phase::Apply.offers_cleanup());
        assert!(Phase::Configure.offers_cleanup());
    }
}
