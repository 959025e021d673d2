//! Deploy Use Case
//!
//! Orchestrates one run:
//! 1. Check preconditions (tools, key, environment, credentials)
//! 2. Bootstrap the state backend and initialize
//! 3. Look for existing infrastructure; optionally destroy it
//! 4. Clear a stale lock, with consent
//! 5. Validate, plan, apply
//! 6. Write the inventory and run the configuration step
//! 7. Probe the public endpoint (advisory)
//!
//! Any failure from step 2 onward (except a declined lock override) moves
//! the run to `Failed` and offers the same destroy-and-clean as step 3.
//! Nothing is retried automatically.

use std::sync::Arc;
use std::thread;

use crate::application::cleanup::destroy_and_clean;
use crate::application::locks::clear_lock;
use crate::application::preconditions::check_deploy;
use crate::domain::entities::Phase;
use crate::domain::ports::{
    ArtifactStore, BootstrapStatus, ConfigurationApplier, ConfirmRequest, Confirmer, DeclineAll,
    DeployEvent, DeployEventSink, EndpointProbe, InfrastructureDriver, LockClient, NoopEventSink,
    Preflight, StateBackend, Verification,
};
use crate::domain::value_objects::{DeployEnvironment, Inventory};
use crate::error::{ShipyardError, ShipyardResult};

use super::options::DeployOptions;
use super::result::DeployResult;

/// Ports the orchestrator only talks to through trait objects
pub struct DeployPorts {
    pub backend: Box<dyn StateBackend>,
    pub artifacts: Box<dyn ArtifactStore>,
    pub probe: Box<dyn EndpointProbe>,
    pub preflight: Box<dyn Preflight>,
}

/// Deploy use case - the orchestrator state machine
///
/// Parameterized by the three collaborators it drives, so tests can script
/// every failure mode.
pub struct DeployUseCase<I, L, C>
where
    I: InfrastructureDriver,
    L: LockClient,
    C: ConfigurationApplier,
{
    infra: I,
    locks: L,
    applier: C,
    ports: DeployPorts,
}

impl<I, L, C> DeployUseCase<I, L, C>
where
    I: InfrastructureDriver,
    L: LockClient,
    C: ConfigurationApplier,
{
    pub fn new(infra: I, locks: L, applier: C, ports: DeployPorts) -> Self {
        Self {
            infra,
            locks,
            applier,
            ports,
        }
    }

    /// Run silently, declining every confirmation.
    pub fn execute(&self, options: &DeployOptions) -> DeployResult {
        self.execute_with(options, Arc::new(NoopEventSink), Arc::new(DeclineAll))
    }

    /// Run with event reporting and operator confirmation.
    pub fn execute_with(
        &self,
        options: &DeployOptions,
        events: Arc<dyn DeployEventSink>,
        confirmer: Arc<dyn Confirmer>,
    ) -> DeployResult {
        let mut result = DeployResult::new(options.force_clean);

        match self.run_phases(options, &mut result, events.as_ref(), confirmer.as_ref()) {
            Ok(()) => result.run.complete(),
            Err(err) => self.recover(err, &mut result, events.as_ref(), confirmer.as_ref()),
        }

        events.on_event(DeployEvent::Completed {
            success: result.is_success(),
            exit_code: result.exit_code(),
            address: result.address.clone(),
            diagnostics: result
                .error
                .as_ref()
                .and_then(ShipyardError::diagnostics)
                .map(str::to_string),
        });
        result
    }

    fn enter(
        &self,
        result: &mut DeployResult,
        events: &dyn DeployEventSink,
        phase: Phase,
        message: impl Into<String>,
    ) {
        result.run.advance(phase);
        events.on_event(DeployEvent::step(phase, message));
    }

    fn run_phases(
        &self,
        options: &DeployOptions,
        result: &mut DeployResult,
        events: &dyn DeployEventSink,
        confirmer: &dyn Confirmer,
    ) -> ShipyardResult<()> {
        self.enter(result, events, Phase::PreconditionCheck, "Checking prerequisites");
        let env = check_deploy(
            self.ports.preflight.as_ref(),
            &options.required_tools,
            &options.private_key,
            &options.inputs,
            &options.repo_defaults,
        )?;
        let identity = self.ports.backend.check_credentials()?;
        events.on_event(DeployEvent::info(format!("Cloud identity: {}", identity)));

        self.enter(
            result,
            events,
            Phase::BackendBootstrap,
            format!("Ensuring state backend {}", self.ports.backend.describe()),
        );
        report_bootstrap("State bucket", self.ports.backend.ensure_bucket()?, events);
        report_bootstrap("Lock table", self.ports.backend.ensure_lock_table()?, events);
        self.infra.init()?;

        self.enter(
            result,
            events,
            Phase::ExistingInfraCheck,
            "Checking for existing infrastructure",
        );
        result.existing = self.infra.list_resources()?;
        if result.existing.is_empty() {
            events.on_event(DeployEvent::info("No existing infrastructure"));
        } else {
            events.on_event(DeployEvent::ExistingResources {
                resources: result.existing.clone(),
            });
        }

        let clean = options.force_clean
            || (!result.existing.is_empty()
                && confirmer.confirm(&ConfirmRequest::CleanSlate {
                    resources: &result.existing,
                }));
        if clean {
            self.enter(
                result,
                events,
                Phase::CleanSlate,
                "Destroying existing infrastructure",
            );
            result.cleanup = Some(destroy_and_clean(
                &self.infra,
                self.ports.artifacts.as_ref(),
                &result.existing,
                events,
            )?);
        } else if !result.existing.is_empty() {
            events.on_event(DeployEvent::warning(
                "Continuing against existing infrastructure; it is not re-verified for drift",
            ));
        }

        self.enter(result, events, Phase::LockCheck, "Checking for state locks");
        result.released_lock = clear_lock(&self.locks, confirmer, events)?;

        self.enter(result, events, Phase::Plan, "Validating and planning");
        self.infra.validate()?;
        let plan = self.infra.plan()?;
        if !plan.has_changes {
            events.on_event(DeployEvent::info("Plan has no changes"));
        }

        self.enter(result, events, Phase::Apply, "Applying plan");
        let outputs = self.infra.apply(&plan)?;
        events.on_event(DeployEvent::info(format!("Host address: {}", outputs.address)));
        result.address = Some(outputs.address.clone());

        self.enter(result, events, Phase::Configure, "Configuring host");
        let inventory = Inventory {
            address: outputs.address,
            user: options.ssh_user.clone(),
            private_key: options.private_key.clone(),
        };
        let path = self.ports.artifacts.write_inventory(&inventory)?;
        events.on_event(DeployEvent::info(format!("Inventory written to {}", path.display())));
        self.applier.run(&options.config_dir, env.to_applier_env())?;

        self.enter(result, events, Phase::Verify, "Verifying endpoint");
        result.verification = self.verify(options, &env, events);
        Ok(())
    }

    /// Probe the endpoint. Never fails the run.
    fn verify(
        &self,
        options: &DeployOptions,
        env: &DeployEnvironment,
        events: &dyn DeployEventSink,
    ) -> Verification {
        if !options.verify {
            events.on_event(DeployEvent::info("Endpoint verification disabled"));
            return Verification::Skipped;
        }
        if !options.settle.is_zero() {
            events.on_event(DeployEvent::info(format!(
                "Waiting {}s before probing",
                options.settle.as_secs()
            )));
            thread::sleep(options.settle);
        }

        let url = env.endpoint_url();
        let verification = Verification::from_probe(self.ports.probe.probe(&url));
        match &verification {
            Verification::Healthy { status } => {
                events.on_event(DeployEvent::info(format!("{} answered HTTP {}", url, status)))
            }
            Verification::UnexpectedStatus { status } => {
                events.on_event(DeployEvent::warning(format!(
                    "{} answered HTTP {}; the deployment completed but the endpoint is not healthy yet",
                    url, status
                )))
            }
            Verification::Unreachable { reason } => {
                events.on_event(DeployEvent::warning(format!(
                    "{} is unreachable ({}); the deployment completed anyway",
                    url, reason
                )))
            }
            Verification::Skipped => {}
        }
        events.on_event(DeployEvent::Verified {
            url,
            verification: verification.clone(),
        });
        verification
    }

    /// Move to `Failed` and offer destroy-and-clean.
    fn recover(
        &self,
        err: ShipyardError,
        result: &mut DeployResult,
        events: &dyn DeployEventSink,
        confirmer: &dyn Confirmer,
    ) {
        let phase = result.run.phase;
        let code = err.exit_code();
        result.run.fail(code);
        events.on_event(DeployEvent::error(format!(
            "{} failed: {} (exit code {})",
            phase, err, code
        )));

        let declined_lock = matches!(err, ShipyardError::LockOverrideDeclined { .. });
        if phase.offers_cleanup() && !declined_lock {
            if confirmer.confirm(&ConfirmRequest::FailureCleanup { exit_code: code }) {
                let known = match self.infra.list_resources() {
                    Ok(set) => set,
                    Err(e) => {
                        events.on_event(DeployEvent::warning(format!(
                            "Could not list resources ({}); using the set found earlier",
                            e
                        )));
                        result.existing.clone()
                    }
                };
                match destroy_and_clean(&self.infra, self.ports.artifacts.as_ref(), &known, events) {
                    Ok(report) => result.cleanup = Some(report),
                    Err(e) => events.on_event(DeployEvent::error(format!("Cleanup failed: {}", e))),
                }
            } else {
                events.on_event(DeployEvent::info(
                    "State left as-is. Fix the underlying error and re-run; \
                     existing infrastructure is re-evaluated from scratch.",
                ));
            }
        }

        result.error = Some(err);
    }
}

fn report_bootstrap(what: &str, status: BootstrapStatus, events: &dyn DeployEventSink) {
    let message = match status {
        BootstrapStatus::Existing => format!("{} exists", what),
        BootstrapStatus::Created => format!("{} created", what),
    };
    events.on_event(DeployEvent::info(message));
}
