//! Terraform CLI Adapter
//!
//! Implements `InfrastructureDriver` and `LockClient` on top of the
//! `terraform` binary with an S3 backend and DynamoDB lock table.
//!
//! Long-running commands (init, plan, apply, destroy) stream their output to
//! the operator. Commands whose output is interpreted (lock probe, state
//! listing, outputs) are captured.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crate::domain::entities::{LockInfo, ResourceSet};
use crate::domain::ports::{InfrastructureDriver, LockClient, Outputs, PlanHandle};
use crate::domain::services::{interpret_probe_failure, strip_ansi};
use crate::error::{ShipyardError, ShipyardResult};

use super::process::{CommandRunner, ToolCommand};

/// Terraform reports this on `state list` before anything was ever applied.
const NO_STATE_MARKER: &str = "No state file was found";

/// Messages meaning the resource is already gone from state.
const ALREADY_REMOVED_MARKERS: &[&str] = &["No matching objects found", "Invalid target address"];

/// Where and how terraform runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerraformSettings {
    pub binary: String,
    /// Directory holding the `.tf` files
    pub working_dir: PathBuf,
    /// Absolute path of the saved plan
    pub plan_file: PathBuf,
    pub bucket: String,
    pub lock_table: String,
    pub region: String,
    pub state_key: String,
    pub profile: Option<String>,
    pub lock_timeout: Duration,
    /// Output holding the host address
    pub address_output: String,
    pub vars: BTreeMap<String, String>,
}

/// Drives the terraform CLI. Cheap to clone; clones share the runner.
#[derive(Clone)]
pub struct TerraformCli {
    settings: Rc<TerraformSettings>,
    runner: Rc<dyn CommandRunner>,
}

impl TerraformCli {
    pub fn new(settings: TerraformSettings, runner: Rc<dyn CommandRunner>) -> Self {
        Self {
            settings: Rc::new(settings),
            runner,
        }
    }

    pub fn settings(&self) -> &TerraformSettings {
        &self.settings
    }

    fn command(&self, subcommand: &str) -> ToolCommand {
        let mut cmd = ToolCommand::new(&self.settings.binary)
            .args(subcommand.split_whitespace())
            .current_dir(&self.settings.working_dir)
            .env("TF_IN_AUTOMATION", "1");
        if let Some(profile) = &self.settings.profile {
            cmd = cmd.env("AWS_PROFILE", profile);
        }
        cmd
    }

    fn with_vars(&self, mut cmd: ToolCommand) -> ToolCommand {
        for (key, value) in &self.settings.vars {
            cmd = cmd.arg("-var").arg(format!("{}={}", key, value));
        }
        cmd
    }

    fn backend_args(&self) -> Vec<String> {
        let s = &self.settings;
        [
            ("bucket", &s.bucket),
            ("key", &s.state_key),
            ("region", &s.region),
            ("dynamodb_table", &s.lock_table),
        ]
        .into_iter()
        .map(|(k, v)| format!("-backend-config={}={}", k, v))
        .collect()
    }

    fn read_outputs(&self) -> ShipyardResult<Outputs> {
        let output = self.runner.capture(&self.command("output -json"))?;
        let name = &self.settings.address_output;
        if !output.success() {
            return Err(ShipyardError::MissingOutput { name: name.clone() });
        }
        parse_outputs(&output.stdout, name)
    }
}

/// Parse `terraform output -json` and extract the address output.
///
/// Each output is an object whose `value` field carries the actual value.
pub fn parse_outputs(json: &str, address_output: &str) -> ShipyardResult<Outputs> {
    let missing = || ShipyardError::MissingOutput {
        name: address_output.to_string(),
    };
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|_| missing())?;

    let values: BTreeMap<String, serde_json::Value> = raw
        .into_iter()
        .map(|(k, v)| {
            let value = v.get("value").cloned().unwrap_or(v);
            (k, value)
        })
        .collect();

    let address = values
        .get(address_output)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(missing)?
        .to_string();

    Ok(Outputs { address, values })
}

impl InfrastructureDriver for TerraformCli {
    fn init(&self) -> ShipyardResult<()> {
        let cmd = self
            .command("init -input=false -reconfigure")
            .args(self.backend_args());
        match self.runner.stream(&cmd)? {
            0 => Ok(()),
            code => Err(ShipyardError::InitFailed { code }),
        }
    }

    fn validate(&self) -> ShipyardResult<()> {
        match self.runner.stream(&self.command("validate -no-color"))? {
            0 => Ok(()),
            code => Err(ShipyardError::ValidateFailed { code }),
        }
    }

    fn plan(&self) -> ShipyardResult<PlanHandle> {
        let plan_file = &self.settings.plan_file;
        let cmd = self.with_vars(
            self.command("plan -input=false -detailed-exitcode")
                .arg(format!("-out={}", plan_file.display())),
        );
        // -detailed-exitcode: 0 = no changes, 2 = changes present
        match self.runner.stream(&cmd)? {
            0 => Ok(PlanHandle {
                path: plan_file.clone(),
                has_changes: false,
            }),
            2 => Ok(PlanHandle {
                path: plan_file.clone(),
                has_changes: true,
            }),
            code => Err(ShipyardError::PlanFailed { code }),
        }
    }

    fn apply(&self, plan: &PlanHandle) -> ShipyardResult<Outputs> {
        let cmd = self
            .command("apply -input=false")
            .arg(plan.path.display().to_string());
        match self.runner.stream(&cmd)? {
            0 => self.read_outputs(),
            code => Err(ShipyardError::ApplyFailed { code }),
        }
    }

    fn destroy(&self) -> ShipyardResult<()> {
        let cmd = self.with_vars(self.command("destroy -auto-approve -input=false"));
        match self.runner.stream(&cmd)? {
            0 => Ok(()),
            code => Err(ShipyardError::DestroyFailed { code }),
        }
    }

    fn list_resources(&self) -> ShipyardResult<ResourceSet> {
        let output = self.runner.capture(&self.command("state list"))?;
        if output.success() {
            return Ok(ResourceSet::from_state_list(&output.stdout));
        }
        let diagnostics = strip_ansi(&output.combined()).trim().to_string();
        if diagnostics.contains(NO_STATE_MARKER) {
            return Ok(ResourceSet::default());
        }
        Err(ShipyardError::BackendUnreachable { diagnostics })
    }

    fn remove_from_state(&self, id: &str) -> ShipyardResult<()> {
        let output = self.runner.capture(&self.command("state rm").arg(id))?;
        if output.success() {
            return Ok(());
        }
        let message = strip_ansi(&output.combined()).trim().to_string();
        if ALREADY_REMOVED_MARKERS.iter().any(|m| message.contains(m)) {
            return Ok(());
        }
        Err(ShipyardError::StateRemoveFailed {
            id: id.to_string(),
            message,
        })
    }
}

impl LockClient for TerraformCli {
    fn detect_lock(&self) -> ShipyardResult<Option<LockInfo>> {
        let cmd = self.with_vars(
            self.command("plan -refresh=false -input=false -no-color")
                .arg(format!("-lock-timeout={}s", self.settings.lock_timeout.as_secs())),
        );
        let output = self.runner.capture(&cmd)?;
        match output.code {
            Some(0) | Some(2) => Ok(None),
            _ => interpret_probe_failure(&output.combined()).map(Some),
        }
    }

    fn force_unlock(&self, id: &str) -> ShipyardResult<()> {
        let output = self
            .runner
            .capture(&self.command("force-unlock -force").arg(id))?;
        if output.success() {
            Ok(())
        } else {
            Err(ShipyardError::UnlockFailed {
                id: id.to_string(),
                message: strip_ansi(&output.combined()).trim().to_string(),
            })
        }
    }
}
