//! AWS State Backend
//!
//! Bootstraps the S3 bucket and DynamoDB table that hold terraform state,
//! through the `aws` CLI. Every call is check-then-create; losing a creation
//! race to a concurrent run is treated as "already exists".

use std::rc::Rc;

use crate::domain::ports::{BootstrapStatus, StateBackend};
use crate::error::{ShipyardError, ShipyardResult};

use super::process::{CommandOutput, CommandRunner, ToolCommand};

/// Region where S3 rejects an explicit location constraint.
const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub cli: String,
    pub bucket: String,
    pub lock_table: String,
    pub region: String,
    pub profile: Option<String>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

pub struct AwsBackend {
    settings: AwsSettings,
    runner: Rc<dyn CommandRunner>,
}

impl AwsBackend {
    pub fn new(settings: AwsSettings, runner: Rc<dyn CommandRunner>) -> Self {
        Self { settings, runner }
    }

    fn command(&self, service: &str, operation: &str) -> ToolCommand {
        let s = &self.settings;
        let mut cmd = ToolCommand::new(&s.cli)
            .args([service, operation])
            .args(["--region", s.region.as_str()])
            .arg(format!("--cli-connect-timeout={}", s.connect_timeout_secs))
            .arg(format!("--cli-read-timeout={}", s.read_timeout_secs));
        if let Some(profile) = &s.profile {
            cmd = cmd.args(["--profile", profile.as_str()]);
        }
        cmd
    }

    fn run(&self, cmd: ToolCommand) -> ShipyardResult<CommandOutput> {
        Ok(self.runner.capture(&cmd)?)
    }

    fn bucket_failed(&self, output: &CommandOutput) -> ShipyardError {
        ShipyardError::BootstrapFailed {
            object: format!("bucket {}", self.settings.bucket),
            message: output.stderr.trim().to_string(),
        }
    }

    fn table_failed(&self, output: &CommandOutput) -> ShipyardError {
        ShipyardError::BootstrapFailed {
            object: format!("table {}", self.settings.lock_table),
            message: output.stderr.trim().to_string(),
        }
    }

    fn create_bucket(&self) -> ShipyardResult<BootstrapStatus> {
        let s = &self.settings;
        let mut cmd = self
            .command("s3api", "create-bucket")
            .args(["--bucket", s.bucket.as_str()]);
        if s.region != DEFAULT_REGION {
            cmd = cmd
                .arg("--create-bucket-configuration")
                .arg(format!("LocationConstraint={}", s.region));
        }
        let created = self.run(cmd)?;
        if !created.success() {
            if created.stderr.contains("BucketAlreadyOwnedByYou") {
                return Ok(BootstrapStatus::Existing);
            }
            return Err(self.bucket_failed(&created));
        }

        // State history is the only recovery path from a bad apply.
        let versioning = self.run(
            self.command("s3api", "put-bucket-versioning")
                .args(["--bucket", s.bucket.as_str()])
                .args(["--versioning-configuration", "Status=Enabled"]),
        )?;
        if !versioning.success() {
            return Err(self.bucket_failed(&versioning));
        }
        Ok(BootstrapStatus::Created)
    }

    fn wait_for_table(&self) -> ShipyardResult<()> {
        let waited = self.run(
            self.command("dynamodb", "wait")
                .arg("table-exists")
                .args(["--table-name", self.settings.lock_table.as_str()]),
        )?;
        if waited.success() {
            Ok(())
        } else {
            Err(self.table_failed(&waited))
        }
    }
}

impl StateBackend for AwsBackend {
    fn describe(&self) -> String {
        format!(
            "s3://{} + dynamodb:{} ({})",
            self.settings.bucket, self.settings.lock_table, self.settings.region
        )
    }

    fn check_credentials(&self) -> ShipyardResult<String> {
        let output = self.run(
            self.command("sts", "get-caller-identity")
                .args(["--query", "Arn", "--output", "text"]),
        )?;
        if output.success() {
            return Ok(output.stdout.trim().to_string());
        }
        Err(ShipyardError::PreconditionFailure {
            problems: vec![format!(
                "cloud credentials could not be resolved: {}",
                output.stderr.trim()
            )],
        })
    }

    fn ensure_bucket(&self) -> ShipyardResult<BootstrapStatus> {
        let head = self.run(
            self.command("s3api", "head-bucket")
                .args(["--bucket", self.settings.bucket.as_str()]),
        )?;
        if head.success() {
            return Ok(BootstrapStatus::Existing);
        }
        // 403: the name is taken by someone else; creating would fail too.
        if head.stderr.contains("403") || head.stderr.contains("Forbidden") {
            return Err(self.bucket_failed(&head));
        }
        self.create_bucket()
    }

    fn ensure_lock_table(&self) -> ShipyardResult<BootstrapStatus> {
        let table = self.settings.lock_table.as_str();
        let describe = self.run(
            self.command("dynamodb", "describe-table")
                .args(["--table-name", table]),
        )?;
        if describe.success() {
            return Ok(BootstrapStatus::Existing);
        }
        if !describe.stderr.contains("ResourceNotFoundException") {
            return Err(self.table_failed(&describe));
        }

        let created = self.run(
            self.command("dynamodb", "create-table")
                .args(["--table-name", table])
                .args(["--attribute-definitions", "AttributeName=LockID,AttributeType=S"])
                .args(["--key-schema", "AttributeName=LockID,KeyType=HASH"])
                .args(["--billing-mode", "PAY_PER_REQUEST"]),
        )?;
        let status = if created.success() {
            BootstrapStatus::Created
        } else if created.stderr.contains("ResourceInUseException") {
            BootstrapStatus::Existing
        } else {
            return Err(self.table_failed(&created));
        };

        self.wait_for_table()?;
        Ok(status)
    }
}
