//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;

use crate::application::{
    DeployOptions, DeployPorts, DeployUseCase, StatusUseCase, TeardownUseCase, UnlockUseCase,
};
use crate::config::{resolve_path, Config};
use crate::domain::ports::{Confirmer, FlagAnswers};
use crate::domain::value_objects::EnvironmentInputs;
use crate::infrastructure::{
    AnsiblePlaybook, AnsibleSettings, AwsBackend, AwsSettings, CommandRunner, HttpsProbe,
    InteractiveConfirmer, LocalArtifacts, SystemPreflight, SystemRunner, TerraformCli,
    TerraformSettings,
};

/// Type alias for the concrete DeployUseCase with all dependencies
pub type ConcreteDeployUseCase = DeployUseCase<TerraformCli, TerraformCli, AnsiblePlaybook>;

pub type ConcreteTeardownUseCase = TeardownUseCase<TerraformCli, TerraformCli>;

pub type ConcreteStatusUseCase = StatusUseCase<TerraformCli, TerraformCli>;

pub type ConcreteUnlockUseCase = UnlockUseCase<TerraformCli>;

/// Project root plus the configuration resolved against it
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: Config,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn terraform_dir(&self) -> PathBuf {
        resolve_path(&self.root, &self.config.paths.terraform_dir)
    }

    pub fn ansible_dir(&self) -> PathBuf {
        resolve_path(&self.root, &self.config.paths.ansible_dir)
    }

    pub fn plan_file(&self) -> PathBuf {
        self.terraform_dir().join(&self.config.paths.plan_file)
    }

    pub fn inventory_file(&self) -> PathBuf {
        self.ansible_dir().join(&self.config.paths.inventory_file)
    }

    pub fn run_lock(&self) -> PathBuf {
        resolve_path(&self.root, &self.config.paths.run_lock)
    }

    pub fn private_key(&self) -> PathBuf {
        resolve_path(&self.root, &self.config.ansible.private_key)
    }

    /// Executables every command shells out to
    pub fn infra_tools(&self) -> Vec<String> {
        vec![
            self.config.terraform.binary.clone(),
            self.config.backend.cli.clone(),
        ]
    }

    /// Executables a deploy needs
    pub fn deploy_tools(&self) -> Vec<String> {
        let mut tools = self.infra_tools();
        tools.push(self.config.ansible.binary.clone());
        tools
    }
}

/// Create the process runner shared by every tool adapter
///
/// In JSON mode child output is kept off stdout so the event stream stays parseable.
pub fn create_runner(json: bool) -> Rc<dyn CommandRunner> {
    Rc::new(SystemRunner::new(json))
}

pub fn terraform_settings(workspace: &Workspace) -> TerraformSettings {
    let config = &workspace.config;
    TerraformSettings {
        binary: config.terraform.binary.clone(),
        working_dir: workspace.terraform_dir(),
        plan_file: workspace.plan_file(),
        bucket: config.backend.bucket.clone(),
        lock_table: config.backend.lock_table.clone(),
        region: config.backend.region.clone(),
        state_key: config.backend.key.clone(),
        profile: config.backend.profile.clone(),
        lock_timeout: std::time::Duration::from_secs(config.terraform.lock_timeout_secs),
        address_output: config.terraform.address_output.clone(),
        vars: config.terraform.vars.clone(),
    }
}

pub fn aws_settings(config: &Config) -> AwsSettings {
    AwsSettings {
        cli: config.backend.cli.clone(),
        bucket: config.backend.bucket.clone(),
        lock_table: config.backend.lock_table.clone(),
        region: config.backend.region.clone(),
        profile: config.backend.profile.clone(),
        connect_timeout_secs: config.backend.connect_timeout_secs,
        read_timeout_secs: config.backend.read_timeout_secs,
    }
}

pub fn ansible_settings(workspace: &Workspace) -> AnsibleSettings {
    let config = &workspace.config;
    AnsibleSettings {
        binary: config.ansible.binary.clone(),
        playbook: config.ansible.playbook.clone(),
        inventory: workspace.inventory_file(),
        timeout_secs: config.ansible.timeout_secs,
    }
}

fn create_artifacts(workspace: &Workspace) -> LocalArtifacts {
    LocalArtifacts::new(workspace.plan_file(), workspace.inventory_file())
}

/// Create a deploy use case with all dependencies wired up
///
/// One `TerraformCli` serves as both the infrastructure driver and the lock
/// client; they share the runner.
pub fn create_deploy_use_case(workspace: &Workspace, json: bool) -> ConcreteDeployUseCase {
    let runner = create_runner(json);
    let terraform = TerraformCli::new(terraform_settings(workspace), runner.clone());
    let ansible = AnsiblePlaybook::new(ansible_settings(workspace), runner.clone());
    let ports = DeployPorts {
        backend: Box::new(AwsBackend::new(aws_settings(&workspace.config), runner)),
        artifacts: Box::new(create_artifacts(workspace)),
        probe: Box::new(HttpsProbe::new(workspace.config.verify.timeout())),
        preflight: Box::new(SystemPreflight),
    };

    DeployUseCase::new(terraform.clone(), terraform, ansible, ports)
}

pub fn create_teardown_use_case(workspace: &Workspace, json: bool) -> ConcreteTeardownUseCase {
    let terraform = TerraformCli::new(terraform_settings(workspace), create_runner(json));
    TeardownUseCase::new(
        terraform.clone(),
        terraform,
        Box::new(create_artifacts(workspace)),
    )
}

pub fn create_status_use_case(workspace: &Workspace, json: bool) -> ConcreteStatusUseCase {
    let terraform = TerraformCli::new(terraform_settings(workspace), create_runner(json));
    StatusUseCase::new(terraform.clone(), terraform)
}

pub fn create_unlock_use_case(workspace: &Workspace, json: bool) -> ConcreteUnlockUseCase {
    UnlockUseCase::new(TerraformCli::new(
        terraform_settings(workspace),
        create_runner(json),
    ))
}

/// Build run options from configuration and the captured environment
pub fn deploy_options(
    workspace: &Workspace,
    force_clean: bool,
    inputs: EnvironmentInputs,
) -> DeployOptions {
    let config = &workspace.config;
    DeployOptions::new(inputs, config.app.repo_defaults())
        .with_force_clean(force_clean)
        .with_tools(workspace.deploy_tools())
        .with_ssh(config.ansible.user.clone(), workspace.private_key())
        .with_config_dir(workspace.ansible_dir())
        .with_verify(config.verify.enabled, config.verify.settle())
}

/// Prompt on the terminal when one is attached, otherwise answer from flags
pub fn create_confirmer(interactive: bool, answers: FlagAnswers) -> Arc<dyn Confirmer> {
    if interactive {
        Arc::new(InteractiveConfirmer::terminal())
    } else {
        Arc::new(answers)
    }
}
