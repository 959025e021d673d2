//! Precondition checks
//!
//! Everything that can be verified before a single remote call mutates
//! anything. Problems are collected, not short-circuited, so the operator
//! sees the full list at once.

use std::path::Path;

use crate::domain::ports::Preflight;
use crate::domain::value_objects::environment::REPO_URL;
use crate::domain::value_objects::{DeployEnvironment, EnvironmentInputs, RepoDefaults};
use crate::error::ShipyardError;

/// Report every required tool that cannot be run.
pub fn missing_tools(preflight: &dyn Preflight, tools: &[String]) -> Vec<String> {
    tools
        .iter()
        .filter(|tool| !preflight.tool_available(tool))
        .map(|tool| format!("required tool '{}' was not found on PATH", tool))
        .collect()
}

/// Fail with `PreconditionFailure` unless every tool resolves.
pub fn require_tools(preflight: &dyn Preflight, tools: &[String]) -> Result<(), ShipyardError> {
    let problems = missing_tools(preflight, tools);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ShipyardError::PreconditionFailure { problems })
    }
}

/// Check tools, the SSH key and the environment for a deploy.
pub fn check_deploy(
    preflight: &dyn Preflight,
    tools: &[String],
    private_key: &Path,
    inputs: &EnvironmentInputs,
    defaults: &RepoDefaults,
) -> Result<DeployEnvironment, ShipyardError> {
    let mut problems = missing_tools(preflight, tools);

    if !preflight.file_readable(private_key) {
        problems.push(format!(
            "SSH private key {} does not exist or is not readable",
            private_key.display()
        ));
    }

    match DeployEnvironment::resolve(inputs, defaults) {
        Ok(env) if problems.is_empty() => Ok(env),
        Ok(_) => Err(ShipyardError::PreconditionFailure { problems }),
        Err(missing) => {
            problems.extend(
                missing
                    .into_iter()
                    .map(|key| missing_key_problem(&key)),
            );
            Err(ShipyardError::PreconditionFailure { problems })
        }
    }
}

fn missing_key_problem(key: &str) -> String {
    if key == REPO_URL {
        format!(
            "environment variable {} is not set and no default is configured (set `repo_url` under [app] in shipyard.toml)",
            key
        )
    } else {
        format!("environment variable {} is not set", key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::environment::{
        APP_SECRET, CLOUDFLARE_API_TOKEN, CLOUDFLARE_EMAIL, DOMAIN_NAME,
    };
    use std::path::PathBuf;

    struct Fixed {
        tools: &'static [&'static str],
        key_readable: bool,
    }

    impl Preflight for Fixed {
        fn tool_available(&self, tool: &str) -> bool {
            self.tools.iter().any(|t| *t == tool)
        }
        fn file_readable(&self, _path: &Path) -> bool {
            self.key_readable
        }
    }

    fn tools() -> Vec<String> {
        vec!["terraform".into(), "ansible-playbook".into(), "aws".into()]
    }

    fn defaults() -> RepoDefaults {
        RepoDefaults {
            url: "https://github.com/example/app.git".into(),
            branch: "main".into(),
        }
    }

    #[test]
    fn collects_every_problem() {
        let preflight = Fixed {
            tools: &["terraform"],
            key_readable: false,
        };
        let inputs = EnvironmentInputs::from_pairs([(DOMAIN_NAME, "app.example.com")]);

        let err = check_deploy(
            &preflight,
            &tools(),
            &PathBuf::from("/keys/id"),
            &inputs,
            &defaults(),
        )
        .unwrap_err();

        let ShipyardError::PreconditionFailure { problems } = err else {
            panic!("expected precondition failure");
        };
        assert_eq!(problems.len(), 6);
        assert!(problems[0].contains("ansible-playbook"));
        assert!(problems[2].contains("/keys/id"));
        assert!(problems[3].contains(CLOUDFLARE_EMAIL));
    }

    #[test]
    fn complete_inputs_resolve_environment() {
        let preflight = Fixed {
            tools: &["terraform", "ansible-playbook", "aws"],
            key_readable: true,
        };
        let inputs = EnvironmentInputs::from_pairs([
            (DOMAIN_NAME, "app.example.com"),
            (CLOUDFLARE_EMAIL, "ops@example.com"),
            (CLOUDFLARE_API_TOKEN, "token"),
            (APP_SECRET, "secret"),
        ]);

        let env = check_deploy(&preflight, &tools(), Path::new("/k"), &inputs, &defaults()).unwrap();
        assert_eq!(env.domain, "app.example.com");
    }

    #[test]
    fn require_tools_passes_when_all_present() {
        let preflight = Fixed {
            tools: &["terraform"],
            key_readable: true,
        };
        assert!(require_tools(&preflight, &["terraform".to_string()]).is_ok());
        assert!(require_tools(&preflight, &["aws".to_string()]).is_err());
    }

    #[test]
    fn missing_repo_url_points_at_config_key() {
        let preflight = Fixed {
            tools: &["terraform", "ansible-playbook", "aws"],
            key_readable: true,
        };
        let inputs = EnvironmentInputs::from_pairs([
            (DOMAIN_NAME, "app.example.com"),
            (CLOUDFLARE_EMAIL, "ops@example.com"),
            (CLOUDFLARE_API_TOKEN, "token"),
            (APP_SECRET, "secret"),
        ]);
        let no_default = RepoDefaults {
            url: String::new(),
            branch: "main".into(),
        };

        let err = check_deploy(&preflight, &tools(), Path::new("/k"), &inputs, &no_default)
            .unwrap_err();

        let ShipyardError::PreconditionFailure { problems } = err else {
            panic!("expected precondition failure");
        };
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("REPO_URL"));
        assert!(problems[0].contains("repo_url"));
        assert!(problems[0].contains("shipyard.toml"));
    }
}
