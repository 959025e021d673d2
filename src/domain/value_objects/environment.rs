//! Deploy Environment Value Object
//!
//! The external inputs a run needs, validated once up front. Secrets are
//! carried here explicitly and handed to the configuration step by value.

use std::collections::BTreeMap;
use std::fmt;

pub const DOMAIN_NAME: &str = "DOMAIN_NAME";
pub const CLOUDFLARE_EMAIL: &str = "CLOUDFLARE_EMAIL";
pub const CLOUDFLARE_API_TOKEN: &str = "CLOUDFLARE_API_TOKEN";
pub const APP_SECRET: &str = "APP_SECRET";
pub const REPO_URL: &str = "REPO_URL";
pub const REPO_BRANCH: &str = "REPO_BRANCH";

/// Keys that must be present and non-empty.
pub const REQUIRED_KEYS: &[&str] = &[DOMAIN_NAME, CLOUDFLARE_EMAIL, CLOUDFLARE_API_TOKEN, APP_SECRET];

/// Keys that override repository defaults when set.
pub const OPTIONAL_KEYS: &[&str] = &[REPO_URL, REPO_BRANCH];

/// Raw snapshot of the relevant process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentInputs(BTreeMap<String, String>);

impl EnvironmentInputs {
    /// Capture every known key through `lookup`.
    pub fn capture(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let values = REQUIRED_KEYS
            .iter()
            .chain(OPTIONAL_KEYS)
            .filter_map(|k| lookup(k).map(|v| (k.to_string(), v)))
            .collect();
        Self(values)
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Repository coordinates used when the environment does not override them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoDefaults {
    pub url: String,
    pub branch: String,
}

/// Validated environment for a run
#[derive(Clone, PartialEq, Eq)]
pub struct DeployEnvironment {
    pub domain: String,
    pub dns_email: String,
    dns_api_token: String,
    app_secret: String,
    pub repo_url: String,
    pub repo_branch: String,
}

impl DeployEnvironment {
    /// Validate inputs; on failure returns every missing key, in declaration order.
    ///
    /// `REPO_URL` is only missing when the configured default is empty too.
    pub fn resolve(inputs: &EnvironmentInputs, defaults: &RepoDefaults) -> Result<Self, Vec<String>> {
        let mut missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .filter(|k| inputs.get(k).is_none())
            .map(|k| k.to_string())
            .collect();
        // The repository has no sensible built-in default.
        if inputs.get(REPO_URL).is_none() && defaults.url.trim().is_empty() {
            missing.push(REPO_URL.to_string());
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        let required = |k: &str| inputs.get(k).unwrap_or_default().to_string();
        Ok(Self {
            domain: required(DOMAIN_NAME),
            dns_email: required(CLOUDFLARE_EMAIL),
            dns_api_token: required(CLOUDFLARE_API_TOKEN),
            app_secret: required(APP_SECRET),
            repo_url: inputs
                .get(REPO_URL)
                .map(str::to_string)
                .unwrap_or_else(|| defaults.url.clone()),
            repo_branch: inputs
                .get(REPO_BRANCH)
                .map(str::to_string)
                .unwrap_or_else(|| defaults.branch.clone()),
        })
    }

    /// Exactly the variables the configuration step declares as required.
    pub fn to_applier_env(&self) -> BTreeMap<String, String> {
        [
            (DOMAIN_NAME, &self.domain),
            (CLOUDFLARE_EMAIL, &self.dns_email),
            (CLOUDFLARE_API_TOKEN, &self.dns_api_token),
            (APP_SECRET, &self.app_secret),
            (REPO_URL, &self.repo_url),
            (REPO_BRANCH, &self.repo_branch),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
    }

    /// Public endpoint probed after configuration.
    pub fn endpoint_url(&self) -> String {
        format!("https://{}/", self.domain.trim_end_matches('/'))
    }
}

impl fmt::Debug for DeployEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeployEnvironment")
            .field("domain", &self.domain)
            .field("dns_email", &self.dns_email)
            .field("dns_api_token", &"<redacted>")
            .field("app_secret", &"<redacted>")
            .field("repo_url", &self.repo_url)
            .field("repo_branch", &self.repo_branch)
            .finish()
    }
}
