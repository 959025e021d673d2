//! Configuration Applier Port
//!
//! The remote-configuration step, run against the freshly provisioned host.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ShipyardResult;

pub trait ConfigurationApplier {
    /// Run the configuration step in `working_dir`.
    ///
    /// `env` is the complete set of application variables the step may see;
    /// implementations must not forward the caller's ambient environment.
    /// Failure is `ConfigFailed` with the step's exit code.
    fn run(&self, working_dir: &Path, env: BTreeMap<String, String>) -> ShipyardResult<()>;
}
