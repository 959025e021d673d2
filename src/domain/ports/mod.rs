//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod artifact_store;
pub mod configuration;
pub mod confirmer;
pub mod deploy_events;
pub mod endpoint_probe;
pub mod infrastructure;
pub mod lock_client;
pub mod preflight;
pub mod state_backend;

pub use artifact_store::ArtifactStore;
pub use configuration::ConfigurationApplier;
pub use confirmer::{
    is_affirmative, ConfirmRequest, Confirmer, DeclineAll, FlagAnswers, AFFIRMATIVE_TOKEN,
};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use endpoint_probe::{EndpointProbe, Verification, ACCEPTED_STATUS};
pub use infrastructure::{InfrastructureDriver, Outputs, PlanHandle};
pub use lock_client::LockClient;
pub use preflight::Preflight;
pub use state_backend::{BootstrapStatus, StateBackend};
