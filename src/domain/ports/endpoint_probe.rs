//! Endpoint Probe Port
//!
//! Advisory reachability check of the deployed application.

use serde::Serialize;

/// Status codes that count as a healthy endpoint.
pub const ACCEPTED_STATUS: &[u16] = &[200, 301, 302];

/// Outcome of probing the public endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Verification {
    Healthy { status: u16 },
    UnexpectedStatus { status: u16 },
    Unreachable { reason: String },
    Skipped,
}

impl Verification {
    pub fn from_probe(result: Result<u16, String>) -> Self {
        match result {
            Ok(status) if ACCEPTED_STATUS.contains(&status) => Self::Healthy { status },
            Ok(status) => Self::UnexpectedStatus { status },
            Err(reason) => Self::Unreachable { reason },
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy { .. })
    }
}

pub trait EndpointProbe {
    /// Issue one request; returns the HTTP status without following redirects.
    fn probe(&self, url: &str) -> Result<u16, String>;
}
