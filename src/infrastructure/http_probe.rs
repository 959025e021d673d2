//! HTTPS Endpoint Probe
//!
//! One blocking GET against the public endpoint. Redirects are reported as
//! they are, not followed: a proxy redirecting to HTTPS is a healthy answer.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;

use crate::domain::ports::EndpointProbe;

#[derive(Debug, Clone)]
pub struct HttpsProbe {
    timeout: Duration,
}

impl HttpsProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl EndpointProbe for HttpsProbe {
    fn probe(&self, url: &str) -> Result<u16, String> {
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| format!("failed to build HTTP client: {}", e))?;
        let response = client.get(url).send().map_err(|e| e.to_string())?;
        Ok(response.status().as_u16())
    }
}
