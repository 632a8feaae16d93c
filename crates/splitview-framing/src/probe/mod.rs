//! Headers-only preflight probes.

mod http;
mod scripted;

pub use http::HttpProbe;
pub use scripted::StaticProbe;

use std::time::Duration;

use async_trait::async_trait;

/// The anti-framing headers of one response, every value kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbedHeaders {
    pub status: u16,
    pub x_frame_options: Vec<String>,
    pub content_security_policy: Vec<String>,
}

impl ProbedHeaders {
    pub fn with_xfo(mut self, value: impl Into<String>) -> Self {
        self.x_frame_options.push(value.into());
        self
    }

    pub fn with_csp(mut self, value: impl Into<String>) -> Self {
        self.content_security_policy.push(value.into());
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("probe timed out after {0:?}")]
    Timeout(Duration),

    #[error("probe client error: {0}")]
    Client(String),

    #[error("probe cancelled")]
    Cancelled,
}

/// Something that can fetch the response headers of a URL.
#[async_trait]
pub trait HeaderProbe: Send + Sync {
    async fn probe(&self, url: &str) -> Result<ProbedHeaders, ProbeError>;
}
