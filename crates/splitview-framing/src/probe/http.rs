//! reqwest-backed probe.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_SECURITY_POLICY, X_FRAME_OPTIONS};
use reqwest::StatusCode;
use tracing::{debug, trace};

use super::{HeaderProbe, ProbeError, ProbedHeaders};

/// Sends `HEAD` and reads the framing headers. Servers that reject `HEAD`
/// get a `GET` whose body is never read.
///
/// The client carries no deadline of its own; the resolver's per-URL
/// timeout bounds every probe, so a reloaded timeout applies at once.
pub struct HttpProbe {
    http: reqwest::Client,
}

impl HttpProbe {
    pub fn new(user_agent: &str) -> Result<Self, ProbeError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ProbeError::Client(e.to_string()))?;
        Ok(Self { http })
    }

    fn extract(status: StatusCode, headers: &HeaderMap) -> ProbedHeaders {
        let values = |name| {
            headers
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .map(str::to_string)
                .collect::<Vec<_>>()
        };
        ProbedHeaders {
            status: status.as_u16(),
            x_frame_options: values(X_FRAME_OPTIONS),
            content_security_policy: values(CONTENT_SECURITY_POLICY),
        }
    }
}

fn network_error(e: reqwest::Error) -> ProbeError {
    ProbeError::Network(e.to_string())
}

#[async_trait]
impl HeaderProbe for HttpProbe {
    async fn probe(&self, url: &str) -> Result<ProbedHeaders, ProbeError> {
        let response = self.http.head(url).send().await.map_err(network_error)?;

        let response = match response.status() {
            StatusCode::METHOD_NOT_ALLOWED | StatusCode::NOT_IMPLEMENTED => {
                debug!(url = %url, "HEAD rejected, retrying with GET");
                self.http.get(url).send().await.map_err(network_error)?
            }
            _ => response,
        };

        let headers = Self::extract(response.status(), response.headers());
        trace!(url = %url, status = headers.status, "probe response");
        Ok(headers)
    }
}
