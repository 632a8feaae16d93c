//! In-memory probe with canned answers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{HeaderProbe, ProbeError, ProbedHeaders};

#[derive(Debug, Clone)]
enum Script {
    Respond(ProbedHeaders),
    Fail(String),
    Stall(Duration),
}

/// A [`HeaderProbe`] that answers from a fixed table and counts calls.
/// URLs without an entry answer `200` with no framing headers.
#[derive(Debug, Default)]
pub struct StaticProbe {
    scripts: HashMap<String, Script>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StaticProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: impl Into<String>, headers: ProbedHeaders) -> Self {
        self.scripts.insert(url.into(), Script::Respond(headers));
        self
    }

    pub fn fail(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.scripts.insert(url.into(), Script::Fail(reason.into()));
        self
    }

    /// Answer only after `delay`, to exercise timeouts.
    pub fn stall(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.scripts.insert(url.into(), Script::Stall(delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.seen
            .lock()
            .map(|seen| seen.iter().filter(|u| *u == url).count())
            .unwrap_or(0)
    }
}

#[async_trait]
impl HeaderProbe for StaticProbe {
    async fn probe(&self, url: &str) -> Result<ProbedHeaders, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(url.to_string());
        }

        match self.scripts.get(url) {
            Some(Script::Respond(headers)) => Ok(headers.clone()),
            Some(Script::Fail(reason)) => Err(ProbeError::Network(reason.clone())),
            Some(Script::Stall(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(ProbedHeaders {
                    status: 200,
                    ..Default::default()
                })
            }
            None => Ok(ProbedHeaders {
                status: 200,
                ..Default::default()
            }),
        }
    }
}
