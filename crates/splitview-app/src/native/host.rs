//! [`SurfaceHost`] over native messaging.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use splitview_common::{new_correlation_id, HostError, ScreenRect, SurfaceId, ViewId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::protocol::{HostRequest, Outbound};
use crate::host::{HostPage, SurfaceHost, WindowRequest};

/// How long the extension has to answer a host request.
pub const HOST_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Outbound queue capacity, shared by replies, events, and host requests.
const OUTBOUND_CAPACITY: usize = 64;

type Pending = Arc<Mutex<HashMap<String, oneshot::Sender<Result<Value, String>>>>>;

/// Sends `hostRequest` envelopes and waits for the matching `hostReply`.
///
/// Cloning shares the outbound queue and the table of pending requests.
#[derive(Clone)]
pub struct NativeHost {
    outbound: mpsc::Sender<Outbound>,
    pending: Pending,
    timeout: Duration,
}

impl NativeHost {
    /// A host plus the receiving end of its outbound queue, which the
    /// transport drains into stdout.
    pub fn channel() -> (Self, mpsc::Receiver<Outbound>) {
        let (outbound, rx) = mpsc::channel(OUTBOUND_CAPACITY);
        let host = Self {
            outbound,
            pending: Arc::default(),
            timeout: HOST_REQUEST_TIMEOUT,
        };
        (host, rx)
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn sender(&self) -> mpsc::Sender<Outbound> {
        self.outbound.clone()
    }

    /// Deliver a `hostReply`. Returns false when no request is waiting on
    /// `id` (it timed out, or was never sent).
    pub fn resolve(&self, id: &str, outcome: Result<Value, String>) -> bool {
        let waiter = self.pending.lock().ok().and_then(|mut p| p.remove(id));
        match waiter {
            Some(tx) => tx.send(outcome).is_ok(),
            None => {
                debug!(id, "reply for unknown host request");
                false
            }
        }
    }

    /// Fail every waiting request. Called when the extension goes away.
    pub fn disconnect(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            if !pending.is_empty() {
                warn!(waiting = pending.len(), "host disconnected with requests in flight");
            }
            pending.clear();
        }
    }

    async fn request(&self, request: HostRequest) -> Result<Value, HostError> {
        let id = new_correlation_id();
        let method = request.method();
        let (tx, rx) = oneshot::channel();
        self.pending
            .lock()
            .map_err(|_| HostError::Disconnected)?
            .insert(id.clone(), tx);

        debug!(id = %id, method, "host request");
        let envelope = Outbound::HostRequest {
            id: id.clone(),
            request,
        };
        if self.outbound.send(envelope).await.is_err() {
            self.forget(&id);
            return Err(HostError::Disconnected);
        }

        match tokio::time::timeout(self.timeout, rx).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(reason))) => Err(HostError::Rejected(reason)),
            Ok(Err(_)) => Err(HostError::Disconnected),
            Err(_) => {
                self.forget(&id);
                Err(HostError::Timeout(method.to_string()))
            }
        }
    }

    async fn request_as<T: DeserializeOwned>(&self, request: HostRequest) -> Result<T, HostError> {
        let method = request.method();
        let value = self.request(request).await?;
        serde_json::from_value(value)
            .map_err(|e| HostError::Rejected(format!("malformed {method} reply: {e}")))
    }

    fn forget(&self, id: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.remove(id);
        }
    }
}

#[async_trait]
impl SurfaceHost for NativeHost {
    async fn open_view_tab(&self, view_id: &ViewId) -> Result<SurfaceId, HostError> {
        self.request_as(HostRequest::OpenViewTab {
            view_id: view_id.clone(),
        })
        .await
    }

    async fn open_window(&self, request: WindowRequest) -> Result<SurfaceId, HostError> {
        self.request_as(HostRequest::OpenWindow(request)).await
    }

    async fn set_window_bounds(
        &self,
        window: SurfaceId,
        bounds: ScreenRect,
    ) -> Result<(), HostError> {
        self.request(HostRequest::SetWindowBounds { window, bounds })
            .await
            .map(drop)
    }

    async fn close_surface(&self, surface: SurfaceId) -> Result<(), HostError> {
        self.request(HostRequest::CloseSurface { surface })
            .await
            .map(drop)
    }

    async fn focus_surface(&self, surface: SurfaceId) -> Result<(), HostError> {
        self.request(HostRequest::FocusSurface { surface })
            .await
            .map(drop)
    }

    async fn display_bounds(&self) -> Result<ScreenRect, HostError> {
        self.request_as(HostRequest::DisplayBounds).await
    }

    async fn open_page(&self, page: HostPage) -> Result<(), HostError> {
        self.request(HostRequest::OpenPage { page }).await.map(drop)
    }

    async fn apply_header_rules(&self, rules: Vec<Value>) -> Result<(), HostError> {
        self.request(HostRequest::ApplyHeaderRules { rules })
            .await
            .map(drop)
    }
}
