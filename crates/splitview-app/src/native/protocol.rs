//! Envelopes exchanged with the extension over native messaging.
//!
//! Inbound (extension -> host):
//! - `command`: a [`Command`] with a correlation id; answered by `reply`.
//! - `hostReply`: the answer to an earlier `hostRequest`.
//!
//! Outbound (host -> extension):
//! - `reply`: the outcome of a command.
//! - `event`: an [`Event`] for the rendering layer.
//! - `hostRequest`: ask the extension to manipulate a tab or window.

use serde::{Deserialize, Serialize};
use splitview_common::{Command, Event, ScreenRect, SplitViewError, SurfaceId, ViewId};

use crate::app_state::Reply;
use crate::host::{HostPage, WindowRequest};

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inbound {
    Command {
        id: String,
        command: Command,
    },
    HostReply {
        id: String,
        #[serde(default)]
        result: serde_json::Value,
        #[serde(default)]
        error: Option<String>,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Outbound {
    Reply {
        id: String,
        ok: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        reply: Option<Reply>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },
    Event {
        event: Event,
    },
    HostRequest {
        id: String,
        request: HostRequest,
    },
}

impl Outbound {
    pub fn reply(id: String, result: &Result<Reply, SplitViewError>) -> Self {
        match result {
            Ok(reply) => Outbound::Reply {
                id,
                ok: true,
                reply: Some(reply.clone()),
                error: None,
            },
            Err(e) => Self::failure(id, e.to_string()),
        }
    }

    pub fn failure(id: String, error: String) -> Self {
        Outbound::Reply {
            id,
            ok: false,
            reply: None,
            error: Some(error),
        }
    }

    /// What to send instead when this message cannot be encoded. Replies
    /// turn into failures so the sender is not left waiting.
    pub fn fallback(&self, error: &SplitViewError) -> Option<Self> {
        match self {
            Outbound::Reply { id, ok: true, .. } => {
                Some(Self::failure(id.clone(), error.to_string()))
            }
            _ => None,
        }
    }
}

/// Something the controller needs the extension to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum HostRequest {
    OpenViewTab { view_id: ViewId },
    OpenWindow(WindowRequest),
    SetWindowBounds { window: SurfaceId, bounds: ScreenRect },
    CloseSurface { surface: SurfaceId },
    FocusSurface { surface: SurfaceId },
    DisplayBounds,
    OpenPage { page: HostPage },
    ApplyHeaderRules { rules: Vec<serde_json::Value> },
}

impl HostRequest {
    pub fn method(&self) -> &'static str {
        match self {
            HostRequest::OpenViewTab { .. } => "openViewTab",
            HostRequest::OpenWindow(_) => "openWindow",
            HostRequest::SetWindowBounds { .. } => "setWindowBounds",
            HostRequest::CloseSurface { .. } => "closeSurface",
            HostRequest::FocusSurface { .. } => "focusSurface",
            HostRequest::DisplayBounds => "displayBounds",
            HostRequest::OpenPage { .. } => "openPage",
            HostRequest::ApplyHeaderRules { .. } => "applyHeaderRules",
        }
    }
}

/// Correlation id of a message that failed to decode, if it has one.
pub fn peek_id(frame: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(frame).ok()?;
    value.get("id")?.as_str().map(str::to_string)
}
