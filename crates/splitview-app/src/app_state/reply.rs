use serde::Serialize;
use splitview_common::{ViewId, ViewState};
use splitview_framing::FrameVerdict;

/// What a successful command hands back to its sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Reply {
    Ack,
    View(ViewState),
    /// URLs left in a view after a panel was removed.
    Remaining(Vec<String>),
    Verdict(FrameVerdict),
    Created(ViewId),
}
