//! Resolving every URL of a prospective view at once.

use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::probe::ProbeError;
use crate::resolver::FrameResolver;
use crate::verdict::FrameVerdict;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessMode {
    /// Stop at the first blocked URL. Enough to decide "go windowed".
    StopOnBlock,
    /// Resolve every URL. Needed when each panel is annotated.
    Complete,
}

/// Verdicts in URL order. `None` marks URLs left unresolved by a
/// short-circuit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assessment {
    pub verdicts: Vec<Option<FrameVerdict>>,
}

impl Assessment {
    /// An assessment in which nothing was probed.
    pub fn unprobed(len: usize) -> Self {
        Self {
            verdicts: vec![None; len],
        }
    }

    pub fn any_blocked(&self) -> bool {
        self.blocked().next().is_some()
    }

    /// Index and verdict of every blocked URL.
    pub fn blocked(&self) -> impl Iterator<Item = (usize, &FrameVerdict)> {
        self.verdicts
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.as_ref().filter(|v| v.is_blocked()).map(|v| (i, v)))
    }

    pub fn verdict(&self, index: usize) -> Option<&FrameVerdict> {
        self.verdicts.get(index).and_then(Option::as_ref)
    }
}

/// Resolve `urls` concurrently, each bounded by the resolver's timeout.
///
/// Returns [`ProbeError::Cancelled`] if `cancel` fires first. Nothing is
/// applied anywhere; the caller decides what the verdicts mean.
pub async fn assess(
    resolver: &FrameResolver,
    urls: &[String],
    mode: AssessMode,
    cancel: &CancellationToken,
) -> Result<Assessment, ProbeError> {
    let mut assessment = Assessment::unprobed(urls.len());

    let mut pending: FuturesUnordered<_> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| async move { (i, resolver.resolve(url).await) })
        .collect();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("assessment cancelled");
                return Err(ProbeError::Cancelled);
            }
            next = pending.next() => {
                let Some((index, verdict)) = next else { break };
                let blocked = verdict.is_blocked();
                assessment.verdicts[index] = Some(verdict);
                if blocked && mode == AssessMode::StopOnBlock {
                    debug!(index, "short-circuit on blocked url");
                    break;
                }
            }
        }
    }

    Ok(assessment)
}
