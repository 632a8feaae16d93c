//! A [`SurfaceHost`] that records every call and hands out fresh ids.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use splitview_common::{HostError, ScreenRect, SurfaceId, ViewId};

use super::{HostPage, SurfaceHost, WindowRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    OpenViewTab(ViewId),
    OpenWindow(WindowRequest),
    SetWindowBounds(SurfaceId, ScreenRect),
    Close(SurfaceId),
    Focus(SurfaceId),
    OpenPage(HostPage),
    HeaderRules(usize),
}

pub struct RecordingHost {
    calls: Mutex<Vec<HostCall>>,
    next_id: AtomicU64,
    display: ScreenRect,
    /// Windows that may still open before `open_window` starts failing.
    windows_left: AtomicUsize,
    fail_tabs: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(100),
            display: ScreenRect::new(0, 0, 1200, 800),
            windows_left: AtomicUsize::new(usize::MAX),
            fail_tabs: false,
        }
    }

    pub fn failing_after_windows(mut self, n: usize) -> Self {
        self.windows_left = AtomicUsize::new(n);
        self
    }

    pub fn failing_tabs(mut self) -> Self {
        self.fail_tabs = true;
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<SurfaceId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::Close(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn opened_windows(&self) -> Vec<WindowRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::OpenWindow(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn bounds_set(&self) -> Vec<(SurfaceId, ScreenRect)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                HostCall::SetWindowBounds(s, r) => Some((s, r)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn fresh(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl SurfaceHost for RecordingHost {
    async fn open_view_tab(&self, view_id: &ViewId) -> Result<SurfaceId, HostError> {
        self.record(HostCall::OpenViewTab(view_id.clone()));
        if self.fail_tabs {
            return Err(HostError::Rejected("tabs disabled".into()));
        }
        Ok(SurfaceId::Tab(self.fresh()))
    }

    async fn open_window(&self, request: WindowRequest) -> Result<SurfaceId, HostError> {
        self.record(HostCall::OpenWindow(request));
        let left = self.windows_left.load(Ordering::SeqCst);
        if left == 0 {
            return Err(HostError::Rejected("window limit".into()));
        }
        self.windows_left.store(left.saturating_sub(1), Ordering::SeqCst);
        Ok(SurfaceId::Window(self.fresh()))
    }

    async fn set_window_bounds(
        &self,
        window: SurfaceId,
        bounds: ScreenRect,
    ) -> Result<(), HostError> {
        self.record(HostCall::SetWindowBounds(window, bounds));
        Ok(())
    }

    async fn close_surface(&self, surface: SurfaceId) -> Result<(), HostError> {
        self.record(HostCall::Close(surface));
        Ok(())
    }

    async fn focus_surface(&self, surface: SurfaceId) -> Result<(), HostError> {
        self.record(HostCall::Focus(surface));
        Ok(())
    }

    async fn display_bounds(&self) -> Result<ScreenRect, HostError> {
        Ok(self.display)
    }

    async fn open_page(&self, page: HostPage) -> Result<(), HostError> {
        self.record(HostCall::OpenPage(page));
        Ok(())
    }

    async fn apply_header_rules(&self, rules: Vec<serde_json::Value>) -> Result<(), HostError> {
        self.record(HostCall::HeaderRules(rules.len()));
        Ok(())
    }
}
