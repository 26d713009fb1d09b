//! # Recording Host
//!
//! An in-memory [`HostBridge`] for tests. It records every lifecycle and back-button call,
//! keeps track of the affordance's visibility and the handlers currently registered, and
//! can simulate the user pressing back or the viewport collapsing.
//!
//! ```rust
//! use bakery_miniapp::bridge::mock::RecordingHost;
//! use bakery_miniapp::bridge::Host;
//! use std::sync::Arc;
//!
//! let recording = Arc::new(RecordingHost::new().with_init_data("query_id=1"));
//! let host = Host::present(recording.clone());
//! host.bootstrap();
//! assert_eq!(host.init_data().as_deref(), Some("query_id=1"));
//! ```

use crate::bridge::host::{BackHandler, HandlerId, HostBridge, ViewportHandler};
use crate::bridge::theme::ThemeParams;
use crate::model::HostUser;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// A call the app made on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Ready,
    Expand,
    Close,
    ShowBack,
    HideBack,
    HideMain,
    OnBackClick(HandlerId),
    OffBackClick(HandlerId),
}

type SharedHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Recorded {
    calls: Vec<HostCall>,
    back_visible: bool,
    expanded: bool,
    next_handler: u64,
    back_handlers: BTreeMap<u64, SharedHandler>,
    viewport_handlers: Vec<SharedHandler>,
}

#[derive(Default)]
pub struct RecordingHost {
    user: Option<HostUser>,
    init_data: Option<String>,
    theme: ThemeParams,
    recorded: Mutex<Recorded>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: HostUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_init_data(mut self, raw: impl Into<String>) -> Self {
        self.init_data = Some(raw.into());
        self
    }

    pub fn with_theme(mut self, theme: ThemeParams) -> Self {
        self.theme = theme;
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.recorded.lock().unwrap().calls.clone()
    }

    pub fn back_visible(&self) -> bool {
        self.recorded.lock().unwrap().back_visible
    }

    pub fn live_handlers(&self) -> usize {
        self.recorded.lock().unwrap().back_handlers.len()
    }

    /// Invokes every registered back handler and returns how many ran.
    pub fn press_back(&self) -> usize {
        // Handlers run outside the lock so they may call back into the host.
        let handlers: Vec<SharedHandler> = self
            .recorded
            .lock()
            .unwrap()
            .back_handlers
            .values()
            .cloned()
            .collect();
        for handler in &handlers {
            handler();
        }
        handlers.len()
    }

    /// Marks the viewport as no longer expanded and fires the viewport handlers.
    pub fn collapse_viewport(&self) {
        let handlers = {
            let mut recorded = self.recorded.lock().unwrap();
            recorded.expanded = false;
            recorded.viewport_handlers.clone()
        };
        for handler in &handlers {
            handler();
        }
    }

    fn record(&self, call: HostCall) {
        self.recorded.lock().unwrap().calls.push(call);
    }
}

impl HostBridge for RecordingHost {
    fn ready(&self) {
        self.record(HostCall::Ready);
    }

    fn expand(&self) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.expanded = true;
        recorded.calls.push(HostCall::Expand);
    }

    fn close(&self) {
        self.record(HostCall::Close);
    }

    fn is_expanded(&self) -> bool {
        self.recorded.lock().unwrap().expanded
    }

    fn init_data(&self) -> Option<String> {
        self.init_data.clone()
    }

    fn init_data_user(&self) -> Option<HostUser> {
        self.user.clone()
    }

    fn theme_params(&self) -> ThemeParams {
        self.theme.clone()
    }

    fn show_back_button(&self) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.back_visible = true;
        recorded.calls.push(HostCall::ShowBack);
    }

    fn hide_back_button(&self) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.back_visible = false;
        recorded.calls.push(HostCall::HideBack);
    }

    fn on_back_click(&self, handler: BackHandler) -> HandlerId {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.next_handler += 1;
        let id = HandlerId(recorded.next_handler);
        recorded.back_handlers.insert(id.0, Arc::from(handler));
        recorded.calls.push(HostCall::OnBackClick(id));
        id
    }

    fn off_back_click(&self, id: HandlerId) {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.back_handlers.remove(&id.0);
        recorded.calls.push(HostCall::OffBackClick(id));
    }

    fn hide_main_button(&self) {
        self.record(HostCall::HideMain);
    }

    fn on_viewport_changed(&self, handler: ViewportHandler) {
        self.recorded
            .lock()
            .unwrap()
            .viewport_handlers
            .push(Arc::from(handler));
    }
}
