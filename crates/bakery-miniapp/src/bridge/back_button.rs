//! # Back Button Binding
//!
//! The host shows one back affordance for the whole app. Each screen, while it is on top,
//! owns it: the affordance is visible and a press navigates to that screen's parent.
//!
//! [`BackButton`] holds at most one live binding. [`BackButton::bind`] always tears down
//! the previous binding (hide + unregister) before registering the next one, so two
//! screens can never own the affordance at once. Every binding carries a [`BindingId`];
//! a press is delivered together with the id of the binding that produced it and
//! [`BackButton::is_current`] tells the event loop whether that binding is still live.
//! A press queued just before a transition is therefore ignored by the next screen.

use crate::bridge::host::{HandlerId, Host};
use std::sync::Arc;
use tracing::debug;

/// Identifies one bind/release cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(pub u64);

/// Delivers a press to whoever owns the event loop.
pub type PressSink = Arc<dyn Fn(BindingId) + Send + Sync>;

#[derive(Debug)]
struct LiveBinding {
    id: BindingId,
    handler: Option<HandlerId>,
}

pub struct BackButton {
    host: Host,
    sink: PressSink,
    next_id: u64,
    live: Option<LiveBinding>,
}

impl BackButton {
    pub fn new(host: Host, sink: PressSink) -> Self {
        Self {
            host,
            sink,
            next_id: 0,
            live: None,
        }
    }

    /// Hands the affordance to a new owner.
    pub fn bind(&mut self) -> BindingId {
        self.release();

        self.next_id += 1;
        let id = BindingId(self.next_id);
        let sink = self.sink.clone();
        let handler = self.host.on_back_click(Box::new(move || sink(id)));
        self.host.show_back_button();

        debug!(binding = id.0, "Back button bound");
        self.live = Some(LiveBinding { id, handler });
        id
    }

    /// Hides the affordance and drops the live handler, if any.
    pub fn release(&mut self) {
        if let Some(binding) = self.live.take() {
            if let Some(handler) = binding.handler {
                self.host.off_back_click(handler);
            }
            self.host.hide_back_button();
            debug!(binding = binding.id.0, "Back button released");
        }
    }

    pub fn is_current(&self, id: BindingId) -> bool {
        self.live.as_ref().is_some_and(|binding| binding.id == id)
    }

    pub fn is_bound(&self) -> bool {
        self.live.is_some()
    }
}

impl Drop for BackButton {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::mock::{HostCall, RecordingHost};
    use std::sync::Mutex;

    fn recording_binder() -> (Arc<RecordingHost>, BackButton, Arc<Mutex<Vec<BindingId>>>) {
        let recording = Arc::new(RecordingHost::new());
        let presses = Arc::new(Mutex::new(Vec::new()));
        let sink_presses = presses.clone();
        let binder = BackButton::new(
            Host::present(recording.clone()),
            Arc::new(move |id| sink_presses.lock().unwrap().push(id)),
        );
        (recording, binder, presses)
    }

    #[test]
    fn test_single_live_handler_across_rebinds() {
        let (recording, mut binder, presses) = recording_binder();

        let first = binder.bind();
        let second = binder.bind();
        let third = binder.bind();

        assert_eq!(recording.live_handlers(), 1);
        assert!(recording.back_visible());
        assert!(!binder.is_current(first));
        assert!(!binder.is_current(second));
        assert!(binder.is_current(third));

        recording.press_back();
        assert_eq!(*presses.lock().unwrap(), vec![third]);
    }

    #[test]
    fn test_release_hides_and_unregisters() {
        let (recording, mut binder, presses) = recording_binder();

        let id = binder.bind();
        binder.release();

        assert!(!recording.back_visible());
        assert_eq!(recording.live_handlers(), 0);
        assert!(!binder.is_current(id));
        assert_eq!(recording.press_back(), 0);
        assert!(presses.lock().unwrap().is_empty());

        // Releasing twice is harmless.
        binder.release();
        assert_eq!(
            recording
                .calls()
                .iter()
                .filter(|c| **c == HostCall::HideBack)
                .count(),
            1
        );
    }

    #[test]
    fn test_teardown_precedes_setup() {
        let (recording, mut binder, _) = recording_binder();

        binder.bind();
        binder.bind();

        let calls = recording.calls();
        let off = calls
            .iter()
            .position(|c| matches!(c, HostCall::OffBackClick(_)))
            .unwrap();
        let second_on = calls
            .iter()
            .rposition(|c| matches!(c, HostCall::OnBackClick(_)))
            .unwrap();
        assert!(off < second_on);
    }

    #[test]
    fn test_drop_releases() {
        let (recording, mut binder, _) = recording_binder();
        binder.bind();
        drop(binder);

        assert!(!recording.back_visible());
        assert_eq!(recording.live_handlers(), 0);
    }

    #[test]
    fn test_absent_host_still_tracks_ownership() {
        let mut binder = BackButton::new(Host::Absent, Arc::new(|_| {}));
        let id = binder.bind();

        assert!(binder.is_current(id));
        binder.release();
        assert!(!binder.is_bound());
    }
}
