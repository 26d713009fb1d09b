//! Events delivered to the app's single event loop.
use crate::bridge::BindingId;
use crate::screens::{Completion, ScreenInstance};

#[derive(Debug)]
pub enum AppEvent {
    /// The host back affordance was pressed while `BindingId` owned it.
    BackPressed(BindingId),
    /// A remote call started by `instance` finished.
    Completed {
        instance: ScreenInstance,
        completion: Completion,
    },
}
