//! The host capability surface and its optional wrapper.
use crate::bridge::theme::{ThemePalette, ThemeParams};
use crate::model::{HostUser, Identity};
use std::sync::{Arc, Weak};
use tracing::{debug, info};

/// Callback fired when the user presses the host back affordance.
pub type BackHandler = Box<dyn Fn() + Send + Sync>;

/// Callback fired when the host viewport changes size.
pub type ViewportHandler = Box<dyn Fn() + Send + Sync>;

/// Registration handle returned by [`HostBridge::on_back_click`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(pub u64);

/// What the embedding chat client offers.
///
/// Implementations are driven from the app's single event loop; they only need to be
/// `Send + Sync` so the callbacks they store can post events back into it.
pub trait HostBridge: Send + Sync {
    fn ready(&self);
    fn expand(&self);
    fn close(&self);
    fn is_expanded(&self) -> bool;

    /// Raw, opaque init-data string forwarded to the backend as a credential.
    fn init_data(&self) -> Option<String>;
    /// The user record the host injected, if any.
    fn init_data_user(&self) -> Option<HostUser>;
    fn theme_params(&self) -> ThemeParams;

    fn show_back_button(&self);
    fn hide_back_button(&self);
    fn on_back_click(&self, handler: BackHandler) -> HandlerId;
    fn off_back_click(&self, id: HandlerId);

    fn hide_main_button(&self);
    fn on_viewport_changed(&self, handler: ViewportHandler);
}

/// The bridge if the app runs inside its host, or nothing.
#[derive(Clone, Default)]
pub enum Host {
    Present(Arc<dyn HostBridge>),
    #[default]
    Absent,
}

impl std::fmt::Debug for Host {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Host::Present(_) => f.write_str("Host::Present"),
            Host::Absent => f.write_str("Host::Absent"),
        }
    }
}

impl Host {
    pub fn present(bridge: Arc<dyn HostBridge>) -> Self {
        Host::Present(bridge)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Host::Present(_))
    }

    /// Startup handshake: signal readiness, take the full viewport, hide both affordances
    /// and close the app when the viewport collapses while not expanded.
    ///
    /// Returns the palette to apply, which is the default palette without a host.
    pub fn bootstrap(&self) -> ThemePalette {
        let Host::Present(bridge) = self else {
            debug!("No host bridge, running standalone");
            return ThemePalette::default();
        };

        bridge.ready();
        bridge.expand();
        bridge.hide_back_button();
        bridge.hide_main_button();

        let weak: Weak<dyn HostBridge> = Arc::downgrade(bridge);
        bridge.on_viewport_changed(Box::new(move || {
            if let Some(bridge) = weak.upgrade() {
                if !bridge.is_expanded() {
                    info!("Viewport collapsed, closing");
                    bridge.close();
                }
            }
        }));

        let palette = ThemePalette::from(&bridge.theme_params());
        info!(bg = %palette.bg_color, "Host bridge ready");
        palette
    }

    /// Identity derived from the host's user record.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Host::Present(bridge) => bridge.init_data_user().map(Identity::from),
            Host::Absent => None,
        }
    }

    pub fn init_data(&self) -> Option<String> {
        match self {
            Host::Present(bridge) => bridge.init_data().filter(|raw| !raw.is_empty()),
            Host::Absent => None,
        }
    }

    pub fn show_back_button(&self) {
        if let Host::Present(bridge) = self {
            bridge.show_back_button();
        }
    }

    pub fn hide_back_button(&self) {
        if let Host::Present(bridge) = self {
            bridge.hide_back_button();
        }
    }

    pub fn on_back_click(&self, handler: BackHandler) -> Option<HandlerId> {
        match self {
            Host::Present(bridge) => Some(bridge.on_back_click(handler)),
            Host::Absent => None,
        }
    }

    pub fn off_back_click(&self, id: HandlerId) {
        if let Host::Present(bridge) = self {
            bridge.off_back_click(id);
        }
    }
}
