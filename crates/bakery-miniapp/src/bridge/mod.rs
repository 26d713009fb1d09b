//! # Host Bridge
//!
//! Everything the app needs from the chat client that embeds it: lifecycle signals, the
//! back affordance, theme colors and the user's identity.
//!
//! The bridge is an optional capability. [`Host`] is checked once at the boundary and every
//! consumer calls its methods unconditionally; under [`Host::Absent`] they do nothing, so
//! the app stays fully navigable through its own controls when run outside the host.

pub mod back_button;
pub mod host;
pub mod mock;
pub mod theme;

pub use back_button::{BackButton, BindingId};
pub use host::{BackHandler, HandlerId, Host, HostBridge, ViewportHandler};
pub use theme::{ThemeParams, ThemePalette};
