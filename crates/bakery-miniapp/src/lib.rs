//! # Bakery Mini-App
//!
//! > **A storefront for a small bakery that runs inside a chat client.**
//!
//! Customers browse a catalog, look at a product, place an order for a chosen date and
//! write to the owner. The owner gets one extra screen that broadcasts a message to every
//! customer. Data comes from a remote HTTP backend; the chat client (the *host*) supplies
//! identity, theme colors and a back button.
//!
//! ## 🏗️ Architecture
//!
//! ### 1. One store, one writer
//! All shared state lives in [`state::AppState`], owned by a
//! [`session_actor::StateActor`]. Screens never hold a reference into it: they read
//! snapshots and send mutations through [`state::AppStore`].
//!
//! ### 2. One event loop
//! [`lifecycle::App`] owns the active screen. Host back presses and the results of remote
//! calls arrive as [`lifecycle::AppEvent`]s and are applied one at a time, so a screen
//! never sees a callback meant for the screen before it.
//!
//! ### 3. An optional host
//! [`bridge::Host`] is either present or absent. Outside the chat client every host call
//! is a no-op and the in-app controls are enough to navigate.
//!
//! ## 🗺️ Module Tour
//!
//! - [`config`] - admin id, backend URL and timeout, from the environment
//! - [`model`] - catalog, identity, order and message types
//! - [`api`] - the backend client and its transports
//! - [`bridge`] - the host capability, theme palette and back-button binder
//! - [`state`] - the shared store
//! - [`router`] - paths and routes
//! - [`screens`] - one controller per route
//! - [`lifecycle`] - the app runtime and terminal commands
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! BAKERY_API_URL=http://localhost:3000/api RUST_LOG=info cargo run -p bakery-miniapp
//! ```
//!
//! Type `help` at the prompt for the list of commands.
//!
//! ## 🧪 Testing
//!
//! [`bridge::mock::RecordingHost`] and [`api::mock::MockTransport`] let a test drive the
//! whole app without a chat client or a network.

pub mod api;
pub mod bridge;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod router;
pub mod screens;
pub mod state;
