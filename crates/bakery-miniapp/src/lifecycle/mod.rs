//! # App Lifecycle
//!
//! [`App`] is the conductor: it creates the store actor and the API client, bootstraps the
//! host, owns the active screen and the back-button binding, and runs the single event
//! loop every state change flows through.
//!
//! ## Navigation
//!
//! A transition always runs in this order:
//!
//! 1. release the back affordance held by the old screen
//! 2. `exit` the old screen and drop it
//! 3. build and `enter` the new screen
//! 4. bind the back affordance to the new screen, if it has a parent
//!
//! Because all four steps run on the event loop, no host callback can observe the old
//! screen's binding after the new screen has started.
//!
//! ## Remote calls
//!
//! Screens never await the network on the loop. They spawn the call; its result comes back
//! as an [`AppEvent::Completed`] tagged with the screen instance that started it. Results
//! for an instance that is no longer on screen are dropped.
//!
//! ## Shutdown
//!
//! [`App::shutdown`] releases the back affordance, drops every store handle and awaits the
//! store actor, which stops once its channel closes.

pub mod app;
pub mod command;
pub mod error;
pub mod event;

pub use app::*;
pub use command::*;
pub use error::*;
pub use event::*;
