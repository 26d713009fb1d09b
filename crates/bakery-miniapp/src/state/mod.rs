//! # Shared Application State
//!
//! The session-lifetime store every screen reads and writes: identity and admin flag,
//! loading/error flags, the catalog collections, selection cursors, search state and the
//! draft order.
//!
//! ## Structure
//!
//! - [`app_state`] - [`AppState`] and its [`SessionState`](session_actor::SessionState) impl
//! - [`mutation`] - [`StateMutation`], [`MutationOutcome`] and the request tickets
//! - [`error`] - [`StoreError`]
//! - [`store`] - [`AppStore`], the handle screens hold
//!
//! ## Late responses
//!
//! Slots fed by remote reads (categories, products, selected product, search results) are
//! guarded by tickets. A screen calls [`AppStore::begin`] before the read and
//! [`AppStore::commit`] with the result; the commit only lands if no newer request or
//! direct write has touched the slot in the meantime.
//!
//! ```rust
//! use bakery_miniapp::state::{self, AppStore, Slot};
//! use session_actor::StateHandle;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = state::new();
//!     tokio::spawn(actor.run());
//!     let store = AppStore::new(client);
//!
//!     let slow = store.begin(Slot::Products).await.unwrap();
//!     let fast = store.begin(Slot::Products).await.unwrap();
//!
//!     assert!(store.commit_products(fast, vec![]).await.unwrap());
//!     assert!(!store.commit_products(slow, vec![]).await.unwrap());
//!     assert!(store.snapshot().await.unwrap().products.is_empty());
//! }
//! ```

pub mod app_state;
pub mod error;
pub mod mutation;
pub mod store;

pub use app_state::*;
pub use error::*;
pub use mutation::*;
pub use store::*;

use session_actor::{StateActor, StateClient};

/// Creates the store actor and its client.
pub fn new() -> (StateActor<AppState>, StateClient<AppState>) {
    StateActor::new(AppState::default(), 64)
}
