//! Plain data carried between the backend, the store and the screens.

pub mod catalog;
pub mod identity;
pub mod message;
pub mod order;

pub use catalog::*;
pub use identity::*;
pub use message::*;
pub use order::*;
