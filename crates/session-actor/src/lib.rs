//! # Session Actor
//!
//! A small runtime for **session-lifetime state owned by a single task**.
//!
//! A client application usually has one blob of mutable state that every screen
//! reads and writes: who the user is, what was last fetched, what the user is
//! typing. This crate puts that blob behind an actor so that every mutation is
//! applied sequentially by exactly one owner, without locks and without a hidden
//! global.
//!
//! ## Architecture Overview
//!
//! 1. **State Layer** ([`SessionState`]) - your state type and the typed mutations it accepts
//! 2. **Runtime Layer** ([`StateActor`]) - the task that owns the state and applies mutations in order
//! 3. **Interface Layer** ([`StateClient`]) - a cheap, cloneable handle for reading snapshots and sending mutations
//!
//! Domain wrappers implement [`StateHandle`] to get `snapshot()` for free and
//! add their own typed setters on top.
//!
//! ```rust
//! use session_actor::{SessionState, StateActor};
//!
//! #[derive(Clone, Debug, Default)]
//! struct Counter { value: i64 }
//!
//! #[derive(Debug)]
//! enum CounterMutation { Add(i64), Reset }
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("counter error")]
//! struct CounterError;
//!
//! impl SessionState for Counter {
//!     type Mutation = CounterMutation;
//!     type Outcome = i64;
//!     type Error = CounterError;
//!
//!     fn apply(&mut self, mutation: CounterMutation) -> Result<i64, CounterError> {
//!         match mutation {
//!             CounterMutation::Add(n) => self.value += n,
//!             CounterMutation::Reset => self.value = 0,
//!         }
//!         Ok(self.value)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StateActor::new(Counter::default(), 16);
//!     let handle = tokio::spawn(actor.run());
//!
//!     assert_eq!(client.apply(CounterMutation::Add(2)).await.unwrap(), 2);
//!     assert_eq!(client.snapshot().await.unwrap().value, 2);
//!
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - One actor task per state value
//! - Mutations are applied **sequentially**: a read-modify-write inside
//!   [`SessionState::apply`] can never interleave with another mutation
//! - Readers receive a cloned snapshot, never a reference into the live state
//!
//! ## Testing
//!
//! The [`mock`] module provides a `MockClient` that answers requests from a queue
//! of expectations, so code built on a [`StateClient`] can be tested without
//! spawning the real actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;
pub mod tracing;

pub use actor::StateActor;
pub use client::StateClient;
pub use client_trait::StateHandle;
pub use error::FrameworkError;
pub use message::{Response, StateRequest};
pub use state::SessionState;
