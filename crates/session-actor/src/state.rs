//! # SessionState Trait
//!
//! The `SessionState` trait is the contract a state value must satisfy to be owned by a
//! [`StateActor`](crate::StateActor). It names the mutation type the state accepts, the
//! outcome a mutation reports back and the error a rejected mutation produces.
//!
//! # Architecture Note
//! All writes go through [`SessionState::apply`]. Because the actor calls it from a single
//! task, `apply` may read and then write any field without guarding against concurrent
//! writers. Merge semantics, idempotence and stale-write checks all belong here.

use std::fmt::Debug;

/// State owned by a [`StateActor`](crate::StateActor).
pub trait SessionState: Clone + Send + Sync + 'static {
    /// Typed description of a single change (e.g. `SetCategories(..)`).
    type Mutation: Send + Sync + Debug + 'static;

    /// What a successful mutation reports back to the caller.
    type Outcome: Send + Sync + Debug + 'static;

    /// Error returned when a mutation is rejected.
    ///
    /// A rejected mutation must leave the state untouched.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Apply one mutation.
    fn apply(&mut self, mutation: Self::Mutation) -> Result<Self::Outcome, Self::Error>;

    /// Called once when the actor loop starts, before any request is served.
    fn on_start(&mut self) {}
}
