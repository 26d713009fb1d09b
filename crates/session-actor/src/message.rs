//! # Generic Messages
//!
//! Request types exchanged between a [`StateClient`](crate::StateClient) and its
//! [`StateActor`](crate::StateActor).

use crate::error::FrameworkError;
use crate::state::SessionState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to the actor.
///
/// There are only two shapes of request: read the whole state, or apply one typed
/// mutation. Everything domain-specific lives in [`SessionState::Mutation`].
#[derive(Debug)]
pub enum StateRequest<S: SessionState> {
    Snapshot {
        respond_to: Response<S>,
    },
    Apply {
        mutation: S::Mutation,
        respond_to: Response<S::Outcome>,
    },
}
