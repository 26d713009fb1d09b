//! # Generic Client
//!
//! The cloneable handle used to talk to a [`StateActor`](crate::StateActor).

use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::SessionState;
use tokio::sync::{mpsc, oneshot};

/// ## StateClient
///
/// Forwards snapshot and mutation requests over a Tokio mpsc channel and waits for the
/// answer on a oneshot channel. It holds only a sender, so cloning is cheap and every
/// screen can keep its own copy.
pub struct StateClient<S: SessionState> {
    sender: mpsc::Sender<StateRequest<S>>,
}

// Manual impl: `S` itself does not need to be `Clone` for the handle to be.
impl<S: SessionState> Clone for StateClient<S> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<S: SessionState> StateClient<S> {
    pub fn new(sender: mpsc::Sender<StateRequest<S>>) -> Self {
        Self { sender }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> Result<S, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Snapshot { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    /// Applies one mutation and returns its outcome.
    pub async fn apply(&self, mutation: S::Mutation) -> Result<S::Outcome, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StateRequest::Apply {
                mutation,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}
