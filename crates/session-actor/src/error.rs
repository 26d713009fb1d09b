//! # Framework Errors
//!
//! Common error type for talking to a [`StateActor`](crate::StateActor).

/// Errors that can occur between a client and its state actor.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("State actor closed")]
    ActorClosed,
    #[error("State actor dropped response channel")]
    ActorDropped,
    #[error("Mutation rejected: {0}")]
    StateError(Box<dyn std::error::Error + Send + Sync>),
}
