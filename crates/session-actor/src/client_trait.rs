//! # StateHandle Trait
//!
//! Common interface for domain-specific wrappers around a [`StateClient`]: implement
//! `inner` and `map_error`, and `snapshot`/`apply` come for free with the wrapper's own
//! error type.
use crate::{FrameworkError, SessionState, StateClient};
use async_trait::async_trait;

#[async_trait]
pub trait StateHandle<S: SessionState>: Send + Sync {
    /// The wrapper-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic client.
    fn inner(&self) -> &StateClient<S>;

    /// Map framework errors to the wrapper's error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a copy of the current state.
    #[tracing::instrument(skip(self))]
    async fn snapshot(&self) -> Result<S, Self::Error> {
        tracing::trace!("Sending request");
        self.inner().snapshot().await.map_err(Self::map_error)
    }

    /// Apply a mutation through the wrapper.
    #[tracing::instrument(skip(self))]
    async fn apply(&self, mutation: S::Mutation) -> Result<S::Outcome, Self::Error> {
        tracing::trace!("Sending request");
        self.inner().apply(mutation).await.map_err(Self::map_error)
    }
}
