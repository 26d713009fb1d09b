//! # State Actor
//!
//! The `StateActor` is the server half of the runtime. It owns the state value and the
//! receiving end of the request channel, and processes requests one at a time.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::SessionState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns a [`SessionState`] value.
///
/// **Concurrency Model**:
/// The state is only ever touched from inside [`StateActor::run`], which handles requests
/// sequentially. There is no `Mutex` around the state because nothing else can reach it.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StateActor::new(initial, buffer)` returns the actor and a client.
/// 2.  **Run**: spawn `actor.run()` on the runtime.
/// 3.  **Share**: clone the client into whatever needs the state.
///
/// The loop ends when every client has been dropped.
pub struct StateActor<S: SessionState> {
    receiver: mpsc::Receiver<StateRequest<S>>,
    state: S,
    revision: u64,
}

impl<S: SessionState> StateActor<S> {
    /// Creates a new `StateActor` around `initial` and its associated `StateClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: initial,
            revision: 0,
        };
        (actor, StateClient::new(sender))
    }

    /// Runs the event loop until the channel closes.
    pub async fn run(mut self) {
        // Extract just the type name (e.g., "AppState" instead of "bakery_miniapp::state::AppState")
        let state_type = std::any::type_name::<S>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        self.state.on_start();
        info!(state_type, "State actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Snapshot { respond_to } => {
                    debug!(state_type, revision = self.revision, "Snapshot");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StateRequest::Apply {
                    mutation,
                    respond_to,
                } => {
                    debug!(state_type, ?mutation, "Apply");
                    match self.state.apply(mutation) {
                        Ok(outcome) => {
                            self.revision += 1;
                            debug!(state_type, revision = self.revision, ?outcome, "Applied");
                            let _ = respond_to.send(Ok(outcome));
                        }
                        Err(e) => {
                            warn!(state_type, error = %e, "Mutation rejected");
                            let _ = respond_to.send(Err(FrameworkError::StateError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(state_type, revision = self.revision, "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Cart {
        items: Vec<String>,
        locked: bool,
    }

    #[derive(Debug)]
    enum CartMutation {
        Add(String),
        Lock,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("cart is locked")]
    struct CartLocked;

    impl SessionState for Cart {
        type Mutation = CartMutation;
        type Outcome = usize;
        type Error = CartLocked;

        fn apply(&mut self, mutation: CartMutation) -> Result<usize, CartLocked> {
            match mutation {
                CartMutation::Add(item) => {
                    if self.locked {
                        return Err(CartLocked);
                    }
                    self.items.push(item);
                }
                CartMutation::Lock => self.locked = true,
            }
            Ok(self.items.len())
        }
    }

    #[tokio::test]
    async fn test_mutations_apply_in_order() {
        let (actor, client) = StateActor::new(Cart::default(), 8);
        let handle = tokio::spawn(actor.run());

        assert_eq!(client.apply(CartMutation::Add("eclair".into())).await.unwrap(), 1);
        assert_eq!(client.apply(CartMutation::Add("tart".into())).await.unwrap(), 2);

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.items, vec!["eclair".to_string(), "tart".to_string()]);

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_rejected_mutation_leaves_state_untouched() {
        let (actor, client) = StateActor::new(Cart::default(), 8);
        tokio::spawn(actor.run());

        client.apply(CartMutation::Add("eclair".into())).await.unwrap();
        client.apply(CartMutation::Lock).await.unwrap();

        let result = client.apply(CartMutation::Add("tart".into())).await;
        assert!(matches!(result, Err(FrameworkError::StateError(_))));

        let snapshot = client.snapshot().await.unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert!(snapshot.locked);
    }

    #[tokio::test]
    async fn test_concurrent_writers_are_serialized() {
        let (actor, client) = StateActor::new(Cart::default(), 4);
        tokio::spawn(actor.run());

        let mut handles = vec![];
        for i in 0..20 {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                client.apply(CartMutation::Add(format!("item_{}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(client.snapshot().await.unwrap().items.len(), 20);
    }
}
