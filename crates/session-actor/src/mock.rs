//! # Mock Framework
//!
//! `MockClient<S>` hands out a real [`StateClient`] whose requests are answered from a
//! queue of expectations instead of a running [`StateActor`](crate::StateActor). Use it to
//! test code that sits *around* a client, e.g. how a screen reacts when the store refuses a
//! mutation.
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None (scripted answers) | Real state |
//! | **Use Case** | Logic around the client | The state type itself, full flows |
//! | **Error Injection** | Easy (`return_err`) | Requires driving the state into a failing shape |
//!
//! ```rust
//! use session_actor::mock::MockClient;
//! use session_actor::{FrameworkError, SessionState};
//!
//! #[derive(Clone, Debug, Default)] struct Flags { dark: bool }
//! #[derive(Debug)] enum FlagMutation { SetDark(bool) }
//! #[derive(Debug, thiserror::Error)] #[error("flags")] struct FlagError;
//!
//! impl SessionState for Flags {
//!     type Mutation = FlagMutation; type Outcome = (); type Error = FlagError;
//!     fn apply(&mut self, m: FlagMutation) -> Result<(), FlagError> {
//!         match m { FlagMutation::SetDark(v) => self.dark = v }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Flags>::new();
//!     mock.expect_snapshot().return_ok(Flags { dark: true });
//!     mock.expect_apply().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(client.snapshot().await.unwrap().dark);
//!     assert!(client.apply(FlagMutation::SetDark(false)).await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! The lower-level [`create_mock_client`] returns the raw receiver so a test can inspect
//! each request (including the mutation payload) before answering it.

use crate::client::StateClient;
use crate::error::FrameworkError;
use crate::message::StateRequest;
use crate::state::SessionState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<S: SessionState> {
    Snapshot {
        response: Result<S, FrameworkError>,
    },
    Apply {
        response: Result<S::Outcome, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<S: SessionState> {
    client: StateClient<S>,
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
    applied: Arc<Mutex<Vec<S::Mutation>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: SessionState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SessionState> MockClient<S> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<S>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let applied = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let applied_clone = applied.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StateRequest::Snapshot { respond_to },
                        Some(Expectation::Snapshot { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StateRequest::Apply {
                            mutation,
                            respond_to,
                        },
                        Some(Expectation::Apply { response }),
                    ) => {
                        applied_clone.lock().unwrap().push(mutation);
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            expectations,
            applied,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<S> {
        self.client.clone()
    }

    /// Expects a `snapshot` request.
    pub fn expect_snapshot(&mut self) -> SnapshotExpectationBuilder<S> {
        SnapshotExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `apply` request.
    pub fn expect_apply(&mut self) -> ApplyExpectationBuilder<S> {
        ApplyExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Number of mutations received so far.
    pub fn applied_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `snapshot` expectations.
pub struct SnapshotExpectationBuilder<S: SessionState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: SessionState> SnapshotExpectationBuilder<S> {
    pub fn return_ok(self, state: S) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Snapshot {
                response: Err(error),
            });
    }
}

/// Builder for `apply` expectations.
pub struct ApplyExpectationBuilder<S: SessionState> {
    expectations: Arc<Mutex<VecDeque<Expectation<S>>>>,
}

impl<S: SessionState> ApplyExpectationBuilder<S> {
    pub fn return_ok(self, outcome: S::Outcome) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply {
                response: Ok(outcome),
            });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Apply {
                response: Err(error),
            });
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: pull each request with [`expect_apply`] or
/// [`expect_snapshot`], assert on it, then answer through the returned sender.
pub fn create_mock_client<S: SessionState>(
    buffer_size: usize,
) -> (StateClient<S>, mpsc::Receiver<StateRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Apply request
pub async fn expect_apply<S: SessionState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(
    S::Mutation,
    oneshot::Sender<Result<S::Outcome, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StateRequest::Apply {
            mutation,
            respond_to,
        }) => Some((mutation, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Snapshot request
pub async fn expect_snapshot<S: SessionState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<oneshot::Sender<Result<S, FrameworkError>>> {
    match receiver.recv().await {
        Some(StateRequest::Snapshot { respond_to }) => Some(respond_to),
        _ => None,
    }
}
