//! What a screen gets to work with: the shared store, the API client and a way to run
//! remote calls without blocking the event loop.
use crate::api::{ApiClient, ApiError};
use crate::lifecycle::AppEvent;
use crate::model::{BroadcastReport, Category, Product};
use crate::state::AppStore;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Identifies one visit to a screen. Navigating to the same route again is a new instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenInstance(pub u64);

/// The result of a remote call, delivered back to the screen that started it.
#[derive(Debug)]
pub enum Completion {
    Categories(Result<Vec<Category>, ApiError>),
    Products(Result<Vec<Product>, ApiError>),
    Product(Result<Product, ApiError>),
    SearchResults(Result<Vec<Product>, ApiError>),
    OrderSubmitted(Result<(), ApiError>),
    MessageSent(Result<(), ApiError>),
    BroadcastSent(Result<BroadcastReport, ApiError>),
}

/// Runs remote calls for one screen instance.
///
/// Each spawned call posts exactly one [`AppEvent::Completed`] tagged with the instance.
#[derive(Clone)]
pub struct Tasks {
    instance: ScreenInstance,
    events: mpsc::UnboundedSender<AppEvent>,
    in_flight: Arc<AtomicUsize>,
}

impl Tasks {
    pub fn new(
        instance: ScreenInstance,
        events: mpsc::UnboundedSender<AppEvent>,
        in_flight: Arc<AtomicUsize>,
    ) -> Self {
        Self {
            instance,
            events,
            in_flight,
        }
    }

    pub fn spawn<F>(&self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let instance = self.instance;
        let events = self.events.clone();
        let in_flight = self.in_flight.clone();
        in_flight.fetch_add(1, Ordering::SeqCst);

        tokio::spawn(async move {
            let completion = work.await;
            if events
                .send(AppEvent::Completed {
                    instance,
                    completion,
                })
                .is_err()
            {
                // Nobody is left to account for it.
                in_flight.fetch_sub(1, Ordering::SeqCst);
                debug!(instance = instance.0, "Event loop gone, completion dropped");
            }
        });
    }
}

/// Passed by reference into every screen callback.
#[derive(Clone)]
pub struct ScreenContext {
    pub store: AppStore,
    pub api: ApiClient,
    tasks: Tasks,
}

impl ScreenContext {
    pub fn new(store: AppStore, api: ApiClient, tasks: Tasks) -> Self {
        Self { store, api, tasks }
    }

    pub fn instance(&self) -> ScreenInstance {
        self.tasks.instance
    }

    pub fn spawn<F>(&self, work: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        self.tasks.spawn(work);
    }
}
