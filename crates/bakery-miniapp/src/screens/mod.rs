//! # Screen Controllers
//!
//! One controller per route. A controller is created when its route is entered and
//! dropped when the app navigates away; everything that must outlive it lives in the
//! shared store.
//!
//! ## Lifecycle
//!
//! 1. [`Screen::enter`] - start the reads the screen needs (via [`ScreenContext::spawn`])
//! 2. [`Screen::handle`] - react to user input, possibly starting a write
//! 3. [`Screen::complete`] - apply the result of a remote call this instance started
//! 4. [`Screen::exit`] - last chance to clean up shared state before the next screen
//!
//! The back affordance is bound by the app, not by the screen: a screen only says whether
//! it has a parent ([`Screen::has_back`]) and where that parent is
//! ([`Screen::back_target`]), resolved when the press happens.

pub mod about;
pub mod broadcast;
pub mod catalog;
pub mod context;
pub mod home;
pub mod message_admin;
pub mod order_form;
pub mod product_detail;
pub mod submission;
pub mod view;

pub use context::{Completion, ScreenContext, ScreenInstance, Tasks};
pub use submission::{Submission, SubmissionStatus};
pub use view::*;

use crate::model::{CategoryId, OrderPatch, ProductId};
use crate::router::Route;
use crate::state::{AppState, StoreError};
use async_trait::async_trait;

/// User input, delivered to whichever screen is active. Screens ignore what does not
/// apply to them.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    OpenCategory(CategoryId),
    OpenProduct(ProductId),
    EditSearch(String),
    SubmitSearch,
    ClearSearch,
    NextImage,
    PreviousImage,
    StartOrder,
    EditOrder(OrderPatch),
    EditMessage(String),
    Submit,
    Cancel,
    SendAnother,
    GoHome,
    ContinueShopping,
}

/// What the app should do after a screen callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Navigate(Route),
}

#[async_trait]
pub trait Screen: Send + Sync {
    fn route(&self) -> Route;

    /// Whether the back affordance is shown while this screen is active.
    fn has_back(&self) -> bool {
        true
    }

    async fn enter(&mut self, ctx: &ScreenContext) -> Result<(), StoreError>;

    async fn handle(
        &mut self,
        action: UiAction,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError>;

    async fn complete(
        &mut self,
        _completion: Completion,
        _ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        Ok(Transition::Stay)
    }

    async fn exit(&mut self, _next: &Route, _ctx: &ScreenContext) -> Result<(), StoreError> {
        Ok(())
    }

    /// The logical parent, resolved against the current state.
    fn back_target(&self, state: &AppState) -> Option<Route>;

    fn view(&self, state: &AppState) -> View;
}

/// Creates the controller for `route`. `notice` is shown on the home screen.
pub fn build(route: &Route, notice: Option<String>) -> Box<dyn Screen> {
    match route {
        Route::Home => Box::new(home::HomeScreen::new(notice)),
        Route::About => Box::new(about::AboutScreen),
        Route::Catalog => Box::new(catalog::CatalogScreen::new(None)),
        Route::Category(id) => Box::new(catalog::CatalogScreen::new(Some(id.clone()))),
        Route::Product(id) => Box::new(product_detail::ProductDetailScreen::new(id.clone())),
        Route::MessageAdmin => Box::new(message_admin::MessageAdminScreen::default()),
        Route::Order(id) => Box::new(order_form::OrderFormScreen::new(id.clone())),
        Route::Broadcast => Box::new(broadcast::BroadcastScreen::default()),
    }
}
