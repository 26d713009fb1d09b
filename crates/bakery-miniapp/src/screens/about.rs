use crate::router::Route;
use crate::screens::view::AboutView;
use crate::screens::{Screen, ScreenContext, Transition, UiAction, View};
use crate::state::{AppState, StoreError};
use async_trait::async_trait;

pub struct AboutScreen;

#[async_trait]
impl Screen for AboutScreen {
    fn route(&self) -> Route {
        Route::About
    }

    async fn enter(&mut self, _ctx: &ScreenContext) -> Result<(), StoreError> {
        Ok(())
    }

    async fn handle(
        &mut self,
        action: UiAction,
        _ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        Ok(match action {
            UiAction::GoHome => Transition::Navigate(Route::Home),
            UiAction::ContinueShopping => Transition::Navigate(Route::Catalog),
            _ => Transition::Stay,
        })
    }

    fn back_target(&self, _state: &AppState) -> Option<Route> {
        Some(Route::Home)
    }

    fn view(&self, _state: &AppState) -> View {
        View::About(AboutView {
            title: "About us",
            paragraphs: vec![
                "A small family bakery baking cakes, pies and pastries to order.",
                "Everything is made from natural ingredients on the day you pick it up.",
                "Choose a product in the catalog, pick a date and we will have it ready.",
            ],
        })
    }
}
