use crate::model::{Product, ProductId};
use crate::router::Route;
use crate::screens::view::ProductView;
use crate::screens::{Completion, Screen, ScreenContext, Transition, UiAction, View};
use crate::state::{AppState, Slot, StoreError, Ticket};
use async_trait::async_trait;
use session_actor::StateHandle;
use tracing::{debug, warn};

/// `/product/{id}`: one product with an image carousel and the way into the order form.
pub struct ProductDetailScreen {
    id: ProductId,
    ticket: Option<Ticket>,
    loading: bool,
    error: Option<String>,
    image_index: usize,
}

impl ProductDetailScreen {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            ticket: None,
            loading: false,
            error: None,
            image_index: 0,
        }
    }

    fn product<'a>(&self, state: &'a AppState) -> Option<&'a Product> {
        state.selected_product.as_ref().filter(|p| p.id == self.id)
    }
}

#[async_trait]
impl Screen for ProductDetailScreen {
    fn route(&self) -> Route {
        Route::Product(self.id.clone())
    }

    async fn enter(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        let state = ctx.store.snapshot().await?;
        if let Some(product) = self.product(&state) {
            debug!(product = %product.id, "Already selected");
            return Ok(());
        }
        if let Some(product) = state.find_product(&self.id).cloned() {
            ctx.store.select_product(Some(product)).await?;
            return Ok(());
        }

        ctx.store.select_product(None).await?;
        self.ticket = Some(ctx.store.begin(Slot::SelectedProduct).await?);
        self.loading = true;
        let api = ctx.api.clone();
        let id = self.id.clone();
        ctx.spawn(async move { Completion::Product(api.get_product_by_id(&id).await) });
        Ok(())
    }

    async fn handle(
        &mut self,
        action: UiAction,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        match action {
            UiAction::NextImage | UiAction::PreviousImage => {
                let state = ctx.store.snapshot().await?;
                let count = self.product(&state).map_or(0, |p| p.images.len());
                if count > 0 {
                    self.image_index = if action == UiAction::NextImage {
                        (self.image_index + 1) % count
                    } else {
                        (self.image_index + count - 1) % count
                    };
                }
                Ok(Transition::Stay)
            }
            UiAction::StartOrder => {
                let state = ctx.store.snapshot().await?;
                match self.product(&state) {
                    Some(product) if product.is_available => {
                        Ok(Transition::Navigate(Route::Order(self.id.clone())))
                    }
                    _ => {
                        debug!(product = %self.id, "Ordering not offered");
                        Ok(Transition::Stay)
                    }
                }
            }
            UiAction::GoHome => Ok(Transition::Navigate(Route::Home)),
            _ => Ok(Transition::Stay),
        }
    }

    async fn complete(
        &mut self,
        completion: Completion,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        let Completion::Product(result) = completion else {
            return Ok(Transition::Stay);
        };
        self.loading = false;
        match result {
            Ok(product) if product.id == self.id => {
                if let Some(ticket) = self.ticket.take() {
                    ctx.store.commit_selected_product(ticket, Some(product)).await?;
                }
            }
            Ok(product) => {
                warn!(requested = %self.id, received = %product.id, "Product id mismatch, discarded");
            }
            Err(e) => self.error = Some(e.user_message()),
        }
        Ok(Transition::Stay)
    }

    fn back_target(&self, state: &AppState) -> Option<Route> {
        Some(match &state.selected_category {
            Some(category) => Route::Category(category.id.clone()),
            None => Route::Catalog,
        })
    }

    fn view(&self, state: &AppState) -> View {
        let product = self.product(state).cloned();
        let (image, image_position) = match &product {
            Some(p) if !p.images.is_empty() => {
                let index = self.image_index.min(p.images.len() - 1);
                (
                    Some(p.images[index].clone()),
                    Some((index + 1, p.images.len())),
                )
            }
            _ => (None, None),
        };
        let error = if !self.loading && product.is_none() && self.error.is_none() {
            Some("Product not found".to_string())
        } else {
            self.error.clone()
        };

        View::Product(ProductView {
            loading: self.loading,
            error,
            can_order: product.as_ref().is_some_and(|p| p.is_available),
            product,
            image,
            image_position,
        })
    }
}
