//! `/order/{id}`: the order form.
//!
//! Entering the screen starts a fresh draft seeded from the identity. Validation runs
//! locally, so an incomplete draft or a past delivery date never reaches the network.
use crate::model::{DeliveryMethod, OrderPatch, Packaging, Product, ProductId};
use crate::router::Route;
use crate::screens::view::{Offer, OrderFormView};
use crate::screens::{
    Completion, Screen, ScreenContext, Submission, SubmissionStatus, Transition, UiAction, View,
};
use crate::state::{AppState, Slot, StoreError, Ticket};
use async_trait::async_trait;
use chrono::Local;
use session_actor::StateHandle;
use tracing::{debug, info};

pub struct OrderFormScreen {
    product_id: ProductId,
    submission: Submission<()>,
    validation_error: Option<String>,
    ticket: Option<Ticket>,
    loading: bool,
    load_error: Option<String>,
}

impl OrderFormScreen {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            submission: Submission::default(),
            validation_error: None,
            ticket: None,
            loading: false,
            load_error: None,
        }
    }

    fn product<'a>(&self, state: &'a AppState) -> Option<&'a Product> {
        state
            .selected_product
            .as_ref()
            .filter(|p| p.id == self.product_id)
    }

    async fn submit(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        if !self.submission.can_submit() {
            debug!(status = ?self.submission.status(), "Submit ignored");
            return Ok(());
        }
        let state = ctx.store.snapshot().await?;
        let Some(product) = self.product(&state) else {
            self.validation_error = Some(match &self.load_error {
                Some(error) if !self.loading => error.clone(),
                _ => "The product is still loading".to_string(),
            });
            return Ok(());
        };

        let today = Local::now().date_naive();
        let customer_id = state.identity.as_ref().map(|i| i.id.as_str());
        let request = match state.order.validate(product, customer_id, today) {
            Ok(request) => request,
            Err(e) => {
                debug!(error = %e, "Order draft rejected locally");
                self.validation_error = Some(e.to_string());
                return Ok(());
            }
        };

        self.validation_error = None;
        self.submission.begin();
        info!(product = %request.product_id, date = %request.delivery_date, "Submitting order");
        let api = ctx.api.clone();
        ctx.spawn(async move { Completion::OrderSubmitted(api.create_order(&request).await) });
        Ok(())
    }
}

#[async_trait]
impl Screen for OrderFormScreen {
    fn route(&self) -> Route {
        Route::Order(self.product_id.clone())
    }

    async fn enter(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        ctx.store.clear_order().await?;
        ctx.store
            .update_order(OrderPatch {
                product_id: Some(self.product_id.clone()),
                ..OrderPatch::default()
            })
            .await?;

        let state = ctx.store.snapshot().await?;
        if self.product(&state).is_some() {
            return Ok(());
        }
        if let Some(product) = state.find_product(&self.product_id).cloned() {
            return ctx.store.select_product(Some(product)).await;
        }

        self.ticket = Some(ctx.store.begin(Slot::SelectedProduct).await?);
        self.loading = true;
        let api = ctx.api.clone();
        let id = self.product_id.clone();
        ctx.spawn(async move { Completion::Product(api.get_product_by_id(&id).await) });
        Ok(())
    }

    async fn handle(
        &mut self,
        action: UiAction,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        match action {
            UiAction::EditOrder(patch) => {
                if self.submission.succeeded().is_some() || self.submission.is_submitting() {
                    return Ok(Transition::Stay);
                }
                self.submission.edit();
                self.validation_error = None;
                ctx.store
                    .update_order(OrderPatch {
                        product_id: None,
                        ..patch
                    })
                    .await?;
                Ok(Transition::Stay)
            }
            UiAction::Submit => {
                self.submit(ctx).await?;
                Ok(Transition::Stay)
            }
            UiAction::Cancel => {
                if self.submission.is_submitting() {
                    return Ok(Transition::Stay);
                }
                ctx.store.clear_order().await?;
                Ok(Transition::Navigate(Route::Product(self.product_id.clone())))
            }
            UiAction::GoHome => Ok(Transition::Navigate(Route::Home)),
            UiAction::ContinueShopping => Ok(Transition::Navigate(Route::Catalog)),
            _ => Ok(Transition::Stay),
        }
    }

    async fn complete(
        &mut self,
        completion: Completion,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        match completion {
            Completion::OrderSubmitted(Ok(())) => {
                if self.submission.succeed(()) {
                    info!(product = %self.product_id, "Order placed");
                    ctx.store.clear_order().await?;
                }
            }
            Completion::OrderSubmitted(Err(e)) => {
                self.submission.fail(e.user_message());
            }
            Completion::Product(result) => {
                self.loading = false;
                match result {
                    Ok(product) if product.id == self.product_id => {
                        if let Some(ticket) = self.ticket.take() {
                            ctx.store
                                .commit_selected_product(ticket, Some(product))
                                .await?;
                        }
                    }
                    Ok(_) => self.load_error = Some("Product not found".to_string()),
                    Err(e) => self.load_error = Some(e.user_message()),
                }
            }
            other => debug!(?other, "Ignoring unrelated completion"),
        }
        Ok(Transition::Stay)
    }

    fn back_target(&self, _state: &AppState) -> Option<Route> {
        Some(Route::Product(self.product_id.clone()))
    }

    fn view(&self, state: &AppState) -> View {
        let product = self.product(state);
        let status = self.submission.status();
        let offers = if status == SubmissionStatus::Succeeded {
            vec![Offer::GoHome, Offer::ContinueShopping]
        } else {
            Vec::new()
        };
        let unavailable = product
            .filter(|p| !p.is_available)
            .map(|_| "This product is currently unavailable".to_string());

        View::OrderForm(OrderFormView {
            loading: self.loading,
            product_name: product.map(|p| p.name.clone()),
            draft: state.order.clone(),
            packaging_options: Packaging::ALL,
            delivery_options: DeliveryMethod::ALL,
            status,
            can_submit: self.submission.can_submit() && product.is_some_and(|p| p.is_available),
            validation_error: self.validation_error.clone().or(unavailable),
            error: self
                .submission
                .error()
                .map(str::to_string)
                .or_else(|| self.load_error.clone()),
            offers,
        })
    }
}
