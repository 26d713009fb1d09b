//! Catalog browsing and search.
//!
//! `/catalog` lists categories, `/catalog/{id}` lists the products of one category. Search
//! works on both; while it has results the browse list is hidden.
use crate::model::{CategoryId, Product};
use crate::router::Route;
use crate::screens::view::{Browse, CatalogView, ProductCard, SearchView};
use crate::screens::{Completion, Screen, ScreenContext, Transition, UiAction, View};
use crate::state::{AppState, Slot, StoreError, Ticket};
use async_trait::async_trait;
use session_actor::StateHandle;
use tracing::debug;

pub struct CatalogScreen {
    category: Option<CategoryId>,
    categories_ticket: Option<Ticket>,
    products_ticket: Option<Ticket>,
    search_ticket: Option<(Ticket, String)>,
    /// Query whose results are on screen.
    searched: Option<String>,
    pending: usize,
}

impl CatalogScreen {
    pub fn new(category: Option<CategoryId>) -> Self {
        Self {
            category,
            categories_ticket: None,
            products_ticket: None,
            search_ticket: None,
            searched: None,
            pending: 0,
        }
    }

    async fn started(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        self.pending += 1;
        ctx.store.set_loading(true).await
    }

    async fn finished(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        self.pending = self.pending.saturating_sub(1);
        ctx.store.set_loading(self.pending > 0).await
    }

    async fn load_categories(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        self.categories_ticket = Some(ctx.store.begin(Slot::Categories).await?);
        self.started(ctx).await?;
        let api = ctx.api.clone();
        ctx.spawn(async move { Completion::Categories(api.get_categories().await) });
        Ok(())
    }

    async fn load_products(
        &mut self,
        id: CategoryId,
        ctx: &ScreenContext,
    ) -> Result<(), StoreError> {
        self.products_ticket = Some(ctx.store.begin(Slot::Products).await?);
        self.started(ctx).await?;
        let api = ctx.api.clone();
        ctx.spawn(async move { Completion::Products(api.get_products(Some(&id)).await) });
        Ok(())
    }

    async fn reset_search(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        self.search_ticket = None;
        self.searched = None;
        ctx.store.clear_search().await
    }
}

fn cards<'a>(products: impl Iterator<Item = &'a Product>) -> Vec<ProductCard> {
    products.map(ProductCard::from).collect()
}

#[async_trait]
impl Screen for CatalogScreen {
    fn route(&self) -> Route {
        match &self.category {
            Some(id) => Route::Category(id.clone()),
            None => Route::Catalog,
        }
    }

    async fn enter(&mut self, ctx: &ScreenContext) -> Result<(), StoreError> {
        ctx.store.set_products(Vec::new()).await?;
        match self.category.clone() {
            None => {
                ctx.store.select_category(None).await?;
            }
            Some(id) => {
                let state = ctx.store.snapshot().await?;
                let known = state
                    .selected_category
                    .filter(|c| c.id == id)
                    .or_else(|| state.categories.into_iter().find(|c| c.id == id));
                ctx.store.select_category(known).await?;
                self.load_products(id, ctx).await?;
            }
        }
        self.load_categories(ctx).await
    }

    async fn handle(
        &mut self,
        action: UiAction,
        ctx: &ScreenContext,
    ) -> Result<Transition, StoreError> {
        match action {
            UiAction::OpenCategory(id) => {
                let state = ctx.store.snapshot().await?;
                let category = state.categories.into_iter().find(|c| c.id == id);
                ctx.store.select_category(category).await?;
                Ok(Transition::Navigate(Route::Category(id)))
            }
            UiAction::OpenProduct(id) => {
                let state = ctx.store.snapshot().await?;
                if let Some(product) = state.find_product(&id).cloned() {
                    ctx.store.select_product(Some(product)).await?;
                }
                Ok(Transition::Navigate(Route::Product(id)))
            }
            UiAction::EditSearch(query) => {
                if query.trim().is_empty() {
                    self.search_ticket = None;
                    self.searched = None;
                }
                ctx.store.set_search_query(query).await?;
                Ok(Transition::Stay)
            }
            UiAction::SubmitSearch => {
                let query = ctx.store.snapshot().await?.search_query.trim().to_string();
                if query.is_empty() {
                    debug!("Blank search, clearing results");
                    self.reset_search(ctx).await?;
                    return Ok(Transition::Stay);
                }
                let ticket = ctx.store.begin(Slot::SearchResults).await?;
                self.search_ticket = Some((ticket, query.clone()));
                self.started(ctx).await?;
                let api = ctx.api.clone();
                ctx.spawn(
                    async move { Completion::SearchResults(api.search_products(&query).await) },
                );
                Ok(Transition::Stay)
            }
            UiAction::ClearSearch => {
                self.reset_search(ctx).await?;
                Ok(Transition::Stay)
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
        match completion {
            Completion::Categories(result) => {
                self.finished(ctx).await?;
                match result {
                    Ok(categories) => {
                        let selected = self
                            .category
                            .as_ref()
                            .and_then(|id| categories.iter().find(|c| c.id == *id).cloned());
                        let Some(ticket) = self.categories_ticket.take() else {
                            return Ok(Transition::Stay);
                        };
                        if ctx.store.commit_categories(ticket, categories).await? && selected.is_some()
                        {
                            ctx.store.select_category(selected).await?;
                        }
                    }
                    Err(e) => ctx.store.set_error(Some(e.user_message())).await?,
                }
            }
            Completion::Products(result) => {
                self.finished(ctx).await?;
                match result {
                    Ok(products) => {
                        if let Some(ticket) = self.products_ticket.take() {
                            ctx.store.commit_products(ticket, products).await?;
                        }
                    }
                    Err(e) => ctx.store.set_error(Some(e.user_message())).await?,
                }
            }
            Completion::SearchResults(result) => {
                self.finished(ctx).await?;
                match result {
                    Ok(results) => {
                        if let Some((ticket, query)) = self.search_ticket.take() {
                            if ctx.store.commit_search_results(ticket, results).await? {
                                self.searched = Some(query);
                            }
                        }
                    }
                    Err(e) => ctx.store.set_error(Some(e.user_message())).await?,
                }
            }
            other => debug!(?other, "Ignoring unrelated completion"),
        }
        Ok(Transition::Stay)
    }

    async fn exit(&mut self, next: &Route, ctx: &ScreenContext) -> Result<(), StoreError> {
        // A category's product list is only kept for the product it leads to.
        if self.category.is_some() && !matches!(next, Route::Product(_) | Route::Order(_)) {
            ctx.store.set_products(Vec::new()).await?;
        }
        Ok(())
    }

    fn back_target(&self, _state: &AppState) -> Option<Route> {
        match self.category {
            Some(_) => Some(Route::Catalog),
            None => Some(Route::Home),
        }
    }

    fn view(&self, state: &AppState) -> View {
        let search = if state.is_searching() || self.searched.is_some() {
            Some(SearchView {
                query: self
                    .searched
                    .clone()
                    .unwrap_or_else(|| state.search_query.clone()),
                results: cards(state.search_results.iter()),
            })
        } else {
            None
        };

        let browse = if state.is_searching() {
            None
        } else {
            Some(match &self.category {
                None => Browse::Categories(state.categories.clone()),
                Some(id) => Browse::Products {
                    category: state.selected_category.clone(),
                    products: cards(state.products.iter().filter(|p| {
                        p.category_id.as_ref().map_or(true, |c| c == id)
                    })),
                },
            })
        };

        View::Catalog(CatalogView {
            loading: state.loading,
            error: state.error.clone(),
            query: state.search_query.clone(),
            search,
            browse,
            can_clear_search: !state.search_query.is_empty() || self.searched.is_some(),
        })
    }
}
