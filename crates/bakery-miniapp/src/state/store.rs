//! # App Store
//!
//! Provides the typed API screens use against the state actor. It wraps a
//! `StateClient<AppState>`; clones are cheap and all talk to the same actor.
use crate::bridge::Host;
use crate::config::AppConfig;
use crate::model::{Category, OrderPatch, Product};
use crate::state::app_state::AppState;
use crate::state::error::StoreError;
use crate::state::mutation::{MutationOutcome, Slot, StateMutation, Ticket};
use async_trait::async_trait;
use session_actor::{FrameworkError, StateClient, StateHandle};
use tracing::{debug, info, instrument};

/// The shared-state handle passed to every screen.
#[derive(Clone)]
pub struct AppStore {
    inner: StateClient<AppState>,
}

#[async_trait]
impl StateHandle<AppState> for AppStore {
    type Error = StoreError;

    fn inner(&self) -> &StateClient<AppState> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::StateError(inner) => StoreError::Rejected(inner.to_string()),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl AppStore {
    pub fn new(inner: StateClient<AppState>) -> Self {
        Self { inner }
    }

    /// Extracts the identity from the host and computes the admin flag.
    ///
    /// Returns `false` if the store was already initialized; nothing changes in that case.
    /// A missing host is not an error, the session simply has no identity.
    #[instrument(skip(self, host, config))]
    pub async fn initialize(&self, host: &Host, config: &AppConfig) -> Result<bool, StoreError> {
        let identity = host.identity();
        let outcome = self
            .apply(StateMutation::Initialize {
                identity,
                admin_id: config.admin_id.clone(),
            })
            .await?;

        let first = outcome == MutationOutcome::Applied;
        if first {
            info!(host = host.is_present(), "Session initialized");
        } else {
            debug!("Already initialized");
        }
        Ok(first)
    }

    pub async fn set_loading(&self, loading: bool) -> Result<(), StoreError> {
        self.write(StateMutation::SetLoading(loading)).await
    }

    pub async fn set_error(&self, error: Option<String>) -> Result<(), StoreError> {
        self.write(StateMutation::SetError(error)).await
    }

    pub async fn set_categories(&self, categories: Vec<Category>) -> Result<(), StoreError> {
        self.write(StateMutation::SetCategories(categories)).await
    }

    pub async fn set_products(&self, products: Vec<Product>) -> Result<(), StoreError> {
        self.write(StateMutation::SetProducts(products)).await
    }

    pub async fn select_category(&self, category: Option<Category>) -> Result<(), StoreError> {
        self.write(StateMutation::SelectCategory(category)).await
    }

    pub async fn select_product(&self, product: Option<Product>) -> Result<(), StoreError> {
        self.write(StateMutation::SelectProduct(product)).await
    }

    pub async fn set_search_query(&self, query: String) -> Result<(), StoreError> {
        self.write(StateMutation::SetSearchQuery(query)).await
    }

    pub async fn set_search_results(&self, results: Vec<Product>) -> Result<(), StoreError> {
        self.write(StateMutation::SetSearchResults(results)).await
    }

    pub async fn clear_search(&self) -> Result<(), StoreError> {
        self.write(StateMutation::ClearSearch).await
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, patch: OrderPatch) -> Result<(), StoreError> {
        self.write(StateMutation::UpdateOrder(patch)).await
    }

    #[instrument(skip(self))]
    pub async fn clear_order(&self) -> Result<(), StoreError> {
        self.write(StateMutation::ClearOrder).await
    }

    /// Starts a read for `slot`, superseding any read already in flight for it.
    pub async fn begin(&self, slot: Slot) -> Result<Ticket, StoreError> {
        match self.apply(StateMutation::Begin(slot)).await? {
            MutationOutcome::Ticket(ticket) => Ok(ticket),
            other => Err(StoreError::Rejected(format!(
                "Begin returned {other:?} instead of a ticket"
            ))),
        }
    }

    /// Applies `mutation` if `ticket` is still current. Returns whether it landed.
    pub async fn commit(&self, ticket: Ticket, mutation: StateMutation) -> Result<bool, StoreError> {
        let outcome = self
            .apply(StateMutation::Commit {
                ticket,
                mutation: Box::new(mutation),
            })
            .await?;
        Ok(outcome == MutationOutcome::Applied)
    }

    pub async fn commit_categories(
        &self,
        ticket: Ticket,
        categories: Vec<Category>,
    ) -> Result<bool, StoreError> {
        self.commit(ticket, StateMutation::SetCategories(categories))
            .await
    }

    pub async fn commit_products(
        &self,
        ticket: Ticket,
        products: Vec<Product>,
    ) -> Result<bool, StoreError> {
        self.commit(ticket, StateMutation::SetProducts(products))
            .await
    }

    pub async fn commit_selected_product(
        &self,
        ticket: Ticket,
        product: Option<Product>,
    ) -> Result<bool, StoreError> {
        self.commit(ticket, StateMutation::SelectProduct(product))
            .await
    }

    pub async fn commit_search_results(
        &self,
        ticket: Ticket,
        results: Vec<Product>,
    ) -> Result<bool, StoreError> {
        self.commit(ticket, StateMutation::SetSearchResults(results))
            .await
    }

    async fn write(&self, mutation: StateMutation) -> Result<(), StoreError> {
        self.apply(mutation).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::mock::RecordingHost;
    use crate::model::{HostUser, ProductId};
    use session_actor::mock::{create_mock_client, expect_apply};
    use std::sync::Arc;

    fn spawn_store() -> AppStore {
        let (actor, client) = crate::state::new();
        tokio::spawn(actor.run());
        AppStore::new(client)
    }

    #[tokio::test]
    async fn test_initialize_from_host() {
        let store = spawn_store();
        let host = Host::present(Arc::new(RecordingHost::new().with_user(HostUser {
            id: 123456789,
            first_name: "Olga".into(),
            last_name: Some("Smirnova".into()),
            username: None,
            language_code: Some("en".into()),
        })));

        assert!(store.initialize(&host, &AppConfig::default()).await.unwrap());
        assert!(!store.initialize(&host, &AppConfig::default()).await.unwrap());

        let state = store.snapshot().await.unwrap();
        assert!(state.is_admin);
        let identity = state.identity.unwrap();
        assert_eq!(identity.full_name, "Olga Smirnova");
        assert_eq!(identity.language_code, "en");
    }

    #[tokio::test]
    async fn test_initialize_without_host() {
        let store = spawn_store();

        assert!(store
            .initialize(&Host::Absent, &AppConfig::default())
            .await
            .unwrap());

        let state = store.snapshot().await.unwrap();
        assert!(state.ready);
        assert!(state.identity.is_none());
        assert!(!state.is_admin);
    }

    #[tokio::test]
    async fn test_update_then_clear_order() {
        let store = spawn_store();
        store
            .initialize(&Host::Absent, &AppConfig::default())
            .await
            .unwrap();
        let seeded = store.snapshot().await.unwrap().order;

        store
            .update_order(OrderPatch {
                customer_contact: Some("+7 900 000-00-00".into()),
                ..OrderPatch::default()
            })
            .await
            .unwrap();
        let updated = store.snapshot().await.unwrap().order;
        assert_eq!(updated.customer_contact, "+7 900 000-00-00");
        assert_eq!(updated.customer_name, seeded.customer_name);
        assert_eq!(updated.delivery_date, seeded.delivery_date);

        store.clear_order().await.unwrap();
        assert_eq!(store.snapshot().await.unwrap().order, seeded);
    }

    #[tokio::test]
    async fn test_stale_product_discarded() {
        let store = spawn_store();
        let first = store.begin(Slot::SelectedProduct).await.unwrap();
        let second = store.begin(Slot::SelectedProduct).await.unwrap();
        let make = |id: &str| Product {
            id: ProductId::from(id),
            name: id.into(),
            category_id: None,
            description: None,
            ingredients: None,
            price: None,
            images: vec![],
            is_available: true,
            additional_info: None,
        };

        assert!(store
            .commit_selected_product(second, Some(make("p2")))
            .await
            .unwrap());
        assert!(!store
            .commit_selected_product(first, Some(make("p1")))
            .await
            .unwrap());

        let selected = store.snapshot().await.unwrap().selected_product.unwrap();
        assert_eq!(selected.id, ProductId::from("p2"));
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_unavailable() {
        let (client, mut receiver) = create_mock_client::<AppState>(4);
        let store = AppStore::new(client);

        let responder = tokio::spawn(async move {
            let (_, respond_to) = expect_apply(&mut receiver)
                .await
                .expect("Expected Apply request");
            drop(respond_to);
        });

        let err = store.set_loading(true).await.unwrap_err();
        responder.await.unwrap();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
