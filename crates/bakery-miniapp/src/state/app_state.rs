use crate::model::{is_admin, Category, DraftOrder, Identity, Product};
use crate::state::error::StoreError;
use crate::state::mutation::{MutationOutcome, Slot, StateMutation, Ticket};
use session_actor::SessionState;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Generations {
    categories: u64,
    products: u64,
    selected_product: u64,
    search_results: u64,
}

impl Generations {
    fn get_mut(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Categories => &mut self.categories,
            Slot::Products => &mut self.products,
            Slot::SelectedProduct => &mut self.selected_product,
            Slot::SearchResults => &mut self.search_results,
        }
    }

    fn bump(&mut self, slot: Slot) -> u64 {
        let generation = self.get_mut(slot);
        *generation += 1;
        *generation
    }

    fn is_current(&mut self, ticket: Ticket) -> bool {
        *self.get_mut(ticket.slot) == ticket.generation
    }
}

/// Everything the screens share for the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ready: bool,
    pub identity: Option<Identity>,
    /// UI convenience only; the backend authorizes admin writes itself.
    pub is_admin: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub selected_category: Option<Category>,
    pub selected_product: Option<Product>,
    pub search_query: String,
    pub search_results: Vec<Product>,
    pub order: DraftOrder,
    generations: Generations,
}

impl AppState {
    /// Browsing is suppressed while search results are shown.
    pub fn is_searching(&self) -> bool {
        !self.search_results.is_empty()
    }

    pub fn find_product(&self, id: &crate::model::ProductId) -> Option<&Product> {
        self.products
            .iter()
            .chain(self.search_results.iter())
            .find(|p| p.id == *id)
    }

    fn write(&mut self, mutation: StateMutation) -> Result<MutationOutcome, StoreError> {
        match mutation {
            StateMutation::Initialize { identity, admin_id } => {
                if self.ready {
                    return Ok(MutationOutcome::AlreadyInitialized);
                }
                self.is_admin = is_admin(identity.as_ref(), &admin_id);
                self.order = DraftOrder::seeded(identity.as_ref());
                self.identity = identity;
                self.ready = true;
            }
            StateMutation::SetLoading(loading) => self.loading = loading,
            StateMutation::SetError(error) => self.error = error,
            StateMutation::SetCategories(categories) => self.categories = categories,
            StateMutation::SetProducts(products) => self.products = products,
            StateMutation::SelectCategory(category) => self.selected_category = category,
            StateMutation::SelectProduct(product) => self.selected_product = product,
            StateMutation::SetSearchQuery(query) => {
                if query.trim().is_empty() {
                    self.search_results.clear();
                }
                self.search_query = query;
            }
            StateMutation::SetSearchResults(results) => self.search_results = results,
            StateMutation::ClearSearch => {
                self.search_query.clear();
                self.search_results.clear();
            }
            StateMutation::UpdateOrder(patch) => self.order.merge(patch),
            StateMutation::ClearOrder => {
                self.order = DraftOrder::seeded(self.identity.as_ref());
            }
            StateMutation::Begin(slot) => {
                let generation = self.generations.bump(slot);
                return Ok(MutationOutcome::Ticket(Ticket { slot, generation }));
            }
            StateMutation::Commit { ticket, mutation } => {
                if mutation.slot() != Some(ticket.slot) {
                    return Err(StoreError::SlotMismatch {
                        slot: ticket.slot,
                        mutation: mutation.name(),
                    });
                }
                if !self.generations.is_current(ticket) {
                    debug!(slot = ?ticket.slot, generation = ticket.generation, "Stale commit discarded");
                    return Ok(MutationOutcome::Stale);
                }
                return self.write(*mutation);
            }
        }
        Ok(MutationOutcome::Applied)
    }
}

impl SessionState for AppState {
    type Mutation = StateMutation;
    type Outcome = MutationOutcome;
    type Error = StoreError;

    fn apply(&mut self, mutation: StateMutation) -> Result<MutationOutcome, StoreError> {
        // A direct write to a ticketed slot supersedes any read still in flight for it.
        if let Some(slot) = mutation.slot() {
            self.generations.bump(slot);
        }
        self.write(mutation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HostUser, OrderPatch, Packaging, ProductId};

    fn identity(id: i64) -> Identity {
        Identity::from(HostUser {
            id,
            first_name: "Anna".into(),
            last_name: None,
            username: Some("anna".into()),
            language_code: None,
        })
    }

    fn product(id: &str) -> Product {
        Product {
            id: ProductId::from(id),
            name: id.to_uppercase(),
            category_id: None,
            description: None,
            ingredients: None,
            price: None,
            images: vec![],
            is_available: true,
            additional_info: None,
        }
    }

    fn begin(state: &mut AppState, slot: Slot) -> Ticket {
        match state.apply(StateMutation::Begin(slot)).unwrap() {
            MutationOutcome::Ticket(ticket) => ticket,
            other => panic!("expected ticket, got {other:?}"),
        }
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut state = AppState::default();
        let first = state.apply(StateMutation::Initialize {
            identity: Some(identity(123456789)),
            admin_id: "123456789".into(),
        });
        let second = state.apply(StateMutation::Initialize {
            identity: None,
            admin_id: "123456789".into(),
        });

        assert_eq!(first.unwrap(), MutationOutcome::Applied);
        assert_eq!(second.unwrap(), MutationOutcome::AlreadyInitialized);
        assert!(state.ready);
        assert!(state.is_admin);
        assert_eq!(state.identity.as_ref().map(|i| i.id.as_str()), Some("123456789"));
        assert_eq!(state.order.customer_name, "Anna");
    }

    #[test]
    fn test_no_identity_is_not_admin() {
        let mut state = AppState::default();
        state
            .apply(StateMutation::Initialize {
                identity: None,
                admin_id: "123456789".into(),
            })
            .unwrap();

        assert!(state.ready);
        assert!(!state.is_admin);
        assert_eq!(state.order, DraftOrder::default());
    }

    #[test]
    fn test_clear_order_reseeds_from_identity() {
        let mut state = AppState::default();
        state
            .apply(StateMutation::Initialize {
                identity: Some(identity(7)),
                admin_id: "1".into(),
            })
            .unwrap();
        state
            .apply(StateMutation::UpdateOrder(OrderPatch {
                customer_name: Some("Someone else".into()),
                packaging: Some(Packaging::Gift),
                ..OrderPatch::default()
            }))
            .unwrap();

        state.apply(StateMutation::ClearOrder).unwrap();

        assert_eq!(state.order.customer_name, "Anna");
        assert_eq!(state.order.customer_contact, "anna");
        assert_eq!(state.order.packaging, Packaging::Standard);
    }

    #[test]
    fn test_only_newest_ticket_commits() {
        let mut state = AppState::default();
        let old = begin(&mut state, Slot::SelectedProduct);
        let new = begin(&mut state, Slot::SelectedProduct);

        let late = state.apply(StateMutation::Commit {
            ticket: old,
            mutation: Box::new(StateMutation::SelectProduct(Some(product("p1")))),
        });
        assert_eq!(late.unwrap(), MutationOutcome::Stale);
        assert!(state.selected_product.is_none());

        let current = state.apply(StateMutation::Commit {
            ticket: new,
            mutation: Box::new(StateMutation::SelectProduct(Some(product("p2")))),
        });
        assert_eq!(current.unwrap(), MutationOutcome::Applied);
        assert_eq!(state.selected_product.unwrap().id, ProductId::from("p2"));
    }

    #[test]
    fn test_direct_write_supersedes_pending_read() {
        let mut state = AppState::default();
        let pending = begin(&mut state, Slot::Products);

        state.apply(StateMutation::SetProducts(vec![])).unwrap();
        let late = state
            .apply(StateMutation::Commit {
                ticket: pending,
                mutation: Box::new(StateMutation::SetProducts(vec![product("p1")])),
            })
            .unwrap();

        assert_eq!(late, MutationOutcome::Stale);
        assert!(state.products.is_empty());
    }

    #[test]
    fn test_commit_must_match_slot() {
        let mut state = AppState::default();
        let ticket = begin(&mut state, Slot::Categories);

        let err = state
            .apply(StateMutation::Commit {
                ticket,
                mutation: Box::new(StateMutation::SetProducts(vec![product("p1")])),
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::SlotMismatch { .. }));
        assert!(state.products.is_empty());
    }

    #[test]
    fn test_blank_query_clears_results() {
        let mut state = AppState::default();
        state
            .apply(StateMutation::SetSearchResults(vec![product("p1")]))
            .unwrap();
        assert!(state.is_searching());

        state
            .apply(StateMutation::SetSearchQuery("   ".into()))
            .unwrap();

        assert!(!state.is_searching());
    }

    #[test]
    fn test_clear_search_resets_query_and_results() {
        let mut state = AppState::default();
        state
            .apply(StateMutation::SetSearchQuery("honey".into()))
            .unwrap();
        state
            .apply(StateMutation::SetSearchResults(vec![product("p1")]))
            .unwrap();

        state.apply(StateMutation::ClearSearch).unwrap();

        assert_eq!(state.search_query, "");
        assert!(state.search_results.is_empty());
    }
}
