//! Typed writes accepted by [`AppState`](crate::state::AppState).
use crate::model::{Category, Identity, OrderPatch, Product};

/// A store slot populated by a remote read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Categories,
    Products,
    SelectedProduct,
    SearchResults,
}

/// Proof that a read was started; only the newest ticket per slot may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub slot: Slot,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub enum StateMutation {
    /// One-time identity and admin-flag setup. Ignored once the store is ready.
    Initialize {
        identity: Option<Identity>,
        admin_id: String,
    },
    SetLoading(bool),
    SetError(Option<String>),
    SetCategories(Vec<Category>),
    SetProducts(Vec<Product>),
    SelectCategory(Option<Category>),
    SelectProduct(Option<Product>),
    /// A blank query also clears the results.
    SetSearchQuery(String),
    SetSearchResults(Vec<Product>),
    ClearSearch,
    /// Shallow-merges into the draft order.
    UpdateOrder(OrderPatch),
    /// Resets the draft to its seeded defaults.
    ClearOrder,
    /// Invalidates earlier tickets for the slot and issues a new one.
    Begin(Slot),
    /// Applies `mutation` if `ticket` is still the newest for its slot.
    Commit {
        ticket: Ticket,
        mutation: Box<StateMutation>,
    },
}

impl StateMutation {
    /// The ticketed slot this mutation writes, if any.
    pub fn slot(&self) -> Option<Slot> {
        match self {
            StateMutation::SetCategories(_) => Some(Slot::Categories),
            StateMutation::SetProducts(_) => Some(Slot::Products),
            StateMutation::SelectProduct(_) => Some(Slot::SelectedProduct),
            StateMutation::SetSearchResults(_)
            | StateMutation::ClearSearch
            | StateMutation::SetSearchQuery(_) => Some(Slot::SearchResults),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StateMutation::Initialize { .. } => "Initialize",
            StateMutation::SetLoading(_) => "SetLoading",
            StateMutation::SetError(_) => "SetError",
            StateMutation::SetCategories(_) => "SetCategories",
            StateMutation::SetProducts(_) => "SetProducts",
            StateMutation::SelectCategory(_) => "SelectCategory",
            StateMutation::SelectProduct(_) => "SelectProduct",
            StateMutation::SetSearchQuery(_) => "SetSearchQuery",
            StateMutation::SetSearchResults(_) => "SetSearchResults",
            StateMutation::ClearSearch => "ClearSearch",
            StateMutation::UpdateOrder(_) => "UpdateOrder",
            StateMutation::ClearOrder => "ClearOrder",
            StateMutation::Begin(_) => "Begin",
            StateMutation::Commit { .. } => "Commit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    AlreadyInitialized,
    Ticket(Ticket),
    /// A commit whose ticket was superseded; nothing changed.
    Stale,
}
