use crate::state::mutation::Slot;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    #[error("Mutation rejected: {0}")]
    Rejected(String),

    #[error("{mutation} cannot be committed with a {slot:?} ticket")]
    SlotMismatch { slot: Slot, mutation: &'static str },
}
