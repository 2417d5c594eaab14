//! Domain-level error type used by the controllers, the registry and the
//! committed-state reducer.
//!
//! Inputs are trusted local gesture events, so most of these are refusals
//! that the screen logs and drops rather than failures to surface.

use thiserror::Error;

use crate::domain::cards::CardId;

/// Central deck error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// Card id is not part of the universe.
    #[error("unknown card: {0}")]
    UnknownCard(CardId),
    /// Two seed cards share an id.
    #[error("duplicate card id: {0}")]
    DuplicateCard(CardId),
    /// Card was expected in the available collection.
    #[error("card is not available: {0}")]
    NotAvailable(CardId),
    /// Card was expected in the selected collection.
    #[error("card is not selected: {0}")]
    NotSelected(CardId),
    /// Operation needs an active (zoomed) card.
    #[error("no active card")]
    NoActiveCard,
    /// A deselect past its midpoint must finish before a new select.
    #[error("deselect of {0} is past halfway; select refused")]
    SelectionPending(CardId),
    /// Another card is already zoomed.
    #[error("card {0} is already active")]
    SelectionOccupied(CardId),
    /// The active card cannot be deleted.
    #[error("cannot delete the active card {0}")]
    CardActive(CardId),
    /// `available` and `selected` no longer partition the universe.
    #[error("partition violated: {0}")]
    PartitionViolated(String),
    /// Configuration value out of range.
    #[error("configuration error: {0}")]
    Config(String),
    /// The state owner task has stopped.
    #[error("state owner is closed")]
    StateOwnerClosed,
}

impl DeckError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config(detail.into())
    }

    pub fn partition(detail: impl Into<String>) -> Self {
        Self::PartitionViolated(detail.into())
    }
}
