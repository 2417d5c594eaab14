//! Simulator error type.

use deck::DeckError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Deck(#[from] DeckError),

    /// At least one session broke an invariant; details are in the report.
    #[error("{sessions} session(s) violated deck invariants")]
    Violations { sessions: usize },
}
