//! Error handling for the deck engine.

pub mod domain;

pub use domain::DeckError;
