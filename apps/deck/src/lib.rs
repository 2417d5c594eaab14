#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use config::DeckConfig;
pub use domain::cards::{Card, CardId};
pub use domain::intent::Intent;
pub use errors::DeckError;
pub use services::committed::{spawn_state_owner, CommittedState, DeckSnapshot, StateOwnerHandle};
pub use services::ports::{CardSource, HapticSink, Navigator, StaticCards, TracingHaptics, TracingNavigator};
pub use services::screen::{DeckScreen, FrameLayout, TouchTarget};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    deck_test_support::logging::init();
}
