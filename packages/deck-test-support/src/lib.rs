//! Deck test support utilities
//!
//! Shared helpers for the deck integration tests. Currently this is the
//! unified logging initialisation; fixtures live next to the tests that use them.

pub mod logging;
