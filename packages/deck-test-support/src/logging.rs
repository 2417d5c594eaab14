//! Test logging for the deck crates.
//!
//! Unit tests (via the `#[ctor]` hook in `deck`'s `lib.rs`) and every
//! integration binary under `apps/deck/tests/` call [`init`] before the first
//! test runs. Output goes through the test writer, so gesture decisions,
//! settle completions and refused intents only show up next to a failing
//! assertion.
//!
//! The deck logs recognizer and animation detail at `debug`/`trace`, commits
//! at `info` and dropped intents at `warn`; the quiet default keeps only the
//! last of those.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when neither variable is set.
pub const DEFAULT_FILTER: &str = "warn";

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Pick the filter directive: `TEST_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
///
/// `TEST_LOG=deck::domain::gesture=trace` follows a single race without
/// turning up the rest of the crate.
pub fn filter_directive(test_log: Option<String>, rust_log: Option<String>) -> String {
    let set = |d: &String| !d.trim().is_empty();
    test_log
        .filter(set)
        .or_else(|| rust_log.filter(set))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Install the test subscriber once per process; later calls are no-ops.
pub fn init() {
    INSTALLED.get_or_init(|| {
        let directive = filter_directive(
            std::env::var("TEST_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(true)
            .try_init();
    });
}
