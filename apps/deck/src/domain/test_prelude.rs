use std::env;

use proptest::prelude::ProptestConfig;

/// Case count comes from `PROPTEST_CASES`; the default keeps CI fast.
pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(64);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}

/// Frame step used by tick loops in tests.
pub const FRAME_MS: f32 = 16.0;
