//! Property tests for progress bounds under arbitrary drags and releases.

use proptest::prelude::*;

use crate::config::DeckConfig;
use crate::domain::expansion::ExpansionController;
use crate::domain::scroll::ScrollState;
use crate::domain::test_gens::drag_delta;
use crate::domain::test_prelude::{self, FRAME_MS};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Progress stays in [0, 1] through drags, releases and settles.
    #[test]
    fn prop_expansion_progress_bounded(
        deltas in prop::collection::vec(drag_delta(), 1..12),
        velocity in -5000.0f32..5000.0,
        frames in 0usize..80,
    ) {
        let config = DeckConfig::default();
        let mut deck = ExpansionController::new(&config);
        let mut out = Vec::new();

        let from_expanded = deck.begin_drag();
        for delta in &deltas {
            deck.update_drag(*delta, from_expanded);
            prop_assert!((0.0..=1.0).contains(&deck.progress()));
        }
        let last = *deltas.last().unwrap();
        deck.end_drag(last, velocity, &mut out);
        for _ in 0..frames {
            deck.tick(FRAME_MS, &mut out);
            prop_assert!((0.0..=1.0).contains(&deck.progress()));
        }
    }

    /// The committed flag only ever reads what a finished settle landed on.
    #[test]
    fn prop_committed_flag_matches_rest_position(
        delta in drag_delta(),
        velocity in -3000.0f32..3000.0,
    ) {
        let config = DeckConfig::default();
        let mut deck = ExpansionController::new(&config);
        let mut out = Vec::new();
        let from_expanded = deck.begin_drag();
        deck.update_drag(delta, from_expanded);
        deck.end_drag(delta, velocity, &mut out);
        for _ in 0..300 {
            deck.tick(FRAME_MS, &mut out);
        }
        prop_assert!(!deck.is_settling());
        let expected = if deck.is_expanded() { 1.0 } else { 0.0 };
        prop_assert_eq!(deck.progress(), expected);
    }

    #[test]
    fn prop_scroll_offset_bounded(
        max in 0.0f32..2000.0,
        deltas in prop::collection::vec(drag_delta(), 1..8),
        velocity in -8000.0f32..8000.0,
    ) {
        let mut scroll = ScrollState::new();
        scroll.set_max_offset(max);
        scroll.begin_drag();
        for delta in &deltas {
            let over = scroll.drag(*delta);
            prop_assert!(over >= 0.0);
            prop_assert!((0.0..=max).contains(&scroll.offset()));
        }
        scroll.fling(velocity, 0.998);
        for _ in 0..200 {
            scroll.tick(FRAME_MS);
            prop_assert!((0.0..=max).contains(&scroll.offset()));
        }
    }
}
