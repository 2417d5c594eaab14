use crate::config::DeckConfig;
use crate::domain::migration::{end_swipe, update_swipe, SwipeOutcome};
use crate::domain::test_prelude::FRAME_MS;
use crate::domain::transient::{ExitFinished, PagerCardState};

fn run_exit(card: &mut PagerCardState) -> bool {
    (0..100).any(|_| card.tick(FRAME_MS) == Some(ExitFinished))
}

#[test]
fn swipe_follows_finger_within_bounds() {
    let config = DeckConfig::default();
    let mut card = PagerCardState::new();

    update_swipe(&config, &mut card, 60.0);
    assert_eq!(card.translate_y.value(), 60.0);
    assert!(card.rotate_x.value() > 0.0);

    update_swipe(&config, &mut card, -40.0);
    assert_eq!(card.translate_y.value(), 0.0);
    assert!(card.rotate_x.value() < 0.0);

    update_swipe(&config, &mut card, 5000.0);
    assert_eq!(card.translate_y.value(), config.deck_top_y());
}

#[test]
fn committed_swipe_travels_to_measured_deck_top() {
    let config = DeckConfig::default();
    let mut card = PagerCardState::new();
    card.measured_top = Some(300.0);
    update_swipe(&config, &mut card, 130.0);

    let outcome = end_swipe(&config, &mut card, 130.0, 0.0);
    let expected = 130.0 + (config.deck_top_y() - 300.0);
    assert_eq!(outcome, SwipeOutcome::Filing { target_y: expected });
    assert!(card.is_exiting());
    assert!(run_exit(&mut card));
    assert_eq!(card.translate_y.value(), expected);
    assert_eq!(card.rotate_x.value(), 0.0);
}

#[test]
fn missing_measurement_uses_fallback_offset() {
    let config = DeckConfig::default();
    let mut card = PagerCardState::new();
    update_swipe(&config, &mut card, 20.0);
    let outcome = end_swipe(&config, &mut card, 20.0, 900.0);
    assert_eq!(
        outcome,
        SwipeOutcome::Filing {
            target_y: 20.0 + config.exit_fallback_offset
        }
    );
}

#[test]
fn short_swipe_reverts_and_never_exits() {
    let config = DeckConfig::default();
    let mut card = PagerCardState::new();
    update_swipe(&config, &mut card, 100.0);
    assert_eq!(end_swipe(&config, &mut card, 100.0, 200.0), SwipeOutcome::Reverted);
    assert!(!card.is_exiting());
    assert!(!run_exit(&mut card));
    assert_eq!(card.translate_y.value(), 0.0);
}
