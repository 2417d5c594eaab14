use crate::config::DeckConfig;
use crate::domain::expansion::{DeckSide, DragOutcome, ExpansionController};
use crate::domain::intent::{HapticFeedback, ImpactStyle, Intent};
use crate::domain::test_prelude::FRAME_MS;

fn settle(controller: &mut ExpansionController, out: &mut Vec<Intent>) -> Option<DeckSide> {
    let mut committed = None;
    for _ in 0..200 {
        if let Some(side) = controller.tick(FRAME_MS, out) {
            committed = Some(side);
        }
        if !controller.is_settling() {
            break;
        }
    }
    committed
}

#[test]
fn upward_travel_past_threshold_commits_expand() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();

    let from_expanded = deck.begin_drag();
    assert!(!from_expanded);
    deck.update_drag(-130.0, from_expanded);
    let outcome = deck.end_drag(-130.0, 0.0, &mut out);

    assert_eq!(outcome, DragOutcome::Commit(DeckSide::Expanded));
    assert_eq!(
        out,
        vec![Intent::Haptic {
            feedback: HapticFeedback::Impact(ImpactStyle::Medium)
        }]
    );
    // Committed flag waits for the settle to finish.
    assert!(!deck.is_expanded());

    out.clear();
    assert_eq!(settle(&mut deck, &mut out), Some(DeckSide::Expanded));
    assert!(deck.is_expanded());
    assert_eq!(deck.progress(), 1.0);
    assert_eq!(out, vec![Intent::SetExpanded { expanded: true }]);
}

#[test]
fn short_slow_drag_reverts_without_haptic() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();

    let from_expanded = deck.begin_drag();
    deck.update_drag(-50.0, from_expanded);
    assert!(deck.progress() > 0.0);
    let outcome = deck.end_drag(-50.0, -50.0, &mut out);

    assert_eq!(outcome, DragOutcome::Revert(DeckSide::Collapsed));
    assert!(out.is_empty());
    assert_eq!(settle(&mut deck, &mut out), None);
    assert_eq!(deck.progress(), 0.0);
    assert!(!deck.is_expanded());
    assert!(out.is_empty());
}

#[test]
fn fast_flick_commits_on_velocity_alone() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();

    deck.begin_drag();
    deck.update_drag(-20.0, false);
    assert_eq!(
        deck.end_drag(-20.0, -400.0, &mut out),
        DragOutcome::Commit(DeckSide::Expanded)
    );
}

#[test]
fn collapse_commit_uses_light_haptic() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();
    deck.tap_to_expand(&mut out);
    settle(&mut deck, &mut out);
    assert!(deck.is_expanded());
    out.clear();

    let from_expanded = deck.begin_drag();
    assert!(from_expanded);
    deck.update_drag(200.0, from_expanded);
    assert_eq!(
        deck.end_drag(200.0, 0.0, &mut out),
        DragOutcome::Commit(DeckSide::Collapsed)
    );
    assert_eq!(
        out,
        vec![Intent::Haptic {
            feedback: HapticFeedback::Impact(ImpactStyle::Light)
        }]
    );
    out.clear();
    settle(&mut deck, &mut out);
    assert!(!deck.is_expanded());
    assert_eq!(out, vec![Intent::SetExpanded { expanded: false }]);
}

#[test]
fn drag_from_expanded_follows_finger() {
    let config = DeckConfig::default();
    let travel = config.travel_distance();
    let mut deck = ExpansionController::new(&config);
    deck.update_drag(travel / 4.0, true);
    assert!((deck.progress() - 0.75).abs() < 1e-5);
    deck.update_drag(-travel, true);
    assert_eq!(deck.progress(), 1.0);
}

#[test]
fn tap_to_expand_ignored_past_midpoint() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();
    deck.update_drag(-config.travel_distance() * 0.6, false);
    assert!(!deck.tap_to_expand(&mut out));
    assert!(out.is_empty());
}

#[test]
fn second_tap_does_not_restart_expand() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();

    assert!(deck.tap_to_expand(&mut out));
    for _ in 0..5 {
        deck.tick(FRAME_MS, &mut out);
    }
    let mid = deck.progress();
    assert!(mid > 0.0 && mid < 0.5);
    assert!(!deck.tap_to_expand(&mut out));
    assert_eq!(
        out,
        vec![Intent::Haptic {
            feedback: HapticFeedback::Impact(ImpactStyle::Medium)
        }]
    );

    // The original 600 ms timing still lands on schedule.
    for _ in 5..38 {
        deck.tick(FRAME_MS, &mut out);
    }
    assert!(deck.is_expanded());
}

#[test]
fn interrupted_settle_never_commits() {
    let config = DeckConfig::default();
    let mut deck = ExpansionController::new(&config);
    let mut out = Vec::new();

    assert!(deck.tap_to_expand(&mut out));
    for _ in 0..3 {
        deck.tick(FRAME_MS, &mut out);
    }
    // A new drag grabs the value mid-flight and reverts it.
    let from_expanded = deck.begin_drag();
    assert!(!from_expanded);
    assert!(!deck.is_settling());
    out.clear();
    deck.update_drag(0.0, from_expanded);
    deck.end_drag(0.0, 0.0, &mut out);
    settle(&mut deck, &mut out);

    assert!(!deck.is_expanded());
    assert!(!out.contains(&Intent::SetExpanded { expanded: true }));
}

#[test]
fn zero_travel_viewport_commits_fully_in_gesture_direction() {
    let config = DeckConfig {
        viewport_height: 223.0,
        ..DeckConfig::default()
    };
    assert!(config.travel_distance() <= 0.0);
    let mut deck = ExpansionController::new(&config);

    deck.update_drag(-1.0, false);
    assert_eq!(deck.progress(), 1.0);
    deck.update_drag(1.0, true);
    assert_eq!(deck.progress(), 0.0);
    deck.update_drag(5.0, false);
    assert_eq!(deck.progress(), 0.0);

    // Releasing after a tiny upward drag keeps the full commit.
    let mut out = Vec::new();
    let from_expanded = deck.begin_drag();
    deck.update_drag(-5.0, from_expanded);
    assert_eq!(deck.end_drag(-5.0, 0.0, &mut out), DragOutcome::Commit(DeckSide::Expanded));
    assert_eq!(settle(&mut deck, &mut out), Some(DeckSide::Expanded));
    assert_eq!(deck.progress(), 1.0);
    assert!(deck.is_expanded());

    // And a tiny downward drag from there collapses it again.
    let from_expanded = deck.begin_drag();
    assert!(from_expanded);
    deck.update_drag(5.0, from_expanded);
    assert_eq!(deck.end_drag(5.0, 0.0, &mut out), DragOutcome::Commit(DeckSide::Collapsed));
    assert_eq!(settle(&mut deck, &mut out), Some(DeckSide::Collapsed));
    assert_eq!(deck.progress(), 0.0);
}
