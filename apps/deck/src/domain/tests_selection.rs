use std::f32::consts::{PI, TAU};

use crate::config::DeckConfig;
use crate::domain::animation::AnimatedValue;
use crate::domain::cards::CardId;
use crate::domain::intent::Intent;
use crate::domain::layout::is_face_aligned;
use crate::domain::selection::{nearest_multiple, DeselectTrigger, FlipDirection, SelectionController};
use crate::domain::test_prelude::FRAME_MS;
use crate::errors::domain::DeckError;

fn run(value: &mut AnimatedValue, frames: usize) {
    for _ in 0..frames {
        value.tick(FRAME_MS);
    }
}

fn selected(card: &str) -> (SelectionController, Vec<Intent>) {
    let config = DeckConfig::default();
    let mut selection = SelectionController::new(&config);
    let mut out = Vec::new();
    selection
        .select(CardId::from(card), &mut out)
        .expect("select on an idle controller");
    (selection, out)
}

#[test]
fn select_sets_identity_immediately_and_posts_it() {
    let (selection, out) = selected("A");
    assert_eq!(selection.active(), Some(&CardId::from("A")));
    assert_eq!(out, vec![Intent::ActivateCard { card: CardId::from("A") }]);
    assert!(selection.is_interactive());
}

#[test]
fn flips_keep_rotating_the_same_way() {
    let (mut selection, _) = selected("A");
    let mut angle = AnimatedValue::new(0.0);

    let first = selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    assert!((first - PI).abs() < 1e-5);
    run(&mut angle, 150);
    assert!((angle.value() - PI).abs() < 1e-2);

    let second = selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    assert!((second - TAU).abs() < 1e-5);
    run(&mut angle, 150);
    assert!((angle.value() - TAU).abs() < 1e-2);
    assert!(is_face_aligned(angle.value(), 1e-2));
}

#[test]
fn quick_double_flip_aims_from_running_target() {
    let (mut selection, _) = selected("A");
    let mut angle = AnimatedValue::new(0.0);
    selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    run(&mut angle, 2);
    let target = selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    assert!((target - TAU).abs() < 1e-5);
}

#[test]
fn flip_without_active_card_is_refused() {
    let config = DeckConfig::default();
    let mut selection = SelectionController::new(&config);
    let mut angle = AnimatedValue::new(0.0);
    assert_eq!(
        selection.flip(&mut angle, FlipDirection::Backward),
        Err(DeckError::NoActiveCard)
    );
    assert_eq!(angle.value(), 0.0);
}

#[test]
fn active_card_cleared_only_after_zoom_out_finishes() {
    let (mut selection, mut out) = selected("A");
    for _ in 0..100 {
        selection.tick(FRAME_MS, &mut out);
    }
    assert_eq!(selection.progress(), 1.0);

    out.clear();
    selection.deselect(None, DeselectTrigger::Tap).unwrap();
    for _ in 0..20 {
        assert_eq!(selection.tick(FRAME_MS, &mut out), None);
        assert_eq!(selection.active(), Some(&CardId::from("A")));
    }
    let mut cleared = None;
    for _ in 0..20 {
        if let Some(card) = selection.tick(FRAME_MS, &mut out) {
            cleared = Some(card);
        }
    }
    assert_eq!(cleared, Some(CardId::from("A")));
    assert_eq!(selection.active(), None);
    assert_eq!(selection.progress(), 0.0);
    assert_eq!(out, vec![Intent::ClearActiveCard]);
}

#[test]
fn deselect_returns_flip_to_front_face() {
    let (mut selection, _) = selected("A");
    let mut angle = AnimatedValue::new(0.0);
    selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    selection.flip(&mut angle, FlipDirection::Forward).unwrap();
    run(&mut angle, 200);
    assert!((angle.value() - 3.0 * PI).abs() < 1e-2);

    selection
        .deselect(Some(&mut angle), DeselectTrigger::Flick)
        .unwrap();
    run(&mut angle, 200);
    let face = nearest_multiple(angle.value(), TAU);
    assert!((angle.value() - face).abs() < 1e-2);
}

#[test]
fn select_refused_while_early_deselect_runs() {
    let (mut selection, mut out) = selected("A");
    for _ in 0..100 {
        selection.tick(FRAME_MS, &mut out);
    }
    selection.deselect(None, DeselectTrigger::Tap).unwrap();
    // Far enough that progress has dropped below the midpoint.
    for _ in 0..12 {
        selection.tick(FRAME_MS, &mut out);
    }
    assert!(selection.progress() <= 0.5);
    assert_eq!(
        selection.select(CardId::from("B"), &mut out),
        Err(DeckError::SelectionPending(CardId::from("A")))
    );
}

#[test]
fn select_supersedes_barely_started_deselect() {
    let (mut selection, mut out) = selected("A");
    for _ in 0..100 {
        selection.tick(FRAME_MS, &mut out);
    }
    selection.deselect(None, DeselectTrigger::Tap).unwrap();
    selection.tick(FRAME_MS, &mut out);
    assert!(selection.progress() > 0.5);

    out.clear();
    selection.select(CardId::from("B"), &mut out).unwrap();
    assert_eq!(selection.active(), Some(&CardId::from("B")));
    assert!(!selection.is_deselecting());
    // The superseded zoom-out never clears the new card.
    for _ in 0..100 {
        assert_eq!(selection.tick(FRAME_MS, &mut out), None);
    }
    assert_eq!(selection.active(), Some(&CardId::from("B")));
    assert!(!out.contains(&Intent::ClearActiveCard));
}

#[test]
fn select_while_another_card_active_is_refused() {
    let (mut selection, mut out) = selected("A");
    assert_eq!(
        selection.select(CardId::from("B"), &mut out),
        Err(DeckError::SelectionOccupied(CardId::from("A")))
    );
    assert_eq!(selection.select(CardId::from("A"), &mut out), Ok(()));
}

#[test]
fn flip_drag_preview_is_bounded_and_springs_back() {
    let (mut selection, _) = selected("A");
    let mut angle = AnimatedValue::new(0.0);

    selection.preview_flip(&mut angle, 500.0, 80.0);
    assert!((angle.value() - PI / 8.0).abs() < 1e-5);
    selection.preview_flip(&mut angle, 40.0, 80.0);
    assert!((angle.value() - PI / 16.0).abs() < 1e-5);

    assert_eq!(selection.end_flip_drag(&mut angle, 40.0, 100.0, 80.0, 500.0), None);
    run(&mut angle, 150);
    assert!(angle.value().abs() < 1e-2);
}

#[test]
fn flip_drag_past_threshold_flips_by_sign() {
    let (mut selection, _) = selected("A");
    let mut angle = AnimatedValue::new(0.0);
    selection.preview_flip(&mut angle, -90.0, 80.0);
    assert_eq!(
        selection.end_flip_drag(&mut angle, -90.0, 0.0, 80.0, 500.0),
        Some(FlipDirection::Backward)
    );
    assert_eq!(angle.target(), Some(-PI));
}
