use std::f32::consts::PI;

use crate::config::DeckConfig;
use crate::domain::layout::{
    card_transform, chrome_transform, collapsed_offset, expanded_offset, max_scroll_offset,
    wrap_angle, CardFace, CardMotion, StackParams, DECK_BASE_Z,
};

fn params(count: usize) -> StackParams {
    StackParams {
        count,
        expansion: 0.0,
        selection: 0.0,
        scroll_offset: 0.0,
        active_index: None,
    }
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn collapsed_peek_steps_then_caps() {
    let config = DeckConfig::default();
    // Top of a 6-card stack is index 5.
    assert_eq!(collapsed_offset(&config, 5, 6), -20.0);
    assert_eq!(collapsed_offset(&config, 4, 6), -46.0);
    assert_eq!(collapsed_offset(&config, 2, 6), -98.0);
    // Depth 4 and 5 share the band behind the visible peeks.
    assert_eq!(collapsed_offset(&config, 1, 6), -102.0);
    assert_eq!(collapsed_offset(&config, 0, 6), -102.0);
}

#[test]
fn collapsed_height_does_not_grow_with_count() {
    let config = DeckConfig::default();
    let deepest = |count: usize| collapsed_offset(&config, 0, count);
    assert_eq!(deepest(5), deepest(50));
}

#[test]
fn expanded_spacing_and_scroll() {
    let config = DeckConfig::default();
    assert_eq!(expanded_offset(&config, 0), -20.0);
    assert_eq!(expanded_offset(&config, 3), 160.0);

    let mut p = params(4);
    p.expansion = 1.0;
    p.scroll_offset = 50.0;
    let t = card_transform(&config, 3, &p, &CardMotion::default());
    assert!(approx(t.translate_y, 110.0));

    // Scroll has no effect while collapsed.
    p.expansion = 0.0;
    let t = card_transform(&config, 3, &p, &CardMotion::default());
    assert!(approx(t.translate_y, -20.0));
}

#[test]
fn max_scroll_matches_content_height() {
    let config = DeckConfig::default();
    assert_eq!(max_scroll_offset(&config, 0), 0.0);
    assert_eq!(max_scroll_offset(&config, 1), 0.0);
    let expected = 9.0 * 60.0 - 20.0 + config.card_height()
        - (config.expanded_deck_height() - config.deck_padding_top);
    assert!(approx(max_scroll_offset(&config, 10), expected));
}

#[test]
fn selection_pushes_later_cards_offscreen() {
    let config = DeckConfig::default();
    let mut p = params(4);
    p.expansion = 1.0;
    p.selection = 1.0;
    p.active_index = Some(1);
    let motion = CardMotion::default();

    let before = card_transform(&config, 0, &p, &motion);
    let active = card_transform(&config, 1, &p, &motion);
    let after = card_transform(&config, 2, &p, &motion);

    assert!(approx(before.translate_y, config.selected_card_top));
    assert!(approx(active.translate_y, config.selected_card_top));
    assert!(approx(after.translate_y, config.viewport_height - config.offscreen_margin));

    assert_eq!(active.opacity, 1.0);
    assert!(approx(before.opacity, config.inactive_opacity));
    assert_eq!(active.blur, 0.0);
    assert!(approx(after.blur, config.max_blur));
}

#[test]
fn dimming_starts_at_half_selection() {
    let config = DeckConfig::default();
    let mut p = params(3);
    p.selection = 0.4;
    p.active_index = Some(2);
    let t = card_transform(&config, 0, &p, &CardMotion::default());
    assert_eq!(t.opacity, 1.0);
    assert_eq!(t.blur, 0.0);
}

#[test]
fn active_card_scale_blends_to_full_width() {
    let config = DeckConfig::default();
    let mut p = params(2);
    p.active_index = Some(0);
    let motion = CardMotion::default();

    assert!(approx(card_transform(&config, 0, &p, &motion).scale_x, 0.95));
    p.selection = 1.0;
    assert!(approx(card_transform(&config, 0, &p, &motion).scale_x, 1.0));
    assert!(approx(card_transform(&config, 1, &p, &motion).scale_x, 0.95));
}

#[test]
fn mount_and_drag_offsets_add_up() {
    let config = DeckConfig::default();
    let p = params(1);
    let motion = CardMotion {
        drag_offset_y: 40.0,
        mount_progress: 0.0,
        ..CardMotion::default()
    };
    let t = card_transform(&config, 0, &p, &motion);
    assert!(approx(t.translate_y, -20.0 + 40.0 + 30.0));
    assert_eq!(t.opacity, 0.0);
    assert!(approx(t.rotate_x, 0.04));
}

#[test]
fn tilt_is_clamped() {
    let config = DeckConfig::default();
    let p = params(1);
    let down = CardMotion {
        drag_offset_y: 900.0,
        ..CardMotion::default()
    };
    let up = CardMotion {
        drag_offset_y: -900.0,
        ..CardMotion::default()
    };
    assert!(approx(card_transform(&config, 0, &p, &down).rotate_x, 0.08));
    assert!(approx(card_transform(&config, 0, &p, &up).rotate_x, -0.02));
}

#[test]
fn flip_face_wraps_at_render_time() {
    assert_eq!(CardFace::from_angle(0.0), CardFace::Front);
    assert_eq!(CardFace::from_angle(PI), CardFace::Back);
    assert_eq!(CardFace::from_angle(2.0 * PI), CardFace::Front);
    assert_eq!(CardFace::from_angle(-PI), CardFace::Back);
    assert_eq!(CardFace::from_angle(7.0 * PI), CardFace::Back);
    assert!(approx(wrap_angle(5.0 * PI), PI));
}

#[test]
fn z_order_follows_index() {
    let config = DeckConfig::default();
    let p = params(3);
    let z: Vec<i32> = (0..3)
        .map(|i| card_transform(&config, i, &p, &CardMotion::default()).z_index)
        .collect();
    assert_eq!(z, vec![DECK_BASE_Z, DECK_BASE_Z + 1, DECK_BASE_Z + 2]);
}

#[test]
fn out_of_range_progress_is_clamped() {
    let config = DeckConfig::default();
    let mut wild = params(3);
    wild.expansion = 1.7;
    wild.selection = -0.3;
    let mut tame = params(3);
    tame.expansion = 1.0;
    let motion = CardMotion::default();
    assert_eq!(
        card_transform(&config, 1, &wild, &motion),
        card_transform(&config, 1, &tame, &motion)
    );
}

#[test]
fn chrome_follows_expansion() {
    let config = DeckConfig::default();
    let collapsed = chrome_transform(&config, 0.0, 0.0);
    assert_eq!(collapsed.pager_opacity, 1.0);
    assert_eq!(collapsed.pager_translate_y, 0.0);
    assert_eq!(collapsed.deck_translate_y, config.travel_distance());
    assert!(!collapsed.pager_above_deck);

    let expanded = chrome_transform(&config, 1.0, 1.0);
    assert_eq!(expanded.pager_opacity, 0.0);
    assert_eq!(expanded.pager_translate_y, -80.0);
    assert_eq!(expanded.deck_translate_y, 0.0);
    assert!(expanded.pager_above_deck);
}
