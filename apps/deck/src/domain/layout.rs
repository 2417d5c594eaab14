//! Stack layout engine: pure per-frame mapping from progress values to
//! render transforms.
//!
//! Nothing here holds state. Every term is recomputed from the current
//! expansion, selection, scroll and per-card values on each frame, and every
//! progress input is clamped to [0, 1] before it is used.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use serde::Serialize;

use crate::config::DeckConfig;
use crate::domain::easing::{clamp_unit, interpolate_clamped, lerp};

/// First z-index used by deck cards.
pub const DECK_BASE_Z: i32 = 11;

/// Frame-wide inputs shared by every card in the deck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackParams {
    pub count: usize,
    pub expansion: f32,
    pub selection: f32,
    pub scroll_offset: f32,
    pub active_index: Option<usize>,
}

/// Current values of one card's transient state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMotion {
    pub drag_offset_y: f32,
    pub drag_offset_x: f32,
    pub flip_angle: f32,
    pub mount_progress: f32,
}

impl Default for CardMotion {
    fn default() -> Self {
        Self {
            drag_offset_y: 0.0,
            drag_offset_x: 0.0,
            flip_angle: 0.0,
            mount_progress: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFace {
    Front,
    Back,
}

impl CardFace {
    /// Visible face for an unwrapped flip angle.
    pub fn from_angle(angle: f32) -> Self {
        let wrapped = wrap_angle(angle);
        if wrapped > FRAC_PI_2 && wrapped < 3.0 * FRAC_PI_2 {
            CardFace::Back
        } else {
            CardFace::Front
        }
    }
}

/// Wrap an unwrapped angle into [0, 2π) for renderers that need bounded input.
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // Tiny negative angles round up to exactly 2π.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardTransform {
    pub translate_y: f32,
    pub translate_x: f32,
    pub scale_x: f32,
    pub opacity: f32,
    /// Tilt toward the viewer while dragged, radians.
    pub rotate_x: f32,
    /// Flip rotation, wrapped into [0, 2π).
    pub rotate_y: f32,
    pub face: CardFace,
    pub blur: f32,
    pub z_index: i32,
}

/// Resting offset of a card in the collapsed dock.
///
/// Depth 0 is the top of the stack (the last selected card). The first
/// `peek_card_count` depths step up by `peek_per_card`; everything deeper
/// shares one band just behind them, so the dock height is bounded.
pub fn collapsed_offset(config: &DeckConfig, index: usize, count: usize) -> f32 {
    let depth = count.saturating_sub(1).saturating_sub(index);
    let visible = config.peek_card_count.max(1);
    let peek = if depth < visible {
        depth as f32 * config.peek_per_card
    } else {
        (visible - 1) as f32 * config.peek_per_card + config.secondary_peek
    };
    -(config.thumb_visible_height + peek)
}

/// Resting offset of a card in the expanded list, before scrolling.
pub fn expanded_offset(config: &DeckConfig, index: usize) -> f32 {
    index as f32 * config.peek_per_card_expanded - config.thumb_visible_height
}

/// Largest scroll offset of the expanded list for `count` cards.
pub fn max_scroll_offset(config: &DeckConfig, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    let last_card_bottom = (count - 1) as f32 * config.peek_per_card_expanded
        - config.thumb_visible_height
        + config.card_height();
    let visible = config.expanded_deck_height() - config.deck_padding_top;
    (last_card_bottom - visible).max(0.0)
}

/// Transform of the card at `index` for this frame.
pub fn card_transform(
    config: &DeckConfig,
    index: usize,
    params: &StackParams,
    motion: &CardMotion,
) -> CardTransform {
    let expansion = clamp_unit(params.expansion);
    let selection = clamp_unit(params.selection);
    let mount = clamp_unit(motion.mount_progress);
    let scroll = if params.scroll_offset.is_finite() {
        params.scroll_offset.max(0.0)
    } else {
        0.0
    };

    let collapsed = collapsed_offset(config, index, params.count);
    let expanded = expanded_offset(config, index);
    let stacked_y = lerp(expansion, collapsed, expanded) - scroll * expansion;

    let (is_active, is_after) = match params.active_index {
        Some(active) => (index == active, index > active),
        None => (false, false),
    };
    let target_y = if is_after {
        config.viewport_height - config.offscreen_margin
    } else {
        config.selected_card_top
    };

    let mount_offset = lerp(mount, config.mount_offset, 0.0);
    let translate_y = lerp(selection, stacked_y, target_y) + motion.drag_offset_y + mount_offset;

    let stacked_scale = lerp(expansion, config.collapsed_scale_x, 1.0);
    let scale_x = lerp(
        selection,
        stacked_scale,
        if is_active { 1.0 } else { stacked_scale },
    );

    let dimmed = params.active_index.is_some() && !is_active;
    let target_opacity = if dimmed { config.inactive_opacity } else { 1.0 };
    let opacity = interpolate_clamped(selection, &[0.5, 1.0], &[1.0, target_opacity]) * mount;
    let blur = if dimmed {
        interpolate_clamped(selection, &[0.5, 1.0], &[0.0, config.max_blur])
    } else {
        0.0
    };

    let rotate_x = interpolate_clamped(motion.drag_offset_y, &[-30.0, 0.0, 80.0], &[-0.02, 0.0, 0.08]);

    CardTransform {
        translate_y,
        translate_x: motion.drag_offset_x,
        scale_x,
        opacity,
        rotate_x,
        rotate_y: wrap_angle(motion.flip_angle),
        face: CardFace::from_angle(motion.flip_angle),
        blur,
        z_index: DECK_BASE_Z + index as i32,
    }
}

/// Transform of a card in the horizontal pager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PagerCardTransform {
    pub translate_y: f32,
    pub rotate_x: f32,
}

/// Transforms of the two screen regions around the cards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChromeTransform {
    pub pager_opacity: f32,
    pub pager_translate_y: f32,
    pub deck_translate_y: f32,
    /// The pager is drawn above the deck while a pager card is being swiped.
    pub pager_above_deck: bool,
}

pub fn chrome_transform(config: &DeckConfig, expansion: f32, pager_dragging: f32) -> ChromeTransform {
    let expansion = clamp_unit(expansion);
    ChromeTransform {
        pager_opacity: 1.0 - expansion,
        pager_translate_y: lerp(expansion, 0.0, -80.0),
        deck_translate_y: lerp(expansion, config.travel_distance().max(0.0), 0.0),
        pager_above_deck: pager_dragging > 0.0,
    }
}

/// Tilt of a pager card for a vertical drag of `dy`.
pub fn pager_tilt(dy: f32) -> f32 {
    interpolate_clamped(dy, &[-30.0, 0.0, 30.0], &[-0.10, 0.0, 0.02])
}

/// Whether an angle sits on a face (a multiple of π) within `tolerance`.
pub fn is_face_aligned(angle: f32, tolerance: f32) -> bool {
    let rem = angle.rem_euclid(PI);
    rem < tolerance || PI - rem < tolerance
}
