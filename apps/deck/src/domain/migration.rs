//! Swipe-to-file: dragging a pager card down into the deck.
//!
//! The card follows the finger and, on a committed release, travels to the
//! deck's top edge. Only when that exit finishes does the screen post
//! `Intent::FileCard`, which moves the card between collections.

use tracing::debug;

use crate::config::DeckConfig;
use crate::domain::easing::Easing;
use crate::domain::layout::{pager_tilt, PagerCardTransform};
use crate::domain::transient::PagerCardState;

/// Result of releasing a pager swipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwipeOutcome {
    /// Exit animation started toward this translation.
    Filing { target_y: f32 },
    Reverted,
}

/// Follow the finger; the card cannot be pushed above its resting place or
/// past the deck's top edge.
pub fn update_swipe(config: &DeckConfig, card: &mut PagerCardState, dy: f32) {
    let max = config.deck_top_y().max(0.0);
    card.translate_y.set(dy.clamp(0.0, max));
    card.rotate_x.set(pager_tilt(dy));
}

/// Release a swipe: file on distance OR velocity, otherwise spring home.
pub fn end_swipe(config: &DeckConfig, card: &mut PagerCardState, dy: f32, vy: f32) -> SwipeOutcome {
    card.rotate_x.timing(0.0, config.exit_duration_ms, Easing::CUBIC_OUT);
    if dy > config.card_swipe_threshold || vy > config.card_swipe_velocity {
        let current = card.translate_y.value();
        let target_y = match card.measured_top {
            Some(top) => current + (config.deck_top_y() - top).max(0.0),
            None => current + config.exit_fallback_offset,
        };
        card.exit = Some(
            card.translate_y
                .timing(target_y, config.exit_duration_ms, Easing::QUART_OUT),
        );
        debug!(dy, vy, target_y, measured = card.measured_top.is_some(), "swipe to file committed");
        SwipeOutcome::Filing { target_y }
    } else {
        card.translate_y
            .timing(0.0, config.exit_duration_ms, Easing::CUBIC_OUT);
        debug!(dy, vy, "swipe to file reverted");
        SwipeOutcome::Reverted
    }
}

pub fn pager_card_transform(card: &PagerCardState) -> PagerCardTransform {
    PagerCardTransform {
        translate_y: card.translate_y.value(),
        rotate_x: card.rotate_x.value(),
    }
}
