//! Per-card animated state owned by the animation side.
//!
//! These values exist only while the card is in a rendered list and are
//! dropped as soon as a snapshot removes the card from that list.

use crate::config::DeckConfig;
use crate::domain::animation::{AnimatedValue, AnimationId};
use crate::domain::easing::Easing;

/// Reported when a card's exit animation finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitFinished;

/// Transient state of a card in the deck.
#[derive(Debug, Clone)]
pub struct CardTransient {
    pub drag_offset_y: AnimatedValue,
    pub drag_offset_x: AnimatedValue,
    /// Unwrapped flip angle in radians.
    pub flip_angle: AnimatedValue,
    pub mount_progress: AnimatedValue,
    exit: Option<AnimationId>,
}

impl CardTransient {
    /// Fresh state that plays the mount-in animation once.
    pub fn mounting(config: &DeckConfig) -> Self {
        let mut mount_progress = AnimatedValue::new(0.0);
        mount_progress.timing(1.0, config.mount_duration_ms, Easing::QUART_OUT);
        Self {
            drag_offset_y: AnimatedValue::new(0.0),
            drag_offset_x: AnimatedValue::new(0.0),
            flip_angle: AnimatedValue::new(0.0),
            mount_progress,
            exit: None,
        }
    }

    /// Play the mount animation in reverse; completion means the card may leave.
    pub fn begin_exit(&mut self, duration_ms: f32) -> bool {
        if self.exit.is_some() {
            return false;
        }
        self.exit = Some(self.mount_progress.timing(0.0, duration_ms, Easing::CUBIC_OUT));
        true
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    pub fn tick(&mut self, dt_ms: f32) -> Option<ExitFinished> {
        self.drag_offset_y.tick(dt_ms);
        self.drag_offset_x.tick(dt_ms);
        self.flip_angle.tick(dt_ms);
        let done = self.mount_progress.tick(dt_ms)?;
        if done.finished && self.exit == Some(done.id) {
            self.exit = None;
            return Some(ExitFinished);
        }
        None
    }
}

/// Transient state of a card in the horizontal pager.
#[derive(Debug, Clone)]
pub struct PagerCardState {
    pub translate_y: AnimatedValue,
    pub rotate_x: AnimatedValue,
    /// Last measured page y of the card's top edge, when layout has run.
    pub measured_top: Option<f32>,
    pub(crate) exit: Option<AnimationId>,
}

impl Default for PagerCardState {
    fn default() -> Self {
        Self::new()
    }
}

impl PagerCardState {
    pub fn new() -> Self {
        Self {
            translate_y: AnimatedValue::new(0.0),
            rotate_x: AnimatedValue::new(0.0),
            measured_top: None,
            exit: None,
        }
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    pub fn tick(&mut self, dt_ms: f32) -> Option<ExitFinished> {
        self.rotate_x.tick(dt_ms);
        let done = self.translate_y.tick(dt_ms)?;
        if done.finished && self.exit == Some(done.id) {
            self.exit = None;
            return Some(ExitFinished);
        }
        None
    }
}
