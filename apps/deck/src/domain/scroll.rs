//! Scroll offset of the expanded list.
//!
//! While the deck is expanded, a vertical pan scrolls the list first; only
//! the part of a downward drag that pulls past the top becomes collapse
//! travel (see `drag`).

use crate::domain::animation::{AnimatedValue, SpringConfig};
use crate::domain::easing::Easing;

#[derive(Debug, Clone)]
pub struct ScrollState {
    offset: AnimatedValue,
    max_offset: f32,
    offset_at_start: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    pub fn new() -> Self {
        Self {
            offset: AnimatedValue::new(0.0),
            max_offset: 0.0,
            offset_at_start: 0.0,
        }
    }

    /// Offset clamped to `[0, max_offset]`.
    pub fn offset(&self) -> f32 {
        let value = self.offset.value();
        if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max_offset)
        }
    }

    pub fn max_offset(&self) -> f32 {
        self.max_offset
    }

    pub fn set_max_offset(&mut self, max_offset: f32) {
        self.max_offset = if max_offset.is_finite() {
            max_offset.max(0.0)
        } else {
            0.0
        };
        if self.offset.value() > self.max_offset {
            self.offset.set(self.max_offset);
        }
    }

    pub fn begin_drag(&mut self) {
        self.offset.stop();
        self.offset_at_start = self.offset();
    }

    /// Downward drag beyond the top of the list for a finger travel of `delta_y`.
    pub fn over_drag(&self, delta_y: f32) -> f32 {
        (delta_y - self.offset_at_start).max(0.0)
    }

    /// Scroll by finger travel; returns the over-drag past the top.
    pub fn drag(&mut self, delta_y: f32) -> f32 {
        let raw = self.offset_at_start - delta_y;
        if raw < 0.0 {
            self.offset.set(0.0);
            -raw
        } else {
            self.offset.set(raw.min(self.max_offset));
            0.0
        }
    }

    /// Momentum after a release inside the content; `velocity_y` is the finger's.
    pub fn fling(&mut self, velocity_y: f32, deceleration: f32) {
        if self.max_offset <= 0.0 || velocity_y == 0.0 {
            return;
        }
        self.offset
            .decay(-velocity_y, deceleration, Some((0.0, self.max_offset)));
    }

    pub fn settle_to_top(&mut self, duration_ms: f32) {
        self.offset.timing(0.0, duration_ms, Easing::CUBIC_OUT);
    }

    pub fn spring_to_top(&mut self, spring: SpringConfig) {
        self.offset.spring(0.0, spring);
    }

    pub fn tick(&mut self, dt_ms: f32) {
        self.offset.tick(dt_ms);
    }
}
