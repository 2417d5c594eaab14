//! Card selection: zooming one deck card in and out, and flipping it.
//!
//! The active card id is set the moment a select commits and cleared only
//! from the finished completion of the zoom-out, so no frame renders a
//! cleared identity with non-zero progress.

use std::f32::consts::{PI, TAU};

use tracing::{debug, info};

use crate::config::DeckConfig;
use crate::domain::animation::{AnimatedValue, AnimationId, SpringConfig};
use crate::domain::cards::CardId;
use crate::domain::easing::{clamp_unit, Easing};
use crate::domain::intent::Intent;
use crate::errors::domain::DeckError;

/// Largest tilt shown while a flip drag is live, before it commits.
const FLIP_PREVIEW_MAX: f32 = PI / 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    /// Positive rotation (finger moving right).
    Forward,
    /// Negative rotation (finger moving left).
    Backward,
}

impl FlipDirection {
    fn sign(self) -> f32 {
        match self {
            FlipDirection::Forward => 1.0,
            FlipDirection::Backward => -1.0,
        }
    }
}

/// What started a deselect; only the timing differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeselectTrigger {
    Tap,
    Flick,
}

/// Nearest multiple of `step` to `angle`.
#[inline]
pub fn nearest_multiple(angle: f32, step: f32) -> f32 {
    (angle / step).round() * step
}

#[derive(Debug, Clone)]
struct SelectionTuning {
    spring: SpringConfig,
    quick_spring: SpringConfig,
    deselect_duration_ms: f32,
    flick_deselect_duration_ms: f32,
}

#[derive(Debug, Clone)]
pub struct SelectionController {
    progress: AnimatedValue,
    active: Option<CardId>,
    deselect: Option<AnimationId>,
    flip_base: Option<f32>,
    tuning: SelectionTuning,
}

impl SelectionController {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            progress: AnimatedValue::new(0.0),
            active: None,
            deselect: None,
            flip_base: None,
            tuning: SelectionTuning {
                spring: config.spring,
                quick_spring: config.quick_spring,
                deselect_duration_ms: config.deselect_duration_ms,
                flick_deselect_duration_ms: config.flick_deselect_duration_ms,
            },
        }
    }

    pub fn progress(&self) -> f32 {
        clamp_unit(self.progress.value())
    }

    pub fn active(&self) -> Option<&CardId> {
        self.active.as_ref()
    }

    pub fn is_deselecting(&self) -> bool {
        self.deselect.is_some()
    }

    /// Active and not on its way out: flips and dismiss drags are allowed.
    pub fn is_interactive(&self) -> bool {
        self.active.is_some() && self.deselect.is_none()
    }

    /// Zoom a card in.
    pub fn select(&mut self, card: CardId, out: &mut Vec<Intent>) -> Result<(), DeckError> {
        if let Some(current) = &self.active {
            if self.deselect.is_some() {
                // A deselect that is at least halfway done finishes first.
                if self.progress() <= 0.5 {
                    return Err(DeckError::SelectionPending(current.clone()));
                }
                debug!(previous = %current, next = %card, "deselect superseded by select");
            } else if *current == card {
                return Ok(());
            } else {
                return Err(DeckError::SelectionOccupied(current.clone()));
            }
        }

        self.deselect = None;
        self.flip_base = None;
        self.active = Some(card.clone());
        self.progress.spring(1.0, self.tuning.spring);
        info!(card = %card, "card selected");
        out.push(Intent::ActivateCard { card });
        Ok(())
    }

    /// Zoom the active card out; the flip angle returns to the front face.
    pub fn deselect(
        &mut self,
        flip_angle: Option<&mut AnimatedValue>,
        trigger: DeselectTrigger,
    ) -> Result<(), DeckError> {
        let active = self.active.as_ref().ok_or(DeckError::NoActiveCard)?;
        if self.deselect.is_some() {
            return Ok(());
        }
        let duration_ms = match trigger {
            DeselectTrigger::Tap => self.tuning.deselect_duration_ms,
            DeselectTrigger::Flick => self.tuning.flick_deselect_duration_ms,
        };
        debug!(card = %active, ?trigger, "deselect started");
        self.deselect = Some(self.progress.timing(0.0, duration_ms, Easing::CUBIC_OUT));
        self.flip_base = None;
        if let Some(angle) = flip_angle {
            let resting = angle.target().unwrap_or_else(|| angle.value());
            angle.spring(nearest_multiple(resting, TAU), self.tuning.spring);
        }
        Ok(())
    }

    /// Rotate half a turn from the nearest face, in `direction`.
    ///
    /// Returns the new target angle.
    pub fn flip(
        &mut self,
        flip_angle: &mut AnimatedValue,
        direction: FlipDirection,
    ) -> Result<f32, DeckError> {
        if !self.is_interactive() {
            return Err(DeckError::NoActiveCard);
        }
        // Aim from where a running flip will land so quick double flips keep going.
        let resting = self
            .flip_base
            .take()
            .or_else(|| flip_angle.target())
            .unwrap_or_else(|| flip_angle.value());
        let target = nearest_multiple(resting, PI) + direction.sign() * PI;
        flip_angle.spring(target, self.tuning.quick_spring);
        debug!(target, ?direction, "card flipped");
        Ok(target)
    }

    /// Tilt the card toward a flip while a horizontal drag is live.
    pub fn preview_flip(&mut self, flip_angle: &mut AnimatedValue, dx: f32, threshold: f32) {
        if !self.is_interactive() {
            return;
        }
        let base = *self.flip_base.get_or_insert_with(|| {
            let resting = flip_angle.target().unwrap_or_else(|| flip_angle.value());
            nearest_multiple(resting, PI)
        });
        let reach = if threshold > 0.0 {
            (dx / threshold).clamp(-1.0, 1.0)
        } else {
            dx.signum()
        };
        flip_angle.set(base + reach * FLIP_PREVIEW_MAX);
    }

    /// Release a horizontal drag: flip past the distance or velocity threshold,
    /// otherwise spring back to the face the drag started on.
    pub fn end_flip_drag(
        &mut self,
        flip_angle: &mut AnimatedValue,
        dx: f32,
        velocity_x: f32,
        distance_threshold: f32,
        velocity_threshold: f32,
    ) -> Option<FlipDirection> {
        let direction = if dx > distance_threshold || velocity_x > velocity_threshold {
            Some(FlipDirection::Forward)
        } else if dx < -distance_threshold || velocity_x < -velocity_threshold {
            Some(FlipDirection::Backward)
        } else {
            None
        };
        if let Some(direction) = direction {
            if self.flip(flip_angle, direction).is_ok() {
                return Some(direction);
            }
        }
        self.cancel_flip_preview(flip_angle);
        None
    }

    /// Spring a previewed card back to the face the drag started on.
    pub fn cancel_flip_preview(&mut self, flip_angle: &mut AnimatedValue) {
        if let Some(base) = self.flip_base.take() {
            flip_angle.spring(base, self.tuning.quick_spring);
        }
    }

    /// Advance zoom progress. Returns the card whose deselect just finished.
    pub fn tick(&mut self, dt_ms: f32, out: &mut Vec<Intent>) -> Option<CardId> {
        let done = self.progress.tick(dt_ms)?;
        if !done.finished || self.deselect != Some(done.id) {
            return None;
        }
        self.deselect = None;
        let cleared = self.active.take()?;
        info!(card = %cleared, "card deselected");
        out.push(Intent::ClearActiveCard);
        Some(cleared)
    }
}
