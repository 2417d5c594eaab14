//! Deck expansion: the collapsed dock ↔ full-screen list transition.
//!
//! `progress` is the continuous value every card's layout reads each frame.
//! `is_expanded` is the committed flag; it only changes when a settle
//! animation that ends on the opposite side finishes.

use tracing::{debug, info};

use crate::config::DeckConfig;
use crate::domain::animation::{AnimatedValue, AnimationId, SpringConfig};
use crate::domain::easing::{clamp_unit, Easing};
use crate::domain::intent::{HapticFeedback, ImpactStyle, Intent};

/// The two settled ends of the expansion range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckSide {
    Collapsed,
    Expanded,
}

impl DeckSide {
    pub fn progress(self) -> f32 {
        match self {
            DeckSide::Collapsed => 0.0,
            DeckSide::Expanded => 1.0,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == DeckSide::Expanded
    }

    fn opposite(self) -> Self {
        match self {
            DeckSide::Collapsed => DeckSide::Expanded,
            DeckSide::Expanded => DeckSide::Collapsed,
        }
    }
}

/// Result of releasing a deck drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Threshold passed; settling to the other side.
    Commit(DeckSide),
    /// Threshold missed; settling back to where the drag began.
    Revert(DeckSide),
}

#[derive(Debug, Clone)]
struct ExpansionTuning {
    travel_distance: f32,
    swipe_threshold: f32,
    velocity_threshold: f32,
    spring: SpringConfig,
    expand_duration_ms: f32,
    revert_duration_ms: f32,
}

#[derive(Debug, Clone)]
pub struct ExpansionController {
    progress: AnimatedValue,
    is_expanded: bool,
    drag_from: Option<DeckSide>,
    settle: Option<(AnimationId, DeckSide)>,
    tuning: ExpansionTuning,
}

impl ExpansionController {
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            progress: AnimatedValue::new(0.0),
            is_expanded: false,
            drag_from: None,
            settle: None,
            tuning: ExpansionTuning {
                travel_distance: config.travel_distance(),
                swipe_threshold: config.deck_swipe_threshold,
                velocity_threshold: config.deck_velocity_threshold,
                spring: config.spring,
                expand_duration_ms: config.expand_duration_ms,
                revert_duration_ms: config.collapse_duration_ms,
            },
        }
    }

    /// Progress clamped to [0, 1]; springs may overshoot internally.
    pub fn progress(&self) -> f32 {
        clamp_unit(self.progress.value())
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_some()
    }

    /// Start a drag. Any in-flight settle is dropped where it stands.
    ///
    /// Returns whether the drag started from the expanded side.
    pub fn begin_drag(&mut self) -> bool {
        self.progress.stop();
        if let Some((_, side)) = self.settle.take() {
            debug!(?side, progress = self.progress(), "expansion settle interrupted by drag");
        }
        let from = if self.progress() > 0.5 {
            DeckSide::Expanded
        } else {
            DeckSide::Collapsed
        };
        self.drag_from = Some(from);
        from.is_expanded()
    }

    /// Follow the finger 1:1 over the travel distance.
    pub fn update_drag(&mut self, delta_y: f32, from_expanded: bool) {
        let travel = self.tuning.travel_distance;
        let next = if travel <= f32::EPSILON {
            // Degenerate viewport: any travel in the gesture direction is a full commit.
            match (from_expanded, delta_y) {
                (true, d) if d > 0.0 => 0.0,
                (true, _) => 1.0,
                (false, d) if d < 0.0 => 1.0,
                (false, _) => 0.0,
            }
        } else if from_expanded {
            1.0 - delta_y / travel
        } else {
            -delta_y / travel
        };
        self.progress.set(clamp_unit(next));
    }

    /// Release the drag: commit on distance OR velocity, otherwise revert.
    pub fn end_drag(&mut self, delta_y: f32, velocity_y: f32, out: &mut Vec<Intent>) -> DragOutcome {
        let from = self.drag_from.take().unwrap_or(if self.progress() > 0.5 {
            DeckSide::Expanded
        } else {
            DeckSide::Collapsed
        });

        // Travel toward the other side is upward from collapsed, downward from expanded.
        let (travel, speed) = match from {
            DeckSide::Collapsed => (-delta_y, -velocity_y),
            DeckSide::Expanded => (delta_y, velocity_y),
        };
        // With no room to travel, any movement toward the other side already reached it.
        let degenerate = self.tuning.travel_distance <= f32::EPSILON && travel > 0.0;
        let passed = degenerate
            || travel > self.tuning.swipe_threshold
            || speed > self.tuning.velocity_threshold;

        if passed {
            let to = from.opposite();
            let id = self.progress.spring(to.progress(), self.tuning.spring);
            self.settle = Some((id, to));
            let style = match to {
                DeckSide::Expanded => ImpactStyle::Medium,
                DeckSide::Collapsed => ImpactStyle::Light,
            };
            out.push(Intent::Haptic {
                feedback: HapticFeedback::Impact(style),
            });
            debug!(?to, travel, speed, "deck drag committed");
            DragOutcome::Commit(to)
        } else {
            let id = self.progress.timing(
                from.progress(),
                self.tuning.revert_duration_ms,
                Easing::CUBIC_OUT,
            );
            self.settle = Some((id, from));
            debug!(?from, travel, speed, "deck drag reverted");
            DragOutcome::Revert(from)
        }
    }

    /// Expand from a tap on the collapsed deck. Ignored past the midpoint.
    pub fn tap_to_expand(&mut self, out: &mut Vec<Intent>) -> bool {
        if self.progress() >= 0.5 || self.is_dragging() {
            return false;
        }
        if matches!(self.settle, Some((_, DeckSide::Expanded))) {
            return false;
        }
        let id = self.progress.timing(
            DeckSide::Expanded.progress(),
            self.tuning.expand_duration_ms,
            Easing::CUBIC_OUT,
        );
        self.settle = Some((id, DeckSide::Expanded));
        out.push(Intent::Haptic {
            feedback: HapticFeedback::Impact(ImpactStyle::Medium),
        });
        true
    }

    /// Advance the settle; commits `is_expanded` when a finished settle lands
    /// on the side opposite the committed one.
    pub fn tick(&mut self, dt_ms: f32, out: &mut Vec<Intent>) -> Option<DeckSide> {
        let done = self.progress.tick(dt_ms)?;
        let (id, side) = self.settle?;
        if done.id != id || !done.finished {
            return None;
        }
        self.settle = None;
        if side.is_expanded() == self.is_expanded {
            return None;
        }
        self.is_expanded = side.is_expanded();
        info!(expanded = self.is_expanded, "deck expansion committed");
        out.push(Intent::SetExpanded {
            expanded: self.is_expanded,
        });
        Some(side)
    }
}
