//! Animated scalar values driven by timed eases, springs and momentum decay.
//!
//! An `AnimatedValue` runs at most one animation. Starting a new one (or
//! setting the value directly) replaces the running animation outright; the
//! replaced animation never reports a completion. Only `tick` reports
//! completions, and only for the animation that actually reached its end, so
//! a caller that commits on `Completion` keyed by `AnimationId` can never
//! commit a superseded settle.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::easing::{lerp, Easing};

/// Substep used when integrating springs and decay.
const STEP_MS: f32 = 1.0;

/// Spring parameters (mass-spring-damper).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    pub damping: f32,
    pub stiffness: f32,
    pub mass: f32,
    /// Snap to the target the first time it is crossed.
    #[serde(default)]
    pub overshoot_clamping: bool,
    #[serde(default = "default_rest_displacement")]
    pub rest_displacement: f32,
    #[serde(default = "default_rest_speed")]
    pub rest_speed: f32,
}

fn default_rest_displacement() -> f32 {
    0.001
}

fn default_rest_speed() -> f32 {
    0.01
}

impl SpringConfig {
    /// Soft settle used for expansion and selection commits.
    pub const fn gentle() -> Self {
        Self {
            damping: 17.0,
            stiffness: 170.0,
            mass: 1.0,
            overshoot_clamping: false,
            rest_displacement: 0.001,
            rest_speed: 0.01,
        }
    }

    /// Snappier settle used for flips.
    pub const fn quick() -> Self {
        Self {
            damping: 15.0,
            stiffness: 180.0,
            mass: 1.0,
            overshoot_clamping: false,
            rest_displacement: 0.001,
            rest_speed: 0.01,
        }
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::gentle()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Animation {
    Timing {
        to: f32,
        duration_ms: f32,
        easing: Easing,
    },
    Spring {
        to: f32,
        config: SpringConfig,
    },
    /// Momentum: velocity decays geometrically per millisecond.
    Decay {
        deceleration: f32,
        clamp: Option<(f32, f32)>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(u64);

/// Reported by `tick` when an animation reaches its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub id: AnimationId,
    pub finished: bool,
}

#[derive(Debug, Clone)]
struct Running {
    id: AnimationId,
    animation: Animation,
    from: f32,
    elapsed_ms: f32,
}

#[derive(Debug, Clone)]
pub struct AnimatedValue {
    value: f32,
    velocity: f32,
    running: Option<Running>,
    next_id: u64,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            running: None,
            next_id: 1,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Where the running animation will come to rest, when that is known.
    pub fn target(&self) -> Option<f32> {
        match self.running.as_ref()?.animation {
            Animation::Timing { to, .. } | Animation::Spring { to, .. } => Some(to),
            Animation::Decay { .. } => None,
        }
    }

    /// Write the value directly, stopping any running animation.
    pub fn set(&mut self, value: f32) {
        self.interrupt();
        self.value = value;
        self.velocity = 0.0;
    }

    /// Stop the running animation where it is.
    pub fn stop(&mut self) {
        self.interrupt();
        self.velocity = 0.0;
    }

    pub fn animate(&mut self, animation: Animation) -> AnimationId {
        self.interrupt();
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        self.running = Some(Running {
            id,
            animation,
            from: self.value,
            elapsed_ms: 0.0,
        });
        id
    }

    pub fn timing(&mut self, to: f32, duration_ms: f32, easing: Easing) -> AnimationId {
        self.animate(Animation::Timing {
            to,
            duration_ms,
            easing,
        })
    }

    pub fn spring(&mut self, to: f32, config: SpringConfig) -> AnimationId {
        self.animate(Animation::Spring { to, config })
    }

    /// Fling with `velocity` (units per second).
    pub fn decay(
        &mut self,
        velocity: f32,
        deceleration: f32,
        clamp: Option<(f32, f32)>,
    ) -> AnimationId {
        let id = self.animate(Animation::Decay {
            deceleration,
            clamp,
        });
        self.velocity = velocity;
        id
    }

    /// Advance by `dt_ms`; returns the completion if the animation ended.
    pub fn tick(&mut self, dt_ms: f32) -> Option<Completion> {
        let running = self.running.as_mut()?;
        if dt_ms.is_nan() || dt_ms <= 0.0 {
            return None;
        }
        running.elapsed_ms += dt_ms;

        let done = match running.animation {
            Animation::Timing {
                to,
                duration_ms,
                easing,
            } => {
                let previous = self.value;
                if duration_ms <= 0.0 || running.elapsed_ms >= duration_ms {
                    self.value = to;
                    self.velocity = 0.0;
                    true
                } else {
                    let t = running.elapsed_ms / duration_ms;
                    self.value = lerp(easing.apply(t), running.from, to);
                    self.velocity = (self.value - previous) * 1000.0 / dt_ms;
                    false
                }
            }
            Animation::Spring { to, config } => {
                step_spring(&mut self.value, &mut self.velocity, to, &config, dt_ms)
            }
            Animation::Decay {
                deceleration,
                clamp,
            } => step_decay(
                &mut self.value,
                &mut self.velocity,
                deceleration,
                clamp,
                dt_ms,
            ),
        };

        if done {
            let id = running.id;
            self.running = None;
            trace!(?id, value = self.value, "animation finished");
            Some(Completion { id, finished: true })
        } else {
            None
        }
    }

    fn interrupt(&mut self) {
        if let Some(previous) = self.running.take() {
            trace!(id = ?previous.id, value = self.value, "animation superseded");
        }
    }
}

fn step_spring(
    value: &mut f32,
    velocity: &mut f32,
    to: f32,
    config: &SpringConfig,
    dt_ms: f32,
) -> bool {
    let mass = config.mass.max(f32::EPSILON);
    let mut remaining = dt_ms;
    while remaining > 0.0 {
        let step = remaining.min(STEP_MS);
        remaining -= step;
        let dt = step / 1000.0;
        let before = *value - to;
        let accel = (-config.stiffness * before - config.damping * *velocity) / mass;
        *velocity += accel * dt;
        *value += *velocity * dt;
        let after = *value - to;

        let crossed = before != 0.0 && before.signum() != after.signum();
        let resting = after.abs() < config.rest_displacement && velocity.abs() < config.rest_speed;
        if (config.overshoot_clamping && crossed) || resting {
            *value = to;
            *velocity = 0.0;
            return true;
        }
    }
    false
}

fn step_decay(
    value: &mut f32,
    velocity: &mut f32,
    deceleration: f32,
    clamp: Option<(f32, f32)>,
    dt_ms: f32,
) -> bool {
    let mut remaining = dt_ms;
    while remaining > 0.0 {
        let step = remaining.min(STEP_MS);
        remaining -= step;
        *velocity *= deceleration.powf(step);
        *value += *velocity * step / 1000.0;
        if let Some((lo, hi)) = clamp {
            if *value <= lo || *value >= hi {
                *value = value.clamp(lo, hi);
                *velocity = 0.0;
                return true;
            }
        }
        if velocity.abs() < 0.5 {
            *velocity = 0.0;
            return true;
        }
    }
    false
}
