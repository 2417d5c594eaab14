//! Gesture arbitration: independent recognizers combined by a race.
//!
//! A `GestureRace` lives for one touch sequence (pointer down to pointer up).
//! Every recognizer sees every event; the first one to activate wins and the
//! rest are cancelled. Only the winner produces `GestureEvent`s.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Velocity is estimated from samples no older than this.
pub const VELOCITY_WINDOW_MS: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

/// Raw pointer input in screen coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub time_ms: f64,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32, time_ms: f64) -> Self {
        Self { phase: PointerPhase::Down, x, y, time_ms }
    }

    pub fn moved(x: f32, y: f32, time_ms: f64) -> Self {
        Self { phase: PointerPhase::Move, x, y, time_ms }
    }

    pub fn up(x: f32, y: f32, time_ms: f64) -> Self {
        Self { phase: PointerPhase::Up, x, y, time_ms }
    }

    pub fn cancel(x: f32, y: f32, time_ms: f64) -> Self {
        Self { phase: PointerPhase::Cancel, x, y, time_ms }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(f64, f32, f32)>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn push(&mut self, x: f32, y: f32, time_ms: f64) {
        self.samples.push_back((time_ms, x, y));
        while let Some(&(t, _, _)) = self.samples.front() {
            if time_ms - t > VELOCITY_WINDOW_MS && self.samples.len() > 2 {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in px/s over the window; zero with fewer than two samples.
    pub fn velocity(&self) -> (f32, f32) {
        let (Some(&(t0, x0, y0)), Some(&(t1, x1, y1))) = (self.samples.front(), self.samples.back())
        else {
            return (0.0, 0.0);
        };
        let dt = t1 - t0;
        if dt <= 0.0 {
            return (0.0, 0.0);
        }
        let seconds = (dt / 1000.0) as f32;
        ((x1 - x0) / seconds, (y1 - y0) / seconds)
    }
}

/// Translation since pointer down plus current velocity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GestureSample {
    pub dx: f32,
    pub dy: f32,
    pub vx: f32,
    pub vy: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanAxis {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    Pending,
    Activate,
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanRecognizer {
    pub axis: PanAxis,
    /// Travel along `axis` needed to activate.
    pub active_offset: f32,
    /// Travel across `axis` that fails the pan before it activates.
    pub fail_offset: Option<f32>,
    pub enabled: bool,
}

impl PanRecognizer {
    pub fn vertical(active_offset: f32) -> Self {
        Self {
            axis: PanAxis::Vertical,
            active_offset,
            fail_offset: None,
            enabled: true,
        }
    }

    pub fn horizontal(active_offset: f32) -> Self {
        Self {
            axis: PanAxis::Horizontal,
            active_offset,
            fail_offset: None,
            enabled: true,
        }
    }

    pub fn fail_across(mut self, offset: f32) -> Self {
        self.fail_offset = Some(offset);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    fn evaluate(&self, dx: f32, dy: f32) -> Verdict {
        let (along, across) = match self.axis {
            PanAxis::Vertical => (dy, dx),
            PanAxis::Horizontal => (dx, dy),
        };
        if let Some(limit) = self.fail_offset {
            if across.abs() > limit {
                return Verdict::Fail;
            }
        }
        if along.abs() >= self.active_offset {
            Verdict::Activate
        } else {
            Verdict::Pending
        }
    }
}

/// Fails once the pointer moves further than `max_distance` from where it went down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRecognizer {
    pub max_distance: f32,
    pub enabled: bool,
}

impl TapRecognizer {
    pub fn new(max_distance: f32) -> Self {
        Self {
            max_distance,
            enabled: true,
        }
    }

    fn evaluate(&self, dx: f32, dy: f32) -> Verdict {
        if dx.hypot(dy) > self.max_distance {
            Verdict::Fail
        } else {
            Verdict::Pending
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Recognizer {
    Pan(PanRecognizer),
    Tap(TapRecognizer),
}

impl Recognizer {
    fn is_enabled(&self) -> bool {
        match self {
            Recognizer::Pan(pan) => pan.enabled,
            Recognizer::Tap(tap) => tap.enabled,
        }
    }
}

/// What a recognizer means on the screen that installed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureKind {
    DeckPan,
    DeckTap,
    CardDismiss,
    CardFlip,
    CardTap,
    SwipeToFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    Idle,
    Recognizing,
    PanVertical(GestureKind),
    PanHorizontal(GestureKind),
    Tap(GestureKind),
    Committed(GestureKind),
    Reverted(GestureKind),
    Failed,
}

/// Output of the race; only the winner emits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Began(GestureKind, GestureSample),
    Updated(GestureKind, GestureSample),
    Ended(GestureKind, GestureSample),
    Tapped(GestureKind),
    Cancelled(GestureKind),
}

#[derive(Debug, Clone)]
struct Entry {
    kind: GestureKind,
    recognizer: Recognizer,
    failed: bool,
}

#[derive(Debug, Clone)]
pub struct GestureRace {
    entries: Vec<Entry>,
    phase: RacePhase,
    origin: Option<(f32, f32)>,
    tracker: VelocityTracker,
}

impl GestureRace {
    /// Recognizers are consulted in order; on a tie the earlier one wins.
    pub fn new(recognizers: Vec<(GestureKind, Recognizer)>) -> Self {
        let entries = recognizers
            .into_iter()
            .map(|(kind, recognizer)| Entry {
                kind,
                failed: !recognizer.is_enabled(),
                recognizer,
            })
            .collect();
        Self {
            entries,
            phase: RacePhase::Idle,
            origin: None,
            tracker: VelocityTracker::new(),
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// The pan that won the race, while it is live.
    pub fn active_pan(&self) -> Option<GestureKind> {
        match self.phase {
            RacePhase::PanVertical(kind) | RacePhase::PanHorizontal(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Option<GestureEvent> {
        match event.phase {
            PointerPhase::Down => {
                self.origin = Some((event.x, event.y));
                self.tracker.reset();
                self.tracker.push(event.x, event.y, event.time_ms);
                for entry in &mut self.entries {
                    entry.failed = !entry.recognizer.is_enabled();
                }
                self.phase = RacePhase::Recognizing;
                None
            }
            PointerPhase::Move => {
                self.tracker.push(event.x, event.y, event.time_ms);
                let sample = self.sample(event)?;
                match self.phase {
                    RacePhase::Recognizing => self.recognize(sample),
                    RacePhase::PanVertical(kind) | RacePhase::PanHorizontal(kind) => {
                        Some(GestureEvent::Updated(kind, sample))
                    }
                    _ => None,
                }
            }
            PointerPhase::Up => {
                self.tracker.push(event.x, event.y, event.time_ms);
                let sample = self.sample(event)?;
                let result = match self.phase {
                    RacePhase::Recognizing => {
                        // A pan can still activate on the final position.
                        match self.recognize(sample) {
                            Some(GestureEvent::Began(kind, sample)) => {
                                Some(GestureEvent::Ended(kind, sample))
                            }
                            _ => self.resolve_tap(),
                        }
                    }
                    RacePhase::PanVertical(kind) | RacePhase::PanHorizontal(kind) => {
                        Some(GestureEvent::Ended(kind, sample))
                    }
                    _ => None,
                };
                self.origin = None;
                result
            }
            PointerPhase::Cancel => {
                self.origin = None;
                let winner = match self.phase {
                    RacePhase::PanVertical(kind) | RacePhase::PanHorizontal(kind) => Some(kind),
                    _ => None,
                };
                self.phase = match winner {
                    Some(kind) => RacePhase::Reverted(kind),
                    None => RacePhase::Failed,
                };
                winner.map(GestureEvent::Cancelled)
            }
        }
    }

    /// Record how the winning pan settled.
    pub fn finish(&mut self, committed: bool) {
        let kind = match self.phase {
            RacePhase::PanVertical(kind) | RacePhase::PanHorizontal(kind) | RacePhase::Tap(kind) => {
                kind
            }
            _ => return,
        };
        self.phase = if committed {
            RacePhase::Committed(kind)
        } else {
            RacePhase::Reverted(kind)
        };
        debug!(?kind, committed, "gesture finished");
    }

    fn sample(&self, event: &PointerEvent) -> Option<GestureSample> {
        let (ox, oy) = self.origin?;
        let (vx, vy) = self.tracker.velocity();
        Some(GestureSample {
            dx: event.x - ox,
            dy: event.y - oy,
            vx,
            vy,
        })
    }

    fn recognize(&mut self, sample: GestureSample) -> Option<GestureEvent> {
        let mut winner = None;
        for entry in self.entries.iter_mut().filter(|e| !e.failed) {
            let verdict = match &entry.recognizer {
                Recognizer::Pan(pan) => pan.evaluate(sample.dx, sample.dy),
                Recognizer::Tap(tap) => tap.evaluate(sample.dx, sample.dy),
            };
            match verdict {
                Verdict::Fail => {
                    trace!(kind = ?entry.kind, "recognizer failed");
                    entry.failed = true;
                }
                Verdict::Activate if winner.is_none() => {
                    if let Recognizer::Pan(pan) = entry.recognizer {
                        winner = Some((entry.kind, pan.axis));
                    }
                }
                _ => {}
            }
        }

        if let Some((kind, axis)) = winner {
            for entry in &mut self.entries {
                entry.failed = entry.kind != kind;
            }
            self.phase = match axis {
                PanAxis::Vertical => RacePhase::PanVertical(kind),
                PanAxis::Horizontal => RacePhase::PanHorizontal(kind),
            };
            debug!(?kind, dx = sample.dx, dy = sample.dy, "pan activated");
            return Some(GestureEvent::Began(kind, sample));
        }

        if self.entries.iter().all(|e| e.failed) {
            self.phase = RacePhase::Failed;
        }
        None
    }

    fn resolve_tap(&mut self) -> Option<GestureEvent> {
        let kind = self
            .entries
            .iter()
            .find(|e| !e.failed && matches!(e.recognizer, Recognizer::Tap(_)))
            .map(|e| e.kind);
        match kind {
            Some(kind) => {
                self.phase = RacePhase::Tap(kind);
                debug!(?kind, "tap recognized");
                Some(GestureEvent::Tapped(kind))
            }
            None => {
                self.phase = RacePhase::Failed;
                None
            }
        }
    }
}
