//! Headless deck sessions.
//!
//! A session drives a `DeckScreen` with synthetic pointer input, applies the
//! intents it posts to an in-process `CommittedState` the way the state owner
//! would, and checks the deck invariants after every frame.

use std::sync::Arc;

use deck::domain::gesture::PointerEvent;
use deck::{
    CardId, CardSource, CommittedState, DeckConfig, DeckScreen, DeckSnapshot, FrameLayout, Intent,
    TouchTarget,
};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::errors::SimulatorError;

pub const FRAME_MS: f32 = 16.0;

/// Where fingers land; roughly the middle of the viewport horizontally.
const TOUCH_X: f32 = 195.0;

/// One scripted or generated user action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    /// Drag a pager card. `measured_top` is reported first when present.
    SwipePager {
        card: CardId,
        measured_top: Option<f32>,
        dx: f32,
        dy: f32,
        moves: usize,
    },
    /// Drag on the deck, optionally starting over a card.
    PanDeck {
        card: Option<CardId>,
        y: f32,
        dx: f32,
        dy: f32,
        moves: usize,
    },
    TapDeck {
        card: Option<CardId>,
    },
    Delete {
        card: CardId,
    },
    Back,
    Wait {
        frames: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub frames: u64,
    pub filed: u32,
    pub deleted: u32,
    pub expanded: u32,
    pub collapsed: u32,
    pub activated: u32,
    pub cleared: u32,
    pub haptics: u32,
    pub back: u32,
    pub refused: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub frame: u64,
    pub message: String,
}

pub struct Session {
    screen: DeckScreen,
    state: CommittedState,
    intents: mpsc::UnboundedReceiver<Intent>,
    clock_ms: f64,
    stats: SessionStats,
    violations: Vec<Violation>,
}

impl Session {
    pub fn new(config: DeckConfig, source: &dyn CardSource) -> Result<Self, SimulatorError> {
        let state = CommittedState::from_source(source)?;
        let (tx, intents) = mpsc::unbounded_channel();
        let screen = DeckScreen::new(config, Arc::new(state.snapshot()), tx);
        Ok(Self {
            screen,
            state,
            intents,
            clock_ms: 0.0,
            stats: SessionStats::default(),
            violations: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        self.state.snapshot()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn layout(&self) -> FrameLayout {
        self.screen.layout()
    }

    pub fn run(&mut self, step: &Step) {
        debug!(?step, "step");
        match step {
            Step::SwipePager {
                card,
                measured_top,
                dx,
                dy,
                moves,
            } => {
                if let Some(top) = measured_top {
                    self.screen.report_pager_card_top(card, *top);
                }
                self.drag(TouchTarget::Pager(card.clone()), 400.0, (*dx, *dy), *moves);
            }
            Step::PanDeck {
                card,
                y,
                dx,
                dy,
                moves,
            } => self.drag(TouchTarget::Deck(card.clone()), *y, (*dx, *dy), *moves),
            Step::TapDeck { card } => self.drag(TouchTarget::Deck(card.clone()), 600.0, (0.0, 0.0), 0),
            Step::Delete { card } => {
                if let Err(err) = self.screen.request_delete(card) {
                    debug!(error = %err, card = %card, "delete refused");
                }
                self.pump();
            }
            Step::Back => {
                self.screen.go_back();
                self.pump();
            }
            Step::Wait { frames } => {
                for _ in 0..*frames {
                    self.frame();
                }
            }
        }
    }

    /// A straight drag with one frame between pointer events.
    fn drag(&mut self, target: TouchTarget, y: f32, delta: (f32, f32), moves: usize) {
        let x = TOUCH_X;
        self.pointer(target.clone(), PointerEvent::down(x, y, self.clock_ms));
        for i in 1..=moves {
            let f = i as f32 / moves as f32;
            self.frame();
            let event = PointerEvent::moved(x + delta.0 * f, y + delta.1 * f, self.clock_ms);
            self.pointer(target.clone(), event);
        }
        self.frame();
        let event = PointerEvent::up(x + delta.0, y + delta.1, self.clock_ms);
        self.pointer(target, event);
    }

    fn pointer(&mut self, target: TouchTarget, event: PointerEvent) {
        self.screen.pointer(target, event);
        self.pump();
    }

    fn frame(&mut self) {
        self.clock_ms += FRAME_MS as f64;
        self.stats.frames += 1;
        self.screen.tick(FRAME_MS);
        self.pump();
        self.check();
    }

    /// Apply queued intents and hand the new snapshot back to the screen.
    fn pump(&mut self) {
        while let Ok(intent) = self.intents.try_recv() {
            match self.state.apply(intent.clone()) {
                Ok(_) => self.count(&intent),
                Err(err) => {
                    debug!(error = %err, ?intent, "intent refused");
                    self.stats.refused += 1;
                }
            }
        }
        self.screen.apply_snapshot(Arc::new(self.state.snapshot()));
    }

    fn count(&mut self, intent: &Intent) {
        let stats = &mut self.stats;
        match intent {
            Intent::FileCard { .. } => {
                stats.filed += 1;
                // The reducer plays the success haptic itself.
                stats.haptics += 1;
            }
            Intent::DeleteCard { .. } => stats.deleted += 1,
            Intent::SetExpanded { expanded: true } => stats.expanded += 1,
            Intent::SetExpanded { expanded: false } => stats.collapsed += 1,
            Intent::ActivateCard { .. } => stats.activated += 1,
            Intent::ClearActiveCard => stats.cleared += 1,
            Intent::Haptic { .. } => stats.haptics += 1,
            Intent::GoBack => stats.back += 1,
        }
    }

    fn check(&mut self) {
        let frame = self.stats.frames;
        let mut found = Vec::new();

        if let Err(err) = self.state.registry().check_partition() {
            found.push(err.to_string());
        }

        let snapshot = self.state.snapshot();
        if let Some(active) = &snapshot.active_card {
            if !snapshot.selected.contains(active) {
                found.push(format!("committed active card {active} is not in the deck"));
            }
        }

        let selection = self.screen.selection_progress();
        if selection > 1e-3 && self.screen.active_card().is_none() {
            found.push(format!("selection progress {selection} with no active card"));
        }
        for (name, value) in [
            ("expansion", self.screen.expansion_progress()),
            ("selection", selection),
            ("scroll", self.screen.scroll_offset()),
        ] {
            if !value.is_finite() {
                found.push(format!("{name} is not finite"));
            }
        }

        let layout = self.screen.layout();
        if layout.deck.len() != snapshot.selected.len() {
            found.push(format!(
                "{} deck frames for {} selected cards",
                layout.deck.len(),
                snapshot.selected.len()
            ));
        }
        for card in &layout.deck {
            let t = &card.transform;
            let values = [t.translate_y, t.translate_x, t.scale_x, t.rotate_x, t.rotate_y, t.blur];
            if values.iter().any(|v| !v.is_finite()) {
                found.push(format!("non-finite transform for {}", card.card));
            }
            if !(0.0..=1.0).contains(&t.opacity) {
                found.push(format!("opacity {} out of range for {}", t.opacity, card.card));
            }
        }
        if !(0.0..=1.0).contains(&layout.chrome.pager_opacity) {
            found.push(format!("pager opacity {}", layout.chrome.pager_opacity));
        }

        for message in found {
            warn!(frame, %message, "invariant violated");
            self.violations.push(Violation { frame, message });
        }
    }
}

/// Random but plausible input, biased towards whatever the deck can do next.
pub struct StepGenerator {
    rng: StdRng,
}

impl StepGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn next_step(&mut self, session: &Session) -> Step {
        let snapshot = session.snapshot();
        let rng = &mut self.rng;
        let roll = rng.random_range(0..100);

        if roll < 30 {
            if let Some(card) = snapshot.available.choose(rng) {
                let measured_top = rng.random_bool(0.8).then(|| rng.random_range(250.0..450.0));
                return Step::SwipePager {
                    card: card.clone(),
                    measured_top,
                    dx: rng.random_range(-80.0..80.0),
                    dy: rng.random_range(-40.0..320.0),
                    moves: rng.random_range(2..16),
                };
            }
        }
        match roll {
            0..=54 => {
                // Active cards are flipped or dismissed from their own surface.
                let card = match &snapshot.active_card {
                    Some(active) if rng.random_bool(0.7) => Some(active.clone()),
                    _ => snapshot.selected.choose(rng).cloned(),
                };
                Step::PanDeck {
                    card,
                    y: rng.random_range(150.0..780.0),
                    dx: rng.random_range(-200.0..200.0),
                    dy: rng.random_range(-400.0..400.0),
                    moves: rng.random_range(1..24),
                }
            }
            55..=79 => {
                let card = if rng.random_bool(0.8) {
                    snapshot.selected.choose(rng).cloned()
                } else {
                    None
                };
                Step::TapDeck { card }
            }
            80..=85 => match snapshot.selected.choose(rng) {
                Some(card) => Step::Delete { card: card.clone() },
                None => Step::Wait { frames: 1 },
            },
            86 => Step::Back,
            _ => Step::Wait {
                frames: rng.random_range(0..90),
            },
        }
    }
}

/// Swipe, expand, select, flip, dismiss, delete.
pub fn showcase(session: &Session) -> Vec<Step> {
    let snapshot = session.snapshot();
    let Some(card) = snapshot.available.first().cloned() else {
        return Vec::new();
    };
    vec![
        Step::SwipePager {
            card: card.clone(),
            measured_top: Some(300.0),
            dx: 0.0,
            dy: 200.0,
            moves: 10,
        },
        Step::Wait { frames: 40 },
        Step::TapDeck { card: None },
        Step::Wait { frames: 45 },
        Step::TapDeck {
            card: Some(card.clone()),
        },
        Step::Wait { frames: 100 },
        Step::PanDeck {
            card: Some(card.clone()),
            y: 300.0,
            dx: 120.0,
            dy: 0.0,
            moves: 8,
        },
        Step::Wait { frames: 150 },
        Step::PanDeck {
            card: Some(card.clone()),
            y: 300.0,
            dx: 0.0,
            dy: 150.0,
            moves: 3,
        },
        Step::Wait { frames: 120 },
        Step::Delete { card },
        Step::Wait { frames: 40 },
    ]
}
