#![allow(dead_code)]

// tests/common/mod.rs
use std::sync::Arc;

use deck::domain::gesture::PointerEvent;
use deck::services::committed::CommittedState;
use deck::{Card, CardId, DeckConfig, DeckError, DeckScreen, Intent, StaticCards, TouchTarget};
use tokio::sync::mpsc;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    deck_test_support::logging::init();
}

pub const FRAME_MS: f32 = 16.0;

pub fn cards(names: &[&str]) -> StaticCards {
    StaticCards(
        names
            .iter()
            .map(|n| Card::new(*n, &["tag"], format!("{n} card"), ("#3a1c71", "#ffaf7b")))
            .collect(),
    )
}

pub fn id(name: &str) -> CardId {
    CardId::from(name)
}

/// Drives a screen against an in-process reducer, synchronously.
///
/// Intents are drained after every input and frame, applied to the
/// committed state and the resulting snapshot handed back to the screen,
/// the same round trip the state owner task makes.
pub struct Harness {
    pub screen: DeckScreen,
    pub state: CommittedState,
    pub applied: Vec<Intent>,
    pub refused: Vec<(Intent, DeckError)>,
    rx: mpsc::UnboundedReceiver<Intent>,
    clock_ms: f64,
}

impl Harness {
    pub fn new(names: &[&str]) -> Self {
        Self::with_config(names, DeckConfig::default())
    }

    pub fn with_config(names: &[&str], config: DeckConfig) -> Self {
        let state = CommittedState::from_source(&cards(names)).expect("seed cards are unique");
        let (tx, rx) = mpsc::unbounded_channel();
        let screen = DeckScreen::new(config, Arc::new(state.snapshot()), tx);
        Self {
            screen,
            state,
            applied: Vec::new(),
            refused: Vec::new(),
            rx,
            clock_ms: 0.0,
        }
    }

    pub fn pump(&mut self) {
        while let Ok(intent) = self.rx.try_recv() {
            match self.state.apply(intent.clone()) {
                Ok(_) => self.applied.push(intent),
                Err(err) => self.refused.push((intent, err)),
            }
        }
        self.screen.apply_snapshot(Arc::new(self.state.snapshot()));
    }

    pub fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.clock_ms += FRAME_MS as f64;
            self.screen.tick(FRAME_MS);
            self.pump();
        }
    }

    /// Straight-line drag from `from` by `delta` over `steps` moves.
    pub fn drag(&mut self, target: TouchTarget, from: (f32, f32), delta: (f32, f32), steps: usize) {
        self.clock_ms += FRAME_MS as f64;
        self.screen
            .pointer(target.clone(), PointerEvent::down(from.0, from.1, self.clock_ms));
        for i in 1..=steps {
            let f = i as f32 / steps as f32;
            self.clock_ms += FRAME_MS as f64;
            self.screen.pointer(
                target.clone(),
                PointerEvent::moved(from.0 + delta.0 * f, from.1 + delta.1 * f, self.clock_ms),
            );
        }
        self.clock_ms += FRAME_MS as f64;
        self.screen.pointer(
            target,
            PointerEvent::up(from.0 + delta.0, from.1 + delta.1, self.clock_ms),
        );
        self.pump();
    }

    pub fn tap(&mut self, target: TouchTarget) {
        self.drag(target, (200.0, 600.0), (0.0, 0.0), 0);
    }

    pub fn selected(&self) -> Vec<CardId> {
        self.state.registry().selected().to_vec()
    }

    pub fn available(&self) -> Vec<CardId> {
        self.state.registry().available().to_vec()
    }
}
