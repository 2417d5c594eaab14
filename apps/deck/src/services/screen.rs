//! Animation-side driver for the deck screen.
//!
//! `DeckScreen` owns every continuous value (expansion, selection, scroll,
//! per-card drag/flip/mount and pager swipes), runs the gesture race for the
//! current touch and computes the frame layout. It never blocks: discrete
//! commits are queued as `Intent`s and flushed to the state owner after each
//! input or tick.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::DeckConfig;
use crate::domain::animation::AnimatedValue;
use crate::domain::cards::CardId;
use crate::domain::easing::Easing;
use crate::domain::expansion::{DeckSide, DragOutcome, ExpansionController};
use crate::domain::gesture::{
    GestureEvent, GestureKind, GestureRace, GestureSample, PanRecognizer, PointerEvent,
    PointerPhase, Recognizer, TapRecognizer,
};
use crate::domain::intent::Intent;
use crate::domain::layout::{
    card_transform, chrome_transform, max_scroll_offset, CardMotion, CardTransform,
    ChromeTransform, PagerCardTransform, StackParams,
};
use crate::domain::migration::{end_swipe, pager_card_transform, update_swipe, SwipeOutcome};
use crate::domain::scroll::ScrollState;
use crate::domain::selection::{DeselectTrigger, SelectionController};
use crate::domain::transient::{CardTransient, ExitFinished, PagerCardState};
use crate::errors::domain::DeckError;
use crate::services::committed::DeckSnapshot;

/// What a pointer-down landed on, as hit-tested by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TouchTarget {
    Pager(CardId),
    /// The deck container, optionally over a specific card.
    Deck(Option<CardId>),
    Background,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckCardFrame {
    pub card: CardId,
    pub transform: CardTransform,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagerCardFrame {
    pub card: CardId,
    pub transform: PagerCardTransform,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameLayout {
    pub chrome: ChromeTransform,
    pub deck: Vec<DeckCardFrame>,
    pub pager: Vec<PagerCardFrame>,
}

#[derive(Debug)]
struct Touch {
    target: TouchTarget,
    race: GestureRace,
    /// Set once the winning pan has run `begin`.
    began: bool,
    deck_from_expanded: bool,
}

#[derive(Debug)]
pub struct DeckScreen {
    config: DeckConfig,
    snapshot: Arc<DeckSnapshot>,
    expansion: ExpansionController,
    selection: SelectionController,
    scroll: ScrollState,
    deck_cards: HashMap<CardId, CardTransient>,
    pager_cards: HashMap<CardId, PagerCardState>,
    pager_dragging: AnimatedValue,
    touch: Option<Touch>,
    outbox: Vec<Intent>,
    intents: mpsc::UnboundedSender<Intent>,
}

impl DeckScreen {
    pub fn new(
        config: DeckConfig,
        snapshot: Arc<DeckSnapshot>,
        intents: mpsc::UnboundedSender<Intent>,
    ) -> Self {
        let mut screen = Self {
            expansion: ExpansionController::new(&config),
            selection: SelectionController::new(&config),
            scroll: ScrollState::new(),
            deck_cards: HashMap::new(),
            pager_cards: HashMap::new(),
            pager_dragging: AnimatedValue::new(0.0),
            touch: None,
            outbox: Vec::new(),
            intents,
            snapshot,
            config,
        };
        screen.reconcile();
        screen
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &Arc<DeckSnapshot> {
        &self.snapshot
    }

    pub fn expansion_progress(&self) -> f32 {
        self.expansion.progress()
    }

    pub fn is_expanded(&self) -> bool {
        self.expansion.is_expanded()
    }

    pub fn selection_progress(&self) -> f32 {
        self.selection.progress()
    }

    pub fn active_card(&self) -> Option<&CardId> {
        self.selection.active()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn max_scroll_offset(&self) -> f32 {
        self.scroll.max_offset()
    }

    pub fn flip_angle(&self, card: &CardId) -> Option<f32> {
        self.deck_cards.get(card).map(|t| t.flip_angle.value())
    }

    /// A touch sequence is in progress.
    pub fn is_touching(&self) -> bool {
        self.touch.is_some()
    }

    /// Adopt a newer committed snapshot; older or equal versions are ignored.
    pub fn apply_snapshot(&mut self, snapshot: Arc<DeckSnapshot>) {
        if snapshot.version <= self.snapshot.version {
            return;
        }
        debug!(version = snapshot.version, "snapshot adopted");
        self.snapshot = snapshot;
        self.reconcile();
    }

    /// Record where layout placed a pager card's top edge.
    pub fn report_pager_card_top(&mut self, card: &CardId, top: f32) {
        if let Some(state) = self.pager_cards.get_mut(card) {
            state.measured_top = Some(top);
        }
    }

    /// Out-of-band delete (context menu): play the exit, then return the card.
    pub fn request_delete(&mut self, card: &CardId) -> Result<(), DeckError> {
        if self.selection.active() == Some(card) {
            return Err(DeckError::CardActive(card.clone()));
        }
        let transient = self
            .deck_cards
            .get_mut(card)
            .ok_or_else(|| DeckError::NotSelected(card.clone()))?;
        if transient.begin_exit(self.config.delete_duration_ms) {
            debug!(card = %card, "delete exit started");
        }
        Ok(())
    }

    /// Header back control.
    pub fn go_back(&mut self) {
        self.outbox.push(Intent::GoBack);
        self.flush();
    }

    /// Feed one pointer event for the sequence that started on `target`.
    pub fn pointer(&mut self, target: TouchTarget, event: PointerEvent) {
        if event.phase == PointerPhase::Down {
            // A sequence that never saw its pointer-up is cancelled, not abandoned.
            if let Some(mut stale) = self.touch.take() {
                if let Some(kind) = stale.race.active_pan() {
                    debug!(?kind, "unfinished gesture cancelled by new touch");
                    self.route(&mut stale, GestureEvent::Cancelled(kind));
                }
            }
            self.touch = self.start_touch(target);
        }
        let Some(mut touch) = self.touch.take() else {
            return;
        };
        if let Some(gesture) = touch.race.handle(&event) {
            self.route(&mut touch, gesture);
        }
        if !matches!(event.phase, PointerPhase::Up | PointerPhase::Cancel) {
            self.touch = Some(touch);
        }
        self.flush();
    }

    /// Advance every animation by `dt_ms` and post the commits that finished.
    pub fn tick(&mut self, dt_ms: f32) {
        self.expansion.tick(dt_ms, &mut self.outbox);
        self.selection.tick(dt_ms, &mut self.outbox);
        self.scroll.tick(dt_ms);
        self.pager_dragging.tick(dt_ms);

        for card in &self.snapshot.selected {
            if let Some(transient) = self.deck_cards.get_mut(card) {
                if transient.tick(dt_ms) == Some(ExitFinished) {
                    self.outbox.push(Intent::DeleteCard { card: card.clone() });
                }
            }
        }
        let mut filed = false;
        for card in &self.snapshot.available {
            if let Some(state) = self.pager_cards.get_mut(card) {
                if state.tick(dt_ms) == Some(ExitFinished) {
                    self.outbox.push(Intent::FileCard { card: card.clone() });
                    filed = true;
                }
            }
        }
        if filed {
            self.pager_dragging.set(0.0);
        }
        self.flush();
    }

    pub fn chrome(&self) -> ChromeTransform {
        chrome_transform(
            &self.config,
            self.expansion.progress(),
            self.pager_dragging.value(),
        )
    }

    pub fn layout(&self) -> FrameLayout {
        FrameLayout {
            chrome: self.chrome(),
            deck: self.deck_layout(),
            pager: self.pager_layout(),
        }
    }

    pub fn deck_layout(&self) -> Vec<DeckCardFrame> {
        let selected = &self.snapshot.selected;
        let params = StackParams {
            count: selected.len(),
            expansion: self.expansion.progress(),
            selection: self.selection.progress(),
            scroll_offset: self.scroll.offset(),
            active_index: self
                .selection
                .active()
                .and_then(|card| self.snapshot.selected_index(card)),
        };
        selected
            .iter()
            .enumerate()
            .map(|(index, card)| {
                let motion = self
                    .deck_cards
                    .get(card)
                    .map(|t| CardMotion {
                        drag_offset_y: t.drag_offset_y.value(),
                        drag_offset_x: t.drag_offset_x.value(),
                        flip_angle: t.flip_angle.value(),
                        mount_progress: t.mount_progress.value(),
                    })
                    .unwrap_or_default();
                DeckCardFrame {
                    card: card.clone(),
                    transform: card_transform(&self.config, index, &params, &motion),
                }
            })
            .collect()
    }

    pub fn pager_layout(&self) -> Vec<PagerCardFrame> {
        self.snapshot
            .available
            .iter()
            .filter_map(|card| {
                self.pager_cards.get(card).map(|state| PagerCardFrame {
                    card: card.clone(),
                    transform: pager_card_transform(state),
                })
            })
            .collect()
    }

    fn reconcile(&mut self) {
        let snapshot = Arc::clone(&self.snapshot);
        self.deck_cards.retain(|id, _| snapshot.selected.contains(id));
        for id in &snapshot.selected {
            if !self.deck_cards.contains_key(id) {
                self.deck_cards
                    .insert(id.clone(), CardTransient::mounting(&self.config));
            }
        }
        self.pager_cards.retain(|id, _| snapshot.available.contains(id));
        for id in &snapshot.available {
            self.pager_cards.entry(id.clone()).or_default();
        }
        self.scroll
            .set_max_offset(max_scroll_offset(&self.config, snapshot.selected.len()));
    }

    fn start_touch(&self, target: TouchTarget) -> Option<Touch> {
        let activation = self.config.activation_distance;
        let recognizers = match &target {
            TouchTarget::Pager(card) => {
                let swipeable = self.expansion.progress() < 0.5
                    && self
                        .pager_cards
                        .get(card)
                        .is_some_and(|state| !state.is_exiting());
                if !swipeable {
                    return None;
                }
                vec![(
                    GestureKind::SwipeToFile,
                    Recognizer::Pan(
                        PanRecognizer::vertical(activation)
                            .fail_across(self.config.swipe_fail_offset_x),
                    ),
                )]
            }
            TouchTarget::Deck(card) => {
                let on_active = card.is_some() && card.as_ref() == self.selection.active();
                if on_active && self.selection.is_interactive() {
                    vec![
                        (
                            GestureKind::CardDismiss,
                            Recognizer::Pan(PanRecognizer::vertical(activation)),
                        ),
                        (
                            GestureKind::CardFlip,
                            Recognizer::Pan(PanRecognizer::horizontal(activation)),
                        ),
                        (
                            GestureKind::CardTap,
                            Recognizer::Tap(TapRecognizer::new(activation)),
                        ),
                    ]
                } else {
                    // Deck-level pan is off while any card is active.
                    let deck_pan = self.selection.active().is_none();
                    vec![
                        (
                            GestureKind::DeckPan,
                            Recognizer::Pan(PanRecognizer::vertical(activation).enabled(deck_pan)),
                        ),
                        (
                            GestureKind::DeckTap,
                            Recognizer::Tap(TapRecognizer::new(activation)),
                        ),
                    ]
                }
            }
            TouchTarget::Background => return None,
        };
        Some(Touch {
            target,
            race: GestureRace::new(recognizers),
            began: false,
            deck_from_expanded: false,
        })
    }

    fn route(&mut self, touch: &mut Touch, gesture: GestureEvent) {
        match gesture {
            GestureEvent::Began(kind, sample) => {
                self.begin(touch, kind);
                self.update(touch, kind, sample);
            }
            GestureEvent::Updated(kind, sample) => self.update(touch, kind, sample),
            GestureEvent::Ended(kind, sample) => {
                // A pan can activate on the release itself and arrive here unannounced.
                if !touch.began {
                    self.begin(touch, kind);
                    self.update(touch, kind, sample);
                }
                let committed = self.end(touch, kind, sample);
                touch.race.finish(committed);
            }
            GestureEvent::Cancelled(kind) => {
                self.end(touch, kind, GestureSample::default());
            }
            GestureEvent::Tapped(kind) => self.tap(&touch.target, kind),
        }
    }

    fn begin(&mut self, touch: &mut Touch, kind: GestureKind) {
        touch.began = true;
        match kind {
            GestureKind::DeckPan => {
                touch.deck_from_expanded = self.expansion.begin_drag();
                if touch.deck_from_expanded {
                    self.scroll.begin_drag();
                }
            }
            GestureKind::SwipeToFile => self.pager_dragging.set(1.0),
            GestureKind::CardDismiss | GestureKind::CardFlip => {}
            GestureKind::DeckTap | GestureKind::CardTap => {}
        }
    }

    fn update(&mut self, touch: &Touch, kind: GestureKind, s: GestureSample) {
        match kind {
            GestureKind::DeckPan => {
                if touch.deck_from_expanded {
                    let over = self.scroll.drag(s.dy);
                    self.expansion.update_drag(over, true);
                } else {
                    self.expansion.update_drag(s.dy, false);
                }
            }
            GestureKind::SwipeToFile => {
                if let TouchTarget::Pager(card) = &touch.target {
                    if let Some(state) = self.pager_cards.get_mut(card) {
                        update_swipe(&self.config, state, s.dy);
                    }
                }
            }
            GestureKind::CardDismiss => {
                if let Some(card) = self.active_transient() {
                    card.drag_offset_y.set(s.dy);
                }
            }
            GestureKind::CardFlip => {
                let threshold = self.config.flip_drag_threshold;
                if let Some(active) = self.selection.active().cloned() {
                    if let Some(card) = self.deck_cards.get_mut(&active) {
                        self.selection
                            .preview_flip(&mut card.flip_angle, s.dx, threshold);
                    }
                }
            }
            GestureKind::DeckTap | GestureKind::CardTap => {}
        }
    }

    /// Returns whether the gesture committed.
    fn end(&mut self, touch: &Touch, kind: GestureKind, s: GestureSample) -> bool {
        match kind {
            GestureKind::DeckPan => self.end_deck_pan(touch.deck_from_expanded, s),
            GestureKind::SwipeToFile => {
                let TouchTarget::Pager(card) = &touch.target else {
                    return false;
                };
                let Some(state) = self.pager_cards.get_mut(card) else {
                    return false;
                };
                match end_swipe(&self.config, state, s.dy, s.vy) {
                    SwipeOutcome::Filing { .. } => true,
                    SwipeOutcome::Reverted => {
                        self.pager_dragging.timing(
                            0.0,
                            self.config.exit_duration_ms,
                            Easing::CUBIC_OUT,
                        );
                        false
                    }
                }
            }
            GestureKind::CardDismiss => {
                let flick = s.dy > self.config.dismiss_threshold || s.vy > self.config.dismiss_velocity;
                let (spring, flick_ms) = (self.config.spring, self.config.flick_deselect_duration_ms);
                let Some(active) = self.selection.active().cloned() else {
                    return false;
                };
                let Some(card) = self.deck_cards.get_mut(&active) else {
                    return false;
                };
                if flick {
                    card.drag_offset_y.timing(0.0, flick_ms, Easing::CUBIC_OUT);
                    if let Err(err) = self
                        .selection
                        .deselect(Some(&mut card.flip_angle), DeselectTrigger::Flick)
                    {
                        debug!(error = %err, "dismiss ignored");
                    }
                } else {
                    card.drag_offset_y.spring(0.0, spring);
                }
                flick
            }
            GestureKind::CardFlip => {
                let (threshold, velocity) =
                    (self.config.flip_drag_threshold, self.config.flip_velocity);
                let Some(active) = self.selection.active().cloned() else {
                    return false;
                };
                let Some(card) = self.deck_cards.get_mut(&active) else {
                    return false;
                };
                self.selection
                    .end_flip_drag(&mut card.flip_angle, s.dx, s.vx, threshold, velocity)
                    .is_some()
            }
            GestureKind::DeckTap | GestureKind::CardTap => false,
        }
    }

    fn end_deck_pan(&mut self, from_expanded: bool, s: GestureSample) -> bool {
        if !from_expanded {
            let outcome = self.expansion.end_drag(s.dy, s.vy, &mut self.outbox);
            return matches!(outcome, DragOutcome::Commit(_));
        }
        let over = self.scroll.over_drag(s.dy);
        if over > 0.0 {
            let outcome = self.expansion.end_drag(over, s.vy, &mut self.outbox);
            match outcome {
                DragOutcome::Commit(DeckSide::Collapsed) => {
                    self.scroll.settle_to_top(self.config.collapse_duration_ms);
                    true
                }
                _ => {
                    self.scroll.spring_to_top(self.config.spring);
                    false
                }
            }
        } else {
            // Released inside the content: keep the deck open and let the list coast.
            self.expansion.end_drag(0.0, 0.0, &mut self.outbox);
            self.scroll.fling(s.vy, self.config.scroll_deceleration);
            false
        }
    }

    fn tap(&mut self, target: &TouchTarget, kind: GestureKind) {
        match kind {
            GestureKind::CardTap => {
                let Some(active) = self.selection.active().cloned() else {
                    return;
                };
                let flip = self.deck_cards.get_mut(&active).map(|t| &mut t.flip_angle);
                if let Err(err) = self.selection.deselect(flip, DeselectTrigger::Tap) {
                    debug!(error = %err, "deselect ignored");
                }
            }
            GestureKind::DeckTap => {
                if self.expansion.progress() < 0.5 {
                    self.expansion.tap_to_expand(&mut self.outbox);
                    return;
                }
                let TouchTarget::Deck(Some(card)) = target else {
                    return;
                };
                if self.deck_cards.get(card).is_some_and(|t| t.is_exiting()) {
                    return;
                }
                if let Err(err) = self.selection.select(card.clone(), &mut self.outbox) {
                    debug!(error = %err, card = %card, "select refused");
                }
            }
            _ => {}
        }
    }

    fn active_transient(&mut self) -> Option<&mut CardTransient> {
        let active = self.selection.active()?.clone();
        self.deck_cards.get_mut(&active)
    }

    fn flush(&mut self) {
        for intent in self.outbox.drain(..) {
            if self.intents.send(intent).is_err() {
                warn!("state owner gone; intent dropped");
            }
        }
    }
}
