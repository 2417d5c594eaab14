//! Application-side committed state and the task that owns it.
//!
//! The state owner is the only consumer of `Intent`s. It applies each one
//! through `CommittedState::apply`, runs the resulting effects and publishes
//! an immutable `DeckSnapshot` whenever the committed state changed.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::domain::cards::{Card, CardId};
use crate::domain::intent::{HapticFeedback, Intent};
use crate::domain::registry::CardRegistry;
use crate::errors::domain::DeckError;
use crate::services::ports::{CardSource, HapticSink, Navigator};

/// Immutable view of committed state published to the animation side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckSnapshot {
    /// Bumped on every committed change.
    pub version: u64,
    pub available: Vec<CardId>,
    pub selected: Vec<CardId>,
    pub is_expanded: bool,
    pub active_card: Option<CardId>,
}

impl DeckSnapshot {
    pub fn selected_index(&self, card: &CardId) -> Option<usize> {
        self.selected.iter().position(|c| c == card)
    }
}

/// Side effect requested by an intent, performed by the state owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Haptic(HapticFeedback),
    GoBack,
}

#[derive(Debug, Clone)]
pub struct CommittedState {
    registry: CardRegistry,
    is_expanded: bool,
    active_card: Option<CardId>,
    version: u64,
}

impl CommittedState {
    pub fn new(registry: CardRegistry) -> Self {
        Self {
            registry,
            is_expanded: false,
            active_card: None,
            version: 0,
        }
    }

    pub fn from_source(source: &dyn CardSource) -> Result<Self, DeckError> {
        Ok(Self::new(CardRegistry::new(source.load_cards())?))
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.registry.card(id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn snapshot(&self) -> DeckSnapshot {
        DeckSnapshot {
            version: self.version,
            available: self.registry.available().to_vec(),
            selected: self.registry.selected().to_vec(),
            is_expanded: self.is_expanded,
            active_card: self.active_card.clone(),
        }
    }

    /// Apply one intent. A refused intent leaves the state untouched.
    pub fn apply(&mut self, intent: Intent) -> Result<Vec<Effect>, DeckError> {
        let effects = match intent {
            Intent::FileCard { card } => {
                self.registry.move_to_selected(&card)?;
                self.bump();
                vec![Effect::Haptic(HapticFeedback::Success)]
            }
            Intent::DeleteCard { card } => {
                if self.active_card.as_ref() == Some(&card) {
                    return Err(DeckError::CardActive(card));
                }
                self.registry.move_to_available(&card)?;
                self.bump();
                Vec::new()
            }
            Intent::SetExpanded { expanded } => {
                if self.is_expanded != expanded {
                    self.is_expanded = expanded;
                    self.bump();
                }
                Vec::new()
            }
            Intent::ActivateCard { card } => {
                if self.registry.selected().iter().all(|c| *c != card) {
                    return Err(DeckError::NotSelected(card));
                }
                if self.active_card.as_ref() != Some(&card) {
                    self.active_card = Some(card);
                    self.bump();
                }
                Vec::new()
            }
            Intent::ClearActiveCard => {
                if self.active_card.take().is_some() {
                    self.bump();
                }
                Vec::new()
            }
            Intent::Haptic { feedback } => vec![Effect::Haptic(feedback)],
            Intent::GoBack => vec![Effect::GoBack],
        };
        debug_assert!(self.registry.check_partition().is_ok());
        Ok(effects)
    }

    fn bump(&mut self) {
        self.version += 1;
    }
}

/// Handle to a running state owner task.
#[derive(Debug)]
pub struct StateOwnerHandle {
    intents: mpsc::UnboundedSender<Intent>,
    snapshots: watch::Receiver<Arc<DeckSnapshot>>,
    task: JoinHandle<CommittedState>,
}

impl StateOwnerHandle {
    pub fn intents(&self) -> mpsc::UnboundedSender<Intent> {
        self.intents.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DeckSnapshot>> {
        self.snapshots.clone()
    }

    pub fn latest(&self) -> Arc<DeckSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// Wait until the owner has published a snapshot of at least `version`.
    pub async fn wait_for_version(&mut self, version: u64) -> Result<Arc<DeckSnapshot>, DeckError> {
        let snapshot = self
            .snapshots
            .wait_for(|s| s.version >= version)
            .await
            .map_err(|_| DeckError::StateOwnerClosed)?;
        Ok(snapshot.clone())
    }

    /// Close this handle's sender and wait for the task to drain.
    ///
    /// The task ends once every sender (including clones held by a screen)
    /// has been dropped.
    pub async fn shutdown(self) -> Result<CommittedState, DeckError> {
        drop(self.intents);
        self.task.await.map_err(|_| DeckError::StateOwnerClosed)
    }
}

/// Spawn the state owner on the current tokio runtime.
pub fn spawn_state_owner(
    state: CommittedState,
    haptics: Arc<dyn HapticSink>,
    navigator: Arc<dyn Navigator>,
) -> StateOwnerHandle {
    let (intents, mut rx) = mpsc::unbounded_channel::<Intent>();
    let (publisher, snapshots) = watch::channel(Arc::new(state.snapshot()));

    let task = tokio::spawn(async move {
        let mut state = state;
        while let Some(intent) = rx.recv().await {
            let before = state.version();
            match state.apply(intent.clone()) {
                Ok(effects) => {
                    for effect in effects {
                        match effect {
                            Effect::Haptic(feedback) => haptics.play(feedback),
                            Effect::GoBack => navigator.go_back(),
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, ?intent, "intent refused");
                    continue;
                }
            }
            if state.version() != before {
                debug!(version = state.version(), ?intent, "publishing snapshot");
                // Receivers may all be gone; the owner keeps running for its senders.
                publisher.send_replace(Arc::new(state.snapshot()));
            }
        }
        info!(version = state.version(), "state owner stopped");
        state
    });

    StateOwnerHandle {
        intents,
        snapshots,
        task,
    }
}
