use serde::{Deserialize, Serialize};

use crate::domain::cards::CardId;

/// Strength of an impact haptic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStyle {
    Light,
    Medium,
}

/// Fire-and-forget haptic notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "style", rename_all = "snake_case")]
pub enum HapticFeedback {
    Success,
    Impact(ImpactStyle),
}

/// Discrete transition posted from the animation side to the state owner.
///
/// Every variant except `Haptic` and `GoBack` is posted only from a finished
/// animation completion (or, for `ActivateCard`, at the moment a zoom-in
/// commits).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Swipe-to-file exit finished: move the card into the deck.
    FileCard { card: CardId },
    /// Delete exit finished: move the card back to the pager.
    DeleteCard { card: CardId },
    /// Expansion settle finished at 0 or 1.
    SetExpanded { expanded: bool },
    ActivateCard { card: CardId },
    /// Zoom-out settle finished.
    ClearActiveCard,
    Haptic { feedback: HapticFeedback },
    GoBack,
}
