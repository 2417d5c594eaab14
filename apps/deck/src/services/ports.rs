//! Collaborators outside the engine: where cards come from, haptic hardware,
//! and platform navigation.

use tracing::info;

use crate::domain::cards::Card;
use crate::domain::intent::{HapticFeedback, ImpactStyle};

/// Initial ordered card list, consumed once at screen mount.
pub trait CardSource {
    fn load_cards(&self) -> Vec<Card>;
}

/// Fire-and-forget haptic output.
pub trait HapticSink: Send + Sync {
    fn success(&self);
    fn impact(&self, style: ImpactStyle);

    fn play(&self, feedback: HapticFeedback) {
        match feedback {
            HapticFeedback::Success => self.success(),
            HapticFeedback::Impact(style) => self.impact(style),
        }
    }
}

pub trait Navigator: Send + Sync {
    fn go_back(&self);
}

/// Card source over an in-memory list.
#[derive(Debug, Clone, Default)]
pub struct StaticCards(pub Vec<Card>);

impl CardSource for StaticCards {
    fn load_cards(&self) -> Vec<Card> {
        self.0.clone()
    }
}

/// Haptic sink that only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHaptics;

impl HapticSink for TracingHaptics {
    fn success(&self) {
        info!(event = "HAPTIC", kind = "success", "haptic feedback");
    }

    fn impact(&self, style: ImpactStyle) {
        info!(event = "HAPTIC", kind = "impact", ?style, "haptic feedback");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn go_back(&self) {
        info!(event = "NAVIGATE_BACK", "navigation requested");
    }
}
