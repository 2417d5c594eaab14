//! Deck screen configuration: viewport metrics, gesture thresholds and motion.
//!
//! Every field has a default so a partial JSON document is enough:
//!
//! ```json
//! {"viewport_height": 932.0, "deck_swipe_threshold": 150.0}
//! ```
//!
//! Viewport metrics can additionally be overridden from the environment
//! (`DECK_VIEWPORT_WIDTH`, `DECK_VIEWPORT_HEIGHT`, `DECK_SAFE_AREA_TOP`), which
//! is how the simulator emulates different devices.

use std::env;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::warn;

use crate::domain::animation::SpringConfig;
use crate::errors::domain::DeckError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    // Viewport
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub safe_area_top: f32,
    pub nav_header_height: f32,
    /// Height of the collapsed deck dock.
    pub deck_height: f32,
    /// Padding above the first card of the expanded list.
    pub deck_padding_top: f32,
    /// Card height as a fraction of the viewport height.
    pub card_height_ratio: f32,

    // Stack geometry
    pub thumb_visible_height: f32,
    pub peek_per_card: f32,
    pub peek_card_count: usize,
    pub secondary_peek: f32,
    pub peek_per_card_expanded: f32,
    pub selected_card_top: f32,
    /// Cards below the active one are pushed to `viewport_height - offscreen_margin`.
    pub offscreen_margin: f32,
    pub inactive_opacity: f32,
    pub collapsed_scale_x: f32,
    pub mount_offset: f32,
    pub max_blur: f32,

    // Gesture thresholds (px, px/s)
    pub activation_distance: f32,
    pub swipe_fail_offset_x: f32,
    pub deck_swipe_threshold: f32,
    pub deck_velocity_threshold: f32,
    pub card_swipe_threshold: f32,
    pub card_swipe_velocity: f32,
    pub dismiss_threshold: f32,
    pub dismiss_velocity: f32,
    pub flip_drag_threshold: f32,
    pub flip_velocity: f32,

    // Motion
    pub spring: SpringConfig,
    pub quick_spring: SpringConfig,
    pub expand_duration_ms: f32,
    pub collapse_duration_ms: f32,
    pub deselect_duration_ms: f32,
    pub flick_deselect_duration_ms: f32,
    pub mount_duration_ms: f32,
    pub exit_duration_ms: f32,
    pub delete_duration_ms: f32,
    /// Exit travel when a card's on-screen position cannot be measured.
    pub exit_fallback_offset: f32,
    pub scroll_deceleration: f32,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            viewport_width: 390.0,
            viewport_height: 844.0,
            safe_area_top: 47.0,
            nav_header_height: 56.0,
            deck_height: 120.0,
            deck_padding_top: 12.0,
            card_height_ratio: 0.7,

            thumb_visible_height: 20.0,
            peek_per_card: 26.0,
            peek_card_count: 4,
            secondary_peek: 4.0,
            peek_per_card_expanded: 60.0,
            selected_card_top: 0.0,
            offscreen_margin: 120.0,
            inactive_opacity: 0.05,
            collapsed_scale_x: 0.95,
            mount_offset: 30.0,
            max_blur: 40.0,

            activation_distance: 10.0,
            swipe_fail_offset_x: 15.0,
            deck_swipe_threshold: 120.0,
            deck_velocity_threshold: 100.0,
            card_swipe_threshold: 120.0,
            card_swipe_velocity: 500.0,
            dismiss_threshold: 80.0,
            dismiss_velocity: 500.0,
            flip_drag_threshold: 80.0,
            flip_velocity: 500.0,

            spring: SpringConfig::gentle(),
            quick_spring: SpringConfig::quick(),
            expand_duration_ms: 600.0,
            collapse_duration_ms: 400.0,
            deselect_duration_ms: 500.0,
            flick_deselect_duration_ms: 400.0,
            mount_duration_ms: 500.0,
            exit_duration_ms: 500.0,
            delete_duration_ms: 300.0,
            exit_fallback_offset: 1000.0,
            scroll_deceleration: 0.998,
        }
    }
}

impl DeckConfig {
    /// Build a config from optional JSON, falling back to defaults field by field.
    pub fn from_json(config: Option<&JsonValue>) -> Result<Self, DeckError> {
        let parsed = match config {
            Some(json) => serde_json::from_value::<Self>(json.clone())
                .map_err(|e| DeckError::config(format!("invalid deck config: {e}")))?,
            None => Self::default(),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Apply viewport overrides from the environment.
    pub fn with_env_overrides(mut self) -> Result<Self, DeckError> {
        if let Some(v) = env_f32("DECK_VIEWPORT_WIDTH")? {
            self.viewport_width = v;
        }
        if let Some(v) = env_f32("DECK_VIEWPORT_HEIGHT")? {
            self.viewport_height = v;
        }
        if let Some(v) = env_f32("DECK_SAFE_AREA_TOP")? {
            self.safe_area_top = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        let non_negative = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("safe_area_top", self.safe_area_top),
            ("nav_header_height", self.nav_header_height),
            ("deck_height", self.deck_height),
            ("activation_distance", self.activation_distance),
            ("deck_swipe_threshold", self.deck_swipe_threshold),
            ("deck_velocity_threshold", self.deck_velocity_threshold),
            ("flip_drag_threshold", self.flip_drag_threshold),
            ("exit_fallback_offset", self.exit_fallback_offset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(DeckError::config(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.peek_card_count == 0 {
            return Err(DeckError::config("peek_card_count must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.inactive_opacity) {
            return Err(DeckError::config("inactive_opacity must be within [0, 1]"));
        }
        if !(0.0..1.0).contains(&self.scroll_deceleration) {
            return Err(DeckError::config("scroll_deceleration must be within [0, 1)"));
        }
        Ok(())
    }

    /// Header height: safe area plus navigation bar.
    pub fn header_height(&self) -> f32 {
        self.safe_area_top + self.nav_header_height
    }

    /// Height of the deck when fully expanded.
    pub fn expanded_deck_height(&self) -> f32 {
        self.viewport_height - self.header_height()
    }

    /// Finger travel that maps to the full expansion range.
    ///
    /// May be zero or negative on degenerate viewports; callers guard it.
    pub fn travel_distance(&self) -> f32 {
        self.viewport_height - self.deck_height - self.header_height()
    }

    /// Screen y of the collapsed deck's top edge.
    pub fn deck_top_y(&self) -> f32 {
        self.viewport_height - self.deck_height
    }

    pub fn card_height(&self) -> f32 {
        self.viewport_height * self.card_height_ratio
    }
}

fn env_f32(name: &str) -> Result<Option<f32>, DeckError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<f32>()
            .map(Some)
            .map_err(|e| DeckError::config(format!("{name}={raw:?} is not a number: {e}"))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            warn!(var = name, "ignoring non-unicode environment value");
            Ok(None)
        }
    }
}
