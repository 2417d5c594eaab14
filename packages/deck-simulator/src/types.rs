//! Shared types for the simulator.

use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Seeded random gestures.
    Random,
    /// Swipe, expand, select, flip, dismiss and delete the first card.
    Showcase,
}
