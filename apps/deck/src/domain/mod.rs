//! Domain layer: card collections, animation primitives, controllers, gestures and layout.

pub mod animation;
pub mod cards;
pub mod easing;
pub mod expansion;
pub mod gesture;
pub mod intent;
pub mod layout;
pub mod migration;
pub mod registry;
pub mod scroll;
pub mod selection;
pub mod transient;

#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_expansion;
#[cfg(test)]
mod tests_layout;
#[cfg(test)]
mod tests_migration;
#[cfg(test)]
mod tests_props_progress;
#[cfg(test)]
mod tests_selection;

// Re-exports for ergonomics
pub use animation::{AnimatedValue, AnimationId, Completion, SpringConfig};
pub use cards::{Card, CardId, ColorPair};
pub use expansion::{DeckSide, DragOutcome, ExpansionController};
pub use gesture::{GestureEvent, GestureKind, GestureRace, PointerEvent, PointerPhase};
pub use intent::{HapticFeedback, ImpactStyle, Intent};
pub use layout::{CardFace, CardTransform, ChromeTransform, PagerCardTransform};
pub use registry::{CardRegistry, Collection};
pub use selection::{DeselectTrigger, FlipDirection, SelectionController};
