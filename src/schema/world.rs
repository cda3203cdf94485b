use serde::{Deserialize, Serialize};

/// Sentinel world name shown before the player names their world.
pub const UNKNOWN_NAME: &str = "[unknown]";
/// Resource label before any geography has been chosen.
pub const NO_RESOURCES: &str = "none";
/// Culture label before any philosophy has been chosen.
pub const EMPTY_CULTURE: &str = "empty";

/// The founded world's statistics, carried across one play session.
///
/// `resources` and `culture` are overwritten by effects, never merged.
/// `population` and `impact` only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub name: String,
    pub population: u64,
    pub resources: String,
    pub culture: String,
    pub impact: u64,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            name: UNKNOWN_NAME.to_string(),
            population: 0,
            resources: NO_RESOURCES.to_string(),
            culture: EMPTY_CULTURE.to_string(),
            impact: 0,
        }
    }
}

impl WorldState {
    /// Returns true if every field still holds its default value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Restore all fields to their defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
