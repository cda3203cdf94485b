use serde::{Deserialize, Serialize};
use tracing::debug;

use super::world::WorldState;

/// A state mutation carried by a choice.
///
/// The vocabulary is closed: label fields are overwritten, counters are
/// accumulated. Counters saturate instead of overflowing so that applying
/// an effect list can never fail halfway through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    SetResources(String),
    SetCulture(String),
    AddPopulation(u64),
    AddImpact(u64),
}

impl Effect {
    /// Apply this effect to the given world.
    pub fn apply(&self, world: &mut WorldState) {
        match self {
            Self::SetResources(label) => world.resources = label.clone(),
            Self::SetCulture(label) => world.culture = label.clone(),
            Self::AddPopulation(n) => world.population = world.population.saturating_add(*n),
            Self::AddImpact(n) => world.impact = world.impact.saturating_add(*n),
        }
    }

    /// Apply a list of effects in declared order.
    pub fn apply_all(effects: &[Effect], world: &mut WorldState) {
        for effect in effects {
            effect.apply(world);
            debug!(?effect, "effect applied");
        }
    }
}
