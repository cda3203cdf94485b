/// Seeded random traversal of a scene graph, for smoke-testing content.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::core::engine::{EngineError, NarrativeEngine};
use crate::schema::scene::SceneId;

const WORLD_NAMES: &[&str] = &[
    "Atlantis", "Terra", "Eldoria", "Vasthollow", "Mirrormere", "Kethra", "Solace",
];

/// Summary of a random walk.
#[derive(Debug, Clone, Default)]
pub struct WalkReport {
    pub steps: usize,
    /// Times the walk returned to the start scene.
    pub restarts: usize,
    pub names_given: usize,
    pub visited: FxHashSet<SceneId>,
}

/// Take `steps` random actions, naming the world whenever a scene asks.
///
/// The same seed always produces the same walk. Stops at the first error.
pub fn random_walk(
    engine: &mut NarrativeEngine,
    steps: usize,
    rng: &mut StdRng,
) -> Result<WalkReport, EngineError> {
    let mut report = WalkReport::default();
    report.visited.insert(engine.current_scene().clone());

    for _ in 0..steps {
        let view = engine.view()?;
        let next = if view.awaiting_name {
            let name = WORLD_NAMES.choose(rng).copied().unwrap_or("Terra");
            report.names_given += 1;
            engine.initialize(name)?
        } else {
            // An empty choice list is reported as an out-of-range index
            let index = if view.choices.is_empty() {
                0
            } else {
                rng.gen_range(0..view.choices.len())
            };
            engine.apply_choice(index)?
        };

        debug!(scene = %next.scene, "walk step");
        if &next.scene == engine.start_scene() {
            report.restarts += 1;
        }
        report.visited.insert(next.scene);
        report.steps += 1;
    }

    Ok(report)
}
