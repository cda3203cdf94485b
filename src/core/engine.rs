/// The narrative engine: owns the world state and the current-scene pointer
/// and mediates every transition through the scene graph.

use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::core::catalog::{CatalogError, Scene, SceneCatalog};
use crate::core::view::{ChoiceView, View};
use crate::schema::effect::Effect;
use crate::schema::scene::SceneId;
use crate::schema::world::WorldState;

pub const DEFAULT_START_SCENE: &str = "start";
pub const DEFAULT_FOUNDING_SCENE: &str = "geography_choice";
pub const DEFAULT_INITIAL_POPULATION: u64 = 100;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("world name must not be empty")]
    InvalidName,
    #[error("choice index {index} is out of range for scene '{scene}' ({available} choices)")]
    InvalidChoiceIndex {
        scene: SceneId,
        index: usize,
        available: usize,
    },
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),
    #[error("required scene '{0}' is not defined")]
    MissingScene(SceneId),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// A single play session over a scene catalog. Built via `NarrativeEngine::builder()`.
#[derive(Debug, Clone)]
pub struct NarrativeEngine {
    catalog: SceneCatalog,
    world: WorldState,
    current: SceneId,
    start: SceneId,
    founding: SceneId,
    initial_population: u64,
    outcome: Option<String>,
}

/// Builder for constructing a `NarrativeEngine`.
pub struct NarrativeEngineBuilder {
    scenes_file: Option<String>,
    founding_content: bool,
    start: String,
    founding: String,
    initial_population: u64,
    /// Directly provided scenes (for testing without files).
    catalog: Option<SceneCatalog>,
}

impl NarrativeEngine {
    pub fn builder() -> NarrativeEngineBuilder {
        NarrativeEngineBuilder {
            scenes_file: None,
            founding_content: false,
            start: DEFAULT_START_SCENE.to_string(),
            founding: DEFAULT_FOUNDING_SCENE.to_string(),
            initial_population: DEFAULT_INITIAL_POPULATION,
            catalog: None,
        }
    }

    /// Name the world and begin the founding.
    ///
    /// The world is restored to defaults first, so this behaves the same
    /// whether it is the first run of the session or a replay.
    pub fn initialize(&mut self, world_name: &str) -> Result<View, EngineError> {
        let name = world_name.trim();
        if name.is_empty() {
            debug!("rejected empty world name");
            return Err(EngineError::InvalidName);
        }

        let mut world = WorldState::default();
        world.name = name.to_string();
        world.population = self.initial_population;

        info!(world = name, scene = %self.founding, "world founded");
        self.world = world;
        self.current = self.founding.clone();
        self.outcome = None;
        self.view()
    }

    /// Take the choice at `index` in the current scene.
    ///
    /// Either the whole transition happens (effects, outcome, new scene)
    /// or nothing changes.
    pub fn apply_choice(&mut self, index: usize) -> Result<View, EngineError> {
        let scene = self.scene(&self.current)?;
        let Some(choice) = scene.choices.get(index) else {
            error!(
                scene = %self.current,
                index,
                available = scene.choices.len(),
                "choice index out of range"
            );
            return Err(EngineError::InvalidChoiceIndex {
                scene: self.current.clone(),
                index,
                available: scene.choices.len(),
            });
        };

        if !self.catalog.contains(&choice.destination) {
            error!(
                scene = %self.current,
                index,
                destination = %choice.destination,
                "choice leads to an undefined scene"
            );
            return Err(EngineError::UnknownScene(choice.destination.clone()));
        }

        let mut staged = self.world.clone();
        if self.current == self.start && !staged.is_default() {
            info!("leaving start with a finished world; restoring defaults");
            staged.reset();
        }
        Effect::apply_all(&choice.effects, &mut staged);
        let outcome = choice.outcome.as_ref().map(|t| t.render(&staged));
        let destination = choice.destination.clone();

        debug!(
            from = %self.current,
            to = %destination,
            effects = choice.effects.len(),
            "transition"
        );
        self.world = staged;
        self.current = destination;
        self.outcome = outcome;
        self.view()
    }

    /// Return to the start scene, restoring the world if it has been touched.
    pub fn reset_to_start(&mut self) -> Result<View, EngineError> {
        if !self.world.is_default() {
            info!(world = %self.world.name, "resetting world to defaults");
            self.world.reset();
        }
        self.current = self.start.clone();
        self.outcome = None;
        self.view()
    }

    /// Project the current scene for rendering. Does not mutate anything.
    pub fn view(&self) -> Result<View, EngineError> {
        let scene = self.scene(&self.current)?;
        Ok(View {
            scene: self.current.clone(),
            outcome: self.outcome.clone(),
            text: scene.text.render(&self.world),
            choices: scene
                .choices
                .iter()
                .enumerate()
                .map(|(index, c)| ChoiceView {
                    index,
                    label: c.label.clone(),
                })
                .collect(),
            awaiting_name: scene.awaits_name,
            state: self.world.clone(),
        })
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn current_scene(&self) -> &SceneId {
        &self.current
    }

    pub fn start_scene(&self) -> &SceneId {
        &self.start
    }

    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    fn scene(&self, id: &SceneId) -> Result<&Scene, EngineError> {
        self.catalog.get_scene(id).map_err(|e| match e {
            CatalogError::UnknownScene(id) => {
                error!(scene = %id, "engine is pointing at an undefined scene");
                EngineError::UnknownScene(id)
            }
            other => EngineError::Catalog(other),
        })
    }
}

impl NarrativeEngineBuilder {
    /// Load scenes from a RON file.
    pub fn scenes_file(mut self, path: &str) -> Self {
        self.scenes_file = Some(path.to_string());
        self
    }

    /// Include the built-in founding story beneath any other scenes.
    pub fn with_founding_content(mut self) -> Self {
        self.founding_content = true;
        self
    }

    pub fn start_scene(mut self, id: &str) -> Self {
        self.start = id.to_string();
        self
    }

    /// The scene the engine moves to once the world has been named.
    pub fn founding_scene(mut self, id: &str) -> Self {
        self.founding = id.to_string();
        self
    }

    pub fn initial_population(mut self, population: u64) -> Self {
        self.initial_population = population;
        self
    }

    /// Provide scenes directly (for testing without files).
    pub fn with_catalog(mut self, catalog: SceneCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<NarrativeEngine, EngineError> {
        let use_founding =
            self.founding_content || (self.catalog.is_none() && self.scenes_file.is_none());

        let mut catalog = if use_founding {
            SceneCatalog::founding()?
        } else {
            SceneCatalog::new()
        };

        if let Some(provided) = self.catalog {
            catalog.merge(provided);
        }

        // File scenes override everything else
        if let Some(ref path) = self.scenes_file {
            catalog.merge(SceneCatalog::load_from_ron(Path::new(path))?);
        }

        let start = SceneId(self.start);
        let founding = SceneId(self.founding);
        for required in [&start, &founding] {
            if !catalog.contains(required) {
                return Err(EngineError::MissingScene(required.clone()));
            }
        }

        for issue in catalog.validate(&start, &founding) {
            warn!(%issue, "scene catalog issue");
        }

        Ok(NarrativeEngine {
            catalog,
            world: WorldState::default(),
            current: start.clone(),
            start,
            founding,
            initial_population: self.initial_population,
            outcome: None,
        })
    }
}
