/// Scene graph — the static catalog of scenes, loading, lookup, and validation.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::core::template::{Template, TemplateError};
use crate::schema::effect::Effect;
use crate::schema::scene::SceneId;
use crate::schema::world::WorldState;

/// The built-in world founding story.
pub const FOUNDING_RON: &str = include_str!("../../content/founding.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),
    #[error("template error in scene '{scene}': {source}")]
    Template {
        scene: SceneId,
        #[source]
        source: TemplateError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// An option within a scene.
#[derive(Debug, Clone)]
pub struct Choice {
    pub label: String,
    pub destination: SceneId,
    pub effects: Vec<Effect>,
    /// Consequence narration, rendered after the effects are applied.
    pub outcome: Option<Template>,
}

/// A named narrative node.
#[derive(Debug, Clone)]
pub struct Scene {
    pub text: Template,
    /// Display order only.
    pub choices: Vec<Choice>,
    /// The host should prompt for a world name instead of offering choices.
    pub awaits_name: bool,
}

/// A problem found while validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    MissingStart(SceneId),
    MissingFounding(SceneId),
    DanglingDestination {
        scene: SceneId,
        choice: usize,
        destination: SceneId,
    },
    Unreachable(SceneId),
    NoChoices(SceneId),
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart(id) => write!(f, "start scene '{}' is not defined", id),
            Self::MissingFounding(id) => write!(f, "founding scene '{}' is not defined", id),
            Self::DanglingDestination {
                scene,
                choice,
                destination,
            } => write!(
                f,
                "choice {} of scene '{}' leads to undefined scene '{}'",
                choice, scene, destination
            ),
            Self::Unreachable(id) => write!(f, "scene '{}' is unreachable from start", id),
            Self::NoChoices(id) => write!(
                f,
                "scene '{}' offers no choices and does not await a name",
                id
            ),
        }
    }
}

// RON deserialization helpers — scene text is stored as raw template
// strings and parsed on load.

#[derive(Debug, Deserialize)]
struct RonChoice {
    label: String,
    destination: SceneId,
    #[serde(default)]
    effects: Vec<Effect>,
    #[serde(default)]
    outcome: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename = "Scene")]
struct RonScene {
    text: String,
    #[serde(default)]
    choices: Vec<RonChoice>,
    #[serde(default)]
    awaits_name: bool,
}

/// Immutable mapping from scene identifier to scene definition.
#[derive(Debug, Clone, Default)]
pub struct SceneCatalog {
    scenes: FxHashMap<SceneId, Scene>,
}

impl SceneCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in world founding catalog.
    pub fn founding() -> Result<SceneCatalog, CatalogError> {
        Self::parse_ron(FOUNDING_RON)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<SceneCatalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<SceneCatalog, CatalogError> {
        let raw: HashMap<String, RonScene> = ron::from_str(input)?;
        let mut catalog = SceneCatalog::new();

        for (id, ron_scene) in raw {
            let id = SceneId(id);
            let template_err = |source| CatalogError::Template {
                scene: id.clone(),
                source,
            };

            let text = Template::parse(&ron_scene.text).map_err(template_err)?;
            let mut choices = Vec::with_capacity(ron_scene.choices.len());
            for choice in ron_scene.choices {
                let outcome = match choice.outcome {
                    Some(src) => Some(Template::parse(&src).map_err(template_err)?),
                    None => None,
                };
                choices.push(Choice {
                    label: choice.label,
                    destination: choice.destination,
                    effects: choice.effects,
                    outcome,
                });
            }

            catalog.insert(
                id,
                Scene {
                    text,
                    choices,
                    awaits_name: ron_scene.awaits_name,
                },
            );
        }

        Ok(catalog)
    }

    pub fn insert(&mut self, id: SceneId, scene: Scene) {
        self.scenes.insert(id, scene);
    }

    /// Merge another catalog into this one. Scenes from `other`
    /// override scenes in `self` with the same identifier.
    pub fn merge(&mut self, other: SceneCatalog) {
        for (id, scene) in other.scenes {
            self.scenes.insert(id, scene);
        }
    }

    /// Look up a scene by identifier.
    pub fn get_scene(&self, id: &SceneId) -> Result<&Scene, CatalogError> {
        self.scenes
            .get(id)
            .ok_or_else(|| CatalogError::UnknownScene(id.clone()))
    }

    pub fn contains(&self, id: &SceneId) -> bool {
        self.scenes.contains_key(id)
    }

    /// Render a scene's narrative text against the given world.
    pub fn render_text(&self, id: &SceneId, world: &WorldState) -> Result<String, CatalogError> {
        Ok(self.get_scene(id)?.text.render(world))
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// All scene identifiers, sorted.
    pub fn ids(&self) -> Vec<&SceneId> {
        let mut ids: Vec<&SceneId> = self.scenes.keys().collect();
        ids.sort();
        ids
    }

    /// Every scene reachable from `start` by following defined destinations.
    /// A scene that awaits a name leads on to `founding`.
    pub fn reachable_from(&self, start: &SceneId, founding: &SceneId) -> FxHashSet<SceneId> {
        let mut seen = FxHashSet::default();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            let Some(scene) = self.scenes.get(id) else {
                continue;
            };
            if !seen.insert(id.clone()) {
                continue;
            }
            if scene.awaits_name && !seen.contains(founding) {
                stack.push(founding);
            }
            for choice in &scene.choices {
                if !seen.contains(&choice.destination) {
                    stack.push(&choice.destination);
                }
            }
        }
        seen
    }

    /// Check the graph's structural integrity relative to the start and
    /// founding scenes.
    pub fn validate(&self, start: &SceneId, founding: &SceneId) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let has_start = self.contains(start);
        if !has_start {
            issues.push(CatalogIssue::MissingStart(start.clone()));
        }
        if !self.contains(founding) {
            issues.push(CatalogIssue::MissingFounding(founding.clone()));
        }

        let reachable = self.reachable_from(start, founding);
        for id in self.ids() {
            let scene = &self.scenes[id];
            for (index, choice) in scene.choices.iter().enumerate() {
                if !self.contains(&choice.destination) {
                    issues.push(CatalogIssue::DanglingDestination {
                        scene: id.clone(),
                        choice: index,
                        destination: choice.destination.clone(),
                    });
                }
            }
            if scene.choices.is_empty() && !scene.awaits_name {
                issues.push(CatalogIssue::NoChoices(id.clone()));
            }
            if has_start && !reachable.contains(id) {
                issues.push(CatalogIssue::Unreachable(id.clone()));
            }
        }

        issues
    }
}
