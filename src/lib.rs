//! World Founding — a scene-graph narrative engine.
//!
//! A story is a declarative catalog of scenes, each with templated text and
//! an ordered list of choices. Choices carry a small, fixed vocabulary of
//! effects on the world state. The engine owns that state and the current
//! scene, applies choices atomically, and hands back a `View` for whatever
//! display layer is driving it.

pub mod core;
pub mod schema;

pub use crate::core::catalog::{CatalogError, SceneCatalog};
pub use crate::core::engine::{EngineError, NarrativeEngine};
pub use crate::core::view::View;
pub use crate::schema::world::WorldState;
