//! WASM bindings for world-founding — lets a browser page drive the engine.

use wasm_bindgen::prelude::*;

use world_founding::core::catalog::SceneCatalog;
use world_founding::core::engine::{EngineError, NarrativeEngine};
use world_founding::core::view::View;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct ErrorInfo<'a> {
    kind: &'a str,
    message: String,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn error_kind(err: &EngineError) -> &'static str {
    match err {
        EngineError::InvalidName => "invalid_name",
        EngineError::InvalidChoiceIndex { .. } => "invalid_choice_index",
        EngineError::UnknownScene(_) => "unknown_scene",
        EngineError::MissingScene(_) => "missing_scene",
        EngineError::Catalog(_) => "catalog",
    }
}

/// The thrown error's message is a JSON object `{ "kind": ..., "message": ... }`
/// so the page can re-prompt on `invalid_name` and stop on anything else.
fn to_js_error(err: EngineError) -> JsError {
    let info = ErrorInfo {
        kind: error_kind(&err),
        message: err.to_string(),
    };
    JsError::new(&serde_json::to_string(&info).unwrap_or_else(|_| err.to_string()))
}

fn view_json(view: Result<View, EngineError>) -> Result<String, JsError> {
    let view = view.map_err(to_js_error)?;
    serde_json::to_string(&view).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// FoundingGame — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct FoundingGame {
    engine: NarrativeEngine,
}

#[wasm_bindgen]
impl FoundingGame {
    /// Create a session over the built-in founding story.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FoundingGame, JsError> {
        let engine = NarrativeEngine::builder().build().map_err(to_js_error)?;
        Ok(FoundingGame { engine })
    }

    /// Create a session over scenes supplied as RON, layered on the built-in story.
    pub fn from_ron(scenes_ron: &str) -> Result<FoundingGame, JsError> {
        let catalog = SceneCatalog::parse_ron(scenes_ron)
            .map_err(|e| JsError::new(&format!("Scene parse error: {e}")))?;
        let engine = NarrativeEngine::builder()
            .with_founding_content()
            .with_catalog(catalog)
            .build()
            .map_err(to_js_error)?;
        Ok(FoundingGame { engine })
    }

    /// Current view as JSON.
    ///
    /// Shape:
    /// ```json
    /// {
    ///   "scene": "geography_choice",
    ///   "outcome": null,
    ///   "text": "With the world of Atlantis established ...",
    ///   "choices": [{ "index": 0, "label": "A. The Misty Archipelago ..." }],
    ///   "awaiting_name": false,
    ///   "state": { "name": "Atlantis", "population": 100, "resources": "none",
    ///              "culture": "empty", "impact": 0 }
    /// }
    /// ```
    pub fn view(&self) -> Result<String, JsError> {
        view_json(self.engine.view())
    }

    /// Name the world. Throws `invalid_name` for blank input.
    pub fn initialize(&mut self, world_name: &str) -> Result<String, JsError> {
        view_json(self.engine.initialize(world_name))
    }

    /// Take the choice at a zero-based index.
    pub fn apply_choice(&mut self, index: usize) -> Result<String, JsError> {
        view_json(self.engine.apply_choice(index))
    }

    /// Return to the start scene with a fresh world.
    pub fn reset(&mut self) -> Result<String, JsError> {
        view_json(self.engine.reset_to_start())
    }
}
