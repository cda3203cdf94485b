/// Engine integration tests — full playthroughs of the founding story.

use world_founding::core::catalog::SceneCatalog;
use world_founding::core::engine::{EngineError, NarrativeEngine};
use world_founding::schema::scene::SceneId;
use world_founding::schema::world::WorldState;

const MOUNTAINS: usize = 1;
const STEPPES: usize = 2;
const INNOVATION: usize = 1;

fn founding_engine() -> NarrativeEngine {
    NarrativeEngine::builder().build().unwrap()
}

#[test]
fn fresh_session_starts_at_start_with_defaults() {
    let engine = founding_engine();
    let view = engine.view().unwrap();
    assert_eq!(view.scene, SceneId::from("start"));
    assert_eq!(view.state, WorldState::default());
    assert_eq!(view.choices.len(), 1);
    assert_eq!(view.outcome, None);
    assert!(!view.awaiting_name);
}

#[test]
fn begin_creation_asks_for_a_name() {
    let mut engine = founding_engine();
    let view = engine.apply_choice(0).unwrap();
    assert_eq!(view.scene, SceneId::from("naming"));
    assert!(view.awaiting_name);
    assert!(view.choices.is_empty());
}

#[test]
fn blank_names_are_rejected_without_mutation() {
    let mut engine = founding_engine();
    for name in ["", "   "] {
        let err = engine.initialize(name).unwrap_err();
        assert!(matches!(err, EngineError::InvalidName));
        assert_eq!(*engine.world(), WorldState::default());
    }
}

#[test]
fn initialize_atlantis() {
    let mut engine = founding_engine();
    let view = engine.initialize("Atlantis").unwrap();
    assert_eq!(view.state.name, "Atlantis");
    assert_eq!(view.state.population, 100);
    assert_eq!(view.scene, SceneId::from("geography_choice"));
    assert_eq!(view.choices.len(), 3);
    assert!(view.text.contains("Atlantis"));
    assert!(view.text.contains("100 souls"));
}

#[test]
fn mountains_sets_exact_values() {
    let mut engine = founding_engine();
    engine.initialize("Atlantis").unwrap();
    let view = engine.apply_choice(MOUNTAINS).unwrap();

    assert_eq!(view.scene, SceneId::from("philosophy_choice"));
    assert_eq!(view.state.resources, "Minerals (Iron, Gems)");
    assert_eq!(view.state.population, 120);
    assert_eq!(view.state.impact, 15);
    assert_eq!(view.state.culture, "empty");
    assert!(view
        .outcome
        .as_deref()
        .is_some_and(|o| o.starts_with("The Shadowed Range rises.")));
    assert!(view.text.contains("120 people live on Minerals (Iron, Gems)"));
}

#[test]
fn out_of_range_choice_changes_nothing() {
    let mut engine = founding_engine();
    engine.initialize("Atlantis").unwrap();
    engine.apply_choice(MOUNTAINS).unwrap();
    let before = engine.view().unwrap();
    assert_eq!(before.choices.len(), 2);

    let err = engine.apply_choice(5).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidChoiceIndex {
            index: 5,
            available: 2,
            ..
        }
    ));
    assert_eq!(engine.view().unwrap(), before);
}

#[test]
fn view_is_idempotent() {
    let mut engine = founding_engine();
    engine.initialize("Atlantis").unwrap();
    engine.apply_choice(0).unwrap();
    assert_eq!(engine.view().unwrap(), engine.view().unwrap());
}

#[test]
fn full_playthrough_terra() {
    let mut engine = founding_engine();
    engine.initialize("Terra").unwrap();
    engine.apply_choice(STEPPES).unwrap();
    let end = engine.apply_choice(INNOVATION).unwrap();
    assert_eq!(end.scene, SceneId::from("end_of_chapter_1"));
    assert!(end.text.contains("The world of Terra"));
    assert!(end.text.contains("200 strong"));

    let view = engine.apply_choice(0).unwrap();
    assert_eq!(view.scene, SceneId::from("start"));
    assert_eq!(view.state.name, "Terra");
    assert_eq!(view.state.population, 100 + 100);
    assert_eq!(view.state.resources, "Agricultural (Grain, Livestock)");
    assert_eq!(view.state.culture, "Progressive/Scientific");
    assert_eq!(view.state.impact, 8 + 7 + 5);
}

#[test]
fn reset_then_initialize_matches_fresh_session() {
    let mut played = founding_engine();
    played.initialize("Terra").unwrap();
    played.apply_choice(STEPPES).unwrap();
    played.apply_choice(0).unwrap();

    let view = played.reset_to_start().unwrap();
    assert_eq!(view.scene, SceneId::from("start"));
    assert_eq!(view.state, WorldState::default());
    assert_eq!(view.outcome, None);

    let mut fresh = founding_engine();
    assert_eq!(
        played.initialize("Atlantis").unwrap(),
        fresh.initialize("Atlantis").unwrap()
    );
}

#[test]
fn replay_from_start_begins_a_clean_world() {
    let mut engine = founding_engine();
    engine.initialize("Terra").unwrap();
    engine.apply_choice(STEPPES).unwrap();
    engine.apply_choice(INNOVATION).unwrap();
    engine.apply_choice(0).unwrap();
    assert!(!engine.world().is_default());

    let view = engine.apply_choice(0).unwrap();
    assert_eq!(view.scene, SceneId::from("naming"));
    assert_eq!(view.state, WorldState::default());
}

#[test]
fn overlay_file_scenes_replace_builtin_ones() {
    let overlay = r#"{
        "end_of_chapter_1": Scene(
            text: "{world.name} endures.",
            choices: [(label: "Onward", destination: "chapter_2")],
        ),
        "chapter_2": Scene(
            text: "Chapter 2 awaits {world.name}.",
            choices: [(label: "Back", destination: "start")],
        ),
    }"#;
    let mut engine = NarrativeEngine::builder()
        .with_founding_content()
        .with_catalog(SceneCatalog::parse_ron(overlay).unwrap())
        .build()
        .unwrap();

    engine.initialize("Terra").unwrap();
    engine.apply_choice(STEPPES).unwrap();
    let end = engine.apply_choice(INNOVATION).unwrap();
    assert_eq!(end.text, "Terra endures.");
    let next = engine.apply_choice(0).unwrap();
    assert_eq!(next.text, "Chapter 2 awaits Terra.");
}
