/// Scene catalog integration tests — the shipped content must be well formed.

use world_founding::core::catalog::SceneCatalog;
use world_founding::core::engine::{DEFAULT_FOUNDING_SCENE, DEFAULT_START_SCENE};
use world_founding::schema::scene::SceneId;

fn load_founding() -> SceneCatalog {
    SceneCatalog::load_from_ron(std::path::Path::new("content/founding.ron")).unwrap()
}

#[test]
fn founding_content_loads() {
    let catalog = load_founding();
    let expected = [
        "start",
        "naming",
        "geography_choice",
        "philosophy_choice",
        "end_of_chapter_1",
    ];
    for id in &expected {
        assert!(catalog.contains(&SceneId::from(*id)), "Missing scene: {}", id);
    }
    assert_eq!(catalog.len(), expected.len());
}

#[test]
fn embedded_content_matches_file() {
    let embedded = SceneCatalog::founding().unwrap();
    let file = load_founding();
    assert_eq!(embedded.ids(), file.ids());
}

#[test]
fn no_structural_issues_in_founding_content() {
    let catalog = load_founding();
    let issues = catalog.validate(
        &SceneId::from(DEFAULT_START_SCENE),
        &SceneId::from(DEFAULT_FOUNDING_SCENE),
    );
    assert!(issues.is_empty(), "Unexpected issues: {:?}", issues);
}

#[test]
fn reachable_scenes_offer_choices_or_await_a_name() {
    let catalog = load_founding();
    let reachable = catalog.reachable_from(
        &SceneId::from(DEFAULT_START_SCENE),
        &SceneId::from(DEFAULT_FOUNDING_SCENE),
    );
    let mut reached: Vec<&SceneId> = reachable.iter().collect();
    reached.sort();
    assert_eq!(reached, catalog.ids());

    for id in reachable {
        let scene = catalog.get_scene(&id).unwrap();
        assert!(
            !scene.choices.is_empty() || scene.awaits_name,
            "Scene '{}' is a dead end",
            id
        );
    }
}

#[test]
fn choices_have_labels_and_defined_destinations() {
    let catalog = load_founding();
    for id in catalog.ids() {
        let scene = catalog.get_scene(id).unwrap();
        for choice in &scene.choices {
            assert!(!choice.label.trim().is_empty(), "Blank label in '{}'", id);
            assert!(
                catalog.contains(&choice.destination),
                "Scene '{}' references non-existent scene '{}'",
                id,
                choice.destination
            );
        }
    }
}
