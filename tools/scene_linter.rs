/// Scene Linter — validates scene catalog structure and playability.
///
/// Usage: scene_linter <scenes_path> [--start <id>] [--founding <id>] [--walk <steps>] [--seed <n>]
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use world_founding::core::catalog::{CatalogIssue, SceneCatalog};
use world_founding::core::engine::{
    NarrativeEngine, DEFAULT_FOUNDING_SCENE, DEFAULT_START_SCENE,
};
use world_founding::core::walk::random_walk;
use world_founding::schema::scene::SceneId;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: scene_linter <scenes_path> [--start <id>] [--founding <id>] [--walk <steps>] [--seed <n>]");
        process::exit(0);
    }

    let scenes_path = &args[1];
    let mut start = DEFAULT_START_SCENE.to_string();
    let mut founding = DEFAULT_FOUNDING_SCENE.to_string();
    let mut walk_steps: usize = 500;
    let mut seed: u64 = 42;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--start" if i + 1 < args.len() => {
                i += 1;
                start = args[i].clone();
            }
            "--founding" if i + 1 < args.len() => {
                i += 1;
                founding = args[i].clone();
            }
            "--walk" if i + 1 < args.len() => {
                i += 1;
                walk_steps = args[i].parse().unwrap_or(walk_steps);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(seed);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut catalog = SceneCatalog::new();
    let path = Path::new(scenes_path);
    if path.is_file() {
        match SceneCatalog::load_from_ron(path) {
            Ok(c) => catalog.merge(c),
            Err(e) => {
                eprintln!("ERROR: Failed to load scene file: {}", e);
                process::exit(1);
            }
        }
    } else if path.is_dir() {
        if !load_scenes_recursive(path, &mut catalog) {
            process::exit(1);
        }
    } else {
        eprintln!("ERROR: Path '{}' does not exist", scenes_path);
        process::exit(1);
    }

    println!("Loaded {} scenes", catalog.len());

    let (mut errors, warnings) = lint_catalog(
        &catalog,
        &SceneId(start.clone()),
        &SceneId(founding.clone()),
    );

    // Dynamic check: only meaningful once the static graph is sound
    if errors.is_empty() && walk_steps > 0 {
        match NarrativeEngine::builder()
            .with_catalog(catalog.clone())
            .start_scene(&start)
            .founding_scene(&founding)
            .build()
        {
            Ok(mut engine) => {
                match random_walk(&mut engine, walk_steps, &mut StdRng::seed_from_u64(seed)) {
                    Ok(report) => println!(
                        "Random walk: {} steps, {} restarts, {} of {} scenes visited",
                        report.steps,
                        report.restarts,
                        report.visited.len(),
                        catalog.len()
                    ),
                    Err(e) => errors.push(format!("Random walk (seed {}) failed: {}", seed, e)),
                }
            }
            Err(e) => errors.push(format!("Cannot build engine: {}", e)),
        }
    }

    println!("\n=== Scene Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

/// Returns false if any file failed to load.
fn load_scenes_recursive(dir: &Path, catalog: &mut SceneCatalog) -> bool {
    let mut ok = true;
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                ok &= load_scenes_recursive(&path, catalog);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                match SceneCatalog::load_from_ron(&path) {
                    Ok(c) => {
                        println!("  Loaded: {}", path.display());
                        catalog.merge(c);
                    }
                    Err(e) => {
                        eprintln!("  ERROR loading {}: {}", path.display(), e);
                        ok = false;
                    }
                }
            }
        }
    }
    ok
}

fn lint_catalog(
    catalog: &SceneCatalog,
    start: &SceneId,
    founding: &SceneId,
) -> (Vec<String>, Vec<String>) {
    let mut errors: Vec<String> = catalog
        .validate(start, founding)
        .iter()
        .map(CatalogIssue::to_string)
        .collect();
    let mut warnings = Vec::new();

    for id in catalog.ids() {
        let Ok(scene) = catalog.get_scene(id) else {
            continue;
        };

        if scene.awaits_name && !scene.choices.is_empty() {
            warnings.push(format!(
                "Scene '{}' awaits a name but also offers {} choices",
                id,
                scene.choices.len()
            ));
        }

        for (index, choice) in scene.choices.iter().enumerate() {
            if choice.label.trim().is_empty() {
                errors.push(format!("Choice {} of scene '{}' has a blank label", index, id));
            }
            if choice.outcome.is_some() && choice.effects.is_empty() {
                warnings.push(format!(
                    "Choice {} of scene '{}' narrates an outcome but has no effects",
                    index, id
                ));
            }
        }
    }

    (errors, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint(ron: &str) -> (Vec<String>, Vec<String>) {
        let catalog = SceneCatalog::parse_ron(ron).unwrap();
        lint_catalog(
            &catalog,
            &SceneId::from(DEFAULT_START_SCENE),
            &SceneId::from(DEFAULT_FOUNDING_SCENE),
        )
    }

    #[test]
    fn founding_content_is_clean() {
        let (errors, warnings) = lint(world_founding::core::catalog::FOUNDING_RON);
        assert!(errors.is_empty(), "{errors:?}");
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn unreachable_scene_is_an_error() {
        let (errors, _) = lint(
            r#"{
                "start": Scene(text: "s", choices: [(label: "Begin", destination: "naming")]),
                "naming": Scene(text: "n", awaits_name: true),
                "geography_choice": Scene(text: "g", choices: [(label: "Back", destination: "start")]),
                "orphan": Scene(text: "o", choices: [(label: "Back", destination: "start")]),
            }"#,
        );
        assert_eq!(errors, vec!["scene 'orphan' is unreachable from start".to_string()]);
    }
}
