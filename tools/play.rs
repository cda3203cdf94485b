/// Play — interactive terminal host for a scene catalog.
///
/// Usage: play [--scenes <path>] [--overlay] [--seed <n>]
///
/// Commands:
///   <n>          — take choice n (1-based, as displayed)
///   state        — show world statistics
///   restart      — return to the start scene with a fresh world
///   auto <n>     — take n random steps
///   seed <n>     — set the RNG seed used by 'auto'
///   help         — list commands
///   quit         — exit
///
/// When a scene asks for a world name, the whole input line is the name.
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;
use world_founding::core::engine::{EngineError, NarrativeEngine};
use world_founding::core::template::group_thousands;
use world_founding::core::view::View;
use world_founding::core::walk::random_walk;
use world_founding::schema::world::WorldState;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut scenes_path = None;
    let mut overlay = false;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenes" if i + 1 < args.len() => {
                i += 1;
                scenes_path = Some(args[i].clone());
            }
            "--overlay" => overlay = true,
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = NarrativeEngine::builder();
    if let Some(ref path) = scenes_path {
        builder = builder.scenes_file(path);
        if overlay {
            builder = builder.with_founding_content();
        }
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} scenes", engine.catalog().len());
    println!("Type 'help' for commands.\n");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut view = match engine.view() {
        Ok(v) => v,
        Err(e) => fatal(&e),
    };
    render(&view);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", if view.awaiting_name { "name> " } else { "> " });
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();

        if matches!(cmd.as_str(), "quit" | "exit" | "q") {
            println!("Farewell, Founder.");
            break;
        }

        if view.awaiting_name {
            match engine.initialize(line) {
                Ok(v) => {
                    view = v;
                    render(&view);
                }
                Err(EngineError::InvalidName) => {
                    println!("The world needs a name, Founder! Try again.");
                }
                Err(e) => fatal(&e),
            }
            continue;
        }

        match cmd.as_str() {
            "" => {}
            "help" | "h" | "?" => print_help(),
            "state" => print_state(&view.state),
            "restart" => match engine.reset_to_start() {
                Ok(v) => {
                    view = v;
                    render(&view);
                }
                Err(e) => fatal(&e),
            },
            "seed" => match parts.get(1).map(|s| s.parse::<u64>()) {
                Some(Ok(s)) => {
                    rng = StdRng::seed_from_u64(s);
                    println!("Seed set to {}", s);
                }
                _ => println!("Usage: seed <n>"),
            },
            "auto" => {
                let steps = match parts.get(1).map(|s| s.parse::<usize>()) {
                    Some(Ok(n)) if n > 0 => n,
                    _ => {
                        println!("Usage: auto <n>");
                        continue;
                    }
                };
                match random_walk(&mut engine, steps, &mut rng) {
                    Ok(report) => {
                        println!(
                            "Walked {} steps: {} restarts, {} worlds named, {} scenes seen",
                            report.steps,
                            report.restarts,
                            report.names_given,
                            report.visited.len()
                        );
                    }
                    Err(e) => fatal(&e),
                }
                view = match engine.view() {
                    Ok(v) => v,
                    Err(e) => fatal(&e),
                };
                render(&view);
            }
            number => match number.parse::<usize>() {
                Ok(n) if n >= 1 && n <= view.choices.len() => match engine.apply_choice(n - 1) {
                    Ok(v) => {
                        view = v;
                        render(&view);
                    }
                    Err(e) => fatal(&e),
                },
                Ok(_) => println!("Choose a number between 1 and {}.", view.choices.len()),
                Err(_) => println!(
                    "Unknown command: '{}'. Type 'help' for available commands.",
                    number
                ),
            },
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

/// Engine faults mean the content or this host is broken; stop the session.
fn fatal(err: &EngineError) -> ! {
    eprintln!("FATAL: {}", err);
    std::process::exit(2);
}

fn render(view: &View) {
    println!();
    if let Some(ref outcome) = view.outcome {
        println!("{}\n", outcome);
    }
    println!("{}\n", view.text);
    for choice in &view.choices {
        println!("  [{}] {}", choice.index + 1, choice.label);
    }
    if !view.choices.is_empty() || view.awaiting_name {
        println!();
    }
    print_state(&view.state);
}

fn print_state(state: &WorldState) {
    println!(
        "  World: {} | Population: {} | Resources: {} | Culture: {} | Impact: {}",
        state.name,
        group_thousands(state.population),
        state.resources,
        state.culture,
        state.impact
    );
}

fn print_usage() {
    println!("Play — interactive terminal host for a scene catalog.");
    println!();
    println!("Usage: play [--scenes <path>] [--overlay] [--seed <n>]");
    println!();
    println!("  --scenes <path>  RON scene catalog (default: built-in founding story)");
    println!("  --overlay        Layer --scenes on top of the built-in story");
    println!("  --seed <n>       RNG seed for 'auto' (default: 42)");
    println!();
    println!("Set RUST_LOG=debug to trace transitions.");
}

fn print_help() {
    println!("Commands:");
    println!("  <n>        Take choice n");
    println!("  state      Show world statistics");
    println!("  restart    Return to the start scene with a fresh world");
    println!("  auto <n>   Take n random steps");
    println!("  seed <n>   Set the RNG seed used by 'auto'");
    println!("  help       Show this help");
    println!("  quit       Exit");
}
