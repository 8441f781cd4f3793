// CLI entry point for the masonry wall quest simulator.
//
// Wraps `masonry_sim` for the terminal: prompts for (or takes flags
// naming) the bond pattern, wall size, and build strategy, then steps
// through the build with colour-coded stride rendering and closes with
// the efficiency report. All pacing (animation delays, auto-build
// stepping) lives here — the sim itself has no clock.
//
// Usage:
//   masonry [OPTIONS]
//     --bond <stretcher|flemish|wild>   Bond pattern (prompts if omitted)
//     --rows <N>                        Number of courses (prompts if omitted)
//     --mode <stride|sequential>        Build strategy (prompts if omitted)
//     --seed <N>                        Wild bond seed (default: 0)
//     --config <PATH>                   Robot config JSON (default: built-in)
//     --auto                            Build without waiting for ENTER
//     --delay-ms <N>                    Retro text delay (default: 30, 0 = off)
//     --no-intro                        Skip the animated intro

use masonry_sim::config::{RobotConfig, WallSpec};
use masonry_sim::sim::BuildSim;
use masonry_sim::types::{Bond, Strategy};
use std::io::BufRead;
use std::str::FromStr;
use std::time::Duration;

mod render;

struct CliOptions {
    bond: Option<Bond>,
    rows: Option<usize>,
    mode: Option<Strategy>,
    seed: u64,
    auto: bool,
    text_delay: Duration,
    config_path: Option<String>,
    no_intro: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            bond: None,
            rows: None,
            mode: None,
            seed: 0,
            auto: false,
            text_delay: Duration::from_millis(30),
            config_path: None,
            no_intro: false,
        }
    }
}

fn main() {
    let options = parse_args();
    let config = load_config(options.config_path.as_deref());

    let mut first_run = true;
    loop {
        if first_run && !options.no_intro {
            render::intro(options.text_delay);
        } else {
            render::banner(false, options.text_delay);
        }
        first_run = false;

        run_quest(&options, &config);

        if options.auto {
            break;
        }
        let again = prompt_line("\nWould you like to build another wall? (y/n): ");
        if again.trim().to_lowercase() != "y" {
            println!("\nThe builder retires, proud of their masonry legacy. Farewell!\n");
            break;
        }
    }
}

fn run_quest(options: &CliOptions, config: &RobotConfig) {
    let bond = options.bond.unwrap_or_else(prompt_bond);
    let mode = options.mode.unwrap_or_else(prompt_mode);
    let rows = options.rows.unwrap_or_else(|| prompt_rows(config));

    let spec = WallSpec {
        bond,
        rows,
        seed: options.seed,
        ..WallSpec::default()
    };
    let mut sim = match BuildSim::new(spec, config.clone()) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Failed to start the quest: {e}");
            std::process::exit(1);
        }
    };

    match mode {
        Strategy::Stride => run_stride(&mut sim, options),
        Strategy::Sequential => run_sequential(&mut sim, options),
    }

    render::retro_print(
        "\n★ All bricks built! Quest complete. ★\n",
        options.text_delay.min(Duration::from_millis(10)),
    );
    show_report(&sim, mode, options);
}

/// Optimized robot build: one stride rectangle at a time.
fn run_stride(sim: &mut BuildSim, options: &CliOptions) {
    let plan = match sim.build_order() {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Build order unavailable: {e}");
            std::process::exit(1);
        }
    };
    for step in &plan.steps {
        sim.apply_step(step);
        render::clear_screen();
        render::draw_wall(sim.wall());
        if options.auto {
            std::thread::sleep(Duration::from_millis(300));
        } else {
            println!(
                "\n✦ Press ENTER to build by stride. Ctrl+C to abandon the quest. (Now building: {}) ✦",
                step.stride
            );
            wait_for_enter();
        }
    }
}

/// Manual build: brick by brick, bottom-up.
fn run_sequential(sim: &mut BuildSim, options: &CliOptions) {
    while sim.mark_next_unbuilt().is_some() {
        render::clear_screen();
        render::draw_wall(sim.wall());
        if options.auto {
            std::thread::sleep(Duration::from_millis(300));
        } else {
            println!("\n✦ Press ENTER to place a brick. Ctrl+C to flee the quest. ✦");
            wait_for_enter();
        }
    }
}

fn show_report(sim: &BuildSim, mode: Strategy, options: &CliOptions) {
    let (metrics, report) = match (sim.metrics(), sim.estimate(mode)) {
        (Ok(metrics), Ok(report)) => (metrics, report),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Report unavailable: {e}");
            std::process::exit(1);
        }
    };
    render::efficiency_report(mode, &metrics, &report, options.text_delay);
    if !options.auto {
        prompt_line("Press ENTER to return from your quest...");
    }
}

// ---------------------------------------------------------------------------
// Interactive prompts
// ---------------------------------------------------------------------------

fn prompt_line(prompt: &str) -> String {
    use std::io::Write;
    print!("{prompt}");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
    line
}

fn wait_for_enter() {
    let mut line = String::new();
    let _ = std::io::stdin().lock().read_line(&mut line);
}

fn prompt_bond() -> Bond {
    println!("Choose bond type:");
    println!("  [1] Stretcher bond");
    println!("  [2] Flemish bond");
    println!("  [3] Wild bond");
    match prompt_line("Enter choice (1-3): ").trim() {
        "2" => Bond::Flemish,
        "3" => Bond::Wild,
        _ => Bond::Stretcher,
    }
}

fn prompt_mode() -> Strategy {
    println!("\nChoose build method:");
    println!("  [1] Sequential (brick-by-brick)");
    println!("  [2] Stride-optimised (robot build)");
    if prompt_line("Enter choice (1-2): ").trim() == "2" {
        Strategy::Stride
    } else {
        Strategy::Sequential
    }
}

fn prompt_rows(config: &RobotConfig) -> usize {
    let max_rows = config.courses_per_block();
    let line = prompt_line(&format!(
        "\nEnter number of wall rows (recommended <= {max_rows}): "
    ));
    let rows = line.trim().parse().unwrap_or(max_rows);
    if rows > max_rows {
        println!("\n⚠ Robot arm cannot reach above row {max_rows}.");
        println!("   The wall will be split into vertical strides automatically.\n");
    }
    rows
}

// ---------------------------------------------------------------------------
// Arguments and config
// ---------------------------------------------------------------------------

/// Parse command-line arguments. Uses simple `std::env::args()` matching —
/// no clap dependency.
fn parse_args() -> CliOptions {
    let mut options = CliOptions::default();
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "--bond" => {
                i += 1;
                options.bond = Some(parse_flag(&args, i, "--bond", Bond::from_str));
            }
            "--rows" => {
                i += 1;
                options.rows = Some(parse_flag(&args, i, "--rows", |s| {
                    s.parse::<usize>().map_err(|e| e.to_string())
                }));
            }
            "--mode" => {
                i += 1;
                options.mode = Some(parse_flag(&args, i, "--mode", Strategy::from_str));
            }
            "--seed" => {
                i += 1;
                options.seed = parse_flag(&args, i, "--seed", |s| {
                    s.parse::<u64>().map_err(|e| e.to_string())
                });
            }
            "--delay-ms" => {
                i += 1;
                let ms = parse_flag(&args, i, "--delay-ms", |s| {
                    s.parse::<u64>().map_err(|e| e.to_string())
                });
                options.text_delay = Duration::from_millis(ms);
            }
            "--config" => {
                i += 1;
                options.config_path =
                    Some(parse_flag(&args, i, "--config", |s| Ok::<_, String>(s.to_string())));
            }
            "--auto" => options.auto = true,
            "--no-intro" => options.no_intro = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown option: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn parse_flag<T, E: std::fmt::Display>(
    args: &[String],
    i: usize,
    flag: &str,
    parse: impl Fn(&str) -> Result<T, E>,
) -> T {
    let Some(raw) = args.get(i) else {
        eprintln!("{flag} requires a value");
        std::process::exit(1);
    };
    match parse(raw) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{flag}: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(path: Option<&str>) -> RobotConfig {
    let Some(path) = path else {
        return RobotConfig::default();
    };
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Cannot read config {path}: {e}");
            std::process::exit(1);
        }
    };
    let config: RobotConfig = match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Cannot parse config {path}: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Config {path} rejected: {e}");
        std::process::exit(1);
    }
    config
}

fn print_usage() {
    println!("Usage: masonry [OPTIONS]");
    println!("  --bond <stretcher|flemish|wild>   Bond pattern (prompts if omitted)");
    println!("  --rows <N>                        Number of courses (prompts if omitted)");
    println!("  --mode <stride|sequential>        Build strategy (prompts if omitted)");
    println!("  --seed <N>                        Wild bond seed (default: 0)");
    println!("  --config <PATH>                   Robot config JSON (default: built-in)");
    println!("  --auto                            Build without waiting for ENTER");
    println!("  --delay-ms <N>                    Retro text delay (default: 30, 0 = off)");
    println!("  --no-intro                        Skip the animated intro");
}
