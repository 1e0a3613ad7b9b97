use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use host::logging::init_logging;
use host::{
    generate_maze_report, generate_session, parse_moves, render_ascii, replay_moves, solve_maze,
    HostConfig, HostError, MazeReport,
};
use labyrinth_core::{DigRule, Position, Recovery};

/// Generate perfect mazes and replay walks through them
#[derive(Parser)]
#[command(name = "labyrinth")]
#[command(about = "Generate perfect mazes and replay walks through them")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maze seed (random when omitted)
    #[arg(long, global = true)]
    seed: Option<u32>,

    /// Grid width, odd and at least 5
    #[arg(long, global = true)]
    width: Option<usize>,

    /// Grid height, odd and at least 5
    #[arg(long, global = true)]
    height: Option<usize>,

    /// Dig rule (standard|strict)
    #[arg(long, global = true)]
    rule: Option<DigRule>,

    /// Recovery strategy after a dead end (filtered-pool|full-scan)
    #[arg(long, global = true)]
    recovery: Option<Recovery>,

    /// Keep digging past the goal cell instead of ending the line there
    #[arg(long, global = true)]
    no_stop_at_goal: bool,

    /// Log level used when RUST_LOG is unset (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a maze and print it
    Generate {
        /// Print the maze report as JSON instead of a picture
        #[arg(long)]
        json: bool,
    },
    /// Rebuild a maze from its seed and replay a JSON moves file against it
    Replay {
        /// JSON array of move codes (0=NORTH, 1=EAST, 2=SOUTH, 3=WEST)
        moves_file: PathBuf,
        /// Print the maze with the agent's final position
        #[arg(long)]
        show: bool,
    },
    /// Print the shortest solution of a maze as move codes
    Solve {
        /// Write the moves to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.log_level) {
        eprintln!("❌ Failed to initialize logging: {}", e);
        process::exit(1);
    }

    let result = match &cli.command {
        Command::Generate { json } => generate_command(&config, *json),
        Command::Replay { moves_file, show } => replay_command(&config, moves_file, *show),
        Command::Solve { output } => solve_command(&config, output.as_deref()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Flags override environment, which overrides the config file
fn build_config(cli: &Cli) -> Result<HostConfig, HostError> {
    let mut config = HostConfig::load(cli.config.as_deref())?;

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(rule) = cli.rule {
        config.rule = rule;
    }
    if let Some(recovery) = cli.recovery {
        config.recovery = recovery;
    }
    if cli.no_stop_at_goal {
        config.stop_at_goal = false;
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    config.validate()?;
    Ok(config)
}

fn generate_command(config: &HostConfig, json: bool) -> Result<(), HostError> {
    let seed = config.seed.unwrap_or_else(rand::random);

    if json {
        let report = generate_maze_report(config, seed)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let start = Instant::now();
    let session = generate_session(config, seed)?;
    let duration = start.elapsed();
    let report = MazeReport::from_session(seed, &session);

    println!("🧩 Maze {}x{} (seed {})", report.width, report.height, report.seed);
    println!(
        "  Lines: {}  Dead ends: {}  Rescans: {}",
        report.stats.lines, report.stats.dead_ends, report.stats.rescans
    );
    println!("  Generation time: {:.2}ms", duration.as_secs_f64() * 1000.0);
    println!();
    print!("{}", render_ascii(session.grid(), session.start(), session.goal()));

    Ok(())
}

fn replay_command(config: &HostConfig, moves_file: &Path, show: bool) -> Result<(), HostError> {
    let seed = config.seed.ok_or_else(|| {
        HostError::Config("replay needs --seed (or LABYRINTH_SEED) to rebuild the maze".to_string())
    })?;

    let json = fs::read_to_string(moves_file)?;
    let moves = parse_moves(&json)?;
    println!("📦 Loaded {} moves from {}", moves.len(), moves_file.display());

    let mut session = generate_session(config, seed)?;
    let outcome = replay_moves(&mut session, &moves)?;

    println!("  Applied: {}", outcome.applied);
    println!("  Rejected: {}", outcome.rejected);
    println!(
        "  Final position: ({}, {})",
        outcome.final_position.0, outcome.final_position.1
    );
    println!("  Goal reached: {}", if outcome.solved { "Yes ✓" } else { "No ✗" });

    if show {
        let (x, y) = outcome.final_position;
        println!();
        print!("{}", render_ascii(session.grid(), Position::new(x, y), session.goal()));
    }

    Ok(())
}

fn solve_command(config: &HostConfig, output: Option<&Path>) -> Result<(), HostError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let session = generate_session(config, seed)?;

    let moves = solve_maze(&session).ok_or(HostError::NoSolution(seed))?;
    let json = serde_json::to_string(&moves)?;

    match output {
        Some(path) => {
            fs::write(path, &json)?;
            println!("💾 {} moves for seed {} saved to: {}", moves.len(), seed, path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
