#![warn(clippy::pedantic)]

use std::{fs, path::PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, eyre};
use cube_core::{
    Color, ColorScheme, Cube, FaceletCube, MoveSequence, ScrambleConfig, Scrambler, Solver,
    SolverConfig,
};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, debug, info};
use owo_colors::OwoColorize;
use serde::{Deserialize, Serialize};

/// Scramble and solve a 3x3x3 cube from the terminal
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file to use, in TOML format.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random scramble
    Scramble {
        /// Number of moves, overriding the configuration file
        #[arg(short, long)]
        length: Option<usize>,
        /// Seed for a reproducible scramble
        #[arg(short, long)]
        seed: Option<u64>,
        /// Allow half turns
        #[arg(long)]
        half_turns: bool,
        /// Also print the scrambled cube
        #[arg(long)]
        show: bool,
    },
    /// Solve a cube given as a scramble, a facelet string or a JSON file
    Solve {
        /// The scramble that produced the cube, e.g. "R U Fi D2".
        scramble: Option<String>,
        /// 54 color letters, faces in U D F B L R order
        #[arg(long, conflicts_with = "scramble")]
        facelets: Option<String>,
        /// A JSON file mapping each face letter to nine colors
        #[arg(long, conflicts_with_all = ["scramble", "facelets"])]
        json: Option<PathBuf>,
        /// Print the moves of each stage separately
        #[arg(long)]
        stages: bool,
        /// Keep consecutive turns of the same face unmerged
        #[arg(long)]
        no_simplify: bool,
    },
    /// Print the cube after a move sequence
    Show {
        /// The moves to apply to the solved cube
        sequence: Option<String>,
        /// Print the JSON interchange form instead of the net
        #[arg(long)]
        json: bool,
    },
}

/// Everything the configuration file can set.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
struct Config {
    scramble: ScrambleConfig,
    solver: SolverConfig,
    colors: ColorScheme,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read configuration file {path:?}"))?;
            toml::from_str::<Config>(&text)
                .wrap_err_with(|| format!("Failed to parse configuration file {path:?}"))?
        }
        None => Config::default(),
    };
    debug!("Using configuration {config:?}");

    match cli.command {
        Commands::Scramble {
            length,
            seed,
            half_turns,
            show,
        } => {
            let mut scramble_config = config.scramble;
            scramble_config.length = length.unwrap_or(scramble_config.length);
            scramble_config.seed = seed.or(scramble_config.seed);
            scramble_config.half_turns |= half_turns;

            let scramble = Scrambler::new(scramble_config).generate();
            println!("{scramble}");
            if show {
                print_net(&Cube::solved().applied(&scramble).to_facelets(&config.colors));
            }
        }
        Commands::Solve {
            scramble,
            facelets,
            json,
            stages,
            no_simplify,
        } => {
            let cube = read_cube(scramble, facelets, json)?;
            let mut solver = Solver::with_config(config.solver);
            if no_simplify {
                solver = solver.with_simplify(false);
            }

            if stages {
                let mut total = 0;
                for (stage, moves) in solver.solve_by_stage(&cube)? {
                    total += moves.len();
                    println!("{}: {moves}", stage.bold());
                }
                println!("{total} moves");
            } else {
                let solution = solver.solve(&cube)?;
                info!("Solution has {} moves", solution.len());
                println!("{solution}");
            }
        }
        Commands::Show { sequence, json } => {
            let sequence = sequence.as_deref().unwrap_or("").parse::<MoveSequence>()?;
            let facelets = Cube::solved()
                .applied(&sequence)
                .to_facelets(&config.colors);
            if json {
                println!("{}", serde_json::to_string_pretty(&facelets)?);
            } else {
                print_net(&facelets);
            }
        }
    }
    Ok(())
}

/// Build the cube to solve from whichever input was given.
fn read_cube(
    scramble: Option<String>,
    facelets: Option<String>,
    json: Option<PathBuf>,
) -> color_eyre::Result<Cube> {
    if let Some(scramble) = scramble {
        return Ok(Cube::solved().applied(&scramble.parse::<MoveSequence>()?));
    }
    let facelets = match (facelets, json) {
        (Some(text), _) => text.parse::<FaceletCube>()?,
        (None, Some(path)) => {
            let text = fs::read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read cube file {path:?}"))?;
            serde_json::from_str::<FaceletCube>(&text)
                .wrap_err_with(|| format!("Failed to parse cube file {path:?}"))?
        }
        (None, None) => {
            return Err(eyre!(
                "Give a scramble, `--facelets` or `--json` to describe the cube"
            ));
        }
    };
    Ok(Cube::try_from(&facelets)?)
}

fn print_net(facelets: &FaceletCube) {
    for row in facelets.net() {
        let line = row
            .into_iter()
            .map(|cell| match cell {
                Some(color) => {
                    let (r, g, b) = rgb(color);
                    format!(" {color} ").black().on_truecolor(r, g, b).to_string()
                }
                None => "   ".to_owned(),
            })
            .join("");
        println!("{line}");
    }
}

fn rgb(color: Color) -> (u8, u8, u8) {
    match color {
        Color::White => (240, 240, 240),
        Color::Yellow => (255, 213, 0),
        Color::Red => (196, 30, 58),
        Color::Orange => (255, 88, 0),
        Color::Green => (0, 158, 96),
        Color::Blue => (0, 81, 186),
    }
}
