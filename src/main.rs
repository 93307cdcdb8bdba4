use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use lattice_snake::game::SimConfig;
use lattice_snake::modes::{DemoMode, HumanMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lattice_snake")]
#[command(version, about = "Snake on an N-dimensional grid, with speed-boost power-ups")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<i32>,

    /// Grid height
    #[arg(long)]
    height: Option<i32>,

    /// Grid depth; makes the demo three-dimensional
    #[arg(long)]
    depth: Option<i32>,

    /// Seconds per tick without a boost
    #[arg(long)]
    interval: Option<f64>,

    /// Seed for food and power-up placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable power-ups
    #[arg(long)]
    no_power_ups: bool,

    /// Demo: maximum number of ticks
    #[arg(long, default_value = "100")]
    max_turns: u32,

    /// Demo: wall-clock pause between ticks in milliseconds
    #[arg(long, default_value = "100")]
    delay_ms: u64,

    /// Write logs to this file (human mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Watch an autopilot run, logged tick by tick
    Demo,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.mode, cli.log_file.as_deref())?;

    let config = build_config(&cli)?;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            if config.dimension_count() != 2 {
                bail!("human mode needs a 2-D grid, got {} dimensions", config.dimension_count());
            }
            let mut human_mode = HumanMode::new(&config)?;
            human_mode.run().await?;
        }
        Mode::Demo => {
            let delay = Duration::from_millis(cli.delay_ms);
            let summary = match config.dimension_count() {
                2 => DemoMode::<2>::new(&config, cli.max_turns, delay)?.run().await?,
                3 => DemoMode::<3>::new(&config, cli.max_turns, delay)?.run().await?,
                n => bail!("demo supports 2 or 3 dimensions, got {n}"),
            };
            println!(
                "Turns: {}  Score: {}  Length: {}  End: {:?}",
                summary.turns, summary.score, summary.length, summary.end_reason
            );
        }
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides
fn build_config(cli: &Cli) -> Result<SimConfig> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_json_file(path)?,
        None => SimConfig::default(),
    };

    if let Some(depth) = cli.depth {
        let [width, height] = [cli.width.unwrap_or(10), cli.height.unwrap_or(10)];
        let base = SimConfig::new_3d(width, height, depth);
        config.dimensions = base.dimensions;
        config.start_heading = base.start_heading;
    } else {
        for (axis, value) in [(0, cli.width), (1, cli.height)] {
            let Some(value) = value else { continue };
            match config.dimensions.get_mut(axis) {
                Some(extent) => *extent = value,
                None => bail!("grid has no axis {axis} to resize"),
            }
        }
    }
    if let Some(interval) = cli.interval {
        config.base_interval = interval;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.no_power_ups {
        config.power_up.enabled = false;
    }

    Ok(config)
}

fn init_logging(mode: Mode, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // The TUI owns stderr; without a file human mode stays silent
        None if mode == Mode::Human => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
