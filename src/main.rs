//! ASCII Donut - a spinning torus in the terminal with a first-person camera
//!
//! Controls:
//! - W/S: Move forward/back
//! - A/D: Strafe left/right
//! - Q/E: Move up/down
//! - J/L, I/K: Turn and look up/down
//! - R: Reset camera
//! - Space: Pause the spin
//! - Escape or Ctrl-C: Quit
//!
//! Usage:
//!   ascii_donut                     - Run interactive mode
//!   ascii_donut --snapshot 10       - Render 10 frames to ./debug/frame_XXX.txt files

use anyhow::Context;
use ascii_donut::camera::CameraState;
use ascii_donut::config::AppConfig;
use ascii_donut::error::DonutError;
use ascii_donut::raster::CELLS_PER_PIXEL;
use ascii_donut::{App, Renderer, TerminalDisplay, GRID_HEIGHT, GRID_WIDTH};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "ascii_donut")]
#[command(version)]
#[command(about = "Spinning ASCII donut with a first-person camera")]
struct Cli {
    /// Path to a YAML config file (built-in defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Render this many frames to files instead of running interactively
    #[arg(long, value_name = "FRAMES")]
    snapshot: Option<u32>,

    /// Directory for snapshot frames
    #[arg(long, default_value = "debug")]
    out_dir: PathBuf,

    /// Animation seconds between snapshot frames
    #[arg(long, default_value_t = 0.05)]
    time_step: f64,

    /// Validate the configuration, print it, and exit
    #[arg(long)]
    check_config: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_or_default(cli.config.as_deref())
        .map_err(DonutError::from)
        .with_context(|| match &cli.config {
            Some(path) => format!("Error loading configuration from {}", path.display()),
            None => "Error in built-in configuration".to_string(),
        })?;

    if cli.check_config {
        print_config(&config)?;
        return Ok(());
    }

    let level = log_filter(cli.log_level, &config);

    match cli.snapshot {
        Some(frames) => {
            init_logging(&level, None)?;
            run_snapshot(&config, frames, &cli.out_dir, cli.time_step)
        }
        None => {
            // Interactive output owns the screen; logs only go to a file
            if let Some(path) = &config.logging.file {
                init_logging(&level, Some(path.as_path()))?;
            }
            run_interactive(&config)
        }
    }
}

/// CLI flag wins, then RUST_LOG, then the config file
fn log_filter(cli_level: Option<LogLevel>, config: &AppConfig) -> String {
    match cli_level {
        Some(level) => level.to_string(),
        None => std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone()),
    }
}

fn init_logging(filter: &str, file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_new(filter)
        .with_context(|| format!("Invalid log filter '{}'", filter))?;

    match file {
        Some(path) => {
            let log_file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn run_interactive(config: &AppConfig) -> anyhow::Result<()> {
    let renderer = Renderer::new(GRID_WIDTH, GRID_HEIGHT, config.geometry.donut());
    let mut app = App::new(renderer, config.camera.speeds());

    let mut terminal = TerminalDisplay::new().context("Failed to initialize terminal")?;

    let needed = ((GRID_WIDTH * CELLS_PER_PIXEL) as u16, (GRID_HEIGHT + 1) as u16);
    match terminal.size() {
        Ok((w, h)) if w < needed.0 || h < needed.1 => {
            tracing::warn!(width = w, height = h, needed = ?needed, "Terminal smaller than the frame");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "Could not read terminal size"),
    }

    app.run(&mut terminal).context("Render loop failed")?;

    Ok(())
}

/// Render `frames` frames with the default camera to `<out_dir>/frame_NNN.txt`
fn run_snapshot(config: &AppConfig, frames: u32, out_dir: &Path, time_step: f64) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let mut renderer = Renderer::new(GRID_WIDTH, GRID_HEIGHT, config.geometry.donut());
    let camera = CameraState::default();
    let geometry = renderer.geometry();
    tracing::info!(
        frames,
        hole_diameter = geometry.hole_diameter,
        thickness = geometry.thickness,
        angle_step = geometry.angle_step,
        samples = renderer.sample_count(),
        "Rendering snapshots"
    );

    for frame in 0..frames {
        let time = f64::from(frame) * time_step;
        let stats = renderer.render(time, &camera);

        let path = out_dir.join(format!("frame_{:03}.txt", frame));
        fs::write(&path, renderer.to_ascii()).map_err(|source| DonutError::Snapshot {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(frame, time, written = stats.written, path = %path.display(), "Wrote snapshot");
    }

    Ok(())
}

fn print_config(config: &AppConfig) -> anyhow::Result<()> {
    let geometry = config.geometry.donut();
    println!("✓ Configuration is valid\n");
    println!("Camera:");
    println!("  Move speed: {}", config.camera.move_speed);
    println!("  Turn speed: {} rad", config.camera.rot_speed);
    println!("\nGeometry:");
    println!("  Hole diameter: {}", geometry.hole_diameter);
    println!("  Thickness: {}", geometry.thickness);
    println!("  Angle step: {} rad ({} samples)", geometry.angle_step, geometry.steps_per_turn().pow(2));
    println!("\nLogging:");
    println!("  Level: {}", config.logging.level);
    match &config.logging.file {
        Some(path) => println!("  File: {}", path.display()),
        None => println!("  File: none (interactive mode logs nothing)"),
    }
    println!("\nEffective YAML:\n{}", serde_yaml::to_string(config)?);
    Ok(())
}
