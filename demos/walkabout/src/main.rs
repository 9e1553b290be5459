//! Walk the sample world without a window.
//!
//! Usage:
//!   walkabout                                  # default script through TOWN and the castle
//!   walkabout --walk right:1.5,up:2 --dt 0.02  # custom script
//!   RUST_LOG=debug walkabout                   # include spawn resolution details

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tilewalk::{
    Direction, FrameOutcome, InputEvent, InputQueue, KeyCode, ManifestMapSource, MapData,
    MapRenderSink, MapTransitionController, World,
};

#[derive(Parser)]
#[command(name = "walkabout")]
#[command(about = "Replay a walk script through the sample world and log every map transition")]
struct Cli {
    /// World manifest (defaults to the bundled sample world)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Comma-separated steps, each `direction:seconds` (direction: up, down, left, right, idle)
    #[arg(long, value_delimiter = ',', default_value = "up:3,right:2,down:1.5,idle:0.5")]
    walk: Vec<WalkStep>,

    /// Frame time in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
}

/// Hold one direction (or nothing) for a number of seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WalkStep {
    direction: Option<Direction>,
    seconds: f32,
}

impl FromStr for WalkStep {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dir, secs) = s
            .split_once(':')
            .ok_or_else(|| format!("expected direction:seconds, got '{s}'"))?;
        let direction = match dir.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "idle" => None,
            other => return Err(format!("unknown direction '{other}'")),
        };
        let seconds: f32 = secs
            .trim()
            .parse()
            .map_err(|e| format!("bad duration '{secs}': {e}"))?;
        if !(seconds >= 0.0) {
            return Err(format!("duration must not be negative, got {seconds}"));
        }
        Ok(Self { direction, seconds })
    }
}

fn key_for(direction: Direction) -> u32 {
    match direction {
        Direction::Up => KeyCode::UP,
        Direction::Down => KeyCode::DOWN,
        Direction::Left => KeyCode::LEFT,
        Direction::Right => KeyCode::RIGHT,
    }
}

/// Stands in for the tile renderer: logs each map it is asked to draw.
#[derive(Default)]
struct LoggingSink {
    swaps: usize,
}

impl MapRenderSink for LoggingSink {
    fn swap_map(&mut self, map: &MapData) {
        self.swaps += 1;
        log::info!(
            "Renderer now drawing {} ({}x{} tiles, {} portals)",
            map.id,
            map.width,
            map.height,
            map.portals.as_ref().map_or(0, Vec::len)
        );
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if !(cli.dt > 0.0) {
        bail!("--dt must be greater than zero, got {}", cli.dt);
    }

    let manifest = cli
        .manifest
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/world.json"));
    let source = ManifestMapSource::open(&manifest)
        .with_context(|| format!("Failed to open world {}", manifest.display()))?;
    let config = source.config().clone();
    let controller =
        MapTransitionController::open(source, config).context("Failed to open initial map")?;
    let mut world = World::new(controller);
    report_diagnostics(&mut world);

    log::info!(
        "Starting on {} at {:?} (tiles)",
        world.current_map_id(),
        world.player().current_position()
    );

    let mut sink = LoggingSink::default();
    let frames = run_script(&mut world, &cli.walk, cli.dt, &mut sink)?;

    log::info!(
        "Finished after {} frames on {} at {:?} (tiles), {} map swaps",
        frames,
        world.current_map_id(),
        world.player().current_position(),
        sink.swaps
    );
    Ok(())
}

/// Replay `script`, one key press per step. Returns the number of frames run.
fn run_script<R: MapRenderSink>(
    world: &mut World<ManifestMapSource>,
    script: &[WalkStep],
    dt: f32,
    sink: &mut R,
) -> Result<u32> {
    let mut input = InputQueue::new();
    let mut frames = 0u32;

    for step in script {
        if let Some(dir) = step.direction {
            input.push(InputEvent::KeyDown { key_code: key_for(dir) });
        }
        let steps = (step.seconds / dt).round() as u32;
        for _ in 0..steps {
            frames += 1;
            match world.update(dt, &mut input, sink)? {
                FrameOutcome::Transitioned(map) => log::info!(
                    "Frame {}: arrived on {} at {:?}",
                    frames,
                    map,
                    world.player().current_position()
                ),
                FrameOutcome::Blocked => log::debug!("Frame {}: blocked", frames),
                FrameOutcome::Quit => return Ok(frames),
                FrameOutcome::Moved | FrameOutcome::Idle => {}
            }
            report_diagnostics(world);
        }
        if let Some(dir) = step.direction {
            input.push(InputEvent::KeyUp { key_code: key_for(dir) });
        }
    }
    Ok(frames)
}

fn report_diagnostics(world: &mut World<ManifestMapSource>) {
    for diag in world.transitions_mut().drain_diagnostics() {
        log::warn!("{}", diag);
    }
}
