//! # crankset_sim
//!
//! Runs the demo against a [`HeadlessConsole`] for a fixed number of
//! frames, replaying an input script, and logs what happened.
//!
//! ```text
//! crankset_sim --ticks 600 --script config/demo_script.toml
//! RUST_LOG=crankset_core=debug crankset_sim --config config/crankset.toml
//! ```

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use crankset::{DrawCommand, Game, GameConfig, HeadlessConsole, InputScript};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "crankset_sim", about = "Headless run of the crankset demo")]
struct Args {
    /// Game config TOML. Defaults to the stock demo.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input script TOML, replayed in a loop. Defaults to a built-in script.
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Frames to run
    #[arg(short, long, default_value_t = 300)]
    ticks: usize,

    /// Overrides the world seed from the config
    #[arg(long)]
    seed: Option<u64>,

    /// Log every command of the final frame
    #[arg(long)]
    dump_frame: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.world.seed = seed;
    }

    let script = match &args.script {
        Some(path) => InputScript::from_file(path)
            .with_context(|| format!("loading script {}", path.display()))?,
        None => InputScript::demo(),
    };
    ensure!(!script.is_empty(), "input script plays no frames");
    info!(frames = script.len(), ticks = args.ticks, "script loaded");

    let mut console = HeadlessConsole::new();
    let mut game = Game::init(&mut console, config).context("starting game")?;

    for (frame, (held, crank)) in script.frames().cycle().take(args.ticks).enumerate() {
        console.set_input(held, crank);
        game.update(&mut console);
        debug!(
            frame,
            ?held,
            crank,
            objects = game.world().object_count(),
            drawn = game.stats().last.drawn,
            "frame"
        );
    }

    let stats = game.stats();
    info!(
        frames = stats.frames,
        spawned = stats.spawned,
        rejected = stats.spawn_rejected,
        despawned = stats.despawned,
        peak_drawn = stats.peak_drawn,
        live = game.world().object_count(),
        "run finished"
    );

    if args.dump_frame {
        for command in console.commands() {
            match command {
                DrawCommand::Ellipse(e) => info!(
                    x = e.x,
                    y = e.y,
                    width = e.width,
                    height = e.height,
                    "ellipse"
                ),
                other => info!(?other, "draw"),
            }
        }
    }

    Ok(())
}
