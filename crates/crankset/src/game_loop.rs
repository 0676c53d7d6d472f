//! # Game Loop
//!
//! The per-frame callback. Each frame, in order:
//!
//! 1. clear to white and select the font
//! 2. draw the bouncing text, then the captions
//! 3. read input and run one core tick (which draws the ellipses)
//! 4. advance the bouncing text
//! 5. draw the FPS overlay

use crankset_core::{Color, InputSnapshot, TickReport, World};
use tracing::{error, info};

use crate::bounce::TextBouncer;
use crate::config::{Caption, FpsOverlay, GameConfig};
use crate::console::{Console, FontHandle};
use crate::error::GameError;

/// Running totals over every frame so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames run.
    pub frames: u64,
    /// Objects spawned by input.
    pub spawned: u64,
    /// Spawn requests refused because a pool was full.
    pub spawn_rejected: u64,
    /// Objects despawned by input.
    pub despawned: u64,
    /// Most ellipses drawn in a single frame.
    pub peak_drawn: usize,
    /// Report of the latest tick.
    pub last: TickReport,
}

impl FrameStats {
    fn record(&mut self, report: &TickReport) {
        self.frames += 1;
        self.spawned += u64::from(report.spawned.is_some());
        self.spawn_rejected += u64::from(report.spawn_rejected);
        self.despawned += u64::from(report.despawned.is_some());
        self.peak_drawn = self.peak_drawn.max(report.drawn);
        self.last = *report;
    }
}

/// The demo: a [`World`] plus the cosmetic frame around it.
pub struct Game {
    world: World,
    font: FontHandle,
    bouncer: TextBouncer,
    bounce_text: String,
    captions: Vec<Caption>,
    fps: FpsOverlay,
    stats: FrameStats,
}

impl Game {
    /// Loads the font and builds the world.
    ///
    /// # Errors
    ///
    /// - [`GameError::Config`] if `config` fails validation
    /// - [`GameError::FontLoad`] if the font cannot be loaded
    /// - [`GameError::Core`] if the setup objects do not fit their pools
    pub fn init<C: Console + ?Sized>(console: &mut C, config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let font = console.load_font(&config.font_path).map_err(|error| {
            error!(%error, "font load failed");
            error
        })?;
        let world = World::new(config.world)?;

        info!(
            font = %config.font_path,
            objects = world.object_count(),
            captions = config.captions.len(),
            "game initialized"
        );

        Ok(Self {
            world,
            font,
            bouncer: TextBouncer::new(&config.bounce),
            bounce_text: config.bounce.text,
            captions: config.captions,
            fps: config.fps,
            stats: FrameStats::default(),
        })
    }

    /// Runs one frame against `console`. Always returns `true`: the demo
    /// never asks the console to stop refreshing.
    pub fn update<C: Console + ?Sized>(&mut self, console: &mut C) -> bool {
        console.clear(Color::White);
        console.set_font(self.font);

        let (x, y) = self.bouncer.position();
        console.draw_text(&self.bounce_text, x, y);
        for caption in &self.captions {
            console.draw_text(&caption.text, caption.x, caption.y);
        }

        let input = InputSnapshot::read(&*console);
        let report = self.world.tick(&input, console);
        self.stats.record(&report);

        self.bouncer.step();

        if self.fps.enabled {
            console.draw_fps(self.fps.x, self.fps.y);
        }
        true
    }

    /// The simulation.
    #[inline]
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the simulation, for scripted setups.
    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The bouncing text.
    #[inline]
    #[must_use]
    pub const fn bouncer(&self) -> &TextBouncer {
        &self.bouncer
    }

    /// Totals so far.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &FrameStats {
        &self.stats
    }
}
