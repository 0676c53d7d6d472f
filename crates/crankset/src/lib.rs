//! # CRANKSET
//!
//! The demo game around [`crankset_core`]: a bouncing "Goodbye World!",
//! a static caption, crank-sized ellipses spawned with `A` and removed
//! with `B`, and an FPS counter.
//!
//! The host implements [`Console`] and calls [`Game::update`] once per
//! refresh. [`HeadlessConsole`] stands in for the device in tests and in
//! the `crankset_sim` binary.
//!
//! ## Example
//!
//! ```rust
//! use crankset::{Game, GameConfig, HeadlessConsole};
//! use crankset_core::Buttons;
//!
//! let mut console = HeadlessConsole::new();
//! let mut game = Game::init(&mut console, GameConfig::default())?;
//!
//! console.set_input(Buttons::A, 45.0);
//! game.update(&mut console);
//!
//! assert_eq!(console.ellipses().count(), 2);
//! assert_eq!(console.texts().next(), Some(("Goodbye World!", 157, 112)));
//! # Ok::<(), crankset::GameError>(())
//! ```

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod bounce;
pub mod config;
pub mod console;
pub mod error;
pub mod game_loop;
pub mod headless;

pub use bounce::{BounceConfig, TextBouncer};
pub use config::{Caption, FpsOverlay, GameConfig, DEFAULT_FONT_PATH};
pub use console::{Console, ConsoleError, FontHandle};
pub use error::GameError;
pub use game_loop::{FrameStats, Game};
pub use headless::{DrawCommand, HeadlessConsole, InputScript, ScriptError, ScriptFrame};
