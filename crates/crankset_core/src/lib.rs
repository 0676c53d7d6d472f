//! # CRANKSET Core
//!
//! Fixed-capacity component-pool ECS for a handheld console:
//! - 400×240 1-bit display, D-pad, A/B, crank
//! - A handful of live objects, zero allocations per frame
//! - One tick per rendered frame, single-threaded
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in a tick** - Every pool is sized at startup
//! 2. **Handles are indices** - Never hold a reference across ticks
//! 3. **Explicit links** - A resizer names the renderer it drives
//!
//! ## Example
//!
//! ```rust
//! use crankset_core::{Buttons, ButtonState, DrawList, InputSnapshot, World, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::default())?;
//! let mut surface = DrawList::new();
//!
//! let spawn = InputSnapshot::new(ButtonState::from_transition(Buttons::empty(), Buttons::A), 90.0);
//! let report = world.tick(&spawn, &mut surface);
//!
//! assert!(report.spawned.is_some());
//! assert_eq!(surface.ellipses().len(), 2);
//! # Ok::<(), crankset_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod ecs;
pub mod error;
pub mod input;
pub mod memory;
pub mod surface;

pub use config::{
    ControllerConfig, PoolCapacities, SetupObject, ShapeDefaults, SpawnArea, WorldConfig,
};
pub use ecs::{
    Color, Component, Controller, ControllerHandle, GameObject, ObjectHandle, Renderer,
    RendererHandle, Resizer, ResizerHandle, SpawnLoadout, TickReport, World,
};
pub use error::{ConfigError, Error, PoolError, PoolResult};
pub use input::{ButtonState, Buttons, InputSnapshot, InputSource};
pub use memory::{ActiveHandles, ComponentPool, Handle};
pub use surface::{DrawList, Ellipse, Surface};
