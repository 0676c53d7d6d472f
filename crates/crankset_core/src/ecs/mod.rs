//! # Entity Component System
//!
//! Game objects link components by handle; each component kind lives in its
//! own fixed-capacity pool.
//!
//! ## Design Philosophy
//!
//! - All storage is pre-allocated at world creation
//! - Relationships are explicit handles, never shared slot indices
//! - One single-threaded tick owns all mutation

mod component;
mod object;
mod systems;
mod world;

pub use component::{Color, Component, Controller, Renderer, Resizer};
pub use object::{
    ControllerHandle, GameObject, ObjectHandle, RendererHandle, ResizerHandle, SpawnLoadout,
};
pub use systems::TickReport;
pub use world::World;
