//! # Game Objects
//!
//! A game object owns at most one component of each kind, by handle.
//! The components themselves live in their own pools.

use super::component::{Component, Controller, Renderer, Resizer};
use crate::memory::Handle;

/// Handle to a [`GameObject`] slot.
pub type ObjectHandle = Handle<GameObject>;
/// Handle to a [`Renderer`] slot.
pub type RendererHandle = Handle<Renderer>;
/// Handle to a [`Resizer`] slot.
pub type ResizerHandle = Handle<Resizer>;
/// Handle to a [`Controller`] slot.
pub type ControllerHandle = Handle<Controller>;

/// An entity: a position plus links into the component pools.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GameObject {
    /// Spawn position, kept in step with controller movement.
    pub x: f32,
    /// Spawn position, kept in step with controller movement.
    pub y: f32,
    /// Owned renderer.
    pub renderer: Option<RendererHandle>,
    /// Owned resizer.
    pub resizer: Option<ResizerHandle>,
    /// Renderer whose dimensions the resizer drives.
    pub resizer_target: Option<RendererHandle>,
    /// Owned controller.
    pub controller: Option<ControllerHandle>,
}

impl Component for GameObject {
    const NAME: &'static str = "game object";
}

impl GameObject {
    /// Creates an object at a position with no components.
    #[inline]
    #[must_use]
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            renderer: None,
            resizer: None,
            resizer_target: None,
            controller: None,
        }
    }
}

/// Which optional components [`World::spawn_with`](crate::World::spawn_with)
/// attaches. A renderer is always attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnLoadout {
    /// Attach a resizer targeting the new renderer.
    pub resizer: bool,
    /// Attach a controller.
    pub controller: bool,
}

impl Default for SpawnLoadout {
    fn default() -> Self {
        Self::FULL
    }
}

impl SpawnLoadout {
    /// Renderer only.
    pub const BARE: Self = Self {
        resizer: false,
        controller: false,
    };

    /// Renderer, resizer and controller.
    pub const FULL: Self = Self {
        resizer: true,
        controller: true,
    };
}
