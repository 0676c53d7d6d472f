//! # ECS World
//!
//! The game object registry plus one pool per component kind.
//! Pre-allocates all memory at creation time.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use super::component::{Controller, Renderer, Resizer};
use super::object::{ControllerHandle, GameObject, ObjectHandle, SpawnLoadout};
use crate::config::WorldConfig;
use crate::error::{Error, PoolResult};
use crate::memory::ComponentPool;

/// The ECS World - container for all game state.
///
/// All memory is pre-allocated at creation. Spawning, despawning and
/// ticking never allocate.
///
/// # Example
///
/// ```rust
/// use crankset_core::{World, WorldConfig};
///
/// let mut world = World::new(WorldConfig::default())?;
/// let object = world.spawn(40.0, 20.0)?;
/// assert_eq!(world.renderer_of(object).map(|r| r.pos_x), Some(40));
/// # Ok::<(), crankset_core::Error>(())
/// ```
pub struct World {
    pub(super) objects: ComponentPool<GameObject>,
    pub(super) renderers: ComponentPool<Renderer>,
    pub(super) resizers: ComponentPool<Resizer>,
    pub(super) controllers: ComponentPool<Controller>,

    config: WorldConfig,
    rng: ChaCha8Rng,
    pub(super) ticks: u64,
}

impl World {
    /// Validates the config, builds every pool and spawns the setup objects.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the config is invalid. Setup spawns cannot
    /// exhaust a pool of a validated config, so [`Error::Pool`] is not
    /// expected in practice.
    pub fn new(config: WorldConfig) -> Result<Self, Error> {
        config.validate()?;

        let caps = config.capacities;
        let mut world = Self {
            objects: ComponentPool::new(caps.objects),
            renderers: ComponentPool::new(caps.renderers),
            resizers: ComponentPool::new(caps.resizers),
            controllers: ComponentPool::new(caps.controllers),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config,
            ticks: 0,
        };

        for index in 0..world.config.setup.len() {
            let setup = world.config.setup[index];
            let loadout = setup.loadout.unwrap_or(world.config.loadout);
            world.spawn_with(setup.x, setup.y, loadout)?;
        }

        info!(
            objects = caps.objects,
            renderers = caps.renderers,
            resizers = caps.resizers,
            controllers = caps.controllers,
            setup = world.objects.active_count(),
            "world created"
        );

        Ok(world)
    }

    /// The config the world was built from.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Number of completed ticks.
    #[inline]
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Game object registry.
    #[inline]
    #[must_use]
    pub const fn objects(&self) -> &ComponentPool<GameObject> {
        &self.objects
    }

    /// Renderer pool.
    #[inline]
    #[must_use]
    pub const fn renderers(&self) -> &ComponentPool<Renderer> {
        &self.renderers
    }

    /// Resizer pool.
    #[inline]
    #[must_use]
    pub const fn resizers(&self) -> &ComponentPool<Resizer> {
        &self.resizers
    }

    /// Controller pool.
    #[inline]
    #[must_use]
    pub const fn controllers(&self) -> &ComponentPool<Controller> {
        &self.controllers
    }

    /// Number of live game objects.
    #[inline]
    #[must_use]
    pub const fn object_count(&self) -> usize {
        self.objects.active_count()
    }

    /// Gets a live game object.
    #[inline]
    #[must_use]
    pub fn object(&self, handle: ObjectHandle) -> Option<&GameObject> {
        self.objects.get_active(handle)
    }

    /// Gets the live renderer of a live game object.
    #[must_use]
    pub fn renderer_of(&self, handle: ObjectHandle) -> Option<&Renderer> {
        let renderer = self.object(handle)?.renderer?;
        self.renderers.get_active(renderer)
    }

    /// Spawns an object with the configured loadout.
    ///
    /// # Errors
    ///
    /// See [`spawn_with`](Self::spawn_with).
    pub fn spawn(&mut self, x: f32, y: f32) -> PoolResult<ObjectHandle> {
        self.spawn_with(x, y, self.config.loadout)
    }

    /// Spawns an object at a random point of the configured spawn area.
    ///
    /// # Errors
    ///
    /// See [`spawn_with`](Self::spawn_with).
    pub fn spawn_random(&mut self) -> PoolResult<ObjectHandle> {
        let (x, y) = self.config.spawn_area.sample(&mut self.rng);
        self.spawn(x, y)
    }

    /// Spawns an object with a renderer and the requested optional components.
    ///
    /// Optional components are skipped when their pool is full. If the slot
    /// being reused still links a live controller (left behind by a despawn),
    /// that controller is re-linked instead of allocating a new one.
    ///
    /// # Errors
    ///
    /// [`PoolError::PoolExhausted`](crate::PoolError::PoolExhausted) when the
    /// registry or the renderer pool is full. Nothing is changed in that case.
    #[allow(clippy::cast_possible_truncation)]
    pub fn spawn_with(
        &mut self,
        x: f32,
        y: f32,
        loadout: SpawnLoadout,
    ) -> PoolResult<ObjectHandle> {
        let retained = self.retained_controller();

        let object = self.objects.allocate(GameObject::at(x, y))?;
        let renderer = match self
            .renderers
            .allocate(self.config.shape.renderer_at(x as i32, y as i32))
        {
            Ok(renderer) => renderer,
            Err(error) => {
                self.objects.deactivate(object)?;
                return Err(error);
            }
        };

        let mut record = GameObject::at(x, y);
        record.renderer = Some(renderer);

        if loadout.resizer {
            #[allow(clippy::cast_precision_loss)]
            let initial = Resizer {
                size: self.config.shape.width as f32,
            };
            match self.resizers.allocate(initial) {
                Ok(resizer) => {
                    record.resizer = Some(resizer);
                    record.resizer_target = Some(renderer);
                }
                Err(error) => debug!(%error, object = object.index(), "spawning without resizer"),
            }
        }

        match (loadout.controller, retained) {
            (true, Some(controller)) => {
                debug!(
                    object = object.index(),
                    controller = controller.index(),
                    "re-linked retained controller"
                );
                record.controller = Some(controller);
            }
            (true, None) => match self.controllers.allocate(self.config.controller.component()) {
                Ok(controller) => record.controller = Some(controller),
                Err(error) => debug!(%error, object = object.index(), "spawning without controller"),
            },
            (false, Some(controller)) => {
                // Nobody else links it; keeping it would leak the slot.
                self.controllers.deactivate(controller)?;
            }
            (false, None) => {}
        }

        *self.objects.get_mut(object)? = record;

        debug!(
            object = object.index(),
            renderer = renderer.index(),
            x,
            y,
            "spawned game object"
        );

        Ok(object)
    }

    /// Despawns a live object together with its renderer and resizer.
    ///
    /// The controller is deactivated only when
    /// `controller.release_on_despawn` is set; otherwise it stays live and
    /// linked from the dead slot.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidHandle`](crate::PoolError::InvalidHandle) if the
    /// object is not live.
    pub fn despawn(&mut self, handle: ObjectHandle) -> PoolResult<()> {
        self.objects.deactivate(handle)?;
        let record = *self.objects.get(handle)?;

        if let Some(renderer) = record.renderer.filter(|&r| self.renderers.is_active(r)) {
            self.renderers.deactivate(renderer)?;
        }
        if let Some(resizer) = record.resizer.filter(|&r| self.resizers.is_active(r)) {
            self.resizers.deactivate(resizer)?;
        }
        if let Some(controller) = record.controller.filter(|&c| self.controllers.is_active(c)) {
            if self.config.controller.release_on_despawn {
                self.controllers.deactivate(controller)?;
            } else {
                debug!(
                    object = handle.index(),
                    controller = controller.index(),
                    "controller retained after despawn"
                );
            }
        }

        debug!(object = handle.index(), "despawned game object");
        Ok(())
    }

    /// Despawns the live object with the lowest index.
    ///
    /// Returns the despawned handle, or `None` if nothing is live.
    pub fn despawn_first_active(&mut self) -> Option<ObjectHandle> {
        let handle = self.objects.first_active()?;
        self.despawn(handle).ok()?;
        Some(handle)
    }

    /// Controller kept alive by a despawn in the slot the next spawn will
    /// use.
    ///
    /// Only despawns that retain controllers leave one behind. A stale link
    /// to a controller that a live object owns is never a retained one.
    fn retained_controller(&self) -> Option<ControllerHandle> {
        if self.config.controller.release_on_despawn {
            return None;
        }

        let slot = self.objects.first_free()?;
        let stale = self.objects.get(slot).ok()?;
        let controller = stale.controller.filter(|&c| self.controllers.is_active(c))?;

        let owned = self
            .objects
            .iter_active()
            .any(|(_, object)| object.controller == Some(controller));
        (!owned).then_some(controller)
    }
}
