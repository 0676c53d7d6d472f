//! # Tick Systems
//!
//! The per-frame pass, in order:
//!
//! 1. spawn on `A` pushed, despawn on `B` pushed
//! 2. move controlled renderers while the D-pad is held
//! 3. drive resizers (and their target renderers) from the crank
//! 4. draw every live renderer in slot order
//!
//! Stale links are skipped, never reported: a component deactivated
//! elsewhere simply has nothing left to do.

use tracing::warn;

use super::object::ObjectHandle;
use super::world::World;
use crate::input::{Buttons, InputSnapshot};
use crate::surface::{Ellipse, Surface};

/// What one tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Object spawned by `A`.
    pub spawned: Option<ObjectHandle>,
    /// `A` was pushed but a pool was full.
    pub spawn_rejected: bool,
    /// Object despawned by `B`.
    pub despawned: Option<ObjectHandle>,
    /// Renderers moved by controllers.
    pub moved: usize,
    /// Renderers resized by the crank.
    pub resized: usize,
    /// Ellipses drawn.
    pub drawn: usize,
}

impl World {
    /// Runs one frame of the update loop and draws into `surface`.
    ///
    /// Never fails: exhaustion is logged and reported in the
    /// [`TickReport`], stale handles are skipped.
    pub fn tick<S: Surface + ?Sized>(&mut self, input: &InputSnapshot, surface: &mut S) -> TickReport {
        let mut report = TickReport::default();

        if input.pushed(Buttons::A) {
            match self.spawn_random() {
                Ok(object) => report.spawned = Some(object),
                Err(error) => {
                    warn!(%error, tick = self.ticks, "spawn rejected");
                    report.spawn_rejected = true;
                }
            }
        }
        if input.pushed(Buttons::B) {
            report.despawned = self.despawn_first_active();
        }

        report.moved = self.apply_controllers(input.direction());
        report.resized = self.apply_resizers(input.crank_angle);
        report.drawn = self.draw(surface);

        self.ticks += 1;
        report
    }

    /// Moves every controlled renderer one step in `direction`.
    ///
    /// `direction` is `-1`, `0` or `1` per axis; the step size comes from each
    /// controller. The owning object's position moves along. Returns the
    /// number of renderers moved.
    #[allow(clippy::cast_precision_loss)]
    pub fn apply_controllers(&mut self, direction: (i32, i32)) -> usize {
        if direction == (0, 0) {
            return 0;
        }

        let Self {
            objects,
            renderers,
            controllers,
            ..
        } = self;

        let mut moved = 0;
        for (_, object) in objects.iter_active_mut() {
            let Some(step) = object.controller.and_then(|c| controllers.get_active(c)) else {
                continue;
            };
            let Some(renderer) = object.renderer.and_then(|r| renderers.get_active_mut(r)) else {
                continue;
            };

            let dx = step.dx.saturating_mul(direction.0);
            let dy = step.dy.saturating_mul(direction.1);
            renderer.translate(dx, dy);
            object.x += dx as f32;
            object.y += dy as f32;
            moved += 1;
        }
        moved
    }

    /// Sets every live resizer to the crank angle and resizes its target.
    ///
    /// Returns the number of renderers resized.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply_resizers(&mut self, crank_angle: f32) -> usize {
        let Self {
            objects,
            renderers,
            resizers,
            ..
        } = self;

        resizers.for_each_active_mut(|_, resizer| resizer.size = crank_angle);

        let mut resized = 0;
        for (_, object) in objects.iter_active() {
            let Some(resizer) = object.resizer.and_then(|r| resizers.get_active(r)) else {
                continue;
            };
            let Some(target) = object.resizer_target.and_then(|r| renderers.get_active_mut(r)) else {
                continue;
            };

            target.set_size(resizer.size as i32);
            resized += 1;
        }
        resized
    }

    /// Draws every live renderer in ascending slot order.
    ///
    /// Returns the number of ellipses drawn.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let mut drawn = 0;
        self.renderers.for_each_active(|_, renderer| {
            surface.draw_ellipse(&Ellipse::from(renderer));
            drawn += 1;
        });
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PoolCapacities, WorldConfig};
    use crate::input::ButtonState;
    use crate::surface::DrawList;

    fn world() -> World {
        World::new(WorldConfig {
            setup: Vec::new(),
            capacities: PoolCapacities::default(),
            ..WorldConfig::default()
        })
        .unwrap()
    }

    fn pushed(buttons: Buttons) -> InputSnapshot {
        InputSnapshot::new(ButtonState::from_transition(Buttons::empty(), buttons), 0.0)
    }

    #[test]
    fn test_spawn_and_despawn_edges() {
        let mut world = world();
        let mut surface = DrawList::new();

        let report = world.tick(&pushed(Buttons::A), &mut surface);
        assert!(report.spawned.is_some());
        assert_eq!(report.drawn, 1);

        // Holding A without a new edge does not spawn again.
        let report = world.tick(&InputSnapshot::held(Buttons::A, 0.0), &mut surface);
        assert_eq!(report.spawned, None);
        assert_eq!(world.object_count(), 1);

        let report = world.tick(&pushed(Buttons::B), &mut surface);
        assert!(report.despawned.is_some());
        assert_eq!(world.object_count(), 0);
        assert_eq!(report.drawn, 0);
        assert_eq!(world.ticks(), 3);
    }

    #[test]
    fn test_spawn_rejected_is_reported() {
        let mut world = World::new(WorldConfig {
            setup: Vec::new(),
            capacities: PoolCapacities {
                objects: 1,
                ..PoolCapacities::default()
            },
            ..WorldConfig::default()
        })
        .unwrap();
        let mut surface = DrawList::new();

        world.tick(&pushed(Buttons::A), &mut surface);
        let report = world.tick(&pushed(Buttons::A), &mut surface);
        assert!(report.spawn_rejected);
        assert_eq!(world.object_count(), 1);
    }

    #[test]
    fn test_controllers_move_object_position() {
        let mut world = world();
        let object = world.spawn(10.0, 10.0).unwrap();

        assert_eq!(world.apply_controllers((-1, 1)), 1);
        let record = world.object(object).unwrap();
        assert!((record.x - 8.0).abs() < f32::EPSILON);
        assert!((record.y - 12.0).abs() < f32::EPSILON);
        let renderer = world.renderer_of(object).unwrap();
        assert_eq!((renderer.pos_x, renderer.pos_y), (8, 12));
    }

    #[test]
    fn test_stale_links_are_skipped() {
        let mut world = world();
        let object = world.spawn(10.0, 10.0).unwrap();
        let record = *world.object(object).unwrap();

        // Kill the renderer behind the object's back.
        world.renderers.deactivate(record.renderer.unwrap()).unwrap();
        assert_eq!(world.apply_controllers((1, 0)), 0);
        assert_eq!(world.apply_resizers(45.0), 0);
        // The resizer itself still follows the crank.
        let size = world.resizers.get(record.resizer.unwrap()).unwrap().size;
        assert!((size - 45.0).abs() < f32::EPSILON);
        assert_eq!(world.draw(&mut DrawList::new()), 0);
    }

    #[test]
    fn test_draw_order_is_slot_order() {
        let mut world = world();
        for x in [30.0, 10.0, 20.0] {
            world.spawn(x, 0.0).unwrap();
        }
        world.despawn(world.objects.first_active().unwrap()).unwrap();
        world.spawn(99.0, 0.0).unwrap();

        let mut surface = DrawList::new();
        world.draw(&mut surface);
        let xs: Vec<i32> = surface.ellipses().iter().map(|e| e.x).collect();
        assert_eq!(xs, vec![99, 10, 20]);
    }
}
