// system.rs - Per-frame update units

use crate::ecs::World;
use std::any::Any;

/// Downcasting support for boxed systems.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A stateful unit the scheduler drives once per frame.
///
/// The world is passed in rather than reached through a global, so a system
/// can create and destroy entities or touch any component store.
///
/// # Example
/// ```ignore
/// struct Spin { speed: f32 }
///
/// impl System for Spin {
///     fn update(&mut self, world: &mut World, dt: f64) {
///         let step = self.speed * dt as f32;
///         let _ = world.each_component::<Transform, _>(|_, t| t.rot.y += step);
///     }
/// }
/// ```
pub trait System: AsAny {
    /// Unique name within a scheduler. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Called once when the system is registered.
    fn init(&mut self, _world: &mut World) {}

    /// Called once per frame with the frame delta in seconds.
    fn update(&mut self, world: &mut World, dt: f64);

    /// Called once when the system is removed or the registry is cleared.
    fn exit(&mut self, _world: &mut World) {}
}
