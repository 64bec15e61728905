// component.rs - Component trait and runtime type ids
//
// Components are identified per registry by a small integer assigned on
// first use, keyed by the Rust `TypeId` of the component type.

use std::fmt;

/// Marker trait for data that can be attached to an entity.
///
/// Implement it directly or through [`define_component!`](crate::define_component).
pub trait Component: 'static + Sized {
    /// Human-readable name for logs and errors.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Dense id assigned to a component type the first time a registry sees it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentTypeId(u16);

impl ComponentTypeId {
    pub(crate) const fn new(raw: u16) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Helper macro to implement the `Component` trait.
///
/// # Example
/// ```ignore
/// #[derive(Clone, Copy)]
/// struct Position { x: f32, y: f32 }
///
/// define_component!(Position);
/// define_component!(Velocity, Health);
/// ```
#[macro_export]
macro_rules! define_component {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::ecs::Component for $ty {}
        )+
    };
}
