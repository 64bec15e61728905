//! Entity Component System
//!
//! A fixed-capacity entity table, one direct-mapped store per component
//! type, and an ordered two-phase system scheduler, all owned by a
//! [`Registry`]. Entities are slot indices; components are found at the
//! entity's index in their type's store, and a per-entity mask records which
//! of those slots are live. Iteration is a linear scan in slot order.

mod component;
mod config;
mod entity;
mod macros;
mod mask;
mod registry;
mod scheduler;
pub mod slots;
pub mod storage;
mod system;
mod system_handle;
mod system_registration_error;
mod world;

pub use component::{Component, ComponentTypeId};
pub use config::{RegistryConfig, MAX_COMPONENT_TYPES, MAX_ENTITIES};
pub use entity::{EntityId, EntityMut, EntityRef};
pub use mask::ComponentMask;
pub use registry::Registry;
pub use scheduler::Scheduler;
pub use system::{AsAny, System};
pub use system_handle::{Phase, SystemHandle};
pub use system_registration_error::SystemRegistrationError;
pub use world::{World, WorldError};
