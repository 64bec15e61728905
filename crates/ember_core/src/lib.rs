//! Ember Engine Core
//!
//! Contains the simulation core:
//! - Entity Component System (ECS) with a two-phase system scheduler
//! - Scene components consumed by the renderer
//! - Fixed-step simulation time

pub mod ecs;
pub mod scene;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
