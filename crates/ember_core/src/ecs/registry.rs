// registry.rs - The single owner of entities, components and systems
//
// Application code constructs one `Registry` and threads it through; tests
// construct one per test. Systems receive the world by `&mut`, never through
// a global.

use crate::ecs::{
    Component, EntityId, EntityMut, EntityRef, Phase, RegistryConfig, Scheduler, System,
    SystemHandle, SystemRegistrationError, World, WorldError,
};

pub struct Registry {
    world: World,
    scheduler: Scheduler,
    frame: u64,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            world: World::with_config(config),
            scheduler: Scheduler::new(),
            frame: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Number of completed `update` calls since construction or `clear`.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // ------------------------------------------------------------------
    // Entities
    // ------------------------------------------------------------------

    pub fn create_entity(&mut self, name: Option<&str>) -> Result<EntityId, WorldError> {
        self.world.create_entity(name)
    }

    pub fn spawn(&mut self, name: Option<&str>) -> Result<EntityMut<'_>, WorldError> {
        self.world.spawn(name)
    }

    pub fn destroy_entity(&mut self, id: EntityId) -> Result<(), WorldError> {
        self.world.destroy_entity(id)
    }

    pub fn destroy_entity_by_name(&mut self, name: &str) -> Result<EntityId, WorldError> {
        self.world.destroy_entity_by_name(name)
    }

    pub fn entity_by_name(&self, name: &str) -> Result<EntityId, WorldError> {
        self.world.entity_by_name(name)
    }

    pub fn entity(&self, id: EntityId) -> Result<EntityRef<'_>, WorldError> {
        self.world.entity(id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<EntityMut<'_>, WorldError> {
        self.world.entity_mut(id)
    }

    pub fn each_component<T, F>(&mut self, visit: F) -> Result<(), WorldError>
    where
        T: Component,
        F: FnMut(EntityId, &mut T),
    {
        self.world.each_component(visit)
    }

    // ------------------------------------------------------------------
    // Systems
    // ------------------------------------------------------------------

    /// Register a normal-phase system and run its `init`.
    pub fn add_system<S: System>(&mut self, system: S) -> Result<SystemHandle, SystemRegistrationError> {
        self.scheduler.register(&mut self.world, system, Phase::Normal)
    }

    /// Register a system that runs after every normal-phase system.
    pub fn add_late_system<S: System>(
        &mut self,
        system: S,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        self.scheduler.register(&mut self.world, system, Phase::Late)
    }

    pub fn remove_system(&mut self, handle: SystemHandle) -> bool {
        self.scheduler.remove(&mut self.world, handle)
    }

    pub fn system<S: System>(&self, handle: SystemHandle) -> Option<&S> {
        self.scheduler.system(handle)
    }

    pub fn system_mut<S: System>(&mut self, handle: SystemHandle) -> Option<&mut S> {
        self.scheduler.system_mut(handle)
    }

    /// Run one frame: every normal-phase system, then every late one.
    pub fn update(&mut self, dt: f64) {
        self.scheduler.update(&mut self.world, dt);
        self.frame += 1;
    }

    /// Exit and drop all systems, then drop all entities and component stores.
    ///
    /// Afterwards the registry behaves exactly like a new one.
    pub fn clear(&mut self) {
        self.scheduler.clear(&mut self.world);
        self.world.reset();
        self.frame = 0;
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if !self.scheduler.is_empty() {
            self.scheduler.clear(&mut self.world);
        }
    }
}
