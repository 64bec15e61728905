// scheduler.rs - Ordered normal/late system lists driven once per frame

use crate::ecs::{Phase, System, SystemHandle, SystemRegistrationError, World};
use ember_metrics::SystemProfiler;
use std::time::Duration;

pub struct Scheduler {
    normal: Vec<RegisteredSystem>,
    late: Vec<RegisteredSystem>,
    next_serial: u32,
    profiler: SystemProfiler,
}

struct RegisteredSystem {
    handle: SystemHandle,
    name: String,
    system: Box<dyn System>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            normal: Vec::new(),
            late: Vec::new(),
            next_serial: 0,
            profiler: SystemProfiler::new(),
        }
    }

    /// Register `system` in `phase` and run its `init`.
    ///
    /// Names must be unique across both phases; a rejected system is dropped
    /// without being initialised.
    pub fn register<S: System>(
        &mut self,
        world: &mut World,
        mut system: S,
        phase: Phase,
    ) -> Result<SystemHandle, SystemRegistrationError> {
        let name = system.name().to_string();
        if let Some(existing) = self.find_by_name(&name) {
            return Err(SystemRegistrationError::DuplicateName {
                name,
                existing: existing.handle,
            });
        }

        let handle = SystemHandle::new(self.next_serial, phase);
        self.next_serial += 1;

        system.init(world);
        tracing::info!(system = %name, ?phase, handle = %handle, "registered system");

        self.list_mut(phase).push(RegisteredSystem {
            handle,
            name,
            system: Box::new(system),
        });
        Ok(handle)
    }

    /// Run every normal-phase system, then every late-phase system.
    pub fn update(&mut self, world: &mut World, dt: f64) {
        for entry in self.normal.iter_mut().chain(self.late.iter_mut()) {
            let _span = tracing::trace_span!("system", name = %entry.name).entered();
            ember_metrics::time_scope!(self.profiler, &entry.name, {
                entry.system.update(world, dt)
            });
        }
    }

    /// Call `exit` on the system behind `handle` and drop it.
    pub fn remove(&mut self, world: &mut World, handle: SystemHandle) -> bool {
        let list = self.list_mut(handle.phase());
        let Some(position) = list.iter().position(|entry| entry.handle == handle) else {
            return false;
        };
        let mut entry = list.remove(position);
        entry.system.exit(world);
        self.profiler.forget(&entry.name);
        tracing::debug!(system = %entry.name, "removed system");
        true
    }

    /// Call `exit` on every system (normal phase first) and drop them all.
    pub fn clear(&mut self, world: &mut World) {
        let count = self.len();
        for mut entry in self.normal.drain(..).chain(self.late.drain(..)) {
            entry.system.exit(world);
        }
        self.profiler.reset();
        if count > 0 {
            tracing::info!(count, "cleared systems");
        }
    }

    pub fn system<S: System>(&self, handle: SystemHandle) -> Option<&S> {
        let entry = self.find(handle)?;
        (*entry.system).as_any().downcast_ref::<S>()
    }

    pub fn system_mut<S: System>(&mut self, handle: SystemHandle) -> Option<&mut S> {
        let entry = self
            .list_mut(handle.phase())
            .iter_mut()
            .find(|entry| entry.handle == handle)?;
        (*entry.system).as_any_mut().downcast_mut::<S>()
    }

    /// Handle of the system registered under `name`.
    pub fn handle_of(&self, name: &str) -> Option<SystemHandle> {
        self.find_by_name(name).map(|entry| entry.handle)
    }

    /// System names in execution order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.normal
            .iter()
            .chain(self.late.iter())
            .map(|entry| entry.name.as_str())
    }

    /// Wall-clock time of each system's latest update, in execution order.
    ///
    /// All zero unless the `metrics` feature is enabled.
    pub fn last_frame_timings(&self) -> Vec<(&str, Duration)> {
        self.names()
            .map(|name| (name, self.profiler.last_timing(name)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.normal.len() + self.late.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, handle: SystemHandle) -> Option<&RegisteredSystem> {
        let list = match handle.phase() {
            Phase::Normal => &self.normal,
            Phase::Late => &self.late,
        };
        list.iter().find(|entry| entry.handle == handle)
    }

    fn find_by_name(&self, name: &str) -> Option<&RegisteredSystem> {
        self.normal
            .iter()
            .chain(self.late.iter())
            .find(|entry| entry.name == name)
    }

    fn list_mut(&mut self, phase: Phase) -> &mut Vec<RegisteredSystem> {
        match phase {
            Phase::Normal => &mut self.normal,
            Phase::Late => &mut self.late,
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
