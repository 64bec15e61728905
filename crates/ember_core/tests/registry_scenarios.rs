//! End-to-end behaviour of the registry: entity lifecycle, component
//! presence, capacity limits and frame ordering.

use ember_core::define_component;
use ember_core::ecs::{
    Component, EntityId, Registry, RegistryConfig, System, World, WorldError,
    MAX_COMPONENT_TYPES, MAX_ENTITIES,
};
use ember_core::spawn;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Position {
    x: i32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Velocity {
    dx: i32,
}

define_component!(Position, Velocity);

struct Marker<const N: usize>;
impl<const N: usize> Component for Marker<N> {}

macro_rules! register_markers {
    ($world:expr; $($n:literal)+) => {
        vec![$($world.register_component::<Marker<$n>>()),+]
    };
}

#[test]
fn position_velocity_scenario() {
    let mut registry = Registry::new();
    let e1 = {
        let mut entity = registry.spawn(None).unwrap();
        entity.add_component(Position { x: 1 }).unwrap();
        entity.add_component(Velocity { dx: 2 }).unwrap();
        entity.id()
    };

    let mut seen = Vec::new();
    registry
        .each_component::<Position, _>(|id, pos| seen.push((id, *pos)))
        .unwrap();
    assert_eq!(seen, vec![(e1, Position { x: 1 })]);

    registry.destroy_entity(e1).unwrap();
    let mut count = 0;
    registry
        .each_component::<Position, _>(|_, _| count += 1)
        .unwrap();
    assert_eq!(count, 0);
    assert!(matches!(
        registry.entity(e1),
        Err(WorldError::InvalidEntity { id }) if id == e1
    ));
}

#[test]
fn entity_capacity_is_exact() {
    let mut world = World::new();
    for _ in 0..MAX_ENTITIES {
        world.create_entity(None).unwrap();
    }
    assert_eq!(
        world.create_entity(None),
        Err(WorldError::CapacityExceeded {
            capacity: MAX_ENTITIES
        })
    );

    // One destroy makes room for exactly one more
    world.destroy_entity(EntityId::default()).unwrap();
    assert!(world.create_entity(None).is_ok());
    assert!(world.create_entity(None).is_err());
}

#[test]
fn component_type_limit_is_exact() {
    let mut world = World::new();
    let results = register_markers!(world; 0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32 33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48 49 50 51 52 53 54 55 56 57 58 59 60 61 62 63 64 65 66 67 68 69 70 71 72 73 74 75 76 77 78 79 80 81 82 83 84 85 86 87 88 89 90 91 92 93 94 95 96 97 98 99 100 101 102 103 104 105 106 107 108 109 110 111 112 113 114 115 116 117 118 119 120 121 122 123 124 125 126 127 128);
    assert_eq!(results.len(), MAX_COMPONENT_TYPES + 1);

    for (index, result) in results[..MAX_COMPONENT_TYPES].iter().enumerate() {
        assert_eq!(result.as_ref().map(|id| id.index()), Ok(index));
    }
    assert!(matches!(
        results[MAX_COMPONENT_TYPES],
        Err(WorldError::ComponentTypeLimitExceeded { limit, .. }) if limit == MAX_COMPONENT_TYPES
    ));

    // Already-registered types still resolve at the limit
    assert!(world.register_component::<Marker<0>>().is_ok());

    // Freeing one id lets the next new type in, reusing that id
    assert!(world.unregister_component::<Marker<5>>());
    assert_eq!(
        world.register_component::<Position>().map(|id| id.index()),
        Ok(5)
    );
}

#[test]
fn smaller_configured_limits_apply() {
    let mut registry = Registry::with_config(RegistryConfig {
        max_entities: 2,
        max_component_types: 1,
    });
    let e = registry.create_entity(None).unwrap();
    registry.entity_mut(e).unwrap().add_component(Position { x: 0 }).unwrap();
    assert!(matches!(
        registry.entity_mut(e).unwrap().add_component(Velocity { dx: 0 }),
        Err(WorldError::ComponentTypeLimitExceeded { limit: 1, .. })
    ));
    registry.create_entity(None).unwrap();
    assert!(registry.create_entity(None).is_err());
}

#[test]
fn destroyed_slot_comes_back_empty() {
    let mut registry = Registry::new();
    let old = spawn!(*registry.world_mut(), Position { x: 3 }, Velocity { dx: 4 }).unwrap();
    registry.destroy_entity(old).unwrap();

    let fresh = registry.create_entity(None).unwrap();
    assert_eq!(fresh.index(), old.index());
    let entity = registry.entity(fresh).unwrap();
    assert_eq!(entity.get_component::<Position>(), None);
    assert_eq!(entity.get_component::<Velocity>(), None);
    assert_eq!(entity.name(), format!("Unnamed Entity. EID = {}", fresh.index()));
}

#[test]
fn spawn_macro_rolls_back_on_failure() {
    let mut world = World::with_config(RegistryConfig {
        max_entities: 4,
        max_component_types: 1,
    });
    let err = spawn!(world, Position { x: 1 }, Velocity { dx: 1 }).unwrap_err();
    assert!(matches!(err, WorldError::ComponentTypeLimitExceeded { .. }));
    assert_eq!(world.entity_count(), 0);
}

struct Counter {
    ticks: Rc<Cell<u32>>,
}

impl System for Counter {
    fn update(&mut self, _world: &mut World, _dt: f64) {
        self.ticks.set(self.ticks.get() + 1);
    }
}

struct Observer {
    ticks: Rc<Cell<u32>>,
    observed: Rc<RefCell<Vec<u32>>>,
}

impl System for Observer {
    fn update(&mut self, _world: &mut World, _dt: f64) {
        self.observed.borrow_mut().push(self.ticks.get());
    }
}

#[test]
fn late_phase_observes_completed_normal_phase() {
    let ticks = Rc::new(Cell::new(0));
    let observed = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();

    // Registered late first; ordering is by phase, not registration
    registry
        .add_late_system(Observer {
            ticks: Rc::clone(&ticks),
            observed: Rc::clone(&observed),
        })
        .unwrap();
    registry
        .add_system(Counter {
            ticks: Rc::clone(&ticks),
        })
        .unwrap();

    registry.update(1.0);
    registry.update(1.0);
    assert_eq!(*observed.borrow(), vec![1, 2]);
    assert_eq!(registry.frame(), 2);
}

struct Spawner;

impl System for Spawner {
    fn update(&mut self, world: &mut World, _dt: f64) {
        let id = world.create_entity(None).unwrap();
        world.add_component(id, Position { x: 0 }).unwrap();
    }
}

struct Mover;

impl System for Mover {
    fn update(&mut self, world: &mut World, _dt: f64) {
        world
            .each_component::<Position, _>(|_, pos| pos.x += 1)
            .unwrap();
    }
}

#[test]
fn later_systems_see_entities_created_this_frame() {
    let mut registry = Registry::new();
    registry.add_system(Spawner).unwrap();
    registry.add_late_system(Mover).unwrap();

    registry.update(0.016);
    registry.update(0.016);

    let xs: Vec<i32> = registry
        .world()
        .iter_component::<Position>()
        .map(|(_, p)| p.x)
        .collect();
    assert_eq!(xs, vec![2, 1]);
}

struct Lifecycle {
    log: Rc<RefCell<Vec<&'static str>>>,
}

impl System for Lifecycle {
    fn init(&mut self, _world: &mut World) {
        self.log.borrow_mut().push("init");
    }

    fn update(&mut self, _world: &mut World, _dt: f64) {
        self.log.borrow_mut().push("update");
    }

    fn exit(&mut self, _world: &mut World) {
        self.log.borrow_mut().push("exit");
    }
}

#[test]
fn clear_restores_a_fresh_registry() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut registry = Registry::new();
    registry
        .add_system(Lifecycle {
            log: Rc::clone(&log),
        })
        .unwrap();
    let named = registry.create_entity(Some("triangle")).unwrap();
    registry
        .entity_mut(named)
        .unwrap()
        .add_component(Position { x: 7 })
        .unwrap();
    registry.update(0.1);

    registry.clear();
    assert_eq!(*log.borrow(), vec!["init", "update", "exit"]);
    assert!(registry.scheduler().is_empty());
    assert_eq!(registry.world().entity_count(), 0);
    assert_eq!(registry.world().registered_component_count(), 0);
    assert_eq!(registry.frame(), 0);
    assert!(matches!(
        registry.entity_by_name("triangle"),
        Err(WorldError::NameNotFound { .. })
    ));

    // Same name and same slot are free again
    let fresh = registry.create_entity(Some("triangle")).unwrap();
    assert_eq!(fresh.index(), 0);
    assert_eq!(registry.entity(fresh).unwrap().get_component::<Position>(), None);
    registry.update(0.1);
    assert_eq!(log.borrow().len(), 3);
}

#[test]
fn dropping_the_registry_exits_systems() {
    let log = Rc::new(RefCell::new(Vec::new()));
    {
        let mut registry = Registry::new();
        registry
            .add_system(Lifecycle {
                log: Rc::clone(&log),
            })
            .unwrap();
    }
    assert_eq!(*log.borrow(), vec!["init", "exit"]);
}

#[test]
fn generated_names_never_block_unnamed_creation() {
    let mut world = World::with_config(RegistryConfig {
        max_entities: 8,
        max_component_types: 1,
    });
    let squatter = world.create_entity(Some("Unnamed Entity. EID = 1")).unwrap();
    for _ in 0..3 {
        assert!(world.create_entity(None).is_ok());
    }
    assert_eq!(world.entity_count(), 4);
    assert_eq!(world.entity_by_name("Unnamed Entity. EID = 1"), Ok(squatter));
}
