//! Convenience macros for entity spawning

/// Create an entity and attach every listed component.
///
/// Works on anything exposing `create_entity` and `add_component` (a
/// [`World`](crate::ecs::World)). If any component fails to attach, the
/// entity is destroyed again and the error is returned.
///
/// # Examples
///
/// ```ignore
/// let entity = spawn!(world, Transform::default(), Mesh::triangle())?;
/// ```
#[macro_export]
macro_rules! spawn {
    ($world:expr, $($component:expr),+ $(,)?) => {{
        let world = &mut $world;
        match world.create_entity(None) {
            Ok(entity) => {
                let mut result: ::std::result::Result<$crate::ecs::EntityId, $crate::ecs::WorldError> =
                    Ok(entity);
                $(
                    if result.is_ok() {
                        if let Err(err) = world.add_component(entity, $component) {
                            result = Err(err);
                        }
                    }
                )+
                if result.is_err() {
                    let _ = world.destroy_entity(entity);
                }
                result
            }
            Err(err) => Err(err),
        }
    }};
}
