// config.rs - Capacity bounds for the entity and component tables

use serde::{Deserialize, Serialize};

/// The maximum number of entities that can be alive at once.
pub const MAX_ENTITIES: usize = 8192;

/// The maximum number of distinct component types a registry can hold.
pub const MAX_COMPONENT_TYPES: usize = 128;

/// Capacities for a single registry.
///
/// Both values are clamped to the compile-time bounds; component masks are
/// sized for [`MAX_COMPONENT_TYPES`] regardless of this setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub max_entities: usize,
    pub max_component_types: usize,
}

impl RegistryConfig {
    /// Return a copy with both limits clamped to `1..=MAX_*`.
    pub fn clamped(self) -> Self {
        Self {
            max_entities: self.max_entities.clamp(1, MAX_ENTITIES),
            max_component_types: self.max_component_types.clamp(1, MAX_COMPONENT_TYPES),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
            max_component_types: MAX_COMPONENT_TYPES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_compile_time_bounds() {
        let config = RegistryConfig {
            max_entities: MAX_ENTITIES * 2,
            max_component_types: 0,
        }
        .clamped();
        assert_eq!(config.max_entities, MAX_ENTITIES);
        assert_eq!(config.max_component_types, 1);
    }
}
