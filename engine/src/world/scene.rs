//! Scene collaborator interface
//!
//! The spawner materializes and destroys tile geometry through the
//! [`TrackScene`] trait. The core treats instantiation as opaque,
//! synchronous and always succeeding; a renderer, a physics backend or a
//! plain bookkeeping table can sit behind it.
//!
//! [`InstanceRegistry`] is the in-repo implementation: a hash map of live
//! instances keyed by handle, used by the headless binary and the
//! integration tests.

use std::collections::HashMap;

use glam::{Quat, Vec3};

/// Identifier of an authored tile or obstacle prefab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrefabId(pub u32);

impl std::fmt::Display for PrefabId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "prefab#{}", self.0)
    }
}

/// Opaque handle to one placed instance, issued by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub u64);

/// Geometry instantiation and destruction, as the spawner needs it.
pub trait TrackScene {
    /// Places one instance of `prefab` at the given transform and returns
    /// its handle.
    fn instantiate(&mut self, prefab: PrefabId, position: Vec3, rotation: Quat) -> SceneHandle;

    /// Removes a previously placed instance. The handle must not be used
    /// afterwards.
    fn destroy(&mut self, handle: SceneHandle);
}

/// One live instance in the [`InstanceRegistry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedInstance {
    pub prefab: PrefabId,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Bookkeeping [`TrackScene`]: stores live instances in a hash map with
/// monotonically increasing handles.
#[derive(Debug, Clone, Default)]
pub struct InstanceRegistry {
    instances: HashMap<SceneHandle, PlacedInstance>,
    next_handle: u64,
    destroyed_count: u64,
}

impl InstanceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a live instance by handle.
    pub fn get(&self, handle: SceneHandle) -> Option<&PlacedInstance> {
        self.instances.get(&handle)
    }

    /// Number of currently live instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// True when no instances are live.
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total instances destroyed over the registry's lifetime.
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed_count
    }

    /// Iterates over all live instances.
    pub fn iter(&self) -> impl Iterator<Item = (&SceneHandle, &PlacedInstance)> {
        self.instances.iter()
    }
}

impl TrackScene for InstanceRegistry {
    fn instantiate(&mut self, prefab: PrefabId, position: Vec3, rotation: Quat) -> SceneHandle {
        let handle = SceneHandle(self.next_handle);
        self.next_handle += 1;
        self.instances.insert(
            handle,
            PlacedInstance {
                prefab,
                position,
                rotation,
            },
        );
        handle
    }

    fn destroy(&mut self, handle: SceneHandle) {
        if self.instances.remove(&handle).is_some() {
            self.destroyed_count += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_instantiate_and_get() {
        let mut registry = InstanceRegistry::new();
        let handle = registry.instantiate(PrefabId(3), Vec3::new(1.0, 0.0, 2.0), Quat::IDENTITY);

        assert_eq!(registry.len(), 1);
        let placed = registry.get(handle).unwrap();
        assert_eq!(placed.prefab, PrefabId(3));
        assert_eq!(placed.position, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_registry_handles_are_unique() {
        let mut registry = InstanceRegistry::new();
        let a = registry.instantiate(PrefabId(0), Vec3::ZERO, Quat::IDENTITY);
        let b = registry.instantiate(PrefabId(0), Vec3::ZERO, Quat::IDENTITY);
        assert_ne!(a, b);
    }

    #[test]
    fn test_registry_destroy() {
        let mut registry = InstanceRegistry::new();
        let handle = registry.instantiate(PrefabId(1), Vec3::ZERO, Quat::IDENTITY);
        registry.destroy(handle);

        assert!(registry.is_empty());
        assert_eq!(registry.destroyed_count(), 1);
        assert!(registry.get(handle).is_none());

        // Destroying a dead handle is a no-op
        registry.destroy(handle);
        assert_eq!(registry.destroyed_count(), 1);
    }
}
