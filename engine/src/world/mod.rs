//! World Module
//!
//! The boundary between the runner core and the host environment that owns
//! actual scene objects. The core describes *what* to place and when to
//! remove it; the host decides what placement means.
//!
//! # Submodules
//!
//! - [`scene`] - The [`TrackScene`] collaborator trait, prefab/handle ids,
//!   and the bookkeeping [`InstanceRegistry`]

pub mod scene;

// Re-export commonly used types at module level
pub use scene::{InstanceRegistry, PlacedInstance, PrefabId, SceneHandle, TrackScene};
