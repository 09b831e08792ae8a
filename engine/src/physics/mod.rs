//! Physics module
//!
//! Fixed-function collision support for the runner core. This is
//! deliberately not a dynamics solver: the grounded check is two short ray
//! probes and turn eligibility is a point-overlap test, both answered from
//! axis-aligned boxes derived from placed tiles.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`query`] - The [`CollisionQuery`] collaborator trait, layers, hit types
//! - [`raycast`] - AABB type and slab-method ray intersection

pub mod query;
pub mod raycast;

// Re-export commonly used types at the physics module level
pub use query::{CollisionLayer, CollisionQuery, RayHit, TurnContact};
pub use raycast::{Aabb, ray_aabb_intersect};
