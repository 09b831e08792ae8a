//! Collision query interface
//!
//! The locomotion controller never touches track geometry directly; it asks
//! a [`CollisionQuery`] collaborator. In the shipped game that collaborator
//! is the track spawner itself, which answers from its active segment list.
//! Tests substitute hand-built implementations.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::track::TurnKind;

/// Layer identifiers for collision filtering.
///
/// Every query names the layer it is interested in; geometry on other
/// layers is invisible to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionLayer {
    /// Walkable tile surfaces, probed by the grounded check
    Ground,
    /// Turn-trigger volumes on turn tiles
    Turn,
    /// Obstacle bodies (not queried by the core, reserved for the host)
    Obstacle,
}

/// Result of a successful raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// World-space hit position
    pub position: Vec3,
}

/// Result of a successful turn-trigger overlap: which way the tile turns
/// and where the player snaps to when committing the turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnContact {
    /// Turn direction the tile supports
    pub kind: TurnKind,
    /// World-space pivot point of the tile
    pub pivot: Vec3,
}

/// Spatial queries against the live track geometry.
pub trait CollisionQuery {
    /// Casts a ray and returns the nearest hit on the given layer within
    /// `max_distance`, or `None`.
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<RayHit>;

    /// Tests a point (inflated by `radius`) against trigger volumes on the
    /// given layer. Returns the nearest turn contact, or `None` when the
    /// point overlaps nothing turn-eligible.
    fn overlap_point(
        &self,
        point: Vec3,
        radius: f32,
        layer: CollisionLayer,
    ) -> Option<TurnContact>;
}
