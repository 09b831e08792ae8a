//! Track segments
//!
//! One segment is one placed unit of track geometry. Templates describe
//! the authored tiles in the catalog; a [`TrackSegment`] is an
//! immutable-once-placed descriptor of one instance on the live track.
//!
//! Tiles are authored facing +Z with their origin at the tile center, at
//! surface height: locally the body spans `[-w/2, w/2]` in X, `[-h, 0]`
//! in Y and `[-l/2, l/2]` in Z for a footprint of `(w, h, l)`. Turn tiles
//! put their pivot where the incoming and outgoing lane centerlines
//! cross, which for symmetric art is the tile origin itself.
//!
//! The track is axis-aligned by construction: travel directions are the
//! four cardinal unit vectors and all placement rotations are multiples
//! of 90° about +Y.

use glam::{Quat, Vec3};

use crate::input::TurnDirection;
use crate::physics::raycast::Aabb;
use crate::world::{PrefabId, SceneHandle};

/// Which way a turn tile takes the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnKind {
    /// 90° left turn; honors only a left intent
    Left,
    /// 90° right turn; honors only a right intent
    Right,
    /// T-junction; honors a turn intent in either direction
    Sideways,
}

impl TurnKind {
    /// Whether a turn intent with the given lateral component commits a
    /// turn on a tile of this kind.
    pub fn accepts(&self, lateral: TurnDirection) -> bool {
        match self {
            TurnKind::Left => lateral == TurnDirection::Left,
            TurnKind::Right => lateral == TurnDirection::Right,
            TurnKind::Sideways => true,
        }
    }
}

/// Segment shape as a tagged variant: the pivot point exists exactly when
/// the shape is a turn, so "turn tiles have a pivot" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentShape {
    /// Plain run tile; advances the path cursor when placed
    Straight,
    /// Turn tile the player may pivot on
    Turn {
        kind: TurnKind,
        /// Pivot point. Tile-local in a template, world-space in a placed
        /// segment.
        pivot: Vec3,
    },
}

impl SegmentShape {
    /// True for the Straight shape.
    pub fn is_straight(&self) -> bool {
        matches!(self, SegmentShape::Straight)
    }

    /// The turn kind, or `None` for Straight.
    pub fn turn_kind(&self) -> Option<TurnKind> {
        match self {
            SegmentShape::Straight => None,
            SegmentShape::Turn { kind, .. } => Some(*kind),
        }
    }
}

/// An authored tile in the catalog: what to instantiate and how it is
/// shaped, before any placement transform is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTemplate {
    /// Prefab the scene instantiates for this tile
    pub prefab: PrefabId,
    /// Shape, with the pivot in tile-local space for turn tiles
    pub shape: SegmentShape,
    /// Authored AABB size `(width, thickness, length)` in local space
    pub footprint: Vec3,
    /// Authored rotation, composed with the facing rotation at placement
    pub rotation: Quat,
}

impl SegmentTemplate {
    /// A straight tile template.
    pub fn straight(prefab: PrefabId, footprint: Vec3) -> Self {
        Self {
            prefab,
            shape: SegmentShape::Straight,
            footprint,
            rotation: Quat::IDENTITY,
        }
    }

    /// A turn tile template. `pivot` is the tile-local point the player
    /// snaps to when committing the turn.
    pub fn turn(prefab: PrefabId, kind: TurnKind, footprint: Vec3, pivot: Vec3) -> Self {
        Self {
            prefab,
            shape: SegmentShape::Turn { kind, pivot },
            footprint,
            rotation: Quat::IDENTITY,
        }
    }

    /// Same template with a non-identity authored rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}

/// One placed tile on the live track. Immutable once placed; destroyed
/// when its run is pruned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegment {
    /// Prefab this segment was instantiated from
    pub prefab: PrefabId,
    /// Shape, with the pivot in world space for turn tiles
    pub shape: SegmentShape,
    /// World position of the tile origin (tile center, surface height)
    pub position: Vec3,
    /// World rotation
    pub rotation: Quat,
    /// World-space AABB extents of the rotated tile
    pub footprint: Vec3,
    /// Handle of the scene instance backing this segment
    pub handle: SceneHandle,
}

impl TrackSegment {
    /// Builds the placed descriptor for a template at a world transform.
    ///
    /// The footprint is re-measured in world axes (cardinal yaws swap the
    /// width and length components) and a turn pivot is carried into world
    /// space.
    pub fn place(
        template: &SegmentTemplate,
        position: Vec3,
        rotation: Quat,
        handle: SceneHandle,
    ) -> Self {
        let shape = match template.shape {
            SegmentShape::Straight => SegmentShape::Straight,
            SegmentShape::Turn { kind, pivot } => SegmentShape::Turn {
                kind,
                pivot: position + rotation * pivot,
            },
        };

        Self {
            prefab: template.prefab,
            shape,
            position,
            rotation,
            footprint: (rotation * template.footprint).abs(),
            handle,
        }
    }

    /// World-space bounding box of the tile body: the footprint centered
    /// on the origin in XZ, hanging `footprint.y` below the surface.
    pub fn aabb(&self) -> Aabb {
        let half = Vec3::new(self.footprint.x * 0.5, 0.0, self.footprint.z * 0.5);
        let a = self.position - half - Vec3::new(0.0, self.footprint.y, 0.0);
        let b = self.position + half;
        Aabb::new(a, b)
    }

    /// World pivot point, for turn shapes.
    pub fn pivot(&self) -> Option<Vec3> {
        match self.shape {
            SegmentShape::Straight => None,
            SegmentShape::Turn { pivot, .. } => Some(pivot),
        }
    }
}

/// One placed obstacle. Spawned alongside a straight tile, destroyed with
/// the run it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub prefab: PrefabId,
    pub position: Vec3,
    pub rotation: Quat,
    pub handle: SceneHandle,
}

/// Yaw rotation that makes a +Z-authored tile face `direction`.
///
/// Well-defined for every cardinal direction, including -Z (where an
/// arc-based construction would pick an arbitrary axis).
pub fn face_direction(direction: Vec3) -> Quat {
    Quat::from_rotation_y(direction.x.atan2(direction.z))
}

/// Rounds a near-cardinal unit vector onto the cardinal grid, killing the
/// float drift accumulated by repeated quaternion rotations.
pub fn snap_cardinal(direction: Vec3) -> Vec3 {
    Vec3::new(
        direction.x.round(),
        direction.y.round(),
        direction.z.round(),
    )
}
