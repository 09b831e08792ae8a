//! Track spawner
//!
//! Owns the rolling window of placed track geometry: extends the path at
//! the far end, prunes it at the near end after every committed turn, and
//! draws randomized turn tiles, obstacle variants and run lengths.
//!
//! # Rolling Window Protocol
//!
//! - `initialize` lays down the opening straight run plus one turn tile,
//!   giving the player a guaranteed lookahead before the first decision
//!   point.
//! - On every committed turn the controller hands the new travel direction
//!   to `on_direction_changed`, which prunes everything except the turn
//!   tile just used, repositions the path cursor past that tile, and grows
//!   a fresh run plus the next turn tile along the new direction.
//!
//! The spawner also answers the collision queries the locomotion
//! controller needs, from the same active-segment list it places: tile
//! bodies are ground colliders, turn tiles double as turn triggers.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, ensure};
use glam::Vec3;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

use crate::physics::query::{CollisionLayer, CollisionQuery, RayHit, TurnContact};
use crate::physics::raycast::ray_aabb_intersect;
use crate::track::catalog::TileCatalog;
use crate::track::segment::{
    Obstacle, SegmentShape, SegmentTemplate, TrackSegment, TurnKind, face_direction,
};
use crate::world::TrackScene;

/// Straight tiles placed ahead of the player at startup
pub const DEFAULT_TILE_START_COUNT: usize = 10;

/// Inclusive lower bound on the straight-run length after a turn
pub const DEFAULT_MIN_STRAIGHT_TILES: usize = 3;

/// Exclusive upper bound on the straight-run length after a turn
pub const DEFAULT_MAX_STRAIGHT_TILES: usize = 15;

/// Chance for each eligible straight tile to carry an obstacle
pub const DEFAULT_OBSTACLE_PROBABILITY: f32 = 0.2;

/// Visual overlap baked into left/right turn tile art, in meters. The
/// cursor steps this far back into the tile after a turn so the next run
/// butts up seamlessly. Tunable, not a physical law.
pub const TURN_TILE_OVERLAP: f32 = 2.0;

const_assert!(DEFAULT_TILE_START_COUNT > 0);
const_assert!(DEFAULT_MIN_STRAIGHT_TILES < DEFAULT_MAX_STRAIGHT_TILES);

/// Spawner tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnerConfig {
    /// Straight tiles placed by `initialize` before the first turn tile
    pub tile_start_count: usize,
    /// Run length is drawn uniformly from `min..max` (max exclusive)
    pub min_straight_tiles: usize,
    /// Exclusive upper bound on the run length
    pub max_straight_tiles: usize,
    /// Per-tile obstacle chance in `[0, 1]`
    pub obstacle_probability: f32,
    /// Layer tile bodies are registered on
    pub ground_layer: CollisionLayer,
    /// Layer turn triggers are registered on
    pub turn_layer: CollisionLayer,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            tile_start_count: DEFAULT_TILE_START_COUNT,
            min_straight_tiles: DEFAULT_MIN_STRAIGHT_TILES,
            max_straight_tiles: DEFAULT_MAX_STRAIGHT_TILES,
            obstacle_probability: DEFAULT_OBSTACLE_PROBABILITY,
            ground_layer: CollisionLayer::Ground,
            turn_layer: CollisionLayer::Turn,
        }
    }
}

impl SpawnerConfig {
    /// Checks the bounds the spawner relies on at draw time.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tile_start_count > 0, "tile_start_count must be positive");
        ensure!(
            self.min_straight_tiles < self.max_straight_tiles,
            "min_straight_tiles ({}) must be below max_straight_tiles ({})",
            self.min_straight_tiles,
            self.max_straight_tiles
        );
        ensure!(
            (0.0..=1.0).contains(&self.obstacle_probability),
            "obstacle_probability must be in [0, 1]"
        );
        Ok(())
    }
}

/// Where the next segment is appended, and along which direction.
///
/// The single source of truth for placement: updated immediately after
/// every straight placement and after every direction change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathCursor {
    /// World-space origin of the next placed tile
    pub placement_point: Vec3,
    /// Current travel direction, always a cardinal unit vector
    pub direction: Vec3,
}

impl Default for PathCursor {
    fn default() -> Self {
        Self {
            placement_point: Vec3::ZERO,
            direction: Vec3::Z,
        }
    }
}

/// Maintains the live window of segments and obstacles.
#[derive(Debug)]
pub struct TrackSpawner<S: TrackScene> {
    config: SpawnerConfig,
    catalog: TileCatalog,
    scene: S,
    rng: StdRng,
    cursor: PathCursor,
    segments: Vec<TrackSegment>,
    obstacles: Vec<Obstacle>,
}

impl<S: TrackScene> TrackSpawner<S> {
    /// Creates a spawner seeded from the wall clock's millisecond
    /// component. No reproducibility is guaranteed; tests use
    /// [`with_seed`](Self::with_seed).
    pub fn new(config: SpawnerConfig, catalog: TileCatalog, scene: S) -> Result<Self> {
        Self::with_seed(config, catalog, scene, clock_seed())
    }

    /// Creates a spawner with a deterministic random sequence.
    pub fn with_seed(
        config: SpawnerConfig,
        catalog: TileCatalog,
        scene: S,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            scene,
            rng: StdRng::seed_from_u64(seed),
            cursor: PathCursor::default(),
            segments: Vec::new(),
            obstacles: Vec::new(),
        })
    }

    /// Resets the cursor to the origin facing +Z, destroys any previously
    /// placed geometry, and lays down the opening stretch: the configured
    /// number of straight tiles followed by one randomly drawn turn tile.
    pub fn initialize(&mut self) {
        self.clear_active();
        self.cursor = PathCursor::default();

        info!(
            "initializing track: {} start tiles, {} turn variants",
            self.config.tile_start_count,
            self.catalog.turn_tile_count()
        );

        let start = *self.catalog.start();
        for _ in 0..self.config.tile_start_count {
            self.place_segment(start, false);
        }

        let turn = *self.catalog.select_turn(&mut self.rng);
        self.place_segment(turn, false);
    }

    /// Places one segment at the cursor, facing the cursor's direction.
    ///
    /// With `roll_obstacle`, a uniform draw at or below the configured
    /// probability puts one obstacle variant on the same spot. Straight
    /// placements advance the cursor by the placed tile's world footprint
    /// scaled along the travel direction; turn placements leave the cursor
    /// alone (the follow-up direction change repositions it).
    pub fn place_segment(&mut self, template: SegmentTemplate, roll_obstacle: bool) {
        let rotation = template.rotation * face_direction(self.cursor.direction);
        let handle =
            self.scene
                .instantiate(template.prefab, self.cursor.placement_point, rotation);
        let segment = TrackSegment::place(&template, self.cursor.placement_point, rotation, handle);

        debug!(
            "placed {} at {:?} facing {:?}",
            template.prefab, self.cursor.placement_point, self.cursor.direction
        );
        self.segments.push(segment);

        if roll_obstacle {
            self.roll_obstacle();
        }

        if template.shape.is_straight() {
            self.cursor.placement_point += segment.footprint * self.cursor.direction;
        }
    }

    /// Replans the track after a committed turn. Called by the host with
    /// the player's new travel direction, synchronously with the turn.
    ///
    /// In order: adopt the direction, prune the window down to the turn
    /// tile just used, step the cursor past that tile, place a freshly
    /// drawn straight run (first tile never rolls an obstacle), then the
    /// next turn tile.
    pub fn on_direction_changed(&mut self, new_direction: Vec3) {
        self.cursor.direction = new_direction;
        self.prune();

        let Some(survivor) = self.segments.last().copied() else {
            debug_assert!(false, "direction change before initialize()");
            return;
        };

        let start_depth = self.catalog.start().footprint.z;
        let offset = match survivor.shape {
            SegmentShape::Turn {
                kind: TurnKind::Sideways,
                ..
            } => (survivor.footprint * 0.5 + Vec3::splat(start_depth * 0.5)) * new_direction,
            _ => {
                ((survivor.footprint - Vec3::splat(TURN_TILE_OVERLAP))
                    + Vec3::splat(start_depth * 0.5))
                    * new_direction
            }
        };
        self.cursor.placement_point += offset;

        let run_length = self
            .rng
            .gen_range(self.config.min_straight_tiles..self.config.max_straight_tiles);
        info!(
            "direction changed to {:?}: pruned, extending {} straight tiles",
            new_direction, run_length
        );

        let start = *self.catalog.start();
        for i in 0..run_length {
            self.place_segment(start, i != 0);
        }

        let turn = *self.catalog.select_turn(&mut self.rng);
        self.place_segment(turn, false);
    }

    /// Currently active segments, oldest first.
    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    /// Currently active obstacles.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// The path cursor.
    pub fn cursor(&self) -> PathCursor {
        self.cursor
    }

    /// The spawner configuration.
    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// The scene collaborator (host-side inspection).
    pub fn scene(&self) -> &S {
        &self.scene
    }

    /// Destroys every active segment except the most recently placed one
    /// (the turn tile the player just committed) and every active
    /// obstacle.
    fn prune(&mut self) {
        while self.segments.len() > 1 {
            let segment = self.segments.remove(0);
            self.scene.destroy(segment.handle);
        }
        while let Some(obstacle) = self.obstacles.pop() {
            self.scene.destroy(obstacle.handle);
        }
    }

    /// Draws the obstacle chance and, on success, places one obstacle
    /// variant at the cursor. An empty obstacle catalog skips silently.
    fn roll_obstacle(&mut self) {
        if self.rng.gen_range(0.0..1.0_f32) > self.config.obstacle_probability {
            return;
        }

        let template = match self.catalog.select_obstacle(&mut self.rng) {
            Some(template) => *template,
            None => return,
        };

        let rotation = template.rotation * face_direction(self.cursor.direction);
        let handle =
            self.scene
                .instantiate(template.prefab, self.cursor.placement_point, rotation);
        debug!("placed obstacle {} at {:?}", template.prefab, self.cursor.placement_point);
        self.obstacles.push(Obstacle {
            prefab: template.prefab,
            position: self.cursor.placement_point,
            rotation,
            handle,
        });
    }

    fn clear_active(&mut self) {
        while let Some(segment) = self.segments.pop() {
            self.scene.destroy(segment.handle);
        }
        while let Some(obstacle) = self.obstacles.pop() {
            self.scene.destroy(obstacle.handle);
        }
    }
}

impl<S: TrackScene> CollisionQuery for TrackSpawner<S> {
    fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        layer: CollisionLayer,
    ) -> Option<RayHit> {
        // Tile bodies are the only colliders the spawner registers on the
        // ground layer.
        if layer != self.config.ground_layer {
            return None;
        }

        let mut closest: Option<RayHit> = None;
        for segment in &self.segments {
            let aabb = segment.aabb();
            if let Some(t) = ray_aabb_intersect(origin, direction, aabb.min, aabb.max) {
                if t <= max_distance && closest.is_none_or(|hit| t < hit.distance) {
                    closest = Some(RayHit {
                        distance: t,
                        position: origin + direction * t,
                    });
                }
            }
        }
        closest
    }

    fn overlap_point(
        &self,
        point: Vec3,
        radius: f32,
        layer: CollisionLayer,
    ) -> Option<TurnContact> {
        if layer != self.config.turn_layer {
            return None;
        }

        // Turn triggers cover a tile's full height; only the XZ footprint
        // matters.
        self.segments
            .iter()
            .filter_map(|segment| match segment.shape {
                SegmentShape::Turn { kind, pivot }
                    if segment.aabb().contains_inflated_xz(point, radius) =>
                {
                    Some(TurnContact { kind, pivot })
                }
                _ => None,
            })
            .min_by(|a, b| {
                let da = a.pivot.distance_squared(point);
                let db = b.pivot.distance_squared(point);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

/// Millisecond component of the wall clock, the startup seed.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::from(elapsed.subsec_millis()))
        .unwrap_or(0)
}
