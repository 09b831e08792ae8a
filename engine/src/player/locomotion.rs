//! Player Locomotion Controller
//!
//! Fixed-function movement integrator for the forward-running player:
//! constant forward displacement, gravity, a jump impulse, a two-probe
//! grounded check, and 90° turn snapping on turn tiles.
//!
//! The controller owns the player transform and velocity but never owns
//! geometry; every environmental question goes through a
//! [`CollisionQuery`] supplied per call, the way the caller supplies
//! ground height to the other movement code in this engine.
//!
//! # Physics Model
//!
//! - Forward speed: constant per run (ramp hook reserved)
//! - Gravity: -9.81 m/s², tunable at runtime
//! - Jump impulse: `sqrt(jump_height * gravity * -3.0)`
//! - Grounded: two 0.2 m downward probes offset ±0.2 m along forward
//!
//! # Example
//!
//! ```rust,ignore
//! use canyon_run_engine::player::{LocomotionConfig, LocomotionController};
//! use canyon_run_engine::input::TurnDirection;
//!
//! let mut player = LocomotionController::new(LocomotionConfig::default());
//!
//! // Each tick:
//! player.tick(delta_time, &track);
//!
//! // On a turn intent:
//! if let Some(new_direction) = player.request_turn(TurnDirection::Right, &track) {
//!     track.on_direction_changed(new_direction);
//! }
//! ```

use anyhow::{Result, ensure};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::input::TurnDirection;
use crate::physics::query::{CollisionLayer, CollisionQuery, RayHit};
use crate::track::segment::snap_cardinal;

/// Forward speed at the start of a run, in m/s
pub const DEFAULT_INITIAL_SPEED: f32 = 4.0;

/// Forward speed cap, in m/s
pub const DEFAULT_MAX_SPEED: f32 = 30.0;

/// Forward speed ramp, in m/s per second. Recognized but not applied by
/// the current tick logic; reserved for future acceleration.
pub const DEFAULT_SPEED_INCREASE_RATE: f32 = 0.1;

/// Jump height parameter, in meters
pub const DEFAULT_JUMP_HEIGHT: f32 = 1.0;

/// Gravity, in m/s² (negative = down)
pub const DEFAULT_GRAVITY: f32 = -9.81;

/// Player capsule height, in meters
pub const DEFAULT_PLAYER_HEIGHT: f32 = 2.0;

/// Effective-gravity multiplier in the jump impulse. Tuned for game feel,
/// deliberately non-physical; the impulse is `sqrt(height * gravity * -3)`.
pub const JUMP_GRAVITY_FACTOR: f32 = -3.0;

/// Fore/aft offset of the two ground probes along the travel direction
pub const GROUND_PROBE_OFFSET: f32 = 0.2;

/// How far above the capsule bottom the probes start
pub const GROUND_PROBE_LIFT: f32 = 0.1;

/// Length of each downward ground probe
pub const GROUND_PROBE_LENGTH: f32 = 0.2;

/// Radius of the turn-trigger overlap test
pub const TURN_PROBE_RADIUS: f32 = 0.1;

/// Locomotion tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionConfig {
    /// Forward speed at the start of a run, m/s
    pub initial_speed: f32,
    /// Forward speed cap, m/s
    pub max_speed: f32,
    /// Forward speed ramp, m/s per second. Reserved hook; unused by the
    /// current tick logic.
    pub speed_increase_rate: f32,
    /// Jump height parameter, meters
    pub jump_height: f32,
    /// Initial gravity, m/s² (negative = down)
    pub gravity: f32,
    /// Player capsule height, meters
    pub player_height: f32,
    /// Layer the ground probes test against
    pub ground_layer: CollisionLayer,
    /// Layer the turn probe tests against
    pub turn_layer: CollisionLayer,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            initial_speed: DEFAULT_INITIAL_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            speed_increase_rate: DEFAULT_SPEED_INCREASE_RATE,
            jump_height: DEFAULT_JUMP_HEIGHT,
            gravity: DEFAULT_GRAVITY,
            player_height: DEFAULT_PLAYER_HEIGHT,
            ground_layer: CollisionLayer::Ground,
            turn_layer: CollisionLayer::Turn,
        }
    }
}

impl LocomotionConfig {
    /// Checks the ranges the integrator relies on.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.initial_speed > 0.0, "initial_speed must be positive");
        ensure!(
            self.max_speed >= self.initial_speed,
            "max_speed must be at least initial_speed"
        );
        ensure!(self.jump_height >= 0.0, "jump_height must not be negative");
        ensure!(self.gravity < 0.0, "gravity must point down (negative)");
        ensure!(self.player_height > 0.0, "player_height must be positive");
        Ok(())
    }
}

/// Owns the player transform and velocity, integrating them every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionController {
    config: LocomotionConfig,

    /// World position of the capsule center
    position: Vec3,

    /// World orientation; yaw-only by construction
    rotation: Quat,

    /// Current travel direction, always a cardinal unit vector
    movement_direction: Vec3,

    /// Vertical velocity in m/s (positive = up)
    vertical_velocity: f32,

    /// Current forward speed in m/s
    forward_speed: f32,

    /// Current gravity in m/s²; starts at the configured value
    gravity: f32,
}

impl LocomotionController {
    /// Creates a controller standing at the track origin facing +Z, with
    /// its capsule bottom on the surface.
    pub fn new(config: LocomotionConfig) -> Self {
        debug_assert!(config.validate().is_ok());
        Self {
            position: Vec3::new(0.0, config.player_height * 0.5, 0.0),
            rotation: Quat::IDENTITY,
            movement_direction: Vec3::Z,
            vertical_velocity: 0.0,
            forward_speed: config.initial_speed,
            gravity: config.gravity,
            config,
        }
    }

    /// Advances the player by one simulation step.
    ///
    /// Forward displacement first, then vertical: while grounded a
    /// downward velocity is clamped to zero so gravity cannot accumulate
    /// against the floor, then gravity integrates and the vertical
    /// displacement applies. Grounded-ness is recomputed from the probes
    /// every tick, never cached.
    pub fn tick(&mut self, dt: f32, ground: &impl CollisionQuery) {
        // Clamp delta time to prevent physics explosions
        let dt = dt.clamp(0.0001, 0.1);

        self.position += self.movement_direction * self.forward_speed * dt;

        if self.is_grounded(ground) && self.vertical_velocity < 0.0 {
            self.vertical_velocity = 0.0;
        }

        self.vertical_velocity += self.gravity * dt;
        self.position.y += self.vertical_velocity * dt;

        // Settle onto the surface the probes see. The clamp above only
        // zeroes velocity; the residual g*dt² displacement would burrow
        // the capsule through the tile over time.
        if self.vertical_velocity <= 0.0 {
            if let Some(hit) = self.ground_hit(ground) {
                let bottom = self.position.y - self.config.player_height * 0.5;
                if hit.position.y > bottom {
                    self.position.y = hit.position.y + self.config.player_height * 0.5;
                }
            }
        }
    }

    /// Requests a jump. No-op unless grounded; otherwise sets the vertical
    /// velocity to `sqrt(jump_height * gravity * -3.0)`, visible from the
    /// next tick.
    pub fn request_jump(&mut self, ground: &impl CollisionQuery) {
        if !self.is_grounded(ground) {
            return;
        }
        self.vertical_velocity =
            (self.config.jump_height * self.gravity * JUMP_GRAVITY_FACTOR).sqrt();
    }

    /// Requests a turn with the given lateral component.
    ///
    /// Probes the turn layer under the player; without a contact, or with
    /// a Left/Right tile whose direction does not match, the request is
    /// dropped and the controller is left untouched. On a match the player
    /// warps onto the tile's pivot (height preserved), yaws by
    /// `90° * lateral`, and the new travel direction is returned for the
    /// caller to hand to the spawner before the next tick.
    pub fn request_turn(
        &mut self,
        lateral: TurnDirection,
        turns: &impl CollisionQuery,
    ) -> Option<Vec3> {
        let contact = turns.overlap_point(self.position, TURN_PROBE_RADIUS, self.config.turn_layer)?;
        if !contact.kind.accepts(lateral) {
            return None;
        }

        let spin = Quat::from_rotation_y((90.0 * lateral.value()).to_radians());
        let target = Vec3::new(contact.pivot.x, self.position.y, contact.pivot.z);
        self.warp(target, self.rotation * spin);

        self.movement_direction = snap_cardinal(spin * self.movement_direction);
        debug_assert!(
            (self.movement_direction.length() - 1.0).abs() < 1e-5,
            "turns must keep the travel direction on the cardinal grid"
        );

        Some(self.movement_direction)
    }

    /// Reserved slide hook. Exposed so the input layer has somewhere to
    /// deliver the intent; currently does nothing.
    pub fn request_slide(&mut self) {}

    /// Atomically sets position and rotation, with no intermediate state.
    pub fn warp(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
    }

    /// Two-probe grounded check: downward rays of length 0.2 starting at
    /// `capsule bottom + 0.1`, offset ±0.2 along the travel direction.
    /// Either hit grounds the player; the dual probe keeps the check from
    /// flickering on tile seams when the capsule center is over a gap.
    ///
    /// Pure function of the current transform and the collidable set.
    pub fn is_grounded(&self, ground: &impl CollisionQuery) -> bool {
        self.ground_hit(ground).is_some()
    }

    /// Nearest hit of the two ground probes, if either connects.
    fn ground_hit(&self, ground: &impl CollisionQuery) -> Option<RayHit> {
        let base = self.position
            - Vec3::new(
                0.0,
                self.config.player_height * 0.5 - GROUND_PROBE_LIFT,
                0.0,
            );
        let aft = base - self.movement_direction * GROUND_PROBE_OFFSET;
        let fore = base + self.movement_direction * GROUND_PROBE_OFFSET;

        let aft_hit =
            ground.raycast(aft, Vec3::NEG_Y, GROUND_PROBE_LENGTH, self.config.ground_layer);
        let fore_hit =
            ground.raycast(fore, Vec3::NEG_Y, GROUND_PROBE_LENGTH, self.config.ground_layer);

        match (aft_hit, fore_hit) {
            (Some(a), Some(f)) => Some(if a.distance <= f.distance { a } else { f }),
            (hit, None) | (None, hit) => hit,
        }
    }

    /// World position of the capsule center.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// World orientation.
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Current travel direction.
    pub fn movement_direction(&self) -> Vec3 {
        self.movement_direction
    }

    /// Current vertical velocity in m/s.
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Current forward speed in m/s.
    pub fn forward_speed(&self) -> f32 {
        self.forward_speed
    }

    /// Current gravity in m/s².
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Overrides gravity at runtime (power-ups, debug tuning).
    pub fn set_gravity(&mut self, gravity: f32) {
        self.gravity = gravity;
    }

    /// The locomotion configuration.
    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }
}
