//! Player Module
//!
//! Movement and control for the forward-running player character.
//!
//! # Components
//!
//! - [`LocomotionController`] - fixed-function integrator for forward
//!   motion, gravity, jumps, grounded probing and 90° turn snapping
//! - [`LocomotionConfig`] - speed/jump/gravity tuning surface

pub mod locomotion;

pub use locomotion::{
    DEFAULT_GRAVITY, DEFAULT_INITIAL_SPEED, DEFAULT_JUMP_HEIGHT, DEFAULT_MAX_SPEED,
    DEFAULT_PLAYER_HEIGHT, DEFAULT_SPEED_INCREASE_RATE, GROUND_PROBE_LENGTH, GROUND_PROBE_LIFT,
    GROUND_PROBE_OFFSET, JUMP_GRAVITY_FACTOR, LocomotionConfig, LocomotionController,
    TURN_PROBE_RADIUS,
};
