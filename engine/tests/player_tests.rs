//! Player Tests - Grounding, Jumping, and the Turn Handshake
//!
//! Integration tests for the locomotion controller running against real
//! spawner geometry: the two-probe grounded check over placed tiles, the
//! jump impulse, and the full turn handshake between controller and
//! spawner.

use glam::Vec3;

use canyon_run_engine::input::TurnDirection;
use canyon_run_engine::player::{
    JUMP_GRAVITY_FACTOR, LocomotionConfig, LocomotionController,
};
use canyon_run_engine::track::{
    SegmentTemplate, SpawnerConfig, TileCatalog, TrackSpawner, TurnKind,
};
use canyon_run_engine::world::{InstanceRegistry, PrefabId};

const STRAIGHT_FOOTPRINT: Vec3 = Vec3::new(4.0, 0.5, 4.0);
const TURN_FOOTPRINT: Vec3 = Vec3::new(4.0, 0.5, 4.0);

fn catalog(turn_kind: TurnKind) -> TileCatalog {
    TileCatalog::new(
        SegmentTemplate::straight(PrefabId(0), STRAIGHT_FOOTPRINT),
        vec![SegmentTemplate::turn(
            PrefabId(1),
            turn_kind,
            TURN_FOOTPRINT,
            Vec3::ZERO,
        )],
        vec![],
    )
    .unwrap()
}

fn track(turn_kind: TurnKind, seed: u64) -> TrackSpawner<InstanceRegistry> {
    let mut spawner = TrackSpawner::with_seed(
        SpawnerConfig::default(),
        catalog(turn_kind),
        InstanceRegistry::new(),
        seed,
    )
    .unwrap();
    spawner.initialize();
    spawner
}

fn player() -> LocomotionController {
    LocomotionController::new(LocomotionConfig::default())
}

// ============================================================================
// Grounding against placed tiles
// ============================================================================

#[test]
fn test_grounded_on_opening_tile() {
    let spawner = track(TurnKind::Right, 1);
    let player = player();

    assert!(player.is_grounded(&spawner));
    // Pure: asking twice changes nothing and agrees
    assert!(player.is_grounded(&spawner));
}

#[test]
fn test_grounded_across_tile_seam() {
    let spawner = track(TurnKind::Right, 1);
    let mut player = player();

    // Capsule center directly over the seam between the first two tiles
    player.warp(Vec3::new(0.0, 1.0, STRAIGHT_FOOTPRINT.z * 0.5), player.rotation());
    assert!(player.is_grounded(&spawner));
}

#[test]
fn test_not_grounded_past_track_end() {
    let spawner = track(TurnKind::Right, 1);
    let mut player = player();

    // Well past the last placed tile
    player.warp(Vec3::new(0.0, 1.0, 100.0), player.rotation());
    assert!(!player.is_grounded(&spawner));
}

#[test]
fn test_walks_the_whole_opening_run_grounded() {
    let spawner = track(TurnKind::Right, 1);
    let mut player = player();

    let turn_z = spawner.segments().last().unwrap().position.z;
    let dt = 1.0 / 60.0;
    while player.position().z < turn_z {
        player.tick(dt, &spawner);
        assert!(
            player.is_grounded(&spawner),
            "player left the ground at z={}",
            player.position().z
        );
    }
}

// ============================================================================
// Jumping
// ============================================================================

#[test]
fn test_jump_on_real_track_uses_impulse_formula() {
    let spawner = track(TurnKind::Right, 2);
    let mut player = player();

    player.request_jump(&spawner);

    let config = LocomotionConfig::default();
    let expected = (config.jump_height * config.gravity * JUMP_GRAVITY_FACTOR).sqrt();
    assert!((player.vertical_velocity() - expected).abs() < 1e-5);
}

#[test]
fn test_airborne_jump_is_ignored_over_track() {
    let spawner = track(TurnKind::Right, 2);
    let mut player = player();

    player.warp(player.position() + Vec3::Y * 1.0, player.rotation());
    player.request_jump(&spawner);
    assert_eq!(player.vertical_velocity(), 0.0);
}

#[test]
fn test_jump_clears_and_lands_on_track() {
    let spawner = track(TurnKind::Right, 2);
    let mut player = player();
    let rest_y = player.position().y;

    player.request_jump(&spawner);

    let dt = 1.0 / 60.0;
    let mut airborne_ticks = 0;
    for _ in 0..600 {
        player.tick(dt, &spawner);
        if !player.is_grounded(&spawner) {
            airborne_ticks += 1;
        } else if airborne_ticks > 0 {
            break;
        }
    }

    assert!(airborne_ticks > 10, "jump never left the ground");
    assert!(player.is_grounded(&spawner), "jump never landed");

    // Let the capsule settle back onto the surface
    for _ in 0..60 {
        player.tick(dt, &spawner);
    }
    assert!((player.position().y - rest_y).abs() < 0.01);
}

// ============================================================================
// The turn handshake
// ============================================================================

#[test]
fn test_committed_turn_snaps_rotates_and_replans() {
    let mut spawner = track(TurnKind::Right, 3);
    let mut player = player();

    let turn_tile = *spawner.segments().last().unwrap();
    let pivot = turn_tile.pivot().unwrap();

    // Stand on the turn tile, just short of the pivot
    player.warp(Vec3::new(0.0, 1.0, pivot.z - 1.0), player.rotation());

    let new_direction = player
        .request_turn(TurnDirection::Right, &spawner)
        .expect("matching turn on a turn tile must commit");

    // Snap to the pivot with height preserved, yaw +90°
    assert_eq!(new_direction, Vec3::X);
    assert_eq!(player.position(), Vec3::new(pivot.x, 1.0, pivot.z));
    assert!((player.rotation() * Vec3::Z - Vec3::X).length() < 1e-5);

    // Synchronous handoff, as the coordinator performs it
    spawner.on_direction_changed(new_direction);

    // The committed turn tile survives the prune at the head of the window
    assert_eq!(spawner.segments()[0].handle, turn_tile.handle);
    assert_eq!(spawner.cursor().direction, player.movement_direction());

    // And the player is still standing on track (the survivor)
    assert!(player.is_grounded(&spawner));
}

#[test]
fn test_mismatched_turn_changes_nothing() {
    let spawner = track(TurnKind::Right, 3);
    let mut player = player();

    let pivot = spawner.segments().last().unwrap().pivot().unwrap();
    player.warp(Vec3::new(0.0, 1.0, pivot.z), player.rotation());
    let before = player.clone();

    // Wrong lateral sign for a right-turn tile
    assert_eq!(player.request_turn(TurnDirection::Left, &spawner), None);
    assert_eq!(player, before);
}

#[test]
fn test_turn_on_straight_run_changes_nothing() {
    let spawner = track(TurnKind::Right, 3);
    let mut player = player();
    let before = player.clone();

    assert_eq!(player.request_turn(TurnDirection::Right, &spawner), None);
    assert_eq!(player, before);
}

#[test]
fn test_directions_agree_across_many_turns() {
    let mut spawner = track(TurnKind::Sideways, 4);
    let mut player = player();
    let cardinals = [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z];

    for i in 0..32 {
        let turn_tile = *spawner.segments().last().unwrap();
        let pivot = turn_tile.pivot().unwrap();

        // Step onto the next decision point and commit alternating turns
        player.warp(Vec3::new(pivot.x, player.position().y, pivot.z), player.rotation());
        let lateral = if i % 2 == 0 {
            TurnDirection::Right
        } else {
            TurnDirection::Left
        };

        let new_direction = player
            .request_turn(lateral, &spawner)
            .expect("sideways tiles honor both laterals");
        spawner.on_direction_changed(new_direction);

        // The two halves of the system agree, and no drift accumulates
        assert_eq!(spawner.cursor().direction, player.movement_direction());
        assert!(cardinals.contains(&player.movement_direction()));
        assert!(player.is_grounded(&spawner));
    }
}
