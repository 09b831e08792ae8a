//! Game Module
//!
//! The integration layer that wires the engine pieces into a playable
//! run: one [`RunnerGame`] owns the locomotion controller, the track
//! spawner and the intent queue, and coordinates the turn handshake
//! between them.
//!
//! Intents arrive asynchronously from the host's input layer via
//! [`queue_intent`](RunnerGame::queue_intent) and are applied at the next
//! [`tick`](RunnerGame::tick), in arrival order. When a turn intent
//! matches the tile under the player, the controller mutates the player
//! transform and hands back the new travel direction; the coordinator
//! forwards it to the spawner in the same call, before any further
//! simulation, so the player and the path cursor never disagree about
//! which way is forward.

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::input::{Intent, IntentQueue};
use crate::player::{LocomotionConfig, LocomotionController};
use crate::track::{SpawnerConfig, TileCatalog, TrackSpawner};
use crate::world::TrackScene;

/// Combined configuration surface for one run.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunConfig {
    /// Locomotion tuning
    pub player: LocomotionConfig,
    /// Spawner tuning
    pub track: SpawnerConfig,
}

impl RunConfig {
    /// Parses a config from JSON, validating both halves.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks both halves of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.player.validate()?;
        self.track.validate()?;
        Ok(())
    }
}

/// One live endless-runner session: player, track, and the glue between
/// them.
#[derive(Debug)]
pub struct RunnerGame<S: TrackScene> {
    player: LocomotionController,
    spawner: TrackSpawner<S>,
    intents: IntentQueue,
}

impl<S: TrackScene> RunnerGame<S> {
    /// Builds a session and lays down the opening track. The spawner is
    /// seeded from the wall clock; use [`with_seed`](Self::with_seed) for
    /// reproducible sessions.
    pub fn new(config: RunConfig, catalog: TileCatalog, scene: S) -> Result<Self> {
        config.player.validate()?;
        let mut spawner = TrackSpawner::new(config.track, catalog, scene)?;
        spawner.initialize();
        Ok(Self {
            player: LocomotionController::new(config.player),
            spawner,
            intents: IntentQueue::new(),
        })
    }

    /// Builds a session with a deterministic spawner sequence.
    pub fn with_seed(config: RunConfig, catalog: TileCatalog, scene: S, seed: u64) -> Result<Self> {
        config.player.validate()?;
        let mut spawner = TrackSpawner::with_seed(config.track, catalog, scene, seed)?;
        spawner.initialize();
        Ok(Self {
            player: LocomotionController::new(config.player),
            spawner,
            intents: IntentQueue::new(),
        })
    }

    /// Enqueues an intent for the next tick. Safe to call at any point
    /// between ticks; delivery order is arrival order.
    pub fn queue_intent(&mut self, intent: Intent) {
        self.intents.push(intent);
    }

    /// Runs one simulation step: apply all pending intents, then advance
    /// the player.
    pub fn tick(&mut self, dt: f32) {
        while let Some(intent) = self.intents.pop() {
            self.apply_intent(intent);
        }
        self.player.tick(dt, &self.spawner);
    }

    /// Applies a single intent immediately.
    fn apply_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(lateral) => {
                if let Some(new_direction) = self.player.request_turn(lateral, &self.spawner) {
                    // Synchronous handoff: the spawner replans before any
                    // further simulation sees the new direction
                    self.spawner.on_direction_changed(new_direction);
                } else {
                    debug!("turn intent {lateral:?} matched no tile, dropped");
                }
            }
            Intent::Jump => self.player.request_jump(&self.spawner),
            Intent::Slide => self.player.request_slide(),
        }
    }

    /// The player controller.
    pub fn player(&self) -> &LocomotionController {
        &self.player
    }

    /// The track spawner.
    pub fn spawner(&self) -> &TrackSpawner<S> {
        &self.spawner
    }

    /// True while the player still has track under or near their feet;
    /// once false the run is over (terminal handling is the host's call).
    pub fn is_on_track(&self) -> bool {
        self.player.is_grounded(&self.spawner) || self.player.position().y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TurnDirection;
    use glam::Vec3;
    use crate::track::{SegmentTemplate, TurnKind};
    use crate::world::{InstanceRegistry, PrefabId};

    fn catalog() -> TileCatalog {
        TileCatalog::new(
            SegmentTemplate::straight(PrefabId(0), Vec3::new(2.0, 0.5, 4.0)),
            vec![SegmentTemplate::turn(
                PrefabId(1),
                TurnKind::Sideways,
                Vec3::new(4.0, 0.5, 4.0),
                Vec3::ZERO,
            )],
            vec![],
        )
        .unwrap()
    }

    fn game(seed: u64) -> RunnerGame<InstanceRegistry> {
        RunnerGame::with_seed(RunConfig::default(), catalog(), InstanceRegistry::new(), seed)
            .unwrap()
    }

    #[test]
    fn test_new_lays_down_opening_track() {
        let game = game(1);
        assert_eq!(
            game.spawner().segments().len(),
            game.spawner().config().tile_start_count + 1
        );
        assert!(game.is_on_track());
    }

    #[test]
    fn test_intents_apply_at_tick_in_order() {
        let mut game = game(2);

        // A turn with no tile under the player is dropped; the jump that
        // follows still applies
        game.queue_intent(Intent::Turn(TurnDirection::Left));
        game.queue_intent(Intent::Jump);
        game.tick(1.0 / 60.0);

        assert!(game.player().vertical_velocity() > 0.0);
        assert_eq!(game.player().movement_direction(), Vec3::Z);
    }

    #[test]
    fn test_turn_handshake_keeps_directions_agreed() {
        let mut game = game(3);

        // Run forward until the player stands on the turn tile
        let pivot = game
            .spawner()
            .segments()
            .last()
            .unwrap()
            .pivot()
            .unwrap();
        for _ in 0..2000 {
            game.tick(1.0 / 60.0);
            if game.player().position().z >= pivot.z {
                break;
            }
        }

        game.queue_intent(Intent::Turn(TurnDirection::Right));
        game.tick(1.0 / 60.0);

        let player_direction = game.player().movement_direction();
        assert_eq!(player_direction, Vec3::X);
        // Invariant: the spawner's cursor agrees with the player
        assert_eq!(game.spawner().cursor().direction, player_direction);
    }

    #[test]
    fn test_run_config_json_round_trip() {
        let json = serde_json::to_string(&RunConfig::default()).unwrap();
        let parsed = RunConfig::from_json(&json).unwrap();
        assert_eq!(parsed, RunConfig::default());
    }

    #[test]
    fn test_run_config_rejects_bad_values() {
        let mut config = RunConfig::default();
        config.track.min_straight_tiles = 20;
        let json = serde_json::to_string(&config).unwrap();
        assert!(RunConfig::from_json(&json).is_err());
    }
}
