//! Canyon Run Engine Library
//!
//! Core simulation for an endless-runner: a forward-running player and a
//! procedural track that extends ahead of them and recycles behind them.
//! The library is headless; rendering, audio, input devices and scene
//! lifetime belong to the host, which talks to the core through the
//! collaborator traits in [`physics`] and [`world`].
//!
//! # Modules
//!
//! - [`player`] - Locomotion controller: forward motion, gravity, jumps,
//!   grounded probing, turn snapping
//! - [`track`] - Segment data model, tile catalog, and the spawner that
//!   owns the rolling window of live track
//! - [`input`] - Intent events, queueing, and key bindings
//! - [`physics`] - Ray/overlap primitives and the collision query trait
//! - [`world`] - Scene collaborator trait and the bookkeeping registry
//!
//! # Example
//!
//! ```ignore
//! use canyon_run_engine::game::{RunConfig, RunnerGame};
//! use canyon_run_engine::input::{Intent, TurnDirection};
//! use canyon_run_engine::world::InstanceRegistry;
//!
//! let mut game = RunnerGame::with_seed(
//!     RunConfig::default(),
//!     demo_catalog(),
//!     InstanceRegistry::new(),
//!     1234,
//! )?;
//!
//! game.queue_intent(Intent::Turn(TurnDirection::Right));
//! game.tick(1.0 / 60.0);
//! ```

pub mod input;
pub mod physics;
pub mod player;
pub mod track;
pub mod world;

// Game-integration modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export commonly used types at crate level for convenience
pub use input::{Intent, IntentBindings, IntentQueue, KeyCode, TurnDirection};
pub use physics::{CollisionLayer, CollisionQuery, RayHit, TurnContact};
pub use player::{LocomotionConfig, LocomotionController};
pub use track::{SegmentTemplate, TileCatalog, TrackSegment, TrackSpawner, TurnKind};
pub use world::{InstanceRegistry, PrefabId, SceneHandle, TrackScene};
