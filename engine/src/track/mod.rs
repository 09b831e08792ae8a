//! Track Module
//!
//! Procedural track generation for the endless runner: the tile data
//! model, the authored-tile catalog, and the spawner that maintains the
//! rolling window of live geometry.
//!
//! # Components
//!
//! - [`SegmentTemplate`] / [`TrackSegment`] - authored tiles and their
//!   placed instances, with the turn pivot carried as a tagged payload
//! - [`TileCatalog`] - validated start/turn/obstacle tile sets with
//!   uniform random selection
//! - [`TrackSpawner`] - the append/prune protocol plus the collision
//!   queries answered from the active window

pub mod catalog;
pub mod segment;
pub mod spawner;

// Re-export commonly used types at module level
pub use catalog::TileCatalog;
pub use segment::{
    Obstacle, SegmentShape, SegmentTemplate, TrackSegment, TurnKind, face_direction, snap_cardinal,
};
pub use spawner::{PathCursor, SpawnerConfig, TrackSpawner};
