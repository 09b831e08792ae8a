//! Tile catalog
//!
//! The authored tiles the spawner can place: one start tile for straight
//! runs, the set of turn tiles, and the obstacle variants. Validated at
//! construction so the spawner never has to handle a malformed catalog at
//! placement time.

use anyhow::{Result, ensure};
use rand::Rng;

use super::segment::{SegmentShape, SegmentTemplate};

/// Validated set of placeable tiles.
#[derive(Debug, Clone)]
pub struct TileCatalog {
    start: SegmentTemplate,
    turn_tiles: Vec<SegmentTemplate>,
    obstacles: Vec<SegmentTemplate>,
}

impl TileCatalog {
    /// Builds a catalog, checking the invariants the spawner relies on:
    ///
    /// - the start tile is Straight (it is what straight runs are made of)
    /// - at least one turn tile exists (the prune step keeps exactly one
    ///   turn tile alive, so a track without turn tiles cannot recycle)
    /// - every turn tile is actually turn-shaped
    ///
    /// The obstacle list may be empty; placement then skips obstacles.
    pub fn new(
        start: SegmentTemplate,
        turn_tiles: Vec<SegmentTemplate>,
        obstacles: Vec<SegmentTemplate>,
    ) -> Result<Self> {
        ensure!(
            start.shape.is_straight(),
            "start tile must be a straight segment"
        );
        ensure!(
            !turn_tiles.is_empty(),
            "turn tile list must not be empty: the track cannot extend past its first run without one"
        );
        for (i, tile) in turn_tiles.iter().enumerate() {
            ensure!(
                matches!(tile.shape, SegmentShape::Turn { .. }),
                "turn tile {i} is not turn-shaped"
            );
        }

        Ok(Self {
            start,
            turn_tiles,
            obstacles,
        })
    }

    /// The start tile template.
    pub fn start(&self) -> &SegmentTemplate {
        &self.start
    }

    /// Draws a turn tile uniformly at random. The list is non-empty by
    /// construction.
    pub fn select_turn<R: Rng>(&self, rng: &mut R) -> &SegmentTemplate {
        &self.turn_tiles[rng.gen_range(0..self.turn_tiles.len())]
    }

    /// Draws an obstacle variant uniformly at random, or `None` when no
    /// obstacles are configured. Callers treat `None` as "skip obstacle".
    pub fn select_obstacle<R: Rng>(&self, rng: &mut R) -> Option<&SegmentTemplate> {
        if self.obstacles.is_empty() {
            return None;
        }
        Some(&self.obstacles[rng.gen_range(0..self.obstacles.len())])
    }

    /// Number of configured turn tiles.
    pub fn turn_tile_count(&self) -> usize {
        self.turn_tiles.len()
    }

    /// Number of configured obstacle variants.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::segment::TurnKind;
    use crate::world::PrefabId;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn start_tile() -> SegmentTemplate {
        SegmentTemplate::straight(PrefabId(0), Vec3::new(2.0, 0.5, 4.0))
    }

    fn turn_tile(prefab: u32, kind: TurnKind) -> SegmentTemplate {
        SegmentTemplate::turn(
            PrefabId(prefab),
            kind,
            Vec3::new(4.0, 0.5, 4.0),
            Vec3::new(0.0, 0.0, 2.0),
        )
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = TileCatalog::new(
            start_tile(),
            vec![turn_tile(1, TurnKind::Left), turn_tile(2, TurnKind::Right)],
            vec![],
        )
        .unwrap();
        assert_eq!(catalog.turn_tile_count(), 2);
        assert_eq!(catalog.obstacle_count(), 0);
    }

    #[test]
    fn test_empty_turn_list_rejected() {
        let result = TileCatalog::new(start_tile(), vec![], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_straight_start_rejected() {
        let result = TileCatalog::new(turn_tile(0, TurnKind::Left), vec![turn_tile(1, TurnKind::Right)], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_straight_in_turn_list_rejected() {
        let result = TileCatalog::new(start_tile(), vec![start_tile()], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_select_obstacle_empty_is_none() {
        let catalog =
            TileCatalog::new(start_tile(), vec![turn_tile(1, TurnKind::Sideways)], vec![]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(catalog.select_obstacle(&mut rng).is_none());
    }

    #[test]
    fn test_select_turn_covers_all_variants() {
        let catalog = TileCatalog::new(
            start_tile(),
            vec![
                turn_tile(1, TurnKind::Left),
                turn_tile(2, TurnKind::Right),
                turn_tile(3, TurnKind::Sideways),
            ],
            vec![],
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let tile = catalog.select_turn(&mut rng);
            seen[(tile.prefab.0 - 1) as usize] = true;
        }
        assert!(seen.iter().all(|s| *s), "uniform draw missed a variant");
    }
}
