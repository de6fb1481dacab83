//! Lava: hazardous terrain that creeps across the map and recedes on removal

use glam::IVec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::feedback::{FeedbackKind, VisualFeedback};
use crate::sim::tilemap::{StoredTile, Tile, TileMap};

#[derive(Debug, Clone)]
pub struct LavaFlow {
    /// Every tile this flow overwrote, with its original kind
    tiles: Vec<StoredTile>,
    /// Growth direction, each axis fixed at -1 or 1 for the flow's lifetime
    dir: IVec2,
    spread_timer: f32,
    max_tiles: usize,
}

impl LavaFlow {
    pub fn spawn<R: Rng>(rng: &mut R, map: &mut TileMap, feedback: &mut dyn VisualFeedback) -> Self {
        Self::spawn_with_limit(LAVA_MAX_TILES, rng, map, feedback)
    }

    /// Start a flow that never grows past `max_tiles`
    pub fn spawn_with_limit<R: Rng>(
        max_tiles: usize,
        rng: &mut R,
        map: &mut TileMap,
        feedback: &mut dyn VisualFeedback,
    ) -> Self {
        // An empty map still gets a (dropped) start tile
        let start_x = rng.random_range(0..map.width().max(1) as i32);
        let start_y = rng.random_range(0..map.height().max(1) as i32);
        let dir = IVec2::new(
            rng.random_range(0..2) * 2 - 1,
            rng.random_range(0..2) * 2 - 1,
        );

        feedback.emit(map.tile_center(start_x, start_y), FeedbackKind::Spawn);
        let tiles = vec![StoredTile {
            x: start_x,
            y: start_y,
            tile: map.tile(start_x, start_y),
        }];
        map.set_tile(start_x, start_y, Tile::Lava);

        Self {
            tiles,
            dir,
            spread_timer: LAVA_SPREAD_TIME,
            max_tiles,
        }
    }

    pub fn tiles(&self) -> &[StoredTile] {
        &self.tiles
    }

    pub fn direction(&self) -> IVec2 {
        self.dir
    }

    pub fn max_tiles(&self) -> usize {
        self.max_tiles
    }

    /// Every `LAVA_SPREAD_TIME` seconds, each owned tile tries to claim its
    /// neighbor along the X direction and along the Y direction.
    pub fn update(&mut self, map: &mut TileMap, dt: f32) {
        self.spread_timer -= dt;
        if self.spread_timer >= 0.0 || self.tiles.len() >= self.max_tiles {
            return;
        }
        self.spread_timer = LAVA_SPREAD_TIME;

        // Tiles claimed this round don't spread until the next one
        let owned = self.tiles.len();
        for i in 0..owned {
            let StoredTile { x, y, .. } = self.tiles[i];
            self.spread(map, x + self.dir.x, y);
            self.spread(map, x, y + self.dir.y);
        }
        log::debug!("Lava spread to {} tiles", self.tiles.len());
    }

    fn spread(&mut self, map: &mut TileMap, x: i32, y: i32) {
        if self.tiles.len() >= self.max_tiles {
            return;
        }
        let tile = map.tile(x, y);
        if tile != Tile::Air && tile != Tile::Lava {
            self.tiles.push(StoredTile { x, y, tile });
            map.set_tile(x, y, Tile::Lava);
        }
    }

    /// Restore every overwritten tile
    pub fn vanish(self, map: &mut TileMap, feedback: &mut dyn VisualFeedback) {
        for stored in &self.tiles {
            feedback.emit(map.tile_center(stored.x, stored.y), FeedbackKind::Despawn);
            map.set_tile(stored.x, stored.y, stored.tile);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::feedback::Feedback;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn grass_map(size: u32) -> TileMap {
        let mut map = TileMap::new(size, size, 16);
        for x in 0..size as i32 {
            for y in 0..size as i32 {
                map.set_tile(x, y, Tile::Grass);
            }
        }
        map
    }

    #[test]
    fn test_spawn_claims_one_tile() {
        let mut map = grass_map(10);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut events: Vec<Feedback> = Vec::new();
        let lava = LavaFlow::spawn(&mut rng, &mut map, &mut events);

        assert_eq!(lava.tiles().len(), 1);
        assert_eq!(lava.tiles()[0].tile, Tile::Grass);
        assert_eq!(map.count(Tile::Lava), 1);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, FeedbackKind::Spawn);
        assert_eq!(lava.direction().x.abs(), 1);
        assert_eq!(lava.direction().y.abs(), 1);
    }

    #[test]
    fn test_spawn_on_empty_map() {
        let mut map = TileMap::new(0, 0, 16);
        let mut rng = Pcg32::seed_from_u64(2);
        let mut lava = LavaFlow::spawn(&mut rng, &mut map, &mut Vec::<Feedback>::new());
        lava.update(&mut map, LAVA_SPREAD_TIME + 0.01);
        assert_eq!(lava.tiles().len(), 1);
        assert_eq!(lava.tiles()[0].tile, Tile::Air);
        lava.vanish(&mut map, &mut Vec::<Feedback>::new());
        assert!(map.tiles().is_empty());
    }

    #[test]
    fn test_spread_waits_for_interval() {
        let mut map = grass_map(10);
        map.set_tile(5, 5, Tile::Lava);
        let mut lava = LavaFlow {
            tiles: vec![StoredTile { x: 5, y: 5, tile: Tile::Grass }],
            dir: IVec2::new(1, 1),
            spread_timer: LAVA_SPREAD_TIME,
            max_tiles: LAVA_MAX_TILES,
        };

        lava.update(&mut map, LAVA_SPREAD_TIME * 0.5);
        assert_eq!(lava.tiles().len(), 1);

        lava.update(&mut map, LAVA_SPREAD_TIME * 0.6);
        let claimed: Vec<_> = lava.tiles().iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(claimed, vec![(5, 5), (6, 5), (5, 6)]);

        // Second round: (6, 6) is claimed once, by whichever tile reaches it first
        lava.update(&mut map, LAVA_SPREAD_TIME + 0.01);
        let claimed: Vec<_> = lava.tiles().iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(claimed, vec![(5, 5), (6, 5), (5, 6), (7, 5), (6, 6), (5, 7)]);
        assert_eq!(map.count(Tile::Lava), 6);
    }

    #[test]
    fn test_spread_follows_fixed_directions() {
        let mut map = grass_map(20);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut lava = LavaFlow::spawn(&mut rng, &mut map, &mut Vec::<Feedback>::new());
        let start = lava.tiles()[0];
        let dir = lava.direction();

        for _ in 0..5 {
            lava.update(&mut map, LAVA_SPREAD_TIME + 0.01);
        }
        for stored in lava.tiles() {
            let dx = (stored.x - start.x) * dir.x;
            let dy = (stored.y - start.y) * dir.y;
            assert!(dx >= 0 && dy >= 0, "tile grew against its direction");
        }
    }

    #[test]
    fn test_air_and_lava_are_not_claimed() {
        let mut map = TileMap::new(5, 5, 16);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut lava = LavaFlow::spawn(&mut rng, &mut map, &mut Vec::<Feedback>::new());
        for _ in 0..10 {
            lava.update(&mut map, LAVA_SPREAD_TIME + 0.01);
        }
        // An all-air map only ever holds the start tile
        assert_eq!(lava.tiles().len(), 1);
        assert_eq!(lava.tiles()[0].tile, Tile::Air);
    }

    #[test]
    fn test_vanish_restores_terrain() {
        let mut map = TileMap::new(20, 20, 16);
        map.generate_seeded(9);
        let before = map.clone();
        let mut rng = Pcg32::seed_from_u64(4);
        let mut lava = LavaFlow::spawn(&mut rng, &mut map, &mut Vec::<Feedback>::new());
        for _ in 0..8 {
            lava.update(&mut map, LAVA_SPREAD_TIME + 0.01);
        }
        assert_ne!(map, before);

        let claimed = lava.tiles().len();
        let mut events: Vec<Feedback> = Vec::new();
        lava.vanish(&mut map, &mut events);
        assert_eq!(map, before);
        assert_eq!(events.len(), claimed);
        assert!(events.iter().all(|e| e.kind == FeedbackKind::Despawn));
    }

    proptest! {
        #[test]
        fn prop_tile_count_capped_and_restored(
            seed in any::<u64>(),
            max_tiles in 1usize..60,
            rounds in 0usize..20,
        ) {
            let mut map = TileMap::new(16, 16, 16);
            map.generate_seeded(seed);
            let before = map.clone();
            let mut rng = Pcg32::seed_from_u64(seed ^ 0x5eed);
            let mut lava =
                LavaFlow::spawn_with_limit(max_tiles, &mut rng, &mut map, &mut Vec::<Feedback>::new());

            for _ in 0..rounds {
                lava.update(&mut map, LAVA_SPREAD_TIME + 0.01);
                prop_assert!(lava.tiles().len() <= max_tiles);
                prop_assert_eq!(map.count(Tile::Lava), lava.tiles().len());
            }

            lava.vanish(&mut map, &mut Vec::<Feedback>::new());
            prop_assert_eq!(map, before);
        }
    }
}
