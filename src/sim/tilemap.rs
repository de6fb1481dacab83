//! Tile map: a fixed-size grid of terrain kinds
//!
//! Tiles are stored row-major (`x + y * width`). Reads outside the grid
//! return `Tile::Air`, so neighbor lookups never need bounds checks.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Terrain kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tile {
    /// Empty space; also returned for every out-of-range read
    #[default]
    Air,
    Dirt,
    Grass,
    Water,
    /// Hazardous terrain; only ever placed by the lava hazard
    Lava,
}

impl Tile {
    /// Whether standing on this tile hurts the player
    #[inline]
    pub fn is_hazard(self) -> bool {
        self == Tile::Lava
    }
}

/// Atlas offset of one sub-tile quadrant, relative to the tile kind's sprite block.
///
/// Columns 0-2 / rows 0-2 form the edge ring around the solid center `(1, 1)`;
/// columns 3-4 / rows 0-1 hold the four inner corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubTile {
    pub x: u8,
    pub y: u8,
}

/// A grid coordinate paired with the tile that was there before a hazard overwrote it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTile {
    pub x: i32,
    pub y: i32,
    pub tile: Tile,
}

/// Fixed-size terrain grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    width: u32,
    height: u32,
    /// Pixel size of one tile
    tile_size: u32,
    tiles: Vec<Tile>,
}

impl TileMap {
    /// Create an all-`Air` map
    pub fn new(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            width,
            height,
            tile_size,
            tiles: vec![Tile::Air; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Map extent in pixels
    #[inline]
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            (self.width * self.tile_size) as f32,
            (self.height * self.tile_size) as f32,
        )
    }

    /// Raw tile storage, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Fill the map with procedural terrain.
    ///
    /// Two 1-D sine fields (one per axis, each with a random phase) are summed
    /// with per-tile uniform noise and scaled by a quarter. Low values become
    /// grass, middle values dirt, high values water.
    pub fn generate<R: Rng>(&mut self, rng: &mut R) {
        use std::f32::consts::TAU;

        let x_offset = rng.random::<f32>() * TAU;
        let y_offset = rng.random::<f32>() * TAU;

        for x in 0..self.width as i32 {
            for y in 0..self.height as i32 {
                let gen_x = (x as f32 * TERRAIN_PERIOD + x_offset).sin();
                let gen_y = (y as f32 * TERRAIN_PERIOD + y_offset).sin();
                let value = (gen_x + gen_y + 2.0 + rng.random::<f32>()) * 0.25;

                let tile = if value < GRASS_THRESHOLD {
                    Tile::Grass
                } else if value < DIRT_THRESHOLD {
                    Tile::Dirt
                } else {
                    Tile::Water
                };
                self.set_tile(x, y, tile);
            }
        }
    }

    /// Generate from a standalone seed (same seed, same terrain)
    pub fn generate_seeded(&mut self, seed: u64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.generate(&mut rng);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(x as usize + y as usize * self.width as usize)
    }

    /// Tile at grid coordinates; `Air` outside the map
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Air, |i| self.tiles[i])
    }

    /// Overwrite a tile. Writes outside the map are dropped.
    #[inline]
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    #[inline]
    pub fn compare_tile(&self, x: i32, y: i32, tile: Tile) -> bool {
        self.tile(x, y) == tile
    }

    /// Pixel coordinate to tile coordinate along one axis
    #[inline]
    pub fn to_tile_coord(&self, p: f32) -> i32 {
        (p / self.tile_size as f32).floor() as i32
    }

    /// Tile under a pixel position
    pub fn tile_at_pos(&self, pos: Vec2) -> Tile {
        self.tile(self.to_tile_coord(pos.x), self.to_tile_coord(pos.y))
    }

    /// Pixel center of a tile
    pub fn tile_center(&self, x: i32, y: i32) -> Vec2 {
        let size = self.tile_size as f32;
        Vec2::new((x as f32 + 0.5) * size, (y as f32 + 0.5) * size)
    }

    /// Number of tiles of the given kind
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Sub-tile atlas cells for drawing a tile as four quadrants.
    ///
    /// Order is top-left, top-right, bottom-left, bottom-right. Each quadrant
    /// looks at its horizontal, vertical and diagonal neighbor: a differing
    /// edge neighbor pushes the cell toward that edge, and a quadrant whose
    /// edges match but whose diagonal differs uses an inner-corner cell.
    /// Returns `None` for `Air`, which is never drawn.
    pub fn corner_cells(&self, x: i32, y: i32) -> Option<[SubTile; 4]> {
        let tile = self.tile(x, y);
        if tile == Tile::Air {
            return None;
        }

        let mut cells = [SubTile { x: 1, y: 1 }; 4];
        for (seg, cell) in cells.iter_mut().enumerate() {
            let off_x = (seg % 2) as i32;
            let off_y = (seg >> 1) as i32;
            let dir_x = off_x * 2 - 1;
            let dir_y = off_y * 2 - 1;

            let x_same = self.compare_tile(x + dir_x, y, tile);
            let y_same = self.compare_tile(x, y + dir_y, tile);
            let xy_same = self.compare_tile(x + dir_x, y + dir_y, tile);

            let (mut px, mut py) = (1, 1);
            if !x_same {
                px += dir_x;
            }
            if !y_same {
                py += dir_y;
            }
            if x_same && y_same && !xy_same {
                px = 4 - off_x;
                py = 1 - off_y;
            }
            *cell = SubTile {
                x: px as u8,
                y: py as u8,
            };
        }
        Some(cells)
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(MAP_WIDTH, MAP_HEIGHT, TILE_SIZE)
    }
}
