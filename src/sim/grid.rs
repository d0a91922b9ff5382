//! Tile grid queries
//!
//! The world is a grid of small integer codes owned by the level. All
//! queries are pure reads; out-of-range cells are reported as solid so a
//! body can never escape the world through an indexing gap.

use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;

/// Tile codes as they appear in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Solid,
    Hazard,
}

impl Tile {
    /// Map a level-format integer code to a tile; unknown codes read as empty
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Tile::Solid,
            2 => Tile::Hazard,
            _ => Tile::Empty,
        }
    }
}

/// Immutable tile grid, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileGrid {
    rows: Vec<Vec<u8>>,
}

impl TileGrid {
    pub fn new(rows: Vec<Vec<u8>>) -> Self {
        Self { rows }
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Grid width in cells (taken from the first row)
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Tile at cell coordinates; out of range reads as solid
    pub fn tile_at(&self, tx: i32, ty: i32) -> Tile {
        if ty < 0 || ty as usize >= self.rows.len() {
            return Tile::Solid;
        }
        let row = &self.rows[ty as usize];
        if tx < 0 || tx as usize >= row.len() {
            return Tile::Solid;
        }
        Tile::from_code(row[tx as usize])
    }

    /// Whether the cell at (tx, ty) is solid
    pub fn solid_at(&self, tx: i32, ty: i32) -> bool {
        self.tile_at(tx, ty) == Tile::Solid
    }

    /// Whether a world-space rect overlaps any solid cell
    ///
    /// The far edges are probed one unit short so a body flush against a
    /// cell boundary does not read the neighboring cell.
    pub fn solid_in_rect(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.rect_contains(x, y, w, h, Tile::Solid)
    }

    /// Whether a world-space rect overlaps any hazard cell
    pub fn hazard_in_rect(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.rect_contains(x, y, w, h, Tile::Hazard)
    }

    fn rect_contains(&self, x: f32, y: f32, w: f32, h: f32, needle: Tile) -> bool {
        let start_x = (x / TILE_SIZE).floor() as i32;
        let end_x = ((x + w - 1.0) / TILE_SIZE).floor() as i32;
        let start_y = (y / TILE_SIZE).floor() as i32;
        let end_y = ((y + h - 1.0) / TILE_SIZE).floor() as i32;

        for ty in start_y..=end_y {
            for tx in start_x..=end_x {
                if self.tile_at(tx, ty) == needle {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_3x3() -> TileGrid {
        TileGrid::new(vec![vec![0, 0, 0], vec![0, 1, 2], vec![1, 1, 1]])
    }

    #[test]
    fn test_tile_at_codes() {
        let grid = grid_3x3();
        assert_eq!(grid.tile_at(0, 0), Tile::Empty);
        assert_eq!(grid.tile_at(1, 1), Tile::Solid);
        assert_eq!(grid.tile_at(2, 1), Tile::Hazard);
    }

    #[test]
    fn test_out_of_range_is_solid() {
        let grid = grid_3x3();
        assert!(grid.solid_at(-1, 0));
        assert!(grid.solid_at(0, -1));
        assert!(grid.solid_at(3, 0));
        assert!(grid.solid_at(0, 3));
    }

    #[test]
    fn test_out_of_range_is_not_hazard() {
        let grid = grid_3x3();
        assert!(!grid.hazard_in_rect(-64.0, -64.0, 16.0, 16.0));
    }

    #[test]
    fn test_rect_query_spans_cells() {
        let grid = grid_3x3();
        // Rect covering cells (0,0)..(1,1) touches the solid at (1,1)
        assert!(grid.solid_in_rect(8.0, 8.0, 16.0, 16.0));
        // Rect fully inside the empty cell (0,0)
        assert!(!grid.solid_in_rect(1.0, 1.0, 10.0, 10.0));
    }

    #[test]
    fn test_rect_query_exclusive_far_edge() {
        let grid = grid_3x3();
        // A 16-wide rect at x=0 ends exactly at the boundary of column 1
        // and must not read into it.
        assert!(!grid.solid_in_rect(0.0, 16.0, 16.0, 8.0));
    }

    proptest! {
        #[test]
        fn prop_out_of_range_always_solid(tx in -1000i32..1000, ty in -1000i32..1000) {
            let grid = grid_3x3();
            prop_assume!(!(0..3).contains(&tx) || !(0..3).contains(&ty));
            prop_assert!(grid.solid_at(tx, ty));
        }
    }
}
