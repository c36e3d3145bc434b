use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of tiles for one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
    mine_count: CellCount,
}

impl Board {
    /// Board with no mines, every tile hidden.
    pub(crate) fn empty(size: Coord) -> Self {
        Self {
            tiles: Array2::default((size, size).to_nd_index()),
            mine_count: 0,
        }
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        check_dimensions(size, 0)?;
        let mut board = Self::empty(size);

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board.place_mine(coords);
        }

        if board.mine_count >= board.total_tiles() {
            return Err(GameError::TooManyMines);
        }
        Ok(board)
    }

    /// Marks `coords` as a mine, returns `false` when it already was one.
    pub(crate) fn place_mine(&mut self, coords: Coord2) -> bool {
        let tile = &mut self[coords];
        if tile.is_mine {
            return false;
        }
        tile.is_mine = true;
        self.mine_count += 1;
        true
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.tiles.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn total_tiles(&self) -> CellCount {
        self.tiles.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_tile_count(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mine_count)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(|tile| tile.is_revealed && !tile.is_mine)
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(Tile::is_flagged)
    }

    pub fn tile(&self, coords: Coord2) -> Option<Tile> {
        self.validate_coords(coords).ok().map(|coords| self[coords])
    }

    /// All tiles in row-major order with their coordinates.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((row, col), &tile)| ((row as Coord, col as Coord), tile))
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_tiles()
            .filter(|(_, tile)| tile.is_mine)
            .map(|(coords, _)| coords)
    }

    fn count_where(&self, predicate: impl Fn(Tile) -> bool) -> CellCount {
        let count = self.tiles.iter().filter(|&&tile| predicate(tile)).count();
        count.try_into().unwrap_or(CellCount::MAX)
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}
