use alloc::vec::Vec;

use super::*;

/// Always lays mines on the same tiles, for scripted sessions and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    mine_coords: Vec<Coord2>,
}

impl FixedBoardGenerator {
    pub fn new(mine_coords: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mine_coords: mine_coords.into_iter().collect(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, size: Coord, mines: CellCount) -> Result<Board> {
        check_dimensions(size, mines)?;
        let board = Board::from_mine_coords(size, &self.mine_coords)?;

        if board.mine_count() != mines {
            log::warn!(
                "Fixed board mine count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                mines
            );
        }
        Ok(board)
    }
}
