use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

pub trait BoardGenerator {
    /// Builds a fresh `size × size` board holding exactly `mines` mines.
    fn generate(&mut self, size: Coord, mines: CellCount) -> Result<Board>;
}

/// Random board from a one-off generator seeded with `seed`.
pub fn generate_board(size: Coord, mines: CellCount, seed: u64) -> Result<Board> {
    RandomBoardGenerator::new(seed).generate(size, mines)
}

/// Checks that a board of `size × size` can hold `mines` and still have a safe tile.
pub fn check_dimensions(size: Coord, mines: CellCount) -> Result<()> {
    if size == 0 {
        return Err(GameError::InvalidBoardSize);
    }
    if mines >= mult(size, size) {
        return Err(GameError::TooManyMines);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_dimensions_requires_a_safe_tile() {
        assert_eq!(check_dimensions(0, 0), Err(GameError::InvalidBoardSize));
        assert_eq!(check_dimensions(1, 1), Err(GameError::TooManyMines));
        assert_eq!(check_dimensions(1, 0), Ok(()));
        assert_eq!(check_dimensions(5, 24), Ok(()));
        assert_eq!(check_dimensions(5, 25), Err(GameError::TooManyMines));
    }
}
