use rand::prelude::*;

use super::*;

/// Places mines one at a time on uniformly random tiles, drawing again whenever the tile already
/// holds a mine.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator {
    rng: SmallRng,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(&mut self, size: Coord, mines: CellCount) -> Result<Board> {
        check_dimensions(size, mines)?;

        let mut board = Board::empty(size);
        let mut draws: u32 = 0;
        while board.mine_count() < mines {
            let coords = (self.rng.random_range(0..size), self.rng.random_range(0..size));
            draws += 1;
            if !board.place_mine(coords) {
                log::trace!("Mine already at {:?}, drawing again", coords);
            }
        }

        log::debug!(
            "Generated {}x{} board with {} mines in {} draws",
            size,
            size,
            mines,
            draws
        );
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;

    #[test]
    fn places_exact_mine_count_on_distinct_tiles() {
        let mut generator = RandomBoardGenerator::new(0xdead_beef);
        for size in 1..=12 {
            let total = mult(size, size);
            for mines in [0, total / 3, total - 1] {
                let board = generator.generate(size, mines).unwrap();
                let coords: BTreeSet<_> = board.mine_coords().collect();

                assert_eq!(board.total_tiles(), total);
                assert_eq!(board.mine_count(), mines);
                assert_eq!(coords.len(), usize::from(mines));
                assert!(board.iter_tiles().all(|(_, tile)| tile.is_revealable()));
            }
        }
    }

    #[test]
    fn generates_every_preset() {
        let mut generator = RandomBoardGenerator::new(7);
        for level in Level::ALL {
            let preset = level.preset();
            let board = generator.generate(preset.size, preset.mines).unwrap();
            assert_eq!(board.size(), preset.size);
            assert_eq!(board.mine_count(), preset.mines);
            assert_eq!(board.revealed_count(), 0);
            assert_eq!(board.flagged_count(), 0);
        }
    }

    #[test]
    fn same_seed_same_board() {
        let a = generate_board(12, 9, 42).unwrap();
        let b = generate_board(12, 9, 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn mines_spread_over_the_whole_board() {
        let mut generator = RandomBoardGenerator::new(1);
        let mut hits = [0u32; 25];
        for _ in 0..2000 {
            let board = generator.generate(5, 3).unwrap();
            for (row, col) in board.mine_coords() {
                hits[usize::from(row) * 5 + usize::from(col)] += 1;
            }
        }
        // 6000 mines over 25 tiles, 240 expected per tile
        let low: Vec<_> = hits.iter().filter(|&&count| count < 150).collect();
        assert!(low.is_empty(), "uneven placement: {hits:?}");
    }

    #[test]
    fn rejects_impossible_dimensions() {
        let mut generator = RandomBoardGenerator::new(0);
        assert_eq!(generator.generate(0, 0), Err(GameError::InvalidBoardSize));
        assert_eq!(generator.generate(3, 9), Err(GameError::TooManyMines));
    }
}
