use alloc::borrow::ToOwned;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Difficulty picked on the level-select screen.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Medium,
    Hard,
    Ridiculous,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Easy, Level::Medium, Level::Hard, Level::Ridiculous];

    pub const fn preset(self) -> Preset {
        use Level::*;
        match self {
            Easy => Preset::new(5, 3, 15),
            Medium => Preset::new(6, 5, 25),
            Hard => Preset::new(7, 7, 40),
            Ridiculous => Preset::new(12, 9, 80),
        }
    }

    pub const fn name(self) -> &'static str {
        use Level::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
            Ridiculous => "ridiculous",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| GameError::InvalidLevel(name.to_owned()))
    }
}

/// Fixed board parameters of a level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Width and height of the square board.
    pub size: Coord,
    pub mines: CellCount,
    /// Starting value of the countdown.
    pub time_limit: Seconds,
}

impl Preset {
    pub const fn new(size: Coord, mines: CellCount, time_limit: Seconds) -> Self {
        Self {
            size,
            mines,
            time_limit,
        }
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size, self.size)
    }

    pub const fn safe_tiles(&self) -> CellCount {
        self.total_tiles().saturating_sub(self.mines)
    }

    /// Score reached once every safe tile is revealed.
    pub const fn winning_score(&self) -> Score {
        self.safe_tiles() as Score * TILE_REWARD
    }
}
