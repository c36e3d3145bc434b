use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    SteppedOnMine,
    TimeUp,
}

/// How a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost(LossCause),
}

impl Outcome {
    /// Line shown in the end-of-game prompt.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Won => "Congratulations! You won the game.",
            Self::Lost(LossCause::SteppedOnMine) => "You stepped on a mine, game over.",
            Self::Lost(LossCause::TimeUp) => "Time is up, game over.",
        }
    }
}

/// Valid transitions:
/// - Idle -> Playing
/// - Playing -> Ended
/// - any -> Idle (restart)
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Level-select screen, no board
    #[default]
    Idle,
    /// Board on screen and countdown running
    Playing,
    /// Board frozen until restart
    Ended(Outcome),
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended(_))
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Everything the player sees, from level selection to restart.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    level: Option<Level>,
    board: Option<Board>,
    time_left: Seconds,
    score: Score,
    phase: Phase,
}

impl Session {
    pub(crate) fn start(level: Level, board: Board) -> Self {
        Self {
            level: Some(level),
            board: Some(board),
            time_left: level.preset().time_limit,
            score: 0,
            phase: Phase::Playing,
        }
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn time_left(&self) -> Seconds {
        self.time_left
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_ended()
    }

    pub fn flag_count(&self) -> CellCount {
        self.board.as_ref().map_or(0, Board::flagged_count)
    }

    pub fn tile_view(&self, coords: Coord2) -> Option<TileView> {
        self.board.as_ref()?.tile(coords).map(Tile::view)
    }

    /// End-of-game prompt text, `None` while the game is not over.
    pub fn summary(&self) -> Option<String> {
        let outcome = self.outcome()?;
        Some(format!("{}\nYour Score: {}", outcome.message(), self.score))
    }

    pub(crate) fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.phase.is_playing() {
            return RevealOutcome::NoChange;
        }
        let Some(board) = self.board.as_mut() else {
            return RevealOutcome::NoChange;
        };
        let Ok(coords) = board.validate_coords(coords) else {
            return RevealOutcome::NoChange;
        };

        let tile = &mut board[coords];
        if !tile.is_revealable() {
            return RevealOutcome::NoChange;
        }
        tile.is_revealed = true;

        if tile.is_mine {
            log::debug!("Mine hit at {:?}", coords);
            self.phase = Phase::Ended(Outcome::Lost(LossCause::SteppedOnMine));
            return RevealOutcome::HitMine;
        }

        self.score += TILE_REWARD;
        log::trace!("Revealed {:?}, score {}", coords, self.score);

        if self.score == Score::from(board.safe_tile_count()) * TILE_REWARD {
            self.phase = Phase::Ended(Outcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if !self.phase.is_playing() {
            return MarkOutcome::NoChange;
        }
        let Some(board) = self.board.as_mut() else {
            return MarkOutcome::NoChange;
        };
        let Ok(coords) = board.validate_coords(coords) else {
            return MarkOutcome::NoChange;
        };

        let tile = &mut board[coords];
        if tile.is_revealed {
            return MarkOutcome::NoChange;
        }
        tile.is_flagged = !tile.is_flagged;
        MarkOutcome::Changed
    }

    pub(crate) fn tick(&mut self) -> TickOutcome {
        if !self.phase.is_playing() {
            return TickOutcome::NoChange;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.phase = Phase::Ended(Outcome::Lost(LossCause::TimeUp));
            TickOutcome::TimeUp
        } else {
            TickOutcome::Ticked
        }
    }
}
