use serde::{Deserialize, Serialize};

/// One cell of the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Whether a reveal may still land on this tile.
    pub const fn is_revealable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub const fn view(self) -> TileView {
        match (self.is_revealed, self.is_mine, self.is_flagged) {
            (true, true, _) => TileView::Mine,
            (true, false, _) => TileView::Safe,
            (false, _, true) => TileView::Flagged,
            (false, _, false) => TileView::Hidden,
        }
    }
}

/// Player-visible state of a tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileView {
    Hidden,
    Flagged,
    /// Revealed and safe, worth [`crate::TILE_REWARD`] points.
    Safe,
    /// Revealed mine, only ever seen on a lost board.
    Mine,
}

impl TileView {
    /// Short label drawn on the tile face.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Flagged => "F",
            Self::Safe => "10",
            Self::Mine => "M",
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}
