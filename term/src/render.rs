use std::fmt::Write;

use mineswept_core::*;

pub const INTRO: &str = "\
Welcome to MINE SWEPT!
Your objective is to clear as many tiles as you can without tapping on a mine. It is a game of pure luck!";

/// Whole screen for `session`: level menu, or the board with its status line.
pub fn screen(session: &Session) -> String {
    let Some(board) = session.board() else {
        return level_menu();
    };

    let mut out = status(session);
    out.push('\n');
    out.push_str(&grid(board));
    if let Some(summary) = session.summary() {
        let _ = write!(out, "\nGame Over\n{summary}\nType `restart` to play again.");
    }
    out
}

pub fn level_menu() -> String {
    let mut out = String::from("Select a level:");
    for level in Level::ALL {
        let preset = level.preset();
        let _ = write!(
            out,
            "\n  {:<11}{}x{} board, {} mines, {}s",
            level.name(),
            preset.size,
            preset.size,
            preset.mines,
            preset.time_limit
        );
    }
    out
}

pub fn status(session: &Session) -> String {
    format!("Score: {}  Time: {}s", session.score(), session.time_left())
}

fn grid(board: &Board) -> String {
    let size = board.size();
    let mut out = String::from("   ");
    for col in 0..size {
        let _ = write!(out, "{col:>3}");
    }

    for ((row, col), tile) in board.iter_tiles() {
        if col == 0 {
            let _ = write!(out, "\n{row:>3}");
        }
        let label = match tile.view() {
            TileView::Hidden => "#",
            view => view.label(),
        };
        let _ = write!(out, "{label:>3}");
    }
    out
}
