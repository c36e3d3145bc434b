use mineswept_core::Coord;

/// One line typed by the player.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    /// Any other single word, handed to the engine as a level name.
    Level(String),
    Reveal(Coord, Coord),
    Flag(Coord, Coord),
    Restart,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  easy | medium | hard | ridiculous   start a level
  r ROW COL                           reveal a tile
  f ROW COL                           flag or unflag a tile
  restart                             back to level select
  help                                show this text
  quit                                leave the game";

pub fn parse(line: &str) -> Option<Input> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_ascii_lowercase();

    let input = match command.as_str() {
        "r" | "reveal" => {
            let (row, col) = coords(&mut words)?;
            Input::Reveal(row, col)
        }
        "f" | "flag" => {
            let (row, col) = coords(&mut words)?;
            Input::Flag(row, col)
        }
        "restart" => Input::Restart,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Level(command),
    };

    // trailing words mean the line was not meant as this command
    match words.next() {
        Some(_) => None,
        None => Some(input),
    }
}

fn coords<'a>(words: &mut impl Iterator<Item = &'a str>) -> Option<(Coord, Coord)> {
    let row = words.next()?.parse().ok()?;
    let col = words.next()?.parse().ok()?;
    Some((row, col))
}
