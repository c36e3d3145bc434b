use serde::{Deserialize, Serialize};

use crate::*;

/// Every way the session can change, applied one at a time by [`Game::apply`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    SelectLevel(Level),
    Reveal(Coord2),
    ToggleFlag(Coord2),
    /// One countdown step from the host's timer.
    Tick,
    Restart,
}

/// What the host must do with its countdown timer after an action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerDirective {
    /// (Re)start ticking from now.
    Start,
    /// Cancel the countdown, no-op when it is not running.
    Stop,
    Keep,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Change {
    LevelSelected(Level),
    /// Level select outside the level-select screen, nothing changed.
    LevelIgnored,
    Reveal(RevealOutcome),
    Flag(MarkOutcome),
    Tick(TickOutcome),
    Restarted,
}

impl Change {
    pub const fn has_update(self) -> bool {
        match self {
            Self::LevelSelected(_) | Self::Restarted => true,
            Self::LevelIgnored => false,
            Self::Reveal(outcome) => outcome.has_update(),
            Self::Flag(outcome) => outcome.has_update(),
            Self::Tick(outcome) => outcome.has_update(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Update {
    pub change: Change,
    pub timer: TimerDirective,
}

impl Update {
    pub const fn has_update(&self) -> bool {
        self.change.has_update()
    }
}

/// Owns the session and is the only place it changes.
///
/// Each transition works on a copy of the current session and replaces it whole, so readers
/// holding an earlier snapshot never observe a half-applied action.
#[derive(Clone, Debug)]
pub struct Game<G = RandomBoardGenerator> {
    generator: G,
    session: Session,
}

impl<G: BoardGenerator> Game<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            session: Session::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn apply(&mut self, action: Action) -> Result<Update> {
        use Action::*;
        match action {
            SelectLevel(level) => self.select_level(level),
            Reveal((row, col)) => Ok(self.reveal_tile(row, col)),
            ToggleFlag((row, col)) => Ok(self.toggle_flag(row, col)),
            Tick => Ok(self.tick()),
            Restart => Ok(self.restart()),
        }
    }

    /// Starts a fresh session on `level`. Only the level-select screen accepts it, a game on
    /// screen has to be restarted first.
    pub fn select_level(&mut self, level: Level) -> Result<Update> {
        if self.session.phase() != Phase::Idle {
            log::debug!("Level {} ignored, {:?} game on screen", level, self.session.phase());
            return Ok(Update {
                change: Change::LevelIgnored,
                timer: TimerDirective::Keep,
            });
        }

        let preset = level.preset();
        let board = self.generator.generate(preset.size, preset.mines)?;
        self.session = Session::start(level, board);
        log::debug!(
            "Level {} selected, {} seconds on the clock",
            level,
            preset.time_limit
        );

        Ok(Update {
            change: Change::LevelSelected(level),
            timer: TimerDirective::Start,
        })
    }

    pub fn select_level_named(&mut self, name: &str) -> Result<Update> {
        self.select_level(name.parse()?)
    }

    pub fn reveal_tile(&mut self, row: Coord, col: Coord) -> Update {
        let (outcome, timer) = self.transition(|session| session.reveal((row, col)));
        Update {
            change: Change::Reveal(outcome),
            timer,
        }
    }

    pub fn toggle_flag(&mut self, row: Coord, col: Coord) -> Update {
        let (outcome, timer) = self.transition(|session| session.toggle_flag((row, col)));
        Update {
            change: Change::Flag(outcome),
            timer,
        }
    }

    pub fn tick(&mut self) -> Update {
        let (outcome, timer) = self.transition(Session::tick);
        Update {
            change: Change::Tick(outcome),
            timer,
        }
    }

    pub fn restart(&mut self) -> Update {
        self.session = Session::default();
        log::debug!("Restarted, back to level select");
        Update {
            change: Change::Restarted,
            timer: TimerDirective::Stop,
        }
    }

    fn transition<O>(&mut self, step: impl FnOnce(&mut Session) -> O) -> (O, TimerDirective) {
        let was_playing = self.session.is_playing();
        let mut next = self.session.clone();
        let outcome = step(&mut next);
        self.session = next;

        if was_playing && !self.session.is_playing() {
            if let Some(ended) = self.session.outcome() {
                log::debug!("Game over: {:?}, score {}", ended, self.session.score());
            }
            (outcome, TimerDirective::Stop)
        } else {
            (outcome, TimerDirective::Keep)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    const EASY_MINES: [Coord2; 3] = [(0, 0), (1, 1), (2, 2)];

    fn easy_game() -> Game<FixedBoardGenerator> {
        let mut game = Game::new(FixedBoardGenerator::new(EASY_MINES));
        game.select_level(Level::Easy).unwrap();
        game
    }

    fn safe_coords(session: &Session) -> Vec<Coord2> {
        session
            .board()
            .unwrap()
            .iter_tiles()
            .filter(|(_, tile)| !tile.is_mine())
            .map(|(coords, _)| coords)
            .collect()
    }

    #[test]
    fn select_level_starts_countdown() {
        let mut game = Game::new(RandomBoardGenerator::new(11));

        let update = game.select_level_named("easy").unwrap();

        assert_eq!(update.change, Change::LevelSelected(Level::Easy));
        assert_eq!(update.timer, TimerDirective::Start);
        let session = game.session();
        assert_eq!(session.phase(), Phase::Playing);
        assert_eq!(session.level(), Some(Level::Easy));
        assert_eq!(session.time_left(), 15);
        assert_eq!(session.score(), 0);
        let board = session.board().unwrap();
        assert_eq!(board.total_tiles(), 25);
        assert_eq!(board.mine_count(), 3);
    }

    #[test]
    fn unknown_level_leaves_session_untouched() {
        let mut game = Game::new(RandomBoardGenerator::new(11));

        let err = game.select_level_named("impossible").unwrap_err();

        assert_eq!(err, GameError::InvalidLevel("impossible".into()));
        assert_eq!(game.session(), &Session::default());
    }

    #[test]
    fn reveal_safe_tile_adds_reward() {
        let mut game = easy_game();
        let before = game.session().clone();

        let update = game.reveal_tile(0, 1);

        assert_eq!(update.change, Change::Reveal(RevealOutcome::Revealed));
        assert_eq!(update.timer, TimerDirective::Keep);
        let session = game.session();
        assert_eq!(session.score(), 10);
        assert_eq!(session.phase(), Phase::Playing);

        let changed: Vec<_> = before
            .board()
            .unwrap()
            .iter_tiles()
            .zip(session.board().unwrap().iter_tiles())
            .filter(|((_, old), (_, new))| old != new)
            .map(|((coords, _), (_, new))| (coords, new.is_revealed()))
            .collect();
        assert_eq!(changed, [((0, 1), true)]);
    }

    #[test]
    fn second_reveal_is_noop() {
        let mut game = easy_game();
        game.reveal_tile(3, 3);

        let update = game.reveal_tile(3, 3);

        assert_eq!(update.change, Change::Reveal(RevealOutcome::NoChange));
        assert!(!update.has_update());
        assert_eq!(game.session().score(), 10);
    }

    #[test]
    fn flagged_tile_cannot_be_revealed() {
        let mut game = easy_game();
        assert_eq!(
            game.toggle_flag(0, 0).change,
            Change::Flag(MarkOutcome::Changed)
        );

        let update = game.reveal_tile(0, 0);

        assert_eq!(update.change, Change::Reveal(RevealOutcome::NoChange));
        assert_eq!(game.session().phase(), Phase::Playing);
        assert_eq!(game.session().tile_view((0, 0)), Some(TileView::Flagged));
    }

    #[test]
    fn revealed_tile_cannot_be_flagged() {
        let mut game = easy_game();
        game.reveal_tile(4, 0);

        let update = game.toggle_flag(4, 0);

        assert_eq!(update.change, Change::Flag(MarkOutcome::NoChange));
        assert_eq!(game.session().flag_count(), 0);
    }

    #[test]
    fn flag_toggles_without_scoring() {
        let mut game = easy_game();

        game.toggle_flag(2, 3);
        assert_eq!(game.session().flag_count(), 1);
        game.toggle_flag(2, 3);
        assert_eq!(game.session().flag_count(), 0);

        assert_eq!(game.session().score(), 0);
        assert_eq!(game.session().phase(), Phase::Playing);
        assert_eq!(game.reveal_tile(2, 3).change, Change::Reveal(RevealOutcome::Revealed));
    }

    #[test]
    fn out_of_bounds_actions_are_ignored() {
        let mut game = easy_game();
        let before = game.session().clone();

        assert!(!game.reveal_tile(5, 0).has_update());
        assert!(!game.reveal_tile(0, 200).has_update());
        assert!(!game.toggle_flag(9, 9).has_update());

        assert_eq!(game.session(), &before);
    }

    #[test]
    fn actions_before_level_select_are_ignored() {
        let mut game = Game::new(FixedBoardGenerator::new(EASY_MINES));

        assert!(!game.reveal_tile(0, 1).has_update());
        assert!(!game.toggle_flag(0, 1).has_update());
        let tick = game.tick();
        assert_eq!(tick.change, Change::Tick(TickOutcome::NoChange));
        assert_eq!(tick.timer, TimerDirective::Keep);
        assert_eq!(game.session(), &Session::default());
    }

    #[test]
    fn mine_ends_game_regardless_of_score() {
        let mut game = easy_game();
        game.reveal_tile(0, 1);
        game.reveal_tile(0, 2);

        let update = game.reveal_tile(1, 1);

        assert_eq!(update.change, Change::Reveal(RevealOutcome::HitMine));
        assert_eq!(update.timer, TimerDirective::Stop);
        let session = game.session();
        assert_eq!(
            session.phase(),
            Phase::Ended(Outcome::Lost(LossCause::SteppedOnMine))
        );
        assert_eq!(session.score(), 20);
        assert_eq!(session.tile_view((1, 1)), Some(TileView::Mine));
    }

    #[test]
    fn ended_board_is_frozen() {
        let mut game = easy_game();
        game.reveal_tile(2, 2);
        let ended = game.session().clone();

        assert!(!game.reveal_tile(0, 1).has_update());
        assert!(!game.toggle_flag(0, 1).has_update());
        assert!(!game.tick().has_update());

        assert_eq!(game.session(), &ended);
    }

    #[test]
    fn revealing_every_safe_tile_wins() {
        let mut game = easy_game();
        let safe = safe_coords(game.session());
        assert_eq!(safe.len(), 22);

        let (last, rest) = safe.split_last().unwrap();
        for &(row, col) in rest {
            let update = game.reveal_tile(row, col);
            assert_eq!(update.change, Change::Reveal(RevealOutcome::Revealed));
            assert_eq!(game.session().phase(), Phase::Playing);
        }
        let update = game.reveal_tile(last.0, last.1);

        assert_eq!(update.change, Change::Reveal(RevealOutcome::Won));
        assert_eq!(update.timer, TimerDirective::Stop);
        assert_eq!(game.session().phase(), Phase::Ended(Outcome::Won));
        assert_eq!(game.session().score(), 220);
        assert_eq!(
            game.session().summary().as_deref(),
            Some("Congratulations! You won the game.\nYour Score: 220")
        );
    }

    #[test]
    fn random_board_is_winnable() {
        let mut game = Game::new(RandomBoardGenerator::new(5));
        game.select_level(Level::Ridiculous).unwrap();

        for (row, col) in safe_coords(game.session()) {
            game.reveal_tile(row, col);
        }

        assert_eq!(game.session().outcome(), Some(Outcome::Won));
        assert_eq!(game.session().score(), Level::Ridiculous.preset().winning_score());
    }

    #[test]
    fn countdown_runs_out_on_medium() {
        let mut game = Game::new(RandomBoardGenerator::new(3));
        game.select_level(Level::Medium).unwrap();

        for remaining in (1..25).rev() {
            let update = game.tick();
            assert_eq!(update.change, Change::Tick(TickOutcome::Ticked));
            assert_eq!(game.session().time_left(), remaining);
        }
        let update = game.tick();

        assert_eq!(update.change, Change::Tick(TickOutcome::TimeUp));
        assert_eq!(update.timer, TimerDirective::Stop);
        let session = game.session();
        assert_eq!(session.phase(), Phase::Ended(Outcome::Lost(LossCause::TimeUp)));
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 0);

        let ended = session.clone();
        for _ in 0..5 {
            assert!(!game.tick().has_update());
        }
        assert_eq!(game.session(), &ended);
    }

    #[test]
    fn restart_returns_to_idle_from_any_phase() {
        let mut game = Game::new(FixedBoardGenerator::new(EASY_MINES));
        assert_eq!(game.restart().timer, TimerDirective::Stop);
        assert_eq!(game.session(), &Session::default());

        game.select_level(Level::Easy).unwrap();
        game.reveal_tile(0, 1);
        game.tick();
        assert_eq!(game.restart().timer, TimerDirective::Stop);
        assert_eq!(game.session(), &Session::default());

        game.select_level(Level::Easy).unwrap();
        game.reveal_tile(0, 0);
        assert!(game.session().is_game_over());
        let update = game.restart();
        assert_eq!(update.change, Change::Restarted);
        let session = game.session();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.time_left(), 0);
        assert!(session.board().is_none());
    }

    #[test]
    fn level_select_is_ignored_while_playing() {
        let mut game = Game::new(RandomBoardGenerator::new(9));
        game.select_level(Level::Easy).unwrap();
        game.tick();
        let safe = safe_coords(game.session())[0];
        game.reveal_tile(safe.0, safe.1);
        let playing = game.session().clone();

        let update = game.select_level(Level::Hard).unwrap();

        assert_eq!(update.change, Change::LevelIgnored);
        assert_eq!(update.timer, TimerDirective::Keep);
        assert!(!update.has_update());
        assert_eq!(game.session(), &playing);
    }

    #[test]
    fn ended_game_needs_restart_before_level_select() {
        let mut game = easy_game();
        game.reveal_tile(0, 0);
        let ended = game.session().clone();
        assert!(ended.is_game_over());

        let update = game.select_level(Level::Hard).unwrap();

        assert_eq!(update.change, Change::LevelIgnored);
        assert_eq!(update.timer, TimerDirective::Keep);
        assert_eq!(game.session(), &ended);

        game.restart();
        let update = game.select_level(Level::Hard).unwrap();
        assert_eq!(update.change, Change::LevelSelected(Level::Hard));
        assert_eq!(update.timer, TimerDirective::Start);
        assert_eq!(game.session().time_left(), 40);
    }

    #[test]
    fn unknown_level_is_rejected_in_any_phase() {
        let mut game = easy_game();
        let playing = game.session().clone();

        let err = game.select_level_named("insane").unwrap_err();

        assert_eq!(err, GameError::InvalidLevel("insane".into()));
        assert_eq!(game.session(), &playing);
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut game = Game::new(FixedBoardGenerator::new(EASY_MINES));

        game.apply(Action::SelectLevel(Level::Easy)).unwrap();
        game.apply(Action::ToggleFlag((1, 1))).unwrap();
        game.apply(Action::Reveal((0, 1))).unwrap();
        game.apply(Action::Tick).unwrap();

        let session = game.session();
        assert_eq!(session.score(), 10);
        assert_eq!(session.flag_count(), 1);
        assert_eq!(session.time_left(), 14);

        let update = game.apply(Action::Restart).unwrap();
        assert_eq!(update.change, Change::Restarted);
        assert_eq!(game.session().phase(), Phase::Idle);
    }
}
