use mineswept_core::*;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::{Countdown, EngineConfig, EngineError, Result};

#[derive(Debug)]
enum Command {
    Apply(Action, oneshot::Sender<Result<Session>>),
    Shutdown(oneshot::Sender<()>),
}

/// Cloneable entry point used by the presentation shell.
#[derive(Clone, Debug)]
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Session>,
}

/// Spawns an engine with a random board generator seeded from `config`.
pub fn spawn_engine(config: EngineConfig) -> (EngineHandle, JoinHandle<()>) {
    let generator = RandomBoardGenerator::new(config.seed_or_clock());
    spawn_engine_with(config, generator)
}

pub fn spawn_engine_with<G>(config: EngineConfig, generator: G) -> (EngineHandle, JoinHandle<()>)
where
    G: BoardGenerator + Send + 'static,
{
    let (commands, rx) = mpsc::channel(config.queue_depth.max(1));
    let (snapshot_tx, snapshots) = watch::channel(Session::default());

    let actor = Actor {
        game: Game::new(generator),
        countdown: Countdown::new(config.tick_interval),
        commands: rx,
        snapshots: snapshot_tx,
    };
    let task = tokio::spawn(actor.run());

    (
        EngineHandle {
            commands,
            snapshots,
        },
        task,
    )
}

impl EngineHandle {
    /// Starts a new session on the named level. Unknown names are rejected before reaching the
    /// engine, leaving the current session as it was.
    pub async fn select_level(&self, name: &str) -> Result<Session> {
        let level: Level = name.parse()?;
        self.apply(Action::SelectLevel(level)).await
    }

    pub async fn reveal_tile(&self, row: Coord, col: Coord) -> Result<Session> {
        self.apply(Action::Reveal((row, col))).await
    }

    pub async fn toggle_flag(&self, row: Coord, col: Coord) -> Result<Session> {
        self.apply(Action::ToggleFlag((row, col))).await
    }

    pub async fn restart(&self) -> Result<Session> {
        self.apply(Action::Restart).await
    }

    /// Sends any player action through the engine, returning the session it left behind.
    pub async fn apply(&self, action: Action) -> Result<Session> {
        self.request(|reply| Command::Apply(action, reply)).await?
    }

    /// Stops the engine task. Later calls on any handle fail with [`EngineError::Closed`].
    pub async fn shutdown(&self) -> Result<()> {
        self.request(Command::Shutdown).await
    }

    /// Latest published session.
    pub fn snapshot(&self) -> Session {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every change, timer steps included.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.snapshots.clone()
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| EngineError::Closed)?;
        response.await.map_err(|_| EngineError::Closed)
    }
}

struct Actor<G> {
    game: Game<G>,
    countdown: Countdown,
    commands: mpsc::Receiver<Command>,
    snapshots: watch::Sender<Session>,
}

impl<G: BoardGenerator> Actor<G> {
    async fn run(mut self) {
        log::debug!("Engine started");
        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        log::debug!("All engine handles dropped");
                        break;
                    };
                    if !self.handle(command) {
                        break;
                    }
                }
                _ = self.countdown.tick(), if self.countdown.is_running() => {
                    if let Err(err) = self.dispatch(Action::Tick) {
                        log::warn!("Countdown step rejected: {}", err);
                    }
                }
            }
        }
        self.countdown.cancel();
        log::debug!("Engine stopped");
    }

    /// Applies one command, returns `false` once the engine should stop.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Apply(action, reply) => {
                let _ = reply.send(self.dispatch(action));
            }
            Command::Shutdown(done) => {
                let _ = done.send(());
                return false;
            }
        }
        true
    }

    /// Runs `action` through the reducer and publishes the result.
    fn dispatch(&mut self, action: Action) -> Result<Session> {
        let update = self.game.apply(action)?;
        self.publish(update);
        Ok(self.game.session().clone())
    }

    fn publish(&mut self, update: Update) {
        self.countdown.apply(update.timer);
        if !update.has_update() {
            return;
        }

        let session = self.game.session();
        if update.timer == TimerDirective::Stop {
            if let Some(summary) = session.summary() {
                log::info!("{}", summary.replace('\n', " "));
            }
        }
        self.snapshots.send_replace(session.clone());
    }
}
