use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineswept_core::Session;
use mineswept_runtime::{EngineConfig, EngineError, EngineHandle, spawn_engine};
use tokio::io::{AsyncBufReadExt, BufReader};

use input::Input;

mod input;
mod render;

/// Clear as many tiles as you can without stepping on a mine, before the clock runs out.
#[derive(Parser, Debug)]
#[command(name = "mineswept", version, about)]
struct Args {
    /// Skip level select and start on this level
    #[arg(short, long)]
    level: Option<String>,

    /// Real milliseconds per countdown step
    #[arg(long, default_value_t = 2000)]
    tick_ms: u64,

    /// Seed for mine placement, reproduces the same boards
    #[arg(long)]
    seed: Option<u64>,

    /// Print every session snapshot as one JSON line instead of drawing the board
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    let mut config =
        EngineConfig::default().with_tick_interval(Duration::from_millis(args.tick_ms.max(1)));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    log::info!("Starting engine with {:?}", config);
    let (engine, task) = spawn_engine(config);

    let view = View { json: args.json };
    if !view.json {
        println!("{}\n", render::INTRO);
    }

    let mut shown = match args.level.as_deref() {
        Some(name) => engine.select_level(name).await?,
        None => engine.snapshot(),
    };
    view.show(&shown)?;

    let mut updates = engine.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let Some(command) = input::parse(&line) else {
                    if !line.trim().is_empty() {
                        eprintln!("Unrecognized command, type `help` for the list");
                    }
                    continue;
                };
                match command {
                    Input::Quit => break,
                    Input::Help => println!("{}", input::HELP),
                    command => match dispatch(&engine, command).await {
                        Ok(session) => {
                            view.show(&session)?;
                            shown = session;
                        }
                        Err(EngineError::Game(err)) => eprintln!("{err}"),
                        Err(err) => return Err(err.into()),
                    },
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let session = updates.borrow_and_update().clone();
                if session != shown {
                    view.show_step(&shown, &session)?;
                    shown = session;
                }
            }
        }
    }

    match engine.shutdown().await {
        Ok(()) | Err(EngineError::Closed) => {}
        Err(err) => return Err(err.into()),
    }
    task.await?;
    Ok(())
}

async fn dispatch(engine: &EngineHandle, input: Input) -> mineswept_runtime::Result<Session> {
    match input {
        Input::Level(name) => engine.select_level(&name).await,
        Input::Reveal(row, col) => engine.reveal_tile(row, col).await,
        Input::Flag(row, col) => engine.toggle_flag(row, col).await,
        Input::Restart => engine.restart().await,
        Input::Help | Input::Quit => Ok(engine.snapshot()),
    }
}

struct View {
    json: bool,
}

impl View {
    fn show(&self, session: &Session) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(session)?);
        } else {
            println!("{}\n", render::screen(session));
        }
        Ok(())
    }

    /// Countdown steps only redraw the status line, the board is redrawn once the game ends.
    fn show_step(&self, before: &Session, after: &Session) -> Result<()> {
        if self.json || before.phase() != after.phase() {
            return self.show(after);
        }
        println!("{}", render::status(after));
        Ok(())
    }
}
