use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use std::{env, fs};

use anyhow::Context;
use domination_library::setup_library;
use domination_sim::checkpoint::Checkpoint;
use domination_sim::client::{ActorChannel, Client, EventHandler, Table};
use domination_sim::events::InfoNotice;
use domination_sim::gameplay::GameReport;
use domination_sim::library::CardRegistry;
use domination_sim::prompters::CliPrompter;
use domination_sim::scheduler::{GameRunner, RunnerState};
use time::macros::format_description;
use tracing::{info, warn};
use tracing_subscriber::{fmt::time::LocalTime, EnvFilter};

use crate::config::ServerConfig;

mod config;

type Human = (Arc<ActorChannel>, CliPrompter);

/// Prints what the human player is told.
struct ConsoleEventHandler;
impl EventHandler for ConsoleEventHandler {
    fn handle_notice(&mut self, notice: InfoNotice) {
        println!("{notice}");
    }
}

fn main() -> anyhow::Result<()> {
    env::set_var("RUST_BACKTRACE", "1");
    if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "DEBUG");
    }

    let mut config = match env::args().nth(1) {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::standard()?,
    };
    if config.checkpoint_path.is_some() {
        config.game.auto_checkpoint = true;
    }

    // setup logs
    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "domination.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour repr:24]:[minute]:[second].[subsecond digits:4]"
        )))
        .with_writer(non_blocking)
        .with_ansi(false)
        // enable thread id to be emitted
        .with_thread_ids(true)
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    info!("\n\n\n\n\n\n\n-- Domination is running --");

    let library = Arc::new(setup_library()?);
    let (mut runner, human) = if config.resume {
        resume_game(&config, library)?
    } else {
        new_game(&config, library)?
    };
    runner.start()?;
    info!("game {} started", runner.name());

    let client = human.map(|(channel, prompter)| {
        let table = runner.table().clone();
        thread::spawn(move || Client::new(channel, table, ConsoleEventHandler, prompter).run())
    });

    // keep the latest checkpoint on disk while the game runs
    let mut seqno = runner.seqno();
    let mut saved: Option<Vec<u8>> = None;
    while runner.state() != RunnerState::Ended {
        seqno = runner.wait_for_update_timeout(seqno, Duration::from_millis(500));
        if let Some(path) = &config.checkpoint_path {
            save_checkpoint(&runner, path, &mut saved);
        }
    }

    let report = runner.join();
    if let Some(client) = client {
        if client.join().is_err() {
            warn!("console client crashed");
        }
    }
    match report {
        Some(report) => print_report(&report),
        None => warn!("game {} ended without a report", runner.name()),
    }
    Ok(())
}

fn new_game(
    config: &ServerConfig,
    library: Arc<CardRegistry>,
) -> anyhow::Result<(GameRunner, Option<Human>)> {
    info!("kingdom: {}", config.game.kingdom.join(", "));
    let mut runner = GameRunner::new(config.game.clone(), library);
    let mut human = None;
    for player in &config.players {
        let channel = runner.join_player(player.name.clone(), player.table_policy())?;
        if let Some(prompter) = player.client_policy() {
            human = Some((channel, prompter));
        }
    }
    Ok((runner, human))
}

/// Seats the configured players in the checkpoint's seats, in order.
fn resume_game(
    config: &ServerConfig,
    library: Arc<CardRegistry>,
) -> anyhow::Result<(GameRunner, Option<Human>)> {
    let path = config
        .checkpoint_path
        .as_ref()
        .context("resume needs a checkpoint_path")?;
    let checkpoint = Checkpoint::load(path)
        .with_context(|| format!("cannot load checkpoint {}", path.display()))?;

    let table = Table::new();
    let mut human = None;
    for (i, (actor, name)) in checkpoint.players().into_iter().enumerate() {
        let seat = config.players.get(i).cloned().unwrap_or_default();
        let channel = table.attach_player(actor, name, seat.table_policy());
        if let Some(prompter) = seat.client_policy() {
            human = Some((channel, prompter));
        }
    }
    let game = checkpoint.restore(library, table)?;
    Ok((GameRunner::from_game(game), human))
}

fn save_checkpoint(runner: &GameRunner, path: &Path, saved: &mut Option<Vec<u8>>) {
    let Some(blob) = runner.latest_checkpoint() else {
        return;
    };
    if saved.as_ref() == Some(&blob) {
        return;
    }
    match fs::write(path, &blob) {
        Ok(()) => info!("checkpoint written to {} ({} bytes)", path.display(), blob.len()),
        Err(e) => warn!("cannot write checkpoint {}: {e}", path.display()),
    }
    *saved = Some(blob);
}

fn print_report(report: &GameReport) {
    info!("game over: {}", report.outcome.reason);
    println!("game over: {}", report.outcome.reason);
    for score in &report.scores {
        info!("{} ({}): {}", score.name, score.actor, score.points);
        println!("{:>12}: {}", score.name, score.points);
    }
}
