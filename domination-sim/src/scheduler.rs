use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use futures::executor::block_on;
use tracing::{error, info, warn};

use crate::client::{ActorChannel, ActorKind, KickOutcome, Table};
use crate::config::GameConfig;
use crate::error::SchedulerError;
use crate::events::InfoNotice;
use crate::gameplay::{Game, GameOutcome, GameOverReason, GameReport, MAX_PLAYERS, MIN_PLAYERS};
use crate::library::CardRegistry;
use crate::prompters::Policy;
use crate::zones::ActorId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunnerState {
    #[default]
    Fresh,
    Running,
    Ended,
}

/// Owns one game and the worker thread that plays it.
#[derive(Debug)]
pub struct GameRunner {
    table: Arc<Table>,
    config: GameConfig,
    library: Arc<CardRegistry>,
    /// receives diagnostics when the worker fails
    owner: Option<ActorId>,
    game: Option<Game>,
    worker: Option<JoinHandle<()>>,
}

impl GameRunner {
    pub fn new(config: GameConfig, library: Arc<CardRegistry>) -> Self {
        GameRunner {
            table: Table::new(),
            config,
            library,
            owner: None,
            game: None,
            worker: None,
        }
    }

    /// A runner for a game that is already set up, or restored from a checkpoint.
    pub fn from_game(game: Game) -> Self {
        GameRunner {
            table: game.table.clone(),
            config: GameConfig {
                name: game.state.name.clone(),
                ..Default::default()
            },
            library: (*game.library).clone(),
            owner: game.state.players.first().map(|p| p.actor),
            game: Some(game),
            worker: None,
        }
    }

    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    pub fn set_owner(&mut self, owner: ActorId) {
        self.owner = Some(owner);
    }

    pub fn state(&self) -> RunnerState {
        self.table.status.state()
    }

    pub fn joinable(&self) -> bool {
        self.state() == RunnerState::Fresh
            && self.game.is_none()
            && self.table.players().len() < MAX_PLAYERS
    }

    pub fn startable(&self) -> bool {
        if self.state() != RunnerState::Fresh {
            return false;
        }
        if self.game.is_some() {
            return true;
        }
        let players = self.table.players().len();
        (MIN_PLAYERS..=MAX_PLAYERS).contains(&players)
    }

    /// Seats a player. Without a policy, the player answers through its channel.
    pub fn join_player(
        &mut self,
        name: impl Into<String>,
        policy: Option<Box<dyn Policy>>,
    ) -> Result<Arc<ActorChannel>, SchedulerError> {
        if !self.joinable() {
            return Err(SchedulerError::NotJoinable);
        }
        let channel = self.table.seat(name, ActorKind::Player, policy);
        self.owner.get_or_insert(channel.actor);
        Ok(channel)
    }

    /// Kibitzers only receive notices, they can join at any time.
    pub fn join_kibitzer(&mut self, name: impl Into<String>) -> Arc<ActorChannel> {
        self.table.seat(name, ActorKind::Kibitzer, None)
    }

    /// Sets up the game if needed and hands it to a new worker thread.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if !self.startable() {
            return Err(SchedulerError::NotStartable);
        }
        let mut game = match self.game.take() {
            Some(game) => game,
            None => Game::setup(&self.config, self.library.clone(), self.table.clone())?,
        };

        let table = self.table.clone();
        let owner = self.owner;
        table.status.set_state(RunnerState::Running);
        let spawned = thread::Builder::new()
            .name(format!("game-{}", self.config.name))
            .spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(|| block_on(game.play_game())));
                match result {
                    Ok(outcome) => {
                        info!("worker done: {}", outcome.reason);
                        table.status.finish(game.report());
                    }
                    Err(payload) => {
                        let message = panic_message(payload.as_ref());
                        error!("game worker crashed: {message}");
                        if let Some(owner) = owner {
                            table.notify(InfoNotice {
                                target: owner,
                                message: format!("the game crashed: {message}"),
                                cards: vec![],
                            });
                        }
                        table.status.finish(Some(GameReport {
                            outcome: GameOutcome::new(GameOverReason::Fault(message)),
                            scores: vec![],
                        }));
                    }
                }
                table.close();
            });

        match spawned {
            Ok(worker) => {
                self.worker = Some(worker);
                Ok(())
            }
            Err(e) => {
                self.table.status.finish(None);
                Err(e.into())
            }
        }
    }

    /// Stops the game. A game that never started is ended right away.
    pub fn cancel(&mut self) {
        self.table.cancel();
        if self.state() == RunnerState::Fresh {
            self.game = None;
            self.table.status.finish(Some(GameReport {
                outcome: GameOutcome::new(GameOverReason::Aborted),
                scores: vec![],
            }));
            self.table.close();
        }
    }

    pub fn kick(&self, actor: ActorId) -> Result<KickOutcome, SchedulerError> {
        self.table
            .kick(actor)
            .map_err(|_| SchedulerError::UnknownActor(actor))
    }

    /// Asks for a checkpoint at the top of the next round.
    pub fn request_checkpoint(&self) {
        self.table.request_checkpoint();
    }

    pub fn latest_checkpoint(&self) -> Option<Vec<u8>> {
        self.table.latest_checkpoint()
    }

    pub fn seqno(&self) -> u64 {
        self.table.seqno()
    }

    /// Blocks until something changes after `seqno`, returns the new sequence number.
    pub fn wait_for_update(&self, seqno: u64) -> u64 {
        self.table.status.wait_for_update(seqno)
    }

    pub fn wait_for_update_timeout(&self, seqno: u64, timeout: Duration) -> u64 {
        self.table.status.wait_for_update_timeout(seqno, timeout)
    }

    pub fn report(&self) -> Option<GameReport> {
        self.table.status.report()
    }

    /// Waits for the worker to finish.
    pub fn join(&mut self) -> Option<GameReport> {
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("game worker did not exit cleanly");
            }
        }
        self.report()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".into()
    }
}
