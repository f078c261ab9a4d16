use thiserror::Error;

use crate::cards::CardKey;
use crate::events::RequestId;
use crate::zones::ActorId;

/// Errors raised while building the card catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two card definitions share the same key.
    #[error("card key registered twice: {0}")]
    DuplicateKey(CardKey),

    #[error("unknown card: {0}")]
    UnknownCard(CardKey),
}

/// Errors raised while setting up a new game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("at least {min} players are needed, got {got}")]
    NotEnoughPlayers { min: usize, got: usize },

    #[error("at most {max} players can play, got {got}")]
    TooManyPlayers { max: usize, got: usize },

    #[error("unknown card: {0}")]
    UnknownCard(CardKey),

    /// The card exists but is not one that can be picked for the kingdom.
    #[error("not a kingdom card: {0}")]
    NotKingdomCard(CardKey),

    #[error("kingdom card picked twice: {0}")]
    DuplicateKingdomCard(CardKey),

    #[error("too many card instances")]
    OutOfCardIds,
}

/// Errors returned to an actor replying through its channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("no request is waiting for a reply")]
    NoPendingRequest,

    /// The reply targets a request that was already answered or re-issued.
    #[error("stale reply for {got}, waiting for {expected}")]
    StaleRequest { expected: RequestId, got: RequestId },

    #[error("actor {0} already has an outstanding request")]
    AlreadyPending(ActorId),

    #[error("unknown actor: {0}")]
    UnknownActor(ActorId),

    #[error("the game has ended")]
    GameEnded,
}

/// Errors raised by the game runner.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("the game can't be started in its current state")]
    NotStartable,

    #[error("no more players can join this game")]
    NotJoinable,

    #[error("unknown actor: {0}")]
    UnknownActor(ActorId),

    #[error("game setup failed: {0}")]
    Setup(#[from] SetupError),

    #[error("could not spawn the game worker: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Errors raised while capturing or restoring a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("not a checkpoint blob")]
    BadMagic,

    #[error("unsupported checkpoint version: {0}")]
    UnsupportedVersion(u16),

    /// Checkpoints are only taken between turns.
    #[error("a checkpoint can only be taken between turns")]
    NotBetweenTurns,

    /// A player of the checkpoint has no channel at the table.
    #[error("player {0} is not attached to the table")]
    MissingActor(ActorId),

    #[error("checkpoint references an unknown card: {0}")]
    UnknownCard(CardKey),

    #[error("checkpoint io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("checkpoint encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("checkpoint decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Errors raised while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
