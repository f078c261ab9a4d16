use std::io::{Read, Write};
use std::path::Path;
use std::sync::Arc;

use bincode::{config, Decode, Encode};
use debug_ignore::DebugIgnore;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use get_size::GetSize;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::client::{ActorKind, Table};
use crate::error::CheckpointError;
use crate::gameplay::{Game, GameState, Phase};
use crate::hooks::HookDispatcher;
use crate::library::CardRegistry;
use crate::zones::ActorId;

const MAGIC: &[u8; 4] = b"DOMN";
pub const CHECKPOINT_VERSION: u16 = 1;

/// Position of the game's random generator.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct RngState {
    pub seed: [u8; 32],
    pub stream: u64,
    pub word_pos: u128,
}

impl RngState {
    pub fn capture(rng: &ChaCha8Rng) -> Self {
        RngState {
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos(),
        }
    }

    pub fn restore(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(self.word_pos);
        rng
    }
}

/// Everything needed to resume a game at the top of a round.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct Checkpoint {
    pub round: u32,
    pub next_request_id: u64,
    pub auto_checkpoint: bool,
    pub state: GameState,
    pub rng: RngState,
}

impl Checkpoint {
    pub fn capture(game: &Game) -> Result<Self, CheckpointError> {
        if game.state.phase != Phase::BetweenTurns || game.state.active_player.is_some() {
            return Err(CheckpointError::NotBetweenTurns);
        }
        debug!("checkpoint state heap size: {}", game.state.get_heap_size());
        Ok(Checkpoint {
            round: game.state.round,
            next_request_id: game.table.next_request_id(),
            auto_checkpoint: game.auto_checkpoint,
            state: game.state.clone(),
            rng: RngState::capture(&game.rng),
        })
    }

    /// Magic, version, then the gzipped bincode payload.
    pub fn encode(&self) -> Result<Vec<u8>, CheckpointError> {
        let bin = bincode::encode_to_vec(self, config::standard())?;
        let mut blob = Vec::with_capacity(bin.len() / 2 + 6);
        blob.extend_from_slice(MAGIC);
        blob.extend_from_slice(&CHECKPOINT_VERSION.to_le_bytes());
        let mut encoder = GzEncoder::new(blob, Compression::default());
        encoder.write_all(&bin)?;
        Ok(encoder.finish()?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CheckpointError> {
        if bytes.len() < 6 || &bytes[..4] != MAGIC {
            return Err(CheckpointError::BadMagic);
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion(version));
        }
        let mut decoder = GzDecoder::new(&bytes[6..]);
        let mut bin = vec![];
        decoder.read_to_end(&mut bin)?;
        let (checkpoint, _) = bincode::decode_from_slice(&bin, config::standard())?;
        Ok(checkpoint)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CheckpointError> {
        std::fs::write(path, self.encode()?)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        Self::decode(&std::fs::read(path)?)
    }

    /// Players to attach to the table before restoring.
    pub fn players(&self) -> Vec<(ActorId, String)> {
        self.state
            .players
            .iter()
            .map(|p| (p.actor, p.name.clone()))
            .collect()
    }

    /// Rebuilds the game. Every player must already be attached to `table`.
    pub fn restore(
        self,
        library: Arc<CardRegistry>,
        table: Arc<Table>,
    ) -> Result<Game, CheckpointError> {
        for board in &self.state.players {
            match table.channel(board.actor) {
                Some(channel) if channel.kind == ActorKind::Player => {}
                _ => return Err(CheckpointError::MissingActor(board.actor)),
            }
        }
        if let Some(key) = self
            .state
            .selected_cards
            .iter()
            .find(|k| !library.contains(k))
        {
            return Err(CheckpointError::UnknownCard(key.clone()));
        }

        table.set_next_request_id(self.next_request_id);
        info!(
            "restoring game {} at round {}",
            self.state.name, self.round
        );
        Ok(Game {
            hooks: HookDispatcher::index(&library, &self.state.selected_cards),
            state: self.state,
            library: DebugIgnore(library),
            table,
            rng: DebugIgnore(self.rng.restore()),
            auto_checkpoint: self.auto_checkpoint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rejects_bad_magic_and_version() {
        assert!(matches!(
            Checkpoint::decode(b"NOPE\x01\x00"),
            Err(CheckpointError::BadMagic)
        ));
        assert!(matches!(
            Checkpoint::decode(b"DOMN\x09\x00"),
            Err(CheckpointError::UnsupportedVersion(9))
        ));
        assert!(matches!(
            Checkpoint::decode(b"DO"),
            Err(CheckpointError::BadMagic)
        ));
    }

    #[tokio::test]
    async fn only_between_turns() {
        let (mut game, players) = setup_bot_game(&[]);
        game.start_game().await.unwrap();
        assert!(Checkpoint::capture(&game).is_ok());

        game.state.active_player = Some(players[0]);
        game.state.phase = Phase::Action;
        assert!(matches!(
            Checkpoint::capture(&game),
            Err(CheckpointError::NotBetweenTurns)
        ));
    }

    #[tokio::test]
    async fn blob_keeps_state_and_rng() {
        let (mut game, _) = setup_bot_game(&[]);
        game.start_game().await.unwrap();

        let checkpoint = Checkpoint::capture(&game).unwrap();
        let blob = checkpoint.encode().unwrap();
        assert_eq!(&blob[..4], b"DOMN");

        let decoded = Checkpoint::decode(&blob).unwrap();
        assert_eq!(decoded, checkpoint);
        assert_eq!(decoded.rng.restore(), *game.rng);
    }

    #[tokio::test]
    async fn restore_needs_every_player() {
        let (mut game, _) = setup_bot_game(&[]);
        game.start_game().await.unwrap();
        let checkpoint = Checkpoint::capture(&game).unwrap();

        let table = Table::new();
        let (actor, name) = checkpoint.players()[0].clone();
        table.attach_player(actor, name, None);

        let missing = checkpoint.players()[1].0;
        assert!(matches!(
            checkpoint.restore((*game.library).clone(), table),
            Err(CheckpointError::MissingActor(a)) if a == missing
        ));
    }
}
