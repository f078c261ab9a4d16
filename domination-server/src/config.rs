use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use domination_library::{preset, presets};
use domination_sim::config::GameConfig;
use domination_sim::prompters::{CliPrompter, DefaultPrompter, Policy, RandomPrompter, WisePrompter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatKind {
    #[default]
    Bot,
    Human,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotPolicy {
    #[default]
    Wise,
    Random,
    /// always the first choice
    First,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub name: String,
    pub kind: SeatKind,
    pub policy: BotPolicy,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            name: "bot".into(),
            kind: SeatKind::Bot,
            policy: BotPolicy::Wise,
        }
    }
}

impl PlayerConfig {
    /// Policy the table answers with. Humans answer through their own client.
    pub fn table_policy(&self) -> Option<Box<dyn Policy>> {
        match self.kind {
            SeatKind::Human => None,
            SeatKind::Bot => {
                let policy: Box<dyn Policy> = match self.policy {
                    BotPolicy::Wise => Box::new(WisePrompter::new()),
                    BotPolicy::Random => Box::new(RandomPrompter::new()),
                    BotPolicy::First => Box::new(DefaultPrompter::new()),
                };
                Some(policy)
            }
        }
    }

    pub fn client_policy(&self) -> Option<CliPrompter> {
        (self.kind == SeatKind::Human).then(CliPrompter::new)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub log_dir: PathBuf,
    /// named kingdom, replaces `game.kingdom`. An empty kingdom falls back to the first preset.
    pub preset: Option<String>,
    /// where the latest checkpoint is written
    pub checkpoint_path: Option<PathBuf>,
    /// continue from `checkpoint_path` instead of a new game
    pub resume: bool,
    pub game: GameConfig,
    pub players: Vec<PlayerConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            log_dir: "logs".into(),
            preset: None,
            checkpoint_path: None,
            resume: false,
            game: GameConfig::default(),
            players: vec![
                PlayerConfig {
                    name: "alice".into(),
                    ..Default::default()
                },
                PlayerConfig {
                    name: "bob".into(),
                    ..Default::default()
                },
            ],
        }
    }
}

impl ServerConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let mut config: ServerConfig = toml::from_str(text).context("invalid server config")?;
        config.apply_preset()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml(&text)
    }

    /// Defaults, with the preset already applied.
    pub fn standard() -> anyhow::Result<Self> {
        let mut config = ServerConfig::default();
        config.apply_preset()?;
        Ok(config)
    }

    fn apply_preset(&mut self) -> anyhow::Result<()> {
        if let Some(name) = &self.preset {
            let Some(preset) = preset(name) else {
                bail!("unknown preset: {name}");
            };
            self.game.kingdom = preset.kingdom();
        } else if self.game.kingdom.is_empty() {
            if let Some(first) = presets().first() {
                self.game.kingdom = first.kingdom();
            }
        }
        if self.resume && self.checkpoint_path.is_none() {
            bail!("resume needs a checkpoint_path");
        }
        if self.players.iter().filter(|p| p.kind == SeatKind::Human).count() > 1 {
            bail!("only one human player can sit at the console");
        }
        Ok(())
    }
}
