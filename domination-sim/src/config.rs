use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cards::CardKey;
use crate::error::ConfigError;

/// Rules of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct GameConfig {
    pub name: String,
    pub kingdom: Vec<CardKey>,
    /// fixed seed for a reproducible game
    pub seed: Option<u64>,
    pub starting_hand: u32,
    pub scarce_pile: CardKey,
    /// take a checkpoint at the top of every round
    pub auto_checkpoint: bool,
    /// play every treasure without asking
    pub auto_treasures: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            name: "game".into(),
            kingdom: vec![],
            seed: None,
            starting_hand: 5,
            scarce_pile: "province".into(),
            auto_checkpoint: false,
            auto_treasures: false,
        }
    }
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }
}
