use std::collections::HashMap;

use tracing::{debug, error};

use crate::basic_cards;
use crate::cards::{Card, CardInfo, CardKey};
use crate::error::RegistryError;

/// The catalog of card types, in registration order.
#[derive(Debug, Default)]
pub struct CardRegistry {
    cards: Vec<Card>,
    index: HashMap<CardKey, usize>,
}

impl CardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry already holding treasures, victory cards and curses.
    pub fn with_basic_cards() -> Self {
        let mut registry = Self::new();
        for card in basic_cards::set() {
            // keys of the basic set are distinct
            if let Err(e) = registry.register(card()) {
                error!("{e}");
            }
        }
        registry
    }

    pub fn register(&mut self, card: Card) -> Result<(), RegistryError> {
        if self.index.contains_key(&card.key) {
            return Err(RegistryError::DuplicateKey(card.key));
        }
        debug!("register card: {}", card.key);
        self.index.insert(card.key.clone(), self.cards.len());
        self.cards.push(card);
        Ok(())
    }

    pub fn lookup(&self, key: &str) -> Option<&Card> {
        self.index.get(key).map(|i| &self.cards[*i])
    }

    pub fn try_lookup(&self, key: &str) -> Result<&Card, RegistryError> {
        self.lookup(key)
            .ok_or_else(|| RegistryError::UnknownCard(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Position in the catalog, used to order hooks.
    pub fn catalog_position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn kingdom_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.optional)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Static snapshot, without any cost modifier.
    pub fn info(&self, key: &str) -> Option<CardInfo> {
        self.lookup(key).map(|c| CardInfo {
            key: c.key.clone(),
            name: c.name.clone(),
            cost: c.cost,
            potion_cost: c.potion_cost,
            worth: c.worth,
            points: c.points,
            kinds: c.kinds.clone(),
        })
    }
}
