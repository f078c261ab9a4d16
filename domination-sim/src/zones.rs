use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::num::NonZeroU16;

use bincode::{Decode, Encode};
use get_size::GetSize;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::cards::CardKey;
use crate::error::SetupError;
use crate::modifiers::TurnCleanup;

#[derive(
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    GetSize,
    Encode,
    Decode,
    Serialize,
    Deserialize,
)]
pub struct ActorId(pub u16);

impl Debug for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a_{}", self.0)
    }
}
impl Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, GetSize, Encode, Decode)]
pub struct CardId(pub(crate) NonZeroU16);

impl Debug for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "c_{:04x}", self.0)
    }
}
impl Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        let hex = u16::from_str_radix(value.trim_start_matches("c_"), 16).unwrap_or(u16::MAX);
        CardId(NonZeroU16::new(hex).unwrap_or(NonZeroU16::MAX))
    }
}

/// Creates a new card instance. Instances are only created at setup.
pub fn register_card(
    key: &CardKey,
    next_card_ref: &mut u16,
    card_map: &mut HashMap<CardId, CardKey>,
) -> Result<CardId, SetupError> {
    let Some(id) = next_card_ref.checked_add(1).and_then(NonZeroU16::new) else {
        error!("no card ids left for {key}");
        return Err(SetupError::OutOfCardIds);
    };
    *next_card_ref = id.get();
    let card = CardId(id);
    card_map.insert(card, key.clone());
    Ok(card)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, GetSize, Encode, Decode)]
pub enum Zone {
    Deck,
    Hand,
    Discard,
    PlayArea,
    Aside,
    Duration,
}

/// Where a card instance currently is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Board(ActorId, Zone),
    Supply(CardKey),
    Trash,
}

/// Where a gained card lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainTo {
    Discard,
    Hand,
    DeckTop,
}

impl From<GainTo> for Zone {
    fn from(value: GainTo) -> Self {
        match value {
            GainTo::Discard => Zone::Discard,
            GainTo::Hand => Zone::Hand,
            GainTo::DeckTop => Zone::Deck,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, GetSize, Encode, Decode)]
pub struct PlayerBoard {
    pub actor: ActorId,
    pub name: String,
    /// the top of the deck is the end
    pub deck: Vec<CardId>,
    pub hand: Vec<CardId>,
    pub discard: Vec<CardId>,
    pub play_area: Vec<CardId>,
    pub aside: Vec<CardId>,
    pub duration: Vec<CardId>,

    pub remaining_actions: u32,
    pub remaining_buys: u32,
    pub coins: u32,
    pub potions: u32,
    /// victory tokens
    pub tokens: u32,
    pub forbidden_buys: Vec<CardKey>,
    pub bought_this_turn: Vec<CardKey>,
    pub turn_cleanups: Vec<TurnCleanup>,

    pub removed: bool,
    pub auto_treasures: bool,
}

impl PlayerBoard {
    pub fn new(actor: ActorId, name: impl Into<String>) -> Self {
        PlayerBoard {
            actor,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn get_zone(&self, zone: Zone) -> &Vec<CardId> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard,
            Zone::PlayArea => &self.play_area,
            Zone::Aside => &self.aside,
            Zone::Duration => &self.duration,
        }
    }

    pub fn get_zone_mut(&mut self, zone: Zone) -> &mut Vec<CardId> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Discard => &mut self.discard,
            Zone::PlayArea => &mut self.play_area,
            Zone::Aside => &mut self.aside,
            Zone::Duration => &mut self.duration,
        }
    }

    pub fn find_card(&self, card: CardId) -> Option<Zone> {
        ALL_ZONES
            .into_iter()
            .find(|z| self.get_zone(*z).contains(&card))
    }

    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        ALL_ZONES
            .into_iter()
            .flat_map(|z| self.get_zone(z).iter().copied())
    }

    /// Removes the card from the zone, returns false if it was not there.
    pub fn take(&mut self, zone: Zone, card: CardId) -> bool {
        let cards = self.get_zone_mut(zone);
        if let Some(pos) = cards.iter().position(|c| *c == card) {
            cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn start_turn(&mut self) {
        self.remaining_actions = 1;
        self.remaining_buys = 1;
        self.coins = 0;
        self.potions = 0;
    }

    pub fn reset_counters(&mut self) {
        self.remaining_actions = 0;
        self.remaining_buys = 0;
        self.coins = 0;
        self.potions = 0;
        self.forbidden_buys.clear();
        self.bought_this_turn.clear();
    }

    /// Moves everything back into the deck, for scoring.
    pub fn fold_into_deck(&mut self) {
        for zone in [
            Zone::Discard,
            Zone::Hand,
            Zone::PlayArea,
            Zone::Aside,
            Zone::Duration,
        ] {
            let cards = std::mem::take(self.get_zone_mut(zone));
            self.deck.extend(cards);
        }
    }
}

pub const ALL_ZONES: [Zone; 6] = [
    Zone::Deck,
    Zone::Hand,
    Zone::Discard,
    Zone::PlayArea,
    Zone::Aside,
    Zone::Duration,
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn card_id_format() {
        let mut next = 0;
        let mut map = HashMap::new();
        let card = register_card(&"copper".to_string(), &mut next, &mut map).unwrap();
        assert_eq!(format!("{card}"), "c_0001");
        assert_eq!(CardId::from("c_0001"), card);
        assert_eq!(map.get(&card), Some(&"copper".to_string()));
    }

    #[test]
    fn card_ids_run_out() {
        let mut next = u16::MAX - 1;
        let mut map = HashMap::new();
        let last = register_card(&"copper".to_string(), &mut next, &mut map).unwrap();
        assert_eq!(format!("{last}"), "c_ffff");

        assert_eq!(
            register_card(&"copper".to_string(), &mut next, &mut map),
            Err(SetupError::OutOfCardIds)
        );
        assert_eq!(next, u16::MAX);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn fold_into_deck_keeps_every_card() {
        let mut board = PlayerBoard::new(ActorId(0), "alice");
        board.deck = vec!["c_0001".into()];
        board.hand = vec!["c_0002".into()];
        board.discard = vec!["c_0003".into()];
        board.play_area = vec!["c_0004".into()];
        board.aside = vec!["c_0005".into()];
        board.duration = vec!["c_0006".into()];

        board.fold_into_deck();

        assert_eq!(board.deck.len(), 6);
        assert!(board.hand.is_empty());
        assert!(board.duration.is_empty());
        assert_eq!(board.find_card("c_0006".into()), Some(Zone::Deck));
    }
}
