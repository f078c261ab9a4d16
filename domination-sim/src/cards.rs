use std::fmt::{Debug, Display};
use std::sync::Arc;

use bincode::{Decode, Encode};
use debug_ignore::DebugIgnore;
use get_size::GetSize;
use serde::{Deserialize, Serialize};

use crate::effects::{EffectFuture, Interrupt, Resolution};
use crate::gameplay::Game;
use crate::hooks::{HookEvent, HookOutcome, HookPoint};
use crate::zones::{ActorId, CardId};

pub type CardKey = String;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, GetSize, Encode, Decode, Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Action,
    Treasure,
    Victory,
    Curse,
    Attack,
    Reaction,
    Duration,
}

impl Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            CardKind::Action => "Action",
            CardKind::Treasure => "Treasure",
            CardKind::Victory => "Victory",
            CardKind::Curse => "Curse",
            CardKind::Attack => "Attack",
            CardKind::Reaction => "Reaction",
            CardKind::Duration => "Duration",
        };
        write!(f, "{kind}")
    }
}

/// Immutable template shared by every instance of a card type.
#[derive(Debug, Clone)]
pub struct Card {
    pub key: CardKey,
    pub name: String,
    pub set: String,
    pub text: String,
    pub cost: u32,
    pub potion_cost: u32,
    /// coins produced when played as a treasure
    pub worth: u32,
    /// potions produced when played as a treasure
    pub potion: u32,
    pub points: i32,
    pub kinds: Vec<CardKind>,
    pub trash_after_playing: bool,
    /// can be picked as one of the kingdom piles
    pub optional: bool,
    pub hooks: Vec<HookPoint>,
    pub effect: DebugIgnore<Arc<dyn CardEffect>>,
}

impl Default for Card {
    fn default() -> Self {
        Card {
            key: Default::default(),
            name: Default::default(),
            set: Default::default(),
            text: Default::default(),
            cost: 0,
            potion_cost: 0,
            worth: 0,
            potion: 0,
            points: 0,
            kinds: vec![],
            trash_after_playing: false,
            optional: false,
            hooks: vec![],
            effect: effect(NoEffect),
        }
    }
}

impl Card {
    pub fn is(&self, kind: CardKind) -> bool {
        self.kinds.contains(&kind)
    }
    pub fn is_action(&self) -> bool {
        self.is(CardKind::Action)
    }
    pub fn is_treasure(&self) -> bool {
        self.is(CardKind::Treasure)
    }
    pub fn is_victory(&self) -> bool {
        self.is(CardKind::Victory)
    }
    pub fn is_attack(&self) -> bool {
        self.is(CardKind::Attack)
    }
    pub fn is_reaction(&self) -> bool {
        self.is(CardKind::Reaction)
    }
    pub fn is_duration(&self) -> bool {
        self.is(CardKind::Duration)
    }
    pub fn has_hook(&self, point: HookPoint) -> bool {
        self.hooks.contains(&point)
    }
}

pub fn effect(effect: impl CardEffect + 'static) -> DebugIgnore<Arc<dyn CardEffect>> {
    DebugIgnore(Arc::new(effect))
}

/// The behavior attached to a card type. Every method has a default, so a card
/// only overrides what its text actually does.
pub trait CardEffect: Send + Sync {
    /// Played from hand (actions) or into play (treasures).
    fn play<'a>(&'a self, _game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async { Err(Interrupt::NotImplemented) })
    }

    /// Revealed from hand in response to an attack.
    fn react<'a>(
        &'a self,
        _game: &'a mut Game,
        _player: ActorId,
        _card: CardId,
        _attack: &'a CardKey,
    ) -> EffectFuture<'a, ()> {
        Box::pin(async { Err(Interrupt::NotImplemented) })
    }

    /// Start of the owner's next turn, for cards left in the duration zone.
    fn duration<'a>(&'a self, _game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a, ()> {
        Box::pin(async { Ok(()) })
    }

    fn on_hook<'a>(
        &'a self,
        _game: &'a mut Game,
        _event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        None
    }

    fn worth(&self, card: &Card, _game: &Game, _player: ActorId) -> u32 {
        card.worth
    }

    fn points(&self, card: &Card, _game: &Game, _player: ActorId) -> i32 {
        card.points
    }

    fn render_info(&self, _game: &Game, _player: ActorId) -> Option<String> {
        None
    }
}

/// Victory cards, curses and anything that only counts for its static attributes.
#[derive(Debug, Default)]
pub struct NoEffect;
impl CardEffect for NoEffect {}

/// Basic treasures: the coins are counted by the buy phase, nothing else happens.
#[derive(Debug, Default)]
pub struct PlainTreasure;
impl CardEffect for PlainTreasure {
    fn play<'a>(&'a self, _game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async { Ok(Resolution::Done) })
    }
}

/// Self-describing snapshot of a card type, so a request can be answered
/// without access to the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardInfo {
    pub key: CardKey,
    pub name: String,
    pub cost: u32,
    pub potion_cost: u32,
    pub worth: u32,
    pub points: i32,
    pub kinds: Vec<CardKind>,
}

impl CardInfo {
    pub fn is(&self, kind: CardKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// curses, estates and coppers
    pub fn is_junk(&self) -> bool {
        self.is(CardKind::Curse)
            || (self.is(CardKind::Victory) && !self.is(CardKind::Action) && self.points <= 1)
            || (self.is(CardKind::Treasure) && self.worth == 1 && self.potion_cost == 0 && self.cost == 0)
    }
}

impl Display for CardInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.potion_cost > 0 {
            write!(f, "{} ({}+{}P)", self.name, self.cost, self.potion_cost)
        } else {
            write!(f, "{} ({})", self.name, self.cost)
        }
    }
}

/// A card instance with its type snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardView {
    pub id: CardId,
    pub info: CardInfo,
}

impl Display for CardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.info, self.id)
    }
}
