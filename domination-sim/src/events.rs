use std::fmt::{Debug, Display};

use enum_dispatch::enum_dispatch;
use iter_tools::Itertools;

use crate::cards::{CardInfo, CardKey, CardView};
use crate::zones::{ActorId, CardId};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

impl Debug for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r_{}", self.0)
    }
}
impl Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// A decision the game is waiting on.
#[enum_dispatch(Request)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionRequest {
    YesNo,
    ChooseOption,
    SelectHandCards,
    SelectCardType,
    SelectDeal,
}

/// A request waiting in an actor's slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub actor: ActorId,
    pub request: DecisionRequest,
    /// why the previous reply was refused
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    YesNo(bool),
    Option(String),
    Cards(Vec<CardId>),
    CardType(Option<CardKey>),
    Deal(Option<CardKey>),
}

impl Reply {
    pub fn into_yes_no(self) -> bool {
        matches!(self, Reply::YesNo(true))
    }
    pub fn into_option(self) -> Option<String> {
        match self {
            Reply::Option(o) => Some(o),
            _ => None,
        }
    }
    pub fn into_cards(self) -> Vec<CardId> {
        match self {
            Reply::Cards(cards) => cards,
            _ => vec![],
        }
    }
    pub fn into_card_type(self) -> Option<CardKey> {
        match self {
            Reply::CardType(key) | Reply::Deal(key) => key,
            _ => None,
        }
    }
}

/// A read-only message to an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoNotice {
    pub target: ActorId,
    pub message: String,
    pub cards: Vec<CardView>,
}

impl Display for InfoNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cards.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(
                f,
                "{} {}",
                self.message,
                self.cards.iter().map(|c| c.info.name.as_str()).join(", ")
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YesNo {
    pub message: String,
}

impl YesNo {
    pub fn new(message: impl Into<String>) -> Self {
        YesNo {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooseOption {
    pub message: String,
    pub options: Vec<ChoiceOption>,
}

impl ChooseOption {
    pub fn new(message: impl Into<String>, options: &[(&str, &str)]) -> Self {
        ChooseOption {
            message: message.into(),
            options: options
                .iter()
                .map(|(key, label)| ChoiceOption {
                    key: key.to_string(),
                    label: label.to_string(),
                })
                .collect(),
        }
    }
}

/// A hint for automated answers, the game doesn't use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectPurpose {
    Play,
    Treasures,
    Trash,
    Discard,
    Reveal,
    React,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectHandCards {
    pub message: String,
    pub selectable: Vec<CardView>,
    pub lower: usize,
    pub upper: usize,
    pub purpose: SelectPurpose,
}

impl SelectHandCards {
    pub fn new(
        message: impl Into<String>,
        selectable: Vec<CardView>,
        lower: usize,
        upper: usize,
        purpose: SelectPurpose,
    ) -> Self {
        SelectHandCards {
            message: message.into(),
            selectable,
            lower,
            upper,
            purpose,
        }
    }

    /// The lower bound can't exceed what is there to select.
    pub fn min_count(&self) -> usize {
        self.lower.min(self.selectable.len())
    }

    pub fn max_count(&self) -> usize {
        self.upper.min(self.selectable.len()).max(self.min_count())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectCardType {
    pub message: String,
    pub choices: Vec<CardInfo>,
    /// whether choosing nothing is allowed
    pub optional: bool,
}

impl SelectCardType {
    pub fn new(message: impl Into<String>, choices: Vec<CardInfo>, optional: bool) -> Self {
        SelectCardType {
            message: message.into(),
            choices,
            optional,
        }
    }
}

/// Buy selection. Passing ends the buy phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectDeal {
    pub message: String,
    pub buyable: Vec<CardInfo>,
    pub coins: u32,
    pub potions: u32,
    pub remaining_buys: u32,
}

#[enum_dispatch]
pub trait Request {
    fn message(&self) -> &str;

    /// Checks the reply against the request's legality and bounds.
    fn validate(&self, reply: &Reply) -> Result<(), String>;

    /// An answer that needs no decision at all.
    fn trivial_reply(&self) -> Option<Reply> {
        None
    }
}

impl Request for YesNo {
    fn message(&self) -> &str {
        &self.message
    }
    fn validate(&self, reply: &Reply) -> Result<(), String> {
        match reply {
            Reply::YesNo(_) => Ok(()),
            _ => Err("expected a yes or no answer".into()),
        }
    }
}

impl Request for ChooseOption {
    fn message(&self) -> &str {
        &self.message
    }
    fn validate(&self, reply: &Reply) -> Result<(), String> {
        match reply {
            Reply::Option(key) if self.options.iter().any(|o| o.key == *key) => Ok(()),
            Reply::Option(key) => Err(format!("{key} is not one of the options")),
            _ => Err("expected one of the options".into()),
        }
    }
    fn trivial_reply(&self) -> Option<Reply> {
        match self.options.as_slice() {
            [only] => Some(Reply::Option(only.key.clone())),
            _ => None,
        }
    }
}

impl Request for SelectHandCards {
    fn message(&self) -> &str {
        &self.message
    }
    fn validate(&self, reply: &Reply) -> Result<(), String> {
        let Reply::Cards(cards) = reply else {
            return Err("expected a selection of cards".into());
        };
        if !cards.iter().all_unique() {
            return Err("a card can only be selected once".into());
        }
        if let Some(card) = cards
            .iter()
            .find(|c| !self.selectable.iter().any(|s| s.id == **c))
        {
            return Err(format!("{card} can't be selected"));
        }
        if cards.len() < self.min_count() {
            return Err(format!("select at least {} cards", self.min_count()));
        }
        if cards.len() > self.max_count() {
            return Err(format!("select at most {} cards", self.max_count()));
        }
        Ok(())
    }
    fn trivial_reply(&self) -> Option<Reply> {
        // nothing to pick from, or nothing left to decide
        if self.selectable.is_empty() || self.max_count() == 0 {
            Some(Reply::Cards(vec![]))
        } else {
            None
        }
    }
}

impl Request for SelectCardType {
    fn message(&self) -> &str {
        &self.message
    }
    fn validate(&self, reply: &Reply) -> Result<(), String> {
        match reply {
            Reply::CardType(None) if self.optional => Ok(()),
            Reply::CardType(None) => Err("a card must be chosen".into()),
            Reply::CardType(Some(key)) if self.choices.iter().any(|c| c.key == *key) => Ok(()),
            Reply::CardType(Some(key)) => Err(format!("{key} can't be chosen")),
            _ => Err("expected a card type".into()),
        }
    }
    fn trivial_reply(&self) -> Option<Reply> {
        self.choices
            .is_empty()
            .then_some(Reply::CardType(None))
    }
}

impl Request for SelectDeal {
    fn message(&self) -> &str {
        &self.message
    }
    fn validate(&self, reply: &Reply) -> Result<(), String> {
        match reply {
            Reply::Deal(None) => Ok(()),
            Reply::Deal(Some(key)) if self.buyable.iter().any(|c| c.key == *key) => Ok(()),
            Reply::Deal(Some(key)) => Err(format!("{key} can't be bought")),
            _ => Err("expected a card to buy".into()),
        }
    }
    fn trivial_reply(&self) -> Option<Reply> {
        self.buyable.is_empty().then_some(Reply::Deal(None))
    }
}
