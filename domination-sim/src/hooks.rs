use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::cards::CardKey;
use crate::effects::Interrupt;
use crate::gameplay::{Game, GameOutcome};
use crate::library::CardRegistry;
use crate::zones::{ActorId, CardId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookPoint {
    StartOfTurn,
    EndOfTurn,
    GainCard,
    BuyCard,
    PreBuyCard,
    Setup,
    EmptyPile,
    RenderInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    StartOfTurn { player: ActorId },
    EndOfTurn { player: ActorId },
    GainCard { player: ActorId, card: CardId },
    BuyCard { player: ActorId, card: CardId },
    PreBuyCard { player: ActorId, key: CardKey },
    Setup,
    EmptyPile { key: CardKey },
}

impl HookEvent {
    pub fn point(&self) -> HookPoint {
        match self {
            HookEvent::StartOfTurn { .. } => HookPoint::StartOfTurn,
            HookEvent::EndOfTurn { .. } => HookPoint::EndOfTurn,
            HookEvent::GainCard { .. } => HookPoint::GainCard,
            HookEvent::BuyCard { .. } => HookPoint::BuyCard,
            HookEvent::PreBuyCard { .. } => HookPoint::PreBuyCard,
            HookEvent::Setup => HookPoint::Setup,
            HookEvent::EmptyPile { .. } => HookPoint::EmptyPile,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookOutcome {
    #[default]
    Continue,
    /// only meaningful before a purchase
    AbortPurchase,
}

/// Card types listening at each hook point, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookDispatcher {
    handlers: BTreeMap<HookPoint, Vec<CardKey>>,
}

impl HookDispatcher {
    pub fn index(library: &CardRegistry, selected: &[CardKey]) -> Self {
        let mut handlers: BTreeMap<HookPoint, Vec<CardKey>> = BTreeMap::new();
        for card in library.iter().filter(|c| selected.contains(&c.key)) {
            for point in &card.hooks {
                handlers.entry(*point).or_default().push(card.key.clone());
            }
        }
        debug!("hook handlers: {handlers:?}");
        HookDispatcher { handlers }
    }

    pub fn handlers(&self, point: HookPoint) -> &[CardKey] {
        self.handlers
            .get(&point)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn render_handlers(&self) -> &[CardKey] {
        self.handlers(HookPoint::RenderInfo)
    }
}

impl Game {
    /// Runs every handler of the event in catalog order. Any handler may
    /// abort a purchase, the others still run.
    pub async fn fire_hook(&mut self, event: HookEvent) -> Result<HookOutcome, GameOutcome> {
        let keys = self.hooks.handlers(event.point()).to_vec();
        if keys.is_empty() {
            return Ok(HookOutcome::Continue);
        }
        debug!("fire hook {event:?} for {keys:?}");

        let library = self.library.clone();
        let mut outcome = HookOutcome::Continue;
        for key in keys {
            let Some(card) = library.lookup(&key) else {
                warn!("hook handler {key} is not in the library");
                continue;
            };
            let Some(program) = card.effect.on_hook(self, &event) else {
                continue;
            };
            match program.await {
                Ok(HookOutcome::Continue) => {}
                Ok(HookOutcome::AbortPurchase) => outcome = HookOutcome::AbortPurchase,
                Err(Interrupt::GameOver(o)) => return Err(o),
                Err(Interrupt::NotImplemented) => {
                    warn!("{} hook is not implemented", card.name)
                }
                Err(Interrupt::Defended) => warn!("{} hook raised a defense", card.name),
            }
        }
        Ok(outcome)
    }
}
