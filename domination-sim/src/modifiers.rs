use std::fmt::{Debug, Display};
use std::num::NonZeroU32;

use bincode::{Decode, Encode};
use get_size::GetSize;
use tracing::{debug, error, warn};

use crate::cards::{Card, CardKey, CardKind};
use crate::gameplay::GameState;
use crate::zones::ActorId;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, GetSize, Encode, Decode)]
pub struct ModifierRef(NonZeroU32);

impl Debug for ModifierRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m_{:04x}", self.0)
    }
}
impl Display for ModifierRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
impl From<&str> for ModifierRef {
    fn from(value: &str) -> Self {
        let hex = u32::from_str_radix(value.trim_start_matches("m_"), 16).unwrap_or(u32::MAX);
        ModifierRef(NonZeroU32::new(hex).unwrap_or(NonZeroU32::MAX))
    }
}

/// Which card types a cost delta applies to.
#[derive(Debug, Clone, PartialEq, Eq, GetSize, Encode, Decode)]
pub enum CostTarget {
    AllCards,
    Kind(CardKind),
    Card(CardKey),
}

impl CostTarget {
    pub fn matches(&self, card: &Card) -> bool {
        match self {
            CostTarget::AllCards => true,
            CostTarget::Kind(kind) => card.is(*kind),
            CostTarget::Card(key) => *key == card.key,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, GetSize, Encode, Decode)]
pub enum LifeTime {
    ThisGame,
    /// reversed by the cleanup of the player that applied it
    ThisTurn,
    /// stays until manually removed
    UntilRemoved,
}

#[derive(Debug, Clone, PartialEq, Eq, GetSize, Encode, Decode)]
pub struct CostModifier {
    pub id: ModifierRef,
    pub target: CostTarget,
    pub delta: i32,
    pub life_time: LifeTime,
}

impl CostModifier {
    pub fn new(
        target: CostTarget,
        delta: i32,
        life_time: LifeTime,
        next_modifier_ref: &mut u32,
    ) -> Option<Self> {
        let Some(id) = next_modifier_ref.checked_add(1).and_then(NonZeroU32::new) else {
            error!("no modifier ids left");
            return None;
        };
        *next_modifier_ref = id.get();
        Some(CostModifier {
            id: ModifierRef(id),
            target,
            delta,
            life_time,
        })
    }
}

/// Deferred work registered during a turn, run at the end of cleanup.
#[derive(Debug, Clone, PartialEq, Eq, GetSize, Encode, Decode)]
pub enum TurnCleanup {
    ExpireModifier(ModifierRef),
}

impl GameState {
    /// Base cost plus every matching delta, never below zero.
    pub fn effective_cost(&self, card: &Card) -> u32 {
        let delta: i64 = self
            .cost_modifiers
            .iter()
            .filter(|m| m.target.matches(card))
            .map(|m| m.delta as i64)
            .sum();
        (card.cost as i64 + delta).max(0) as u32
    }

    pub fn add_cost_modifier(
        &mut self,
        player: ActorId,
        target: CostTarget,
        delta: i32,
        life_time: LifeTime,
    ) -> Option<ModifierRef> {
        if life_time == LifeTime::ThisTurn && !self.players.iter().any(|p| p.actor == player) {
            warn!("{player} has no turn to expire a cost modifier, it is ignored");
            return None;
        }
        let modifier = CostModifier::new(target, delta, life_time, &mut self.next_modifier_ref)?;
        let id = modifier.id;
        debug!("add cost modifier: {modifier:?}");
        self.cost_modifiers.push(modifier);
        if life_time == LifeTime::ThisTurn {
            self.board_mut(player)
                .turn_cleanups
                .push(TurnCleanup::ExpireModifier(id));
        }
        Some(id)
    }

    pub fn remove_cost_modifier(&mut self, id: ModifierRef) {
        let before = self.cost_modifiers.len();
        self.cost_modifiers.retain(|m| m.id != id);
        if before == self.cost_modifiers.len() {
            warn!("cost modifier {id} was already removed");
        }
    }

    pub fn run_turn_cleanups(&mut self, player: ActorId) {
        let cleanups = std::mem::take(&mut self.board_mut(player).turn_cleanups);
        for cleanup in cleanups {
            match cleanup {
                TurnCleanup::ExpireModifier(id) => self.remove_cost_modifier(id),
            }
        }
    }

    /// Sum of the turn scoped deltas still active, zero between turns.
    pub fn pending_turn_delta(&self) -> i32 {
        self.cost_modifiers
            .iter()
            .filter(|m| m.life_time == LifeTime::ThisTurn)
            .map(|m| m.delta)
            .sum()
    }
}
