use futures::future::LocalBoxFuture;
use iter_tools::Itertools;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::cards::{Card, CardKey, CardView};
use crate::events::{DecisionRequest, SelectCardType, SelectHandCards, SelectPurpose};
use crate::gameplay::{Game, GameOutcome};
use crate::hooks::HookEvent;
use crate::zones::*;

/// What a finished effect asks of the level that invoked it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Done,
    /// the next action card played this turn is resolved n times
    PlayNextActionTimes(u32),
}

/// Signals that stop an effect early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interrupt {
    /// the card's effect is skipped
    NotImplemented,
    /// raised by a reaction, the attack skips this target
    Defended,
    GameOver(GameOutcome),
}

impl From<GameOutcome> for Interrupt {
    fn from(value: GameOutcome) -> Self {
        Interrupt::GameOver(value)
    }
}

pub type EffectResult<T = Resolution> = Result<T, Interrupt>;

/// A suspendable effect program. It may await decisions at any depth.
pub type EffectFuture<'a, T = Resolution> = LocalBoxFuture<'a, EffectResult<T>>;

impl Game {
    /// Turns an effect result into what the turn flow understands.
    pub(crate) fn interpret(
        &self,
        result: EffectResult,
        name: &str,
    ) -> Result<Resolution, GameOutcome> {
        match result {
            Ok(resolution) => Ok(resolution),
            Err(Interrupt::NotImplemented) => {
                warn!("{name} is not implemented, skipping its effect");
                Ok(Resolution::Done)
            }
            Err(Interrupt::Defended) => {
                warn!("{name} raised a defense outside of an attack");
                Ok(Resolution::Done)
            }
            Err(Interrupt::GameOver(outcome)) => Err(outcome),
        }
    }

    /// Plays an action card that is already in play.
    pub async fn play_action_card(
        &mut self,
        player: ActorId,
        card: CardId,
    ) -> Result<Resolution, GameOutcome> {
        let library = self.library.clone();
        let Some(def) = library.lookup(self.state.card_key(card)) else {
            return Ok(Resolution::Done);
        };
        debug!("{player} resolves {}", def.name);
        let result = def.effect.play(self, player, card).await;
        let resolution = self.interpret(result, &def.name)?;

        if def.trash_after_playing && self.state.board_mut(player).take(Zone::PlayArea, card) {
            info!("{} is trashed after playing", def.name);
            self.state.trash.push(card);
        }
        Ok(resolution)
    }

    pub fn add_actions(&mut self, player: ActorId, count: u32) {
        self.state.board_mut(player).remaining_actions += count;
    }

    pub fn add_buys(&mut self, player: ActorId, count: u32) {
        self.state.board_mut(player).remaining_buys += count;
    }

    pub fn add_coins(&mut self, player: ActorId, count: u32) {
        self.state.board_mut(player).coins += count;
    }

    pub fn add_tokens(&mut self, player: ActorId, count: u32) {
        self.state.board_mut(player).tokens += count;
    }

    /// Draws from the deck, reshuffling the discard pile when it runs out.
    pub fn draw_cards(&mut self, player: ActorId, count: u32) -> Vec<CardId> {
        let mut drawn = vec![];
        for _ in 0..count {
            match self.take_from_deck(player) {
                Some(card) => {
                    self.state.board_mut(player).hand.push(card);
                    drawn.push(card);
                }
                None => break,
            }
        }
        drawn
    }

    /// Top card of the deck, `None` when both deck and discard are empty.
    pub fn take_from_deck(&mut self, player: ActorId) -> Option<CardId> {
        if self.state.board(player).deck.is_empty() {
            self.reshuffle(player);
        }
        self.state.board_mut(player).deck.pop()
    }

    pub fn reshuffle(&mut self, player: ActorId) {
        let board = self.state.board_mut(player);
        if board.discard.is_empty() {
            return;
        }
        let discard = std::mem::take(&mut board.discard);
        board.deck.splice(0..0, discard);
        board.deck.shuffle(&mut *self.rng);
        debug!("{player} shuffles");
        let name = self.state.player_name(player);
        self.notify_all(format!("{name} shuffles"), vec![]);
    }

    /// Moves a card between two zones of the same player.
    pub fn move_card(&mut self, player: ActorId, card: CardId, from: Zone, to: Zone) -> bool {
        let board = self.state.board_mut(player);
        if !board.take(from, card) {
            warn!("{card} is not in {from:?}");
            return false;
        }
        board.get_zone_mut(to).push(card);
        true
    }

    pub fn discard_card(&mut self, player: ActorId, card: CardId, from: Zone) -> bool {
        self.move_card(player, card, from, Zone::Discard)
    }

    pub fn trash_card(&mut self, player: ActorId, card: CardId, from: Zone) -> bool {
        if !self.state.board_mut(player).take(from, card) {
            warn!("{card} is not in {from:?}");
            return false;
        }
        self.state.trash.push(card);
        true
    }

    /// Gains a card from the supply, then checks for the end of the game.
    pub async fn gain_card(
        &mut self,
        player: ActorId,
        key: &CardKey,
        to: GainTo,
    ) -> Result<Option<CardId>, GameOutcome> {
        let card = self.receive_card(player, key, to).await?;
        self.check_end_of_game()?;
        Ok(card)
    }

    /// Takes the top card of a supply pile, `None` when the pile is empty.
    pub(crate) async fn receive_card(
        &mut self,
        player: ActorId,
        key: &CardKey,
        to: GainTo,
    ) -> Result<Option<CardId>, GameOutcome> {
        let Some(card) = self.state.supply.get_mut(key).and_then(|p| p.pop()) else {
            debug!("{key} pile is empty, nothing gained");
            return Ok(None);
        };
        self.state.board_mut(player).get_zone_mut(to.into()).push(card);

        let views = self.card_views(&[card]);
        let name = self.state.player_name(player);
        self.notify_others(player, format!("{name} gains"), views.clone());
        self.notify(player, "you gain", views);

        if self.state.supply.get(key).is_some_and(|p| p.is_empty()) {
            info!("{key} pile is now empty");
            self.notify_all(format!("the {key} pile is empty"), vec![]);
            self.fire_hook(HookEvent::EmptyPile { key: key.clone() }).await?;
        }
        self.fire_hook(HookEvent::GainCard { player, card }).await?;
        Ok(Some(card))
    }

    /// Asks for a supply card costing at most `max_cost` and gains it.
    pub async fn gain_up_to(
        &mut self,
        player: ActorId,
        max_cost: u32,
        filter: impl Fn(&Card) -> bool,
        to: GainTo,
    ) -> Result<Option<CardId>, GameOutcome> {
        let choices =
            self.supply_infos(|c, cost| cost <= max_cost && c.potion_cost == 0 && filter(c));
        let picked = self
            .select_card_type(
                player,
                SelectCardType::new(
                    format!("Choose a card costing up to {max_cost} to gain."),
                    choices,
                    false,
                ),
            )
            .await?;
        match picked {
            Some(key) => self.gain_card(player, &key, to).await,
            None => Ok(None),
        }
    }

    /// Makes `player` discard until `size` cards are left in hand.
    pub async fn discard_down_to(&mut self, player: ActorId, size: usize) -> Result<(), GameOutcome> {
        self.discard_down_to_each(&[player], size).await
    }

    /// Every player discards down to `size` cards, all of them choose at once.
    pub async fn discard_down_to_each(
        &mut self,
        players: &[ActorId],
        size: usize,
    ) -> Result<(), GameOutcome> {
        let requests: Vec<(ActorId, DecisionRequest)> = players
            .iter()
            .filter_map(|&player| {
                let hand = self.hand_views(player, |_| true);
                let count = hand.len().checked_sub(size).filter(|c| *c > 0)?;
                let request = SelectHandCards::new(
                    format!("Discard down to {size} cards."),
                    hand,
                    count,
                    count,
                    SelectPurpose::Discard,
                );
                Some((player, request.into()))
            })
            .collect();
        let asked = requests.iter().map(|(p, _)| *p).collect_vec();

        let replies = self.ask_each(requests).await?;
        for (player, reply) in asked.into_iter().zip(replies) {
            let picked = reply.into_cards();
            let views = self.card_views(&picked);
            for card in picked {
                self.discard_card(player, card, Zone::Hand);
            }
            let name = self.state.player_name(player);
            self.notify_others(player, format!("{name} discards"), views);
        }
        Ok(())
    }

    /// Takes cards from the supply back in, used when a gained card is returned.
    pub fn return_to_supply(&mut self, player: ActorId, card: CardId, from: Zone) -> bool {
        if !self.state.board_mut(player).take(from, card) {
            return false;
        }
        let key = self.state.card_key(card).clone();
        self.state.supply.entry(key).or_default().push(card);
        true
    }

    /// Reveals cards to everyone.
    pub fn reveal(&self, player: ActorId, cards: &[CardId]) -> Vec<CardView> {
        let views = self.card_views(cards);
        let name = self.state.player_name(player);
        self.notify_others(player, format!("{name} reveals"), views.clone());
        views
    }

    /// Players an attack played by `player` reaches.
    pub fn attack_targets(&self, player: ActorId) -> Vec<ActorId> {
        self.state.following_players(player)
    }

    /// Gives `victim` the chance to reveal reactions. Returns true when one of
    /// them defended against the attack.
    pub async fn defends_check(
        &mut self,
        victim: ActorId,
        attack: &CardKey,
    ) -> Result<bool, GameOutcome> {
        let library = self.library.clone();
        let mut used: Vec<CardId> = vec![];
        loop {
            let reactions = self
                .hand_views(victim, |c| c.is_reaction())
                .into_iter()
                .filter(|c| !used.contains(&c.id))
                .collect_vec();
            if reactions.is_empty() {
                return Ok(false);
            }
            let picked = self
                .select_hand_cards(
                    victim,
                    SelectHandCards::new(
                        "Do you want to reveal a card in response to the attack?",
                        reactions,
                        0,
                        1,
                        SelectPurpose::React,
                    ),
                )
                .await?;
            let Some(card) = picked.first().copied() else {
                return Ok(false);
            };
            used.push(card);

            let Some(def) = library.lookup(self.state.card_key(card)) else {
                continue;
            };
            self.reveal(victim, &[card]);
            match def.effect.react(self, victim, card, attack).await {
                Ok(()) => {}
                Err(Interrupt::Defended) => {
                    info!("{victim} defends with {}", def.name);
                    let name = self.state.player_name(victim);
                    self.notify_others(victim, format!("{name} is not affected"), vec![]);
                    return Ok(true);
                }
                Err(Interrupt::NotImplemented) => {
                    warn!("{} reaction is not implemented", def.name);
                }
                Err(Interrupt::GameOver(outcome)) => return Err(outcome),
            }
        }
    }

    /// The players an attack actually affects, after their defenses.
    pub async fn undefended_targets(
        &mut self,
        player: ActorId,
        attack: &CardKey,
    ) -> Result<Vec<ActorId>, GameOutcome> {
        let mut targets = vec![];
        for victim in self.attack_targets(player) {
            if !self.defends_check(victim, attack).await? {
                targets.push(victim);
            }
        }
        Ok(targets)
    }
}
