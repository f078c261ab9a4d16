use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::iter;
use std::sync::Arc;

use bincode::{Decode, Encode};
use debug_ignore::DebugIgnore;
use get_size::GetSize;
use iter_tools::Itertools;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error, info, warn};

use crate::cards::{Card, CardInfo, CardKey, CardView};
use crate::checkpoint::Checkpoint;
use crate::client::Table;
use crate::config::GameConfig;
use crate::effects::Resolution;
use crate::error::SetupError;
use crate::events::*;
use crate::hooks::{HookDispatcher, HookEvent, HookOutcome};
use crate::library::CardRegistry;
use crate::modifiers::{CostModifier, CostTarget, LifeTime};
use crate::zones::*;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

pub type GameResult = Result<GameContinue, GameOutcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameContinue;

#[derive(Debug, Clone, PartialEq, Eq, GetSize, Encode, Decode)]
pub struct GameOutcome {
    pub reason: GameOverReason,
}

impl GameOutcome {
    pub fn new(reason: GameOverReason) -> Self {
        GameOutcome { reason }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, GetSize, Encode, Decode)]
pub enum GameOverReason {
    ScarcePileEmpty(CardKey),
    PilesEmpty(Vec<CardKey>),
    NoPlayersLeft,
    Aborted,
    Fault(String),
}

impl Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOverReason::ScarcePileEmpty(key) => write!(f, "the {key} pile is empty"),
            GameOverReason::PilesEmpty(keys) => write!(f, "piles are empty: {}", keys.join(", ")),
            GameOverReason::NoPlayersLeft => write!(f, "no players left"),
            GameOverReason::Aborted => write!(f, "the game was cancelled"),
            GameOverReason::Fault(e) => write!(f, "the game crashed: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerScore {
    pub actor: ActorId,
    pub name: String,
    pub points: i32,
}

/// The final result of a game, kept by the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub scores: Vec<PlayerScore>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, GetSize, Encode, Decode)]
pub enum Phase {
    #[default]
    SetupPending,
    BetweenTurns,
    Action,
    Buy,
    Cleanup,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, GetSize, Encode, Decode)]
pub struct Rules {
    pub starting_hand: u32,
    /// the game ends as soon as this pile is empty
    pub scarce_pile: CardKey,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            starting_hand: 5,
            scarce_pile: "province".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, GetSize, Encode, Decode)]
pub struct GameState {
    pub name: String,
    pub players: Vec<PlayerBoard>,
    pub supply: BTreeMap<CardKey, Vec<CardId>>,
    pub trash: Vec<CardId>,
    pub card_map: HashMap<CardId, CardKey>,
    /// basic and kingdom card types in play, in catalog order
    pub selected_cards: Vec<CardKey>,
    pub rules: Rules,
    pub round: u32,
    pub phase: Phase,
    pub active_player: Option<ActorId>,
    pub cost_modifiers: Vec<CostModifier>,
    pub next_modifier_ref: u32,
    pub next_card_ref: u16,
    /// named counters owned by card effects
    pub counters: BTreeMap<String, u32>,
    pub game_outcome: Option<GameOutcome>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_board(&self, player: ActorId) -> Option<&PlayerBoard> {
        self.players.iter().find(|p| p.actor == player)
    }

    pub fn board(&self, player: ActorId) -> &PlayerBoard {
        self.try_board(player)
            .unwrap_or_else(|| panic!("should be a player: {player}"))
    }

    pub fn board_mut(&mut self, player: ActorId) -> &mut PlayerBoard {
        self.players
            .iter_mut()
            .find(|p| p.actor == player)
            .unwrap_or_else(|| panic!("should be a player: {player}"))
    }

    pub fn player_name(&self, player: ActorId) -> String {
        self.try_board(player)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player.to_string())
    }

    /// Players still in the game, in turn order.
    pub fn active_players(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.players.iter().filter(|p| !p.removed).map(|p| p.actor)
    }

    /// The players after `player` in turn order, wrapping around.
    pub fn following_players(&self, player: ActorId) -> Vec<ActorId> {
        let Some(pos) = self.players.iter().position(|p| p.actor == player) else {
            return vec![];
        };
        self.players[pos + 1..]
            .iter()
            .chain(self.players[..pos].iter())
            .filter(|p| !p.removed)
            .map(|p| p.actor)
            .collect()
    }

    pub fn card_key(&self, card: CardId) -> &CardKey {
        self.card_map
            .get(&card)
            .unwrap_or_else(|| panic!("should be a registered card: {card}"))
    }

    pub fn counter(&self, name: &str) -> u32 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn set_counter(&mut self, name: &str, value: u32) {
        self.counters.insert(name.to_string(), value);
    }

    pub fn locate(&self, card: CardId) -> Option<Location> {
        for board in &self.players {
            if let Some(zone) = board.find_card(card) {
                return Some(Location::Board(board.actor, zone));
            }
        }
        if let Some((key, _)) = self.supply.iter().find(|(_, pile)| pile.contains(&card)) {
            return Some(Location::Supply(key.clone()));
        }
        self.trash.contains(&card).then_some(Location::Trash)
    }

    /// Every instance in every zone, supply and trash.
    pub fn all_cards(&self) -> impl Iterator<Item = CardId> + '_ {
        self.players
            .iter()
            .flat_map(|p| p.all_cards())
            .chain(self.supply.values().flatten().copied())
            .chain(self.trash.iter().copied())
    }

    pub fn empty_piles(&self) -> Vec<CardKey> {
        self.supply
            .iter()
            .filter(|(_, pile)| pile.is_empty())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// A game in progress: the serializable state plus what drives it.
#[derive(Debug)]
pub struct Game {
    pub state: GameState,
    pub library: DebugIgnore<Arc<CardRegistry>>,
    pub table: Arc<Table>,
    pub hooks: HookDispatcher,
    pub rng: DebugIgnore<ChaCha8Rng>,
    /// take a checkpoint at the top of every round
    pub auto_checkpoint: bool,
}

fn victory_pile_sizes(players: usize) -> (usize, usize) {
    match players {
        2 => (8, 8),
        5 => (12, 15),
        6 => (12, 18),
        _ => (12, 12),
    }
}

impl Game {
    /// Builds a new game from the players seated at the table.
    pub fn setup(
        config: &GameConfig,
        library: Arc<CardRegistry>,
        table: Arc<Table>,
    ) -> Result<Game, SetupError> {
        let seated = table
            .players()
            .into_iter()
            .filter(|p| !p.is_removed())
            .collect_vec();
        if seated.len() < MIN_PLAYERS {
            return Err(SetupError::NotEnoughPlayers {
                min: MIN_PLAYERS,
                got: seated.len(),
            });
        }
        if seated.len() > MAX_PLAYERS {
            return Err(SetupError::TooManyPlayers {
                max: MAX_PLAYERS,
                got: seated.len(),
            });
        }

        let mut kingdom = vec![];
        for key in &config.kingdom {
            let card = library
                .lookup(key)
                .ok_or_else(|| SetupError::UnknownCard(key.clone()))?;
            if !card.optional {
                return Err(SetupError::NotKingdomCard(key.clone()));
            }
            if kingdom.contains(&key) {
                return Err(SetupError::DuplicateKingdomCard(key.clone()));
            }
            kingdom.push(key);
        }
        if !library.contains(&config.scarce_pile) {
            return Err(SetupError::UnknownCard(config.scarce_pile.clone()));
        }

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut state = GameState {
            name: config.name.clone(),
            rules: Rules {
                starting_hand: config.starting_hand,
                scarce_pile: config.scarce_pile.clone(),
            },
            ..Default::default()
        };

        let n = seated.len();
        let needs_potion = kingdom
            .iter()
            .filter_map(|k| library.lookup(k))
            .any(|c| c.potion_cost > 0);
        let (victory, provinces) = victory_pile_sizes(n);
        let treasure_scale = if n > 4 { 2 } else { 1 };

        let mut piles: Vec<(CardKey, usize)> = vec![
            ("copper".into(), 60 * treasure_scale),
            ("silver".into(), 40 * treasure_scale),
            ("gold".into(), 30 * treasure_scale),
            ("estate".into(), victory),
            ("duchy".into(), victory),
            ("province".into(), provinces),
            ("curse".into(), (n - 1) * 10),
        ];
        if needs_potion {
            piles.push(("potion".into(), 30));
        }
        for key in &kingdom {
            let size = match library.lookup(key) {
                Some(card) if card.is_victory() => victory,
                _ => 10,
            };
            piles.push(((*key).clone(), size));
        }

        for (key, size) in piles {
            if !library.contains(&key) {
                return Err(SetupError::UnknownCard(key));
            }
            let pile = iter::repeat_with(|| {
                register_card(&key, &mut state.next_card_ref, &mut state.card_map)
            })
            .take(size)
            .collect::<Result<_, _>>()?;
            state.supply.insert(key, pile);
        }

        state.selected_cards = state
            .supply
            .keys()
            .cloned()
            .sorted_by_key(|k| library.catalog_position(k))
            .collect();

        let mut game = Game {
            hooks: HookDispatcher::index(&library, &state.selected_cards),
            state,
            library: DebugIgnore(library),
            table,
            rng: DebugIgnore(rng),
            auto_checkpoint: config.auto_checkpoint,
        };

        // starting decks are not taken from the supply
        for channel in seated {
            let mut board = PlayerBoard::new(channel.actor, channel.name.clone());
            board.auto_treasures = config.auto_treasures;
            let starting = iter::repeat("copper")
                .take(7)
                .chain(iter::repeat("estate").take(3))
                .map(|k| {
                    register_card(
                        &k.to_string(),
                        &mut game.state.next_card_ref,
                        &mut game.state.card_map,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            board.deck = starting;
            board.deck.shuffle(&mut *game.rng);
            game.state.players.push(board);
        }

        info!(
            "game {} set up with {} players, kingdom: {}",
            game.state.name,
            n,
            kingdom.iter().join(", ")
        );
        Ok(game)
    }

    pub fn lookup_card(&self, card: CardId) -> Option<&Card> {
        self.library.lookup(self.state.card_key(card))
    }

    pub fn effective_cost(&self, key: &str) -> u32 {
        self.library
            .lookup(key)
            .map(|c| self.state.effective_cost(c))
            .unwrap_or(0)
    }

    /// Adds a cost delta. Deltas that last this turn are reversed at cleanup
    /// and need a turn in progress.
    pub fn apply_cost_delta(&mut self, target: CostTarget, delta: i32, life_time: LifeTime) {
        match (self.state.active_player, life_time) {
            (Some(player), _) => {
                self.state.add_cost_modifier(player, target, delta, life_time);
            }
            (None, LifeTime::ThisTurn) => {
                warn!("cost delta {delta} for this turn outside of a turn is ignored");
            }
            (None, _) => {
                // no board is touched for lasting deltas
                self.state
                    .add_cost_modifier(ActorId::default(), target, delta, life_time);
            }
        }
    }

    pub fn card_info(&self, key: &str) -> Option<CardInfo> {
        let mut info = self.library.info(key)?;
        info.cost = self.effective_cost(key);
        Some(info)
    }

    pub fn card_view(&self, card: CardId) -> Option<CardView> {
        self.card_info(self.state.card_key(card))
            .map(|info| CardView { id: card, info })
    }

    pub fn card_views(&self, cards: &[CardId]) -> Vec<CardView> {
        cards.iter().filter_map(|c| self.card_view(*c)).collect()
    }

    /// Views of the hand cards matching the filter.
    pub fn hand_views(&self, player: ActorId, filter: impl Fn(&Card) -> bool) -> Vec<CardView> {
        let hand = self
            .state
            .board(player)
            .hand
            .iter()
            .copied()
            .filter(|c| self.lookup_card(*c).map(&filter).unwrap_or(false))
            .collect_vec();
        self.card_views(&hand)
    }

    /// Supply piles that are not empty and match the filter, in catalog order.
    pub fn supply_infos(&self, filter: impl Fn(&Card, u32) -> bool) -> Vec<CardInfo> {
        self.state
            .selected_cards
            .iter()
            .filter(|k| self.state.supply.get(*k).is_some_and(|p| !p.is_empty()))
            .filter_map(|k| self.library.lookup(k))
            .filter(|c| filter(c, self.state.effective_cost(c)))
            .filter_map(|c| self.card_info(&c.key))
            .collect()
    }

    pub fn worth(&self, player: ActorId, card: CardId) -> u32 {
        self.lookup_card(card)
            .map(|c| c.effect.worth(c, self, player))
            .unwrap_or(0)
    }

    pub fn points(&self, player: ActorId) -> i32 {
        let board = self.state.board(player);
        let cards: i32 = board
            .all_cards()
            .filter_map(|c| self.lookup_card(c))
            .map(|c| c.effect.points(c, self, player))
            .sum();
        cards + board.tokens as i32
    }

    pub fn scores(&self) -> Vec<PlayerScore> {
        self.state
            .players
            .iter()
            .map(|p| PlayerScore {
                actor: p.actor,
                name: p.name.clone(),
                points: self.points(p.actor),
            })
            .collect()
    }

    // ---------------------------------------------------------------------
    // notices and requests

    pub fn notify(&self, target: ActorId, message: impl Into<String>, cards: Vec<CardView>) {
        self.table.notify(InfoNotice {
            target,
            message: message.into(),
            cards,
        });
    }

    /// Everyone at the table except `player`, kibitzers included.
    pub fn notify_others(&self, player: ActorId, message: impl Into<String>, cards: Vec<CardView>) {
        let message = message.into();
        for actor in self.table.actors().iter().filter(|a| a.actor != player) {
            self.notify(actor.actor, message.clone(), cards.clone());
        }
    }

    pub fn notify_all(&self, message: impl Into<String>, cards: Vec<CardView>) {
        let message = message.into();
        for actor in self.table.actors() {
            self.notify(actor.actor, message.clone(), cards.clone());
        }
    }

    pub async fn ask(
        &mut self,
        player: ActorId,
        request: impl Into<DecisionRequest>,
    ) -> Result<Reply, GameOutcome> {
        let request = request.into();
        if let Some(reply) = request.trivial_reply() {
            debug!("{player} has nothing to decide for: {}", request.message());
            return Ok(reply);
        }
        let reply = self.table.ask(player, request).await;
        self.sync_removed_players();
        reply
    }

    /// Asks several players at once, they decide independently.
    pub async fn ask_each(
        &mut self,
        requests: Vec<(ActorId, DecisionRequest)>,
    ) -> Result<Vec<Reply>, GameOutcome> {
        let mut replies: Vec<Option<Reply>> = requests
            .iter()
            .map(|(_, r)| r.trivial_reply())
            .collect();
        let (positions, to_ask): (Vec<_>, Vec<_>) = requests
            .into_iter()
            .enumerate()
            .filter(|(i, _)| replies[*i].is_none())
            .unzip();
        let asked = self.table.ask_each(to_ask).await;
        self.sync_removed_players();
        for (pos, reply) in positions.into_iter().zip(asked?) {
            replies[pos] = Some(reply);
        }
        Ok(replies.into_iter().flatten().collect())
    }

    pub async fn ask_yes_no(
        &mut self,
        player: ActorId,
        message: impl Into<String>,
    ) -> Result<bool, GameOutcome> {
        Ok(self.ask(player, YesNo::new(message)).await?.into_yes_no())
    }

    pub async fn choose_option(
        &mut self,
        player: ActorId,
        message: impl Into<String>,
        options: &[(&str, &str)],
    ) -> Result<String, GameOutcome> {
        let reply = self.ask(player, ChooseOption::new(message, options)).await?;
        Ok(reply.into_option().unwrap_or_default())
    }

    pub async fn select_hand_cards(
        &mut self,
        player: ActorId,
        request: SelectHandCards,
    ) -> Result<Vec<CardId>, GameOutcome> {
        Ok(self.ask(player, request).await?.into_cards())
    }

    pub async fn select_card_type(
        &mut self,
        player: ActorId,
        request: SelectCardType,
    ) -> Result<Option<CardKey>, GameOutcome> {
        Ok(self.ask(player, request).await?.into_card_type())
    }

    /// Kicked actors leave the turn order.
    pub fn sync_removed_players(&mut self) {
        for board in self.state.players.iter_mut().filter(|p| !p.removed) {
            if self.table.is_removed(board.actor) {
                info!("{} is removed from the turn order", board.name);
                board.removed = true;
            }
        }
    }

    // ---------------------------------------------------------------------
    // game flow

    pub async fn play_game(&mut self) -> GameOutcome {
        let result = self.run_game().await;
        let outcome = match result {
            Ok(_) => {
                error!("the game stopped without an outcome");
                GameOutcome::new(GameOverReason::Fault("no outcome".into()))
            }
            Err(outcome) => outcome,
        };
        self.end_of_game(outcome)
    }

    async fn run_game(&mut self) -> GameResult {
        if self.state.phase == Phase::SetupPending {
            self.start_game().await?;
        }
        loop {
            self.play_round().await?;
        }
    }

    /// Setup hooks and starting hands.
    pub async fn start_game(&mut self) -> GameResult {
        info!("starting game {}", self.state.name);
        self.fire_hook(HookEvent::Setup).await?;
        let hand_size = self.state.rules.starting_hand;
        for player in self.state.active_players().collect_vec() {
            self.draw_cards(player, hand_size);
        }
        self.state.round = 1;
        self.state.phase = Phase::BetweenTurns;
        self.notify_all("the game starts", vec![]);
        Ok(GameContinue)
    }

    pub async fn play_round(&mut self) -> GameResult {
        self.checkpoint_round();
        info!("round {}", self.state.round);
        for player in self.state.players.iter().map(|p| p.actor).collect_vec() {
            self.table.check_cancelled()?;
            self.sync_removed_players();
            if self.state.active_players().next().is_none() {
                return Err(GameOutcome::new(GameOverReason::NoPlayersLeft));
            }
            if self.state.board(player).removed {
                continue;
            }
            self.play_turn(player).await?;
        }
        self.state.round += 1;
        Ok(GameContinue)
    }

    fn checkpoint_round(&mut self) {
        if !(self.table.take_checkpoint_request() || self.auto_checkpoint) {
            return;
        }
        match Checkpoint::capture(self).and_then(|c| c.encode()) {
            Ok(blob) => {
                info!("checkpoint of round {}: {} bytes", self.state.round, blob.len());
                self.table.store_checkpoint(blob);
            }
            Err(e) => error!("checkpoint failed: {e}"),
        }
    }

    pub async fn play_turn(&mut self, player: ActorId) -> GameResult {
        let name = self.state.player_name(player);
        info!("turn of {name}");
        self.state.active_player = Some(player);
        self.state.board_mut(player).start_turn();
        self.notify_others(player, format!("{name}'s turn"), vec![]);
        self.notify(player, "your turn", vec![]);

        self.fire_hook(HookEvent::StartOfTurn { player }).await?;
        self.resolve_durations(player).await?;

        self.state.phase = Phase::Action;
        self.action_phase(player).await?;

        self.state.phase = Phase::Buy;
        self.buy_phase(player).await?;

        self.state.phase = Phase::Cleanup;
        self.cleanup_phase(player).await?;

        self.state.active_player = None;
        self.state.phase = Phase::BetweenTurns;
        self.check_end_of_game()?;
        Ok(GameContinue)
    }

    /// Start of turn effects of the cards left in the duration zone.
    pub async fn resolve_durations(&mut self, player: ActorId) -> GameResult {
        let lasting = self.state.board(player).duration.clone();
        let library = self.library.clone();
        for card in lasting {
            let Some(def) = library.lookup(self.state.card_key(card)) else {
                continue;
            };
            debug!("{} continues", def.name);
            let result = def.effect.duration(self, player, card).await;
            self.interpret(result.map(|_| Resolution::Done), &def.name)?;
        }
        Ok(GameContinue)
    }

    pub async fn action_phase(&mut self, player: ActorId) -> GameResult {
        let mut next_times: u32 = 0;
        loop {
            if self.state.board(player).remaining_actions == 0 {
                break;
            }
            let actions = self.hand_views(player, |c| c.is_action());
            if actions.is_empty() {
                break;
            }
            let remaining = self.state.board(player).remaining_actions;
            let picked = self
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        format!("Which action card do you want to play? ({remaining} actions left)"),
                        actions,
                        0,
                        1,
                        SelectPurpose::Play,
                    ),
                )
                .await?;
            let Some(card) = picked.first().copied() else {
                break;
            };

            let board = self.state.board_mut(player);
            board.remaining_actions -= 1;
            board.take(Zone::Hand, card);
            board.play_area.push(card);
            let views = self.card_views(&[card]);
            self.notify_others(
                player,
                format!("{} plays", self.state.player_name(player)),
                views,
            );

            // every multiplier returned while resolving this card adds up
            let times = std::mem::take(&mut next_times).max(1);
            for _ in 0..times {
                match self.play_action_card(player, card).await? {
                    Resolution::PlayNextActionTimes(n) => next_times += n,
                    Resolution::Done => next_times = 0,
                }
            }
        }
        Ok(GameContinue)
    }

    pub fn deal_request(&self, player: ActorId) -> SelectDeal {
        let board = self.state.board(player);
        let mut buyable = self.supply_infos(|c, cost| {
            cost <= board.coins
                && c.potion_cost <= board.potions
                && !board.forbidden_buys.contains(&c.key)
        });
        buyable.sort_by(|a, b| b.cost.cmp(&a.cost).then(b.potion_cost.cmp(&a.potion_cost)));
        SelectDeal {
            message: "Which card do you want to buy?".into(),
            buyable,
            coins: board.coins,
            potions: board.potions,
            remaining_buys: board.remaining_buys,
        }
    }

    pub async fn buy_phase(&mut self, player: ActorId) -> GameResult {
        self.play_treasures(player).await?;

        while self.state.board(player).remaining_buys > 0 {
            let request = self.deal_request(player);
            let Some(key) = self.ask(player, request).await?.into_card_type() else {
                break;
            };

            let outcome = self
                .fire_hook(HookEvent::PreBuyCard {
                    player,
                    key: key.clone(),
                })
                .await?;
            if outcome == HookOutcome::AbortPurchase {
                info!("purchase of {key} was aborted");
                self.state.board_mut(player).forbidden_buys.push(key);
                continue;
            }

            let cost = self.effective_cost(&key);
            let potion_cost = self.library.lookup(&key).map(|c| c.potion_cost).unwrap_or(0);
            let board = self.state.board_mut(player);
            if cost > board.coins || potion_cost > board.potions {
                warn!("{key} is no longer affordable");
                board.forbidden_buys.push(key);
                continue;
            }
            board.coins -= cost;
            board.potions -= potion_cost;
            board.remaining_buys -= 1;
            board.bought_this_turn.push(key.clone());

            if let Some(card) = self.receive_card(player, &key, GainTo::Discard).await? {
                let views = self.card_views(&[card]);
                self.notify_others(
                    player,
                    format!("{} buys", self.state.player_name(player)),
                    views,
                );
                self.fire_hook(HookEvent::BuyCard { player, card }).await?;
            }
            self.check_end_of_game()?;
        }
        Ok(GameContinue)
    }

    pub async fn play_treasures(&mut self, player: ActorId) -> GameResult {
        let treasures = self.hand_views(player, |c| c.is_treasure());
        let count = treasures.len();
        let picked = if self.state.board(player).auto_treasures {
            treasures.into_iter().map(|c| c.id).collect()
        } else {
            self.select_hand_cards(
                player,
                SelectHandCards::new(
                    "Which treasures do you want to play?",
                    treasures,
                    0,
                    count,
                    SelectPurpose::Treasures,
                ),
            )
            .await?
        };
        if picked.is_empty() {
            return Ok(GameContinue);
        }

        let views = self.card_views(&picked);
        self.notify_others(
            player,
            format!("{} plays", self.state.player_name(player)),
            views,
        );

        let library = self.library.clone();
        for card in picked {
            let board = self.state.board_mut(player);
            if !board.take(Zone::Hand, card) {
                continue;
            }
            board.play_area.push(card);
            let Some(def) = library.lookup(self.state.card_key(card)) else {
                continue;
            };
            let worth = def.effect.worth(def, self, player);
            let board = self.state.board_mut(player);
            board.coins += worth;
            board.potions += def.potion;
            let result = def.effect.play(self, player, card).await;
            self.interpret(result, &def.name)?;
        }
        Ok(GameContinue)
    }

    pub async fn cleanup_phase(&mut self, player: ActorId) -> GameResult {
        self.fire_hook(HookEvent::EndOfTurn { player }).await?;

        let library = self.library.clone();
        let is_duration = |state: &GameState, card: CardId| {
            library
                .lookup(state.card_key(card))
                .is_some_and(|c| c.is_duration())
        };

        // duration cards from last turn are done, the ones played now stay
        let played = std::mem::take(&mut self.state.board_mut(player).play_area);
        let (lasting, done): (Vec<_>, Vec<_>) = played
            .into_iter()
            .partition(|c| is_duration(&self.state, *c));
        let board = self.state.board_mut(player);
        let finished = std::mem::replace(&mut board.duration, lasting);
        board.discard.extend(finished);
        board.discard.extend(done);
        let hand = std::mem::take(&mut board.hand);
        board.discard.extend(hand);

        let hand_size = self.state.rules.starting_hand;
        self.draw_cards(player, hand_size);

        self.state.board_mut(player).reset_counters();
        self.state.run_turn_cleanups(player);
        Ok(GameContinue)
    }

    pub fn check_end_of_game(&self) -> GameResult {
        let scarce = &self.state.rules.scarce_pile;
        if self.state.supply.get(scarce).is_some_and(|p| p.is_empty()) {
            return Err(GameOutcome::new(GameOverReason::ScarcePileEmpty(scarce.clone())));
        }
        let empty = self.state.empty_piles();
        let threshold = if self.state.players.len() < 5 { 3 } else { 4 };
        if empty.len() >= threshold {
            return Err(GameOutcome::new(GameOverReason::PilesEmpty(empty)));
        }
        Ok(GameContinue)
    }

    /// Folds every card back into the decks, scores and tells everyone.
    pub fn end_of_game(&mut self, outcome: GameOutcome) -> GameOutcome {
        if self.state.phase == Phase::GameOver {
            return self.state.game_outcome.clone().unwrap_or(outcome);
        }
        info!("game over: {}", outcome.reason);
        for board in &mut self.state.players {
            board.fold_into_deck();
        }
        self.state.active_player = None;
        self.state.phase = Phase::GameOver;
        self.state.game_outcome = Some(outcome.clone());

        let scores = self.scores();
        let summary = scores
            .iter()
            .sorted_by_key(|s| -s.points)
            .map(|s| format!("{}: {}", s.name, s.points))
            .join(", ");
        info!("scores: {summary}");
        self.notify_all(format!("game over, {}. {summary}", outcome.reason), vec![]);
        outcome
    }

    pub fn report(&self) -> Option<GameReport> {
        self.state.game_outcome.clone().map(|outcome| GameReport {
            outcome,
            scores: self.scores(),
        })
    }

    /// Text lines contributed by the selected cards, for display.
    pub fn render_info(&self, player: ActorId) -> Vec<String> {
        self.hooks
            .render_handlers()
            .iter()
            .filter_map(|k| self.library.lookup(k))
            .filter_map(|c| c.effect.render_info(self, player))
            .collect()
    }
}
