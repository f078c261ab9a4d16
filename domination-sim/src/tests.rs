use std::collections::HashMap;
use std::env;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use time::macros::format_description;
use tracing_subscriber::{fmt::time::LocalTime, EnvFilter};

use crate::cards::{effect, Card, CardEffect, CardKey, CardKind};
use crate::client::{ActorChannel, ActorKind, Client, CollectEventHandler, Table};
use crate::config::GameConfig;
use crate::effects::{EffectFuture, Interrupt, Resolution};
use crate::events::{DecisionRequest, Reply, SelectHandCards, SelectPurpose};
use crate::gameplay::{Game, GameOutcome, GameReport, GameState, Phase};
use crate::hooks::{HookEvent, HookOutcome, HookPoint};
use crate::library::CardRegistry;
use crate::modifiers::{CostTarget, LifeTime};
use crate::prompters::{BufferedPrompter, Policy, WisePrompter};
use crate::zones::*;

pub const TEST_SEED: u64 = 123456;

pub fn setup_test_logs() -> tracing_appender::non_blocking::WorkerGuard {
    // --------------- setup logs ---------------------
    env::set_var("RUST_BACKTRACE", "1");
    env::set_var("RUST_LOG", "DEBUG");

    let file_appender = tracing_appender::rolling::daily("logs", "domination-sim.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = tracing_subscriber::fmt()
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour repr:24]:[minute]:[second].[subsecond digits:4]"
        )))
        .with_writer(non_blocking)
        .with_ansi(false)
        // enable thread id to be emitted
        .with_thread_ids(true)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    // -------------- end setup logs -------------------
    guard
}

/// Basic cards plus the small test set below.
pub fn test_library() -> CardRegistry {
    let mut library = CardRegistry::with_basic_cards();
    for card in test_cards() {
        library
            .register(card())
            .expect("test cards have distinct keys");
    }
    library
}

pub fn test_config(kingdom: &[&str]) -> GameConfig {
    GameConfig {
        name: "test".into(),
        kingdom: kingdom.iter().map(|k| k.to_string()).collect(),
        seed: Some(TEST_SEED),
        auto_treasures: true,
        ..Default::default()
    }
}

/// Two deterministic bots with the test library.
pub fn setup_bot_game(kingdom: &[&str]) -> (Game, Vec<ActorId>) {
    setup_game(
        test_library(),
        kingdom,
        vec![bot(), bot()],
    )
}

pub fn bot() -> Option<Box<dyn Policy>> {
    Some(Box::new(WisePrompter::new()))
}

pub fn buffered(buffer: &[&[usize]]) -> Option<Box<dyn Policy>> {
    Some(Box::new(BufferedPrompter::new(buffer)))
}

/// One player per policy. Players without a policy answer through their channel.
pub fn setup_game(
    library: CardRegistry,
    kingdom: &[&str],
    policies: Vec<Option<Box<dyn Policy>>>,
) -> (Game, Vec<ActorId>) {
    setup_game_with_config(library, test_config(kingdom), policies)
}

pub fn setup_game_with_config(
    library: CardRegistry,
    config: GameConfig,
    policies: Vec<Option<Box<dyn Policy>>>,
) -> (Game, Vec<ActorId>) {
    let table = Table::new();
    let players = policies
        .into_iter()
        .enumerate()
        .map(|(i, policy)| {
            table
                .seat(format!("player {}", i + 1), ActorKind::Player, policy)
                .actor
        })
        .collect();
    let game = Game::setup(&config, Arc::new(library), table).expect("valid test game");
    (game, players)
}

fn register(game: &mut Game, key: &str) -> CardId {
    register_card(
        &key.to_string(),
        &mut game.state.next_card_ref,
        &mut game.state.card_map,
    )
    .expect("card ids left")
}

/// Replaces the hand with new instances of the given cards. The old hand
/// goes to the bottom of the deck.
pub fn set_hand(game: &mut Game, player: ActorId, keys: &[&str]) -> Vec<CardId> {
    let cards: Vec<_> = keys.iter().map(|k| register(game, k)).collect();
    let board = game.state.board_mut(player);
    let old = std::mem::replace(&mut board.hand, cards.clone());
    board.deck.splice(0..0, old);
    cards
}

/// Puts new instances on top of the deck, the last key ends on top.
pub fn stack_deck(game: &mut Game, player: ActorId, keys: &[&str]) -> Vec<CardId> {
    let cards: Vec<_> = keys.iter().map(|k| register(game, k)).collect();
    game.state.board_mut(player).deck.extend(cards.iter().copied());
    cards
}

/// Makes `player` the active player at the start of the action phase.
pub fn start_turn(game: &mut Game, player: ActorId) {
    game.state.active_player = Some(player);
    game.state.phase = Phase::Action;
    game.state.board_mut(player).start_turn();
}

/// Plays an action from hand the way the action phase does.
pub async fn play_from_hand(
    game: &mut Game,
    player: ActorId,
    card: CardId,
) -> Result<Resolution, GameOutcome> {
    let board = game.state.board_mut(player);
    board.remaining_actions = board.remaining_actions.saturating_sub(1);
    assert!(board.take(Zone::Hand, card), "{card} is not in hand");
    board.play_area.push(card);
    game.play_action_card(player, card).await
}

pub fn keys_of(game: &Game, cards: &[CardId]) -> Vec<CardKey> {
    cards
        .iter()
        .map(|c| game.state.card_key(*c).clone())
        .collect()
}

/// How many times each registered instance is found across every zone.
/// A sound game finds each of them exactly once.
pub fn instance_counts(state: &GameState) -> HashMap<CardId, usize> {
    let mut counts: HashMap<CardId, usize> = state.card_map.keys().map(|c| (*c, 0)).collect();
    for card in state.all_cards() {
        *counts.entry(card).or_default() += 1;
    }
    counts
}

pub fn assert_cards_conserved(state: &GameState) {
    let wrong: Vec<_> = instance_counts(state)
        .into_iter()
        .filter(|(_, n)| *n != 1)
        .collect();
    assert!(wrong.is_empty(), "cards found the wrong number of times: {wrong:?}");
}

/// Runs the outside end of a channel on its own thread.
pub fn spawn_client<P: Policy + 'static>(
    table: Arc<Table>,
    channel: Arc<ActorChannel>,
    policy: P,
) -> (CollectEventHandler, JoinHandle<Option<GameReport>>) {
    let handler = CollectEventHandler::new();
    let client = Client::new(channel, table, handler.clone(), policy);
    (handler, thread::spawn(move || client.run()))
}

/// Records every request it answers, then lets `inner` answer it.
#[derive(Debug)]
pub struct RecordingPrompter<P> {
    pub inner: P,
    pub seen: Arc<std::sync::Mutex<Vec<String>>>,
}
impl<P> RecordingPrompter<P> {
    pub fn new(inner: P) -> Self {
        RecordingPrompter {
            inner,
            seen: Default::default(),
        }
    }
}
impl<P: Policy> Policy for RecordingPrompter<P> {
    fn answer(&mut self, request: &DecisionRequest) -> Reply {
        let reply = self.inner.answer(request);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(format!("{request:?} -> {reply:?}"));
        }
        reply
    }
}

// ---------------------------------------------------------------------------
// test cards

pub fn test_cards() -> Vec<fn() -> Card> {
    vec![
        lab,
        hook_first,
        hook_second,
        embargo,
        discount,
        pillage,
        guard,
        crash,
        twice,
    ]
}

fn action(key: &str, cost: u32, kinds: Vec<CardKind>) -> Card {
    Card {
        key: key.into(),
        name: key.into(),
        set: "test".into(),
        cost,
        kinds,
        optional: true,
        ..Default::default()
    }
}

/// +2 cards, +1 action
pub fn lab() -> Card {
    Card {
        effect: effect(Lab),
        ..action("test_lab", 5, vec![CardKind::Action])
    }
}
struct Lab;
impl CardEffect for Lab {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 2);
            game.state.board_mut(player).remaining_actions += 1;
            Ok(Resolution::Done)
        })
    }
}

/// Appends its mark to the `hook_order` counter at the start of every turn.
struct Marker(u32);
impl CardEffect for Marker {
    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::StartOfTurn { .. } = event else {
            return None;
        };
        Some(Box::pin(async move {
            let order = game.state.counter("hook_order");
            game.state.set_counter("hook_order", order * 10 + self.0);
            Ok(HookOutcome::Continue)
        }))
    }
}

pub fn hook_first() -> Card {
    Card {
        hooks: vec![HookPoint::StartOfTurn],
        effect: effect(Marker(1)),
        ..action("test_hook_first", 2, vec![CardKind::Action])
    }
}

pub fn hook_second() -> Card {
    Card {
        hooks: vec![HookPoint::StartOfTurn],
        effect: effect(Marker(2)),
        ..action("test_hook_second", 2, vec![CardKind::Action])
    }
}

/// Gold can't be bought.
pub fn embargo() -> Card {
    Card {
        hooks: vec![HookPoint::PreBuyCard],
        effect: effect(Embargo),
        ..action("test_embargo", 2, vec![CardKind::Action])
    }
}
struct Embargo;
impl CardEffect for Embargo {
    fn on_hook<'a>(
        &'a self,
        _game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        match event {
            HookEvent::PreBuyCard { key, .. } if key == "gold" => {
                Some(Box::pin(async { Ok(HookOutcome::AbortPurchase) }))
            }
            _ => None,
        }
    }
}

/// Cards cost 1 less this turn.
pub fn discount() -> Card {
    Card {
        effect: effect(Discount),
        ..action("test_discount", 3, vec![CardKind::Action])
    }
}
struct Discount;
impl CardEffect for Discount {
    fn play<'a>(&'a self, game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.apply_cost_delta(CostTarget::AllCards, -1, LifeTime::ThisTurn);
            Ok(Resolution::Done)
        })
    }
}

/// Each other player discards a card of their choice, then gains a curse.
pub fn pillage() -> Card {
    Card {
        effect: effect(Pillage),
        ..action("test_pillage", 4, vec![CardKind::Action, CardKind::Attack])
    }
}
struct Pillage;
impl CardEffect for Pillage {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let attack: CardKey = "test_pillage".into();
            for victim in game.undefended_targets(player, &attack).await? {
                let hand = game.hand_views(victim, |_| true);
                let picked = game
                    .select_hand_cards(
                        victim,
                        SelectHandCards::new("Discard a card.", hand, 1, 1, SelectPurpose::Discard),
                    )
                    .await?;
                for card in picked {
                    game.discard_card(victim, card, Zone::Hand);
                }
                game.gain_card(victim, &"curse".into(), GainTo::Discard)
                    .await?;
            }
            Ok(Resolution::Done)
        })
    }
}

/// Reaction: blocks any attack.
pub fn guard() -> Card {
    Card {
        effect: effect(Guard),
        ..action("test_guard", 2, vec![CardKind::Action, CardKind::Reaction])
    }
}
struct Guard;
impl CardEffect for Guard {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            Ok(Resolution::Done)
        })
    }

    fn react<'a>(
        &'a self,
        _game: &'a mut Game,
        _player: ActorId,
        _card: CardId,
        _attack: &'a CardKey,
    ) -> EffectFuture<'a, ()> {
        Box::pin(async { Err(Interrupt::Defended) })
    }
}

/// Breaks the game as soon as it is set up.
pub fn crash() -> Card {
    Card {
        hooks: vec![HookPoint::Setup],
        effect: effect(Crash),
        ..action("test_crash", 2, vec![CardKind::Action])
    }
}
struct Crash;
impl CardEffect for Crash {
    fn on_hook<'a>(
        &'a self,
        _game: &'a mut Game,
        _event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        panic!("test crash")
    }
}

/// The next action is played twice.
pub fn twice() -> Card {
    Card {
        effect: effect(Twice),
        ..action("test_twice", 3, vec![CardKind::Action])
    }
}
struct Twice;
impl CardEffect for Twice {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            // the repeated action needs an action of its own
            game.state.board_mut(player).remaining_actions += 1;
            Ok(Resolution::PlayNextActionTimes(2))
        })
    }
}
