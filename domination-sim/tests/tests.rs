use std::sync::Arc;
use std::time::{Duration, Instant};

use domination_sim::checkpoint::Checkpoint;
use domination_sim::client::{ActorChannel, ActorKind, KickOutcome, Table};
use domination_sim::error::ReplyError;
use domination_sim::events::{
    DecisionRequest, PendingRequest, Reply, SelectHandCards, SelectPurpose, YesNo,
};
use domination_sim::gameplay::{GameOutcome, GameOverReason, Phase};
use domination_sim::hooks::HookEvent;
use domination_sim::modifiers::{CostTarget, LifeTime};
use domination_sim::prompters::{Policy, WisePrompter};
use domination_sim::scheduler::{GameRunner, RunnerState};
use domination_sim::tests::*;
use domination_sim::zones::{GainTo, Zone};
use pretty_assertions::assert_eq;

fn wait_for_pending(table: &Table, channel: &ActorChannel) -> PendingRequest {
    let deadline = Instant::now() + Duration::from_secs(10);
    loop {
        let seqno = table.seqno();
        if let Some(pending) = channel.pending_request() {
            return pending;
        }
        assert!(Instant::now() < deadline, "no request for {}", channel.actor);
        table
            .status
            .wait_for_update_timeout(seqno, Duration::from_millis(200));
    }
}

fn recording_bot() -> (Option<Box<dyn Policy>>, Arc<std::sync::Mutex<Vec<String>>>) {
    let prompter = RecordingPrompter::new(WisePrompter::new());
    let seen = prompter.seen.clone();
    (Some(Box::new(prompter)), seen)
}

#[tokio::test]
async fn setup_totals_for_two_players() {
    let (mut game, players) = setup_bot_game(&["test_lab"]);
    game.start_game().await.unwrap();

    let pile = |key: &str| game.state.supply[key].len();
    assert_eq!(pile("copper"), 60);
    assert_eq!(pile("silver"), 40);
    assert_eq!(pile("gold"), 30);
    assert_eq!(pile("estate"), 8);
    assert_eq!(pile("duchy"), 8);
    assert_eq!(pile("province"), 8);
    assert_eq!(pile("curse"), 10);
    assert_eq!(pile("test_lab"), 10);
    assert!(!game.state.supply.contains_key("potion"));

    for player in players {
        let board = game.state.board(player);
        assert_eq!(board.hand.len(), 5);
        assert_eq!(board.deck.len(), 5);
        let mut keys = keys_of(&game, &board.all_cards().collect::<Vec<_>>());
        keys.sort();
        let mut expected = vec!["copper"; 7];
        expected.extend(["estate"; 3]);
        assert_eq!(keys, expected);
    }

    // 164 basic supply cards, 10 kingdom cards, 20 starting cards
    assert_eq!(game.state.card_map.len(), 194);
    assert_cards_conserved(&game.state);
    assert_eq!(game.state.phase, Phase::BetweenTurns);
    assert_eq!(game.state.round, 1);
}

#[tokio::test]
async fn cost_delta_lasts_for_the_turn() {
    let (mut game, players) = setup_bot_game(&["test_discount"]);
    let p1 = players[0];
    game.start_game().await.unwrap();
    game.state.active_player = Some(p1);
    game.state.board_mut(p1).start_turn();

    let card = set_hand(&mut game, p1, &["test_discount"])[0];
    game.move_card(p1, card, Zone::Hand, Zone::PlayArea);
    game.play_action_card(p1, card).await.unwrap();

    assert_eq!(game.effective_cost("copper"), 0);
    assert_eq!(game.effective_cost("silver"), 2);
    assert_eq!(game.effective_cost("province"), 7);
    assert_eq!(game.card_info("silver").unwrap().cost, 2);

    game.cleanup_phase(p1).await.unwrap();

    assert_eq!(game.effective_cost("copper"), 0);
    assert_eq!(game.effective_cost("silver"), 3);
    assert_eq!(game.effective_cost("province"), 8);
    assert!(game.state.cost_modifiers.is_empty());
}

#[tokio::test]
async fn last_province_ends_the_game_mid_buy() {
    let (mut game, players) = setup_bot_game(&[]);
    let p1 = players[0];
    game.start_game().await.unwrap();

    // only one province left
    let pile = game.state.supply.get_mut("province").unwrap();
    let extra = pile.split_off(1);
    game.state.trash.extend(extra);

    game.state.active_player = Some(p1);
    game.state.phase = Phase::Buy;
    game.state.board_mut(p1).start_turn();
    game.state.board_mut(p1).remaining_buys = 3;
    set_hand(&mut game, p1, &["gold", "gold", "gold", "gold", "gold", "gold"]);

    let outcome = game.buy_phase(p1).await.unwrap_err();
    assert_eq!(
        outcome.reason,
        GameOverReason::ScarcePileEmpty("province".into())
    );
    // the other buys were never spent
    assert_eq!(game.state.board(p1).remaining_buys, 2);
    assert_eq!(game.state.board(p1).coins, 10);
    assert_eq!(game.state.board(p1).bought_this_turn, vec!["province".to_string()]);

    let outcome = game.end_of_game(outcome);
    assert_eq!(game.state.phase, Phase::GameOver);
    for player in &players {
        let board = game.state.board(*player);
        assert!(board.hand.is_empty());
        assert!(board.discard.is_empty());
        assert!(board.play_area.is_empty());
    }
    assert_cards_conserved(&game.state);

    let report = game.report().unwrap();
    assert_eq!(report.outcome, outcome);
    // 3 estates and the province
    assert_eq!(report.scores[0].points, 9);
    assert_eq!(report.scores[1].points, 3);
}

#[test]
fn kick_answers_the_outstanding_request_once() {
    let (game, players) = setup_game(test_library(), &[], vec![None, bot()]);
    let p1 = players[0];
    let mut runner = GameRunner::from_game(game);
    let table = runner.table().clone();
    let channel = table.channel(p1).unwrap();
    runner.start().unwrap();
    assert_eq!(runner.state(), RunnerState::Running);

    let pending = wait_for_pending(&table, &channel);
    assert_eq!(pending.actor, p1);

    let outcome = runner.kick(p1).unwrap();
    assert_eq!(outcome, KickOutcome::Answered(pending.id));
    assert_eq!(
        channel.reply(pending.id, Reply::Deal(None)),
        Err(ReplyError::NoPendingRequest)
    );
    // nothing left to answer a second time
    assert_eq!(runner.kick(p1).unwrap(), KickOutcome::Idle);

    let report = runner.join().unwrap();
    assert!(matches!(
        report.outcome.reason,
        GameOverReason::ScarcePileEmpty(_) | GameOverReason::PilesEmpty(_)
    ));
    assert!(channel.is_removed());
    assert!(channel.pending_request().is_none());
    // the bot kept playing alone
    let bot_score = report.scores.iter().find(|s| s.actor == players[1]).unwrap();
    assert!(bot_score.points > 3);
    let kicked = report.scores.iter().find(|s| s.actor == p1).unwrap();
    assert_eq!(kicked.points, 3);
}

#[test]
fn invalid_reply_is_issued_again() {
    let (game, players) = setup_game(test_library(), &[], vec![None, bot()]);
    let p1 = players[0];
    let mut runner = GameRunner::from_game(game);
    let table = runner.table().clone();
    let channel = table.channel(p1).unwrap();
    runner.start().unwrap();

    let first = wait_for_pending(&table, &channel);
    assert!(first.error.is_none());
    channel
        .reply(first.id, Reply::Deal(Some("province".into())))
        .unwrap();

    let second = loop {
        let pending = wait_for_pending(&table, &channel);
        if pending.id != first.id {
            break pending;
        }
    };
    assert!(second.id > first.id);
    assert_eq!(second.error.as_deref(), Some("province can't be bought"));
    assert_eq!(second.request, first.request);
    assert_eq!(
        channel.reply(first.id, Reply::Deal(None)),
        Err(ReplyError::StaleRequest {
            expected: second.id,
            got: first.id
        })
    );

    runner.cancel();
    let report = runner.join().unwrap();
    assert_eq!(report.outcome.reason, GameOverReason::Aborted);
}

#[test]
fn cancel_wakes_a_waiting_worker() {
    let (game, players) = setup_game(test_library(), &[], vec![None, bot()]);
    let p1 = players[0];
    let mut runner = GameRunner::from_game(game);
    let table = runner.table().clone();
    let channel = table.channel(p1).unwrap();
    runner.start().unwrap();
    wait_for_pending(&table, &channel);

    let seqno = runner.seqno();
    runner.cancel();
    let report = runner.join().unwrap();

    assert!(runner.seqno() > seqno);
    assert_eq!(runner.state(), RunnerState::Ended);
    assert_eq!(report.outcome.reason, GameOverReason::Aborted);
    assert_eq!(report.scores.len(), 2);
    // every card was folded back, scores only count starting estates
    assert!(report.scores.iter().all(|s| s.points == 3));
    let last = channel.drain_notices().pop().unwrap();
    assert!(last.message.starts_with("game over, the game was cancelled"));
}

#[test]
fn worker_panic_becomes_a_notice() {
    let mut runner = GameRunner::new(test_config(&["test_crash"]), Arc::new(test_library()));
    let owner = runner.join_player("owner", None).unwrap();
    runner.join_player("other", bot()).unwrap();
    runner.start().unwrap();

    let report = runner.join().unwrap();
    assert_eq!(
        report.outcome.reason,
        GameOverReason::Fault("test crash".into())
    );
    assert_eq!(runner.state(), RunnerState::Ended);
    let messages: Vec<_> = owner
        .drain_notices()
        .into_iter()
        .map(|n| n.message)
        .collect();
    assert!(messages.contains(&"the game crashed: test crash".to_string()));
}

#[test]
fn human_client_plays_a_full_game() {
    let mut runner = GameRunner::new(test_config(&["test_lab"]), Arc::new(test_library()));
    let human = runner.join_player("human", None).unwrap();
    runner.join_player("bot", bot()).unwrap();
    let kibitzer = runner.join_kibitzer("watcher");
    let table = runner.table().clone();

    let (handler, client) = spawn_client(table.clone(), human, WisePrompter::new());
    let (watched, watcher) = spawn_client(table, kibitzer, WisePrompter::new());
    runner.start().unwrap();

    let report = runner.join().unwrap();
    assert_eq!(client.join().unwrap(), Some(report.clone()));
    assert_eq!(watcher.join().unwrap(), Some(report));
    assert!(handler.messages().iter().any(|m| m == "your turn"));
    assert!(watched.messages().iter().any(|m| m.starts_with("game over")));
}

#[tokio::test]
async fn empty_hand_needs_no_reply() {
    let (mut game, players) = setup_game(test_library(), &[], vec![None, None]);
    let p1 = players[0];
    game.state.board_mut(p1).hand.clear();

    let request = SelectHandCards::new("Discard any number of cards.", vec![], 0, 3, SelectPurpose::Discard);
    let picked = tokio::time::timeout(Duration::from_secs(5), game.select_hand_cards(p1, request))
        .await
        .expect("no request should be issued");
    assert_eq!(picked, Ok(vec![]));
    assert!(game.table.channel(p1).unwrap().pending_request().is_none());
}

#[tokio::test]
async fn aborted_purchase_keeps_resources() {
    let (recorder, seen) = recording_bot();
    let (mut game, players) = setup_game(test_library(), &["test_embargo"], vec![recorder, bot()]);
    let p1 = players[0];
    game.start_game().await.unwrap();
    game.state.active_player = Some(p1);
    game.state.board_mut(p1).start_turn();
    set_hand(&mut game, p1, &["gold", "gold"]);

    game.buy_phase(p1).await.unwrap();

    let seen = seen.lock().unwrap();
    // gold is refused, the next offer still has every coin
    assert!(seen[0].contains("coins: 6"));
    assert!(seen[0].ends_with("Deal(Some(\"gold\"))"));
    assert!(seen[1].contains("coins: 6"));
    assert!(!seen[1].contains("key: \"gold\""));

    let board = game.state.board(p1);
    assert_eq!(board.forbidden_buys, vec!["gold".to_string()]);
    assert_eq!(board.bought_this_turn, vec!["duchy".to_string()]);
    assert_eq!(board.coins, 1);
    assert_eq!(game.state.supply["gold"].len(), 30);
}

#[tokio::test]
async fn hooks_run_in_catalog_order() {
    let (mut game, players) = setup_bot_game(&["test_hook_second", "test_hook_first"]);
    game.fire_hook(HookEvent::StartOfTurn { player: players[0] })
        .await
        .unwrap();
    assert_eq!(game.state.counter("hook_order"), 12);
}

#[tokio::test]
async fn reaction_resolves_before_the_next_target() {
    let (mut game, players) = setup_game(
        test_library(),
        &["test_pillage", "test_guard"],
        vec![bot(), bot(), bot()],
    );
    let (p1, p2, p3) = (players[0], players[1], players[2]);
    game.start_game().await.unwrap();
    game.state.active_player = Some(p1);
    game.state.board_mut(p1).start_turn();

    set_hand(&mut game, p2, &["test_guard", "estate"]);
    set_hand(&mut game, p3, &["copper", "estate"]);
    let card = set_hand(&mut game, p1, &["test_pillage"])[0];
    game.move_card(p1, card, Zone::Hand, Zone::PlayArea);
    game.play_action_card(p1, card).await.unwrap();

    // p2 revealed and was not affected
    assert_eq!(game.state.board(p2).hand.len(), 2);
    assert!(game.state.board(p2).discard.is_empty());
    // p3 discarded the estate and gained a curse
    let discard = keys_of(&game, &game.state.board(p3).discard);
    assert_eq!(discard, vec!["estate".to_string(), "curse".to_string()]);
    assert_eq!(game.state.supply["curse"].len(), 19);
}

#[tokio::test]
async fn next_action_is_played_twice() {
    let (mut game, players) = setup_game(
        test_library(),
        &["test_twice", "test_lab"],
        vec![buffered(&[&[0], &[0]]), bot()],
    );
    let p1 = players[0];
    game.start_game().await.unwrap();
    game.state.active_player = Some(p1);
    game.state.board_mut(p1).start_turn();
    set_hand(&mut game, p1, &["test_twice", "test_lab"]);

    game.action_phase(p1).await.unwrap();

    let board = game.state.board(p1);
    assert_eq!(board.play_area.len(), 2);
    assert_eq!(board.hand.len(), 4);
    assert_eq!(board.remaining_actions, 2);
}

#[tokio::test]
async fn full_bot_game_keeps_every_card() {
    let (mut game, _) = setup_bot_game(&["test_lab", "test_pillage", "test_guard", "test_discount"]);
    let outcome = game.play_game().await;
    assert!(matches!(
        outcome.reason,
        GameOverReason::ScarcePileEmpty(_) | GameOverReason::PilesEmpty(_)
    ));
    assert_eq!(game.state.phase, Phase::GameOver);
    assert_cards_conserved(&game.state);
    for board in &game.state.players {
        assert_eq!(board.deck.len(), board.all_cards().count());
    }
}

#[tokio::test]
async fn gained_card_lands_where_asked() {
    let (mut game, players) = setup_bot_game(&[]);
    let p1 = players[0];
    let card = game
        .gain_card(p1, &"silver".into(), GainTo::DeckTop)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(game.state.board(p1).deck.last(), Some(&card));
    assert_eq!(game.state.supply["silver"].len(), 39);
}

#[tokio::test]
async fn restored_game_asks_the_same_questions() {
    let (first, first_seen) = recording_bot();
    let (second, second_seen) = recording_bot();
    let (mut game, _) = setup_game(test_library(), &["test_lab", "test_pillage"], vec![first, second]);
    game.start_game().await.unwrap();
    for _ in 0..3 {
        game.play_round().await.unwrap();
    }

    let blob = Checkpoint::capture(&game).unwrap().encode().unwrap();
    let before = (
        first_seen.lock().unwrap().len(),
        second_seen.lock().unwrap().len(),
    );
    for _ in 0..3 {
        let _ = game.play_round().await;
    }

    let checkpoint = Checkpoint::decode(&blob).unwrap();
    let table = Table::new();
    let (restored_first, restored_first_seen) = recording_bot();
    let (restored_second, restored_second_seen) = recording_bot();
    let mut policies = vec![restored_first, restored_second].into_iter();
    for (actor, name) in checkpoint.players() {
        table.attach_player(actor, name, policies.next().flatten());
    }
    let mut restored = checkpoint
        .restore((*game.library).clone(), table.clone())
        .unwrap();
    for _ in 0..3 {
        let _ = restored.play_round().await;
    }

    assert_eq!(
        first_seen.lock().unwrap()[before.0..].to_vec(),
        *restored_first_seen.lock().unwrap()
    );
    assert_eq!(
        second_seen.lock().unwrap()[before.1..].to_vec(),
        *restored_second_seen.lock().unwrap()
    );
    assert_eq!(game.table.next_request_id(), table.next_request_id());
    assert_eq!(game.state, restored.state);
}

#[tokio::test]
async fn checkpoint_is_taken_at_the_top_of_a_round() {
    let (mut game, _) = setup_bot_game(&[]);
    game.start_game().await.unwrap();
    assert!(game.table.latest_checkpoint().is_none());

    game.table.request_checkpoint();
    game.play_round().await.unwrap();
    let blob = game.table.latest_checkpoint().unwrap();
    let checkpoint = Checkpoint::decode(&blob).unwrap();
    assert_eq!(checkpoint.round, 1);
    assert_eq!(game.state.round, 2);

    // requests are one-shot
    game.play_round().await.unwrap();
    let again = Checkpoint::decode(&game.table.latest_checkpoint().unwrap()).unwrap();
    assert_eq!(again.round, 1);
}

#[tokio::test]
async fn one_outstanding_request_per_actor() {
    let table = Table::new();
    let human = table.seat("human", ActorKind::Player, None);
    let other = table.seat("other", ActorKind::Player, None);

    let mut first = Box::pin(table.ask(human.actor, YesNo::new("first?").into()));
    assert!(futures::poll!(first.as_mut()).is_pending());
    let pending = human.pending_request().unwrap();

    let refused = GameOutcome::new(GameOverReason::Fault(
        ReplyError::AlreadyPending(human.actor).to_string(),
    ));
    assert_eq!(
        table.ask(human.actor, YesNo::new("second?").into()).await,
        Err(refused.clone())
    );
    let requests: Vec<(_, DecisionRequest)> = vec![
        (other.actor, YesNo::new("other?").into()),
        (human.actor, YesNo::new("again?").into()),
    ];
    assert_eq!(table.ask_each(requests).await, Err(refused));
    // the fan-out took back what it had already opened
    assert!(other.pending_request().is_none());

    // the first request is untouched and can still be answered
    assert_eq!(human.pending_request(), Some(pending.clone()));
    human.reply(pending.id, Reply::YesNo(true)).unwrap();
    assert_eq!(first.await, Ok(Reply::YesNo(true)));
}

#[tokio::test]
async fn fan_out_replies_keep_the_request_order() {
    let table = Table::new();
    let first = table.seat("first", ActorKind::Player, None);
    let second = table.seat("second", ActorKind::Player, None);

    let requests: Vec<(_, DecisionRequest)> = vec![
        (first.actor, YesNo::new("first?").into()),
        (second.actor, YesNo::new("second?").into()),
    ];
    let mut asked = Box::pin(table.ask_each(requests));
    assert!(futures::poll!(asked.as_mut()).is_pending());
    let first_pending = first.pending_request().unwrap();
    let second_pending = second.pending_request().unwrap();

    // answered in reverse order, the first answer is refused
    second.reply(second_pending.id, Reply::YesNo(false)).unwrap();
    first.reply(first_pending.id, Reply::Cards(vec![])).unwrap();
    assert!(futures::poll!(asked.as_mut()).is_pending());

    let reissued = first.pending_request().unwrap();
    assert!(reissued.id > second_pending.id);
    assert_eq!(reissued.request, first_pending.request);
    assert_eq!(reissued.error.as_deref(), Some("expected a yes or no answer"));
    assert!(second.pending_request().is_none());
    first.reply(reissued.id, Reply::YesNo(true)).unwrap();

    assert_eq!(
        asked.await,
        Ok(vec![Reply::YesNo(true), Reply::YesNo(false)])
    );
}

#[tokio::test]
async fn turn_cost_delta_needs_a_turn() {
    let (mut game, _) = setup_bot_game(&[]);
    game.start_game().await.unwrap();
    assert_eq!(game.state.active_player, None);

    game.apply_cost_delta(CostTarget::AllCards, -1, LifeTime::ThisTurn);
    assert!(game.state.cost_modifiers.is_empty());

    game.apply_cost_delta(CostTarget::AllCards, -1, LifeTime::ThisGame);
    assert_eq!(game.effective_cost("province"), 7);
    assert!(game.state.players.iter().all(|p| p.turn_cleanups.is_empty()));
}
