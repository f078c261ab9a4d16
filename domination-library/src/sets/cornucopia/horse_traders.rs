use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;
use tracing::debug;

pub fn card() -> Card {
    Card {
        key: "horse_traders".into(),
        name: "Horse Traders".into(),
        set: "cornucopia".into(),
        text: "+1 Buy, +3 Coins. Discard 2 cards. When another player plays an Attack card, you may set this aside from your hand. If you do, then at the start of your next turn, +1 Card and return this to your hand.".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Reaction],
        optional: true,
        hooks: vec![HookPoint::StartOfTurn],
        effect: effect(HorseTraders),
        ..Default::default()
    }
}

struct HorseTraders;
impl CardEffect for HorseTraders {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_buys(player, 1);
            game.add_coins(player, 3);
            let hand = game.hand_views(player, |_| true);
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new("Discard 2 cards.", hand, 2, 2, SelectPurpose::Discard),
                )
                .await?;
            let views = game.card_views(&picked);
            for card in picked {
                game.discard_card(player, card, Zone::Hand);
            }
            let name = game.state.player_name(player);
            game.notify_others(player, format!("{name} discards"), views);
            Ok(Resolution::Done)
        })
    }

    fn react<'a>(
        &'a self,
        game: &'a mut Game,
        player: ActorId,
        card: CardId,
        _attack: &'a CardKey,
    ) -> EffectFuture<'a, ()> {
        Box::pin(async move {
            game.move_card(player, card, Zone::Hand, Zone::Aside);
            Ok(())
        })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::StartOfTurn { player } = *event else {
            return None;
        };
        let aside = game
            .state
            .board(player)
            .aside
            .iter()
            .copied()
            .filter(|c| game.state.card_key(*c) == "horse_traders")
            .collect::<Vec<_>>();
        for card in aside {
            debug!("{player} takes back {card}");
            game.move_card(player, card, Zone::Aside, Zone::Hand);
            game.draw_cards(player, 1);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_game;
    use domination_sim::hooks::HookEvent;
    use domination_sim::tests::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn horse_traders() {
        let (mut game, p) = test_game(&["horse_traders"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["horse_traders", "estate", "gold", "curse"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        let board = game.state.board(p[0]);
        assert_eq!(board.coins, 3);
        assert_eq!(board.remaining_buys, 2);
        assert_eq!(keys_of(&game, &board.hand), vec!["gold"]);
    }

    #[tokio::test]
    async fn set_aside_until_next_turn() {
        let (mut game, p) = test_game(&["horse_traders", "militia"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["militia"]);
        let theirs = set_hand(
            &mut game,
            p[1],
            &["horse_traders", "copper", "estate", "silver", "gold"],
        );

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        // set aside, then still attacked
        let board = game.state.board(p[1]);
        assert_eq!(board.aside, vec![theirs[0]]);
        assert_eq!(keys_of(&game, &board.hand), vec!["copper", "silver", "gold"]);

        game.fire_hook(HookEvent::StartOfTurn { player: p[1] })
            .await
            .unwrap();
        let board = game.state.board(p[1]);
        assert!(board.aside.is_empty());
        assert_eq!(board.hand.len(), 5);
        assert!(board.hand.contains(&theirs[0]));
    }
}
