use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "goons".into(),
        name: "Goons".into(),
        set: "prosperity".into(),
        text: "+1 Buy, +2 Coins. Each other player discards down to 3 cards in hand. While this is in play, when you buy a card, +1 Victory token.".into(),
        cost: 6,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        hooks: vec![HookPoint::BuyCard],
        effect: effect(Goons),
        ..Default::default()
    }
}

struct Goons;
impl CardEffect for Goons {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_buys(player, 1);
            game.add_coins(player, 2);
            for victim in game.undefended_targets(player, &"goons".into()).await? {
                game.discard_down_to(victim, 3).await?;
            }
            Ok(Resolution::Done)
        })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::BuyCard { player, .. } = *event else {
            return None;
        };
        let in_play = game
            .state
            .board(player)
            .play_area
            .iter()
            .filter(|c| game.state.card_key(**c) == "goons")
            .count() as u32;
        if in_play == 0 {
            return None;
        }
        Some(Box::pin(async move {
            game.add_tokens(player, in_play);
            Ok(HookOutcome::Continue)
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_game;
    use domination_sim::tests::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn goons() {
        let (mut game, p) = test_game(&["goons"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["goons", "gold", "gold"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();
        assert_eq!(game.state.board(p[1]).hand.len(), 3);

        // buys a province with 8 coins, then nothing worth buying is left
        game.buy_phase(p[0]).await.unwrap();

        let board = game.state.board(p[0]);
        assert_eq!(keys_of(&game, &board.discard), vec!["province"]);
        assert_eq!(board.tokens, 1);
        assert_eq!(game.points(p[0]), 3 + 6 + 1);
    }
}
