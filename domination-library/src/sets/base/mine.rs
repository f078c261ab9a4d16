use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "mine".into(),
        name: "Mine".into(),
        set: "base".into(),
        text: "Trash a Treasure card from your hand. Gain a Treasure card costing up to 3 Coins more; put it into your hand.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Mine),
        ..Default::default()
    }
}

struct Mine;
impl CardEffect for Mine {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let treasures = game.hand_views(player, |c| c.is_treasure());
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which treasure do you want to trash?",
                        treasures,
                        1,
                        1,
                        SelectPurpose::Trash,
                    ),
                )
                .await?;
            let Some(card) = picked.first().copied() else {
                return Ok(Resolution::Done);
            };

            let cost = game.effective_cost(game.state.card_key(card));
            game.trash_card(player, card, Zone::Hand);
            game.gain_up_to(player, cost + 3, |c| c.is_treasure(), GainTo::Hand)
                .await?;
            Ok(Resolution::Done)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_game;
    use domination_sim::tests::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn mine() {
        let (mut game, p) = test_game(&["mine"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["mine", "copper", "estate"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert_eq!(keys_of(&game, &game.state.trash), vec!["copper"]);
        assert_eq!(
            keys_of(&game, &game.state.board(p[0]).hand),
            vec!["estate", "silver"]
        );
    }

    #[tokio::test]
    async fn mine_without_treasure() {
        let (mut game, p) = test_game(&["mine"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["mine", "estate"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert!(game.state.trash.is_empty());
        assert_eq!(game.state.board(p[0]).hand.len(), 1);
    }
}
