use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "remodel".into(),
        name: "Remodel".into(),
        set: "base".into(),
        text: "Trash a card from your hand. Gain a card costing up to 2 Coins more than the trashed card.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Remodel),
        ..Default::default()
    }
}

struct Remodel;
impl CardEffect for Remodel {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let hand = game.hand_views(player, |_| true);
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which card do you want to trash?",
                        hand,
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
            game.gain_up_to(player, cost + 2, |_| true, GainTo::Discard)
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
    async fn remodel() {
        let (mut game, p) = test_game(&["remodel"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["remodel", "gold", "estate"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert_eq!(keys_of(&game, &game.state.trash), vec!["estate"]);
        assert_eq!(keys_of(&game, &game.state.board(p[0]).discard), vec!["remodel"]);
    }
}
