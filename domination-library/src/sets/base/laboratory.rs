use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "laboratory".into(),
        name: "Laboratory".into(),
        set: "base".into(),
        text: "+2 Cards, +1 Action.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Laboratory),
        ..Default::default()
    }
}

struct Laboratory;
impl CardEffect for Laboratory {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 2);
            game.add_actions(player, 1);
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
    async fn laboratory() {
        let (mut game, p) = test_game(&["laboratory"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["laboratory"]);
        stack_deck(&mut game, p[0], &["silver", "gold"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        let board = game.state.board(p[0]);
        assert_eq!(keys_of(&game, &board.hand), vec!["gold", "silver"]);
        assert_eq!(board.remaining_actions, 1);
    }
}
