use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "caravan".into(),
        name: "Caravan".into(),
        set: "seaside".into(),
        text: "+1 Card, +1 Action. At the start of your next turn, +1 Card.".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Duration],
        optional: true,
        effect: effect(Caravan),
        ..Default::default()
    }
}

struct Caravan;
impl CardEffect for Caravan {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            Ok(Resolution::Done)
        })
    }

    fn duration<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a, ()> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_game;
    use domination_sim::tests::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn caravan() {
        let (mut game, p) = test_game(&["caravan"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["caravan"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();
        assert_eq!(game.state.board(p[0]).hand.len(), 1);
        assert_eq!(game.state.board(p[0]).remaining_actions, 1);

        game.cleanup_phase(p[0]).await.unwrap();
        assert_eq!(game.state.board(p[0]).duration, vec![hand[0]]);

        start_turn(&mut game, p[0]);
        game.resolve_durations(p[0]).await.unwrap();
        assert_eq!(game.state.board(p[0]).hand.len(), 6);

        game.cleanup_phase(p[0]).await.unwrap();
        let board = game.state.board(p[0]);
        assert!(board.duration.is_empty());
        assert!(board.discard.contains(&hand[0]));
    }
}
