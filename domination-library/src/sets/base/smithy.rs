use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "smithy".into(),
        name: "Smithy".into(),
        set: "base".into(),
        text: "+3 Cards.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Smithy),
        ..Default::default()
    }
}

struct Smithy;
impl CardEffect for Smithy {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 3);
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
    async fn smithy() {
        let (mut game, p) = test_game(&["smithy"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["smithy", "copper"]);
        stack_deck(&mut game, p[0], &["gold", "silver", "duchy"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        let board = game.state.board(p[0]);
        assert_eq!(
            keys_of(&game, &board.hand),
            vec!["copper", "duchy", "silver", "gold"]
        );
        assert_eq!(board.remaining_actions, 0);
    }
}
