use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "kings_court".into(),
        name: "King's Court".into(),
        set: "prosperity".into(),
        text: "You may choose an Action card in your hand. Play it three times.".into(),
        cost: 7,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(KingsCourt),
        ..Default::default()
    }
}

struct KingsCourt;
impl CardEffect for KingsCourt {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let actions = game.hand_views(player, |c| c.is_action());
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which action card do you want to play three times?",
                        actions,
                        0,
                        1,
                        SelectPurpose::Play,
                    ),
                )
                .await?;
            let Some(card) = picked.first().copied() else {
                return Ok(Resolution::Done);
            };

            game.move_card(player, card, Zone::Hand, Zone::PlayArea);
            let views = game.card_views(&[card]);
            let name = game.state.player_name(player);
            game.notify_others(player, format!("{name} plays three times"), views);

            // multipliers from a nested throne room or king's court add up for the next action
            let mut next_times = 0;
            for _ in 0..3 {
                if let Resolution::PlayNextActionTimes(n) = game.play_action_card(player, card).await? {
                    next_times += n;
                }
            }
            Ok(match next_times {
                0 => Resolution::Done,
                n => Resolution::PlayNextActionTimes(n),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::test_game;
    use domination_sim::tests::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn kings_court() {
        let (mut game, p) = test_game(&["kings_court", "village"], vec![bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["kings_court", "village", "estate"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        let board = game.state.board(p[0]);
        assert_eq!(board.play_area, vec![hand[0], hand[1]]);
        assert_eq!(board.hand.len(), 4);
        assert_eq!(board.remaining_actions, 6);
    }

    #[tokio::test]
    async fn kings_court_on_throne_room() {
        let (mut game, p) =
            test_game(&["kings_court", "throne_room", "village"], vec![bot(), bot()]).await;
        set_hand(&mut game, p[0], &["kings_court", "throne_room", "village"]);

        game.action_phase(p[0]).await.unwrap();

        // three throne rooms: village resolves six times
        let board = game.state.board(p[0]);
        assert_eq!(
            keys_of(&game, &board.play_area),
            vec!["kings_court", "throne_room", "village"]
        );
        assert_eq!(board.hand.len(), 6);
        assert_eq!(board.remaining_actions, 14);
    }

    #[tokio::test]
    async fn kings_court_may_play_nothing() {
        let (mut game, p) = test_game(&["kings_court", "village"], vec![buffered(&[&[]]), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["kings_court", "village"]);

        let resolution = play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert_eq!(resolution, domination_sim::effects::Resolution::Done);
        assert_eq!(game.state.board(p[0]).hand, vec![hand[1]]);
    }
}
