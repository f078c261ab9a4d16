use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "bureaucrat".into(),
        name: "Bureaucrat".into(),
        set: "base".into(),
        text: "Gain a Silver card; put it on top of your deck. Each other player reveals a Victory card from his hand and puts it on his deck (or reveals a hand with no Victory cards).".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Bureaucrat),
        ..Default::default()
    }
}

struct Bureaucrat;
impl CardEffect for Bureaucrat {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.gain_card(player, &"silver".into(), GainTo::DeckTop)
                .await?;
            for victim in game.undefended_targets(player, &"bureaucrat".into()).await? {
                let victory = game.hand_views(victim, |c| c.is_victory());
                if victory.is_empty() {
                    let hand = game.state.board(victim).hand.clone();
                    game.reveal(victim, &hand);
                    continue;
                }
                let picked = game
                    .select_hand_cards(
                        victim,
                        SelectHandCards::new(
                            "Which victory card do you put on your deck?",
                            victory,
                            1,
                            1,
                            SelectPurpose::Other,
                        ),
                    )
                    .await?;
                for card in picked {
                    game.reveal(victim, &[card]);
                    game.move_card(victim, card, Zone::Hand, Zone::Deck);
                }
            }
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
    async fn bureaucrat() {
        let (mut game, p) = test_game(&["bureaucrat"], vec![bot(), bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["bureaucrat"]);
        let victim = set_hand(&mut game, p[1], &["copper", "duchy", "copper"]);
        set_hand(&mut game, p[2], &["copper", "silver"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert_eq!(
            game.state.board(p[0]).deck.last().map(|c| game.state.card_key(*c).as_str()),
            Some("silver")
        );
        assert_eq!(game.state.board(p[1]).deck.last(), Some(&victim[1]));
        assert_eq!(game.state.board(p[1]).hand.len(), 2);
        assert_eq!(game.state.board(p[2]).hand.len(), 2);
    }
}
