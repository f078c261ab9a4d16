use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "militia".into(),
        name: "Militia".into(),
        set: "base".into(),
        text: "+2 Coins. Each other player discards down to 3 cards in his hand.".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Militia),
        ..Default::default()
    }
}

struct Militia;
impl CardEffect for Militia {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_coins(player, 2);
            let attack: CardKey = "militia".into();
            let mut victims = vec![];
            for victim in game.attack_targets(player) {
                if !game.defends_check(victim, &attack).await? {
                    victims.push(victim);
                }
            }
            game.discard_down_to_each(&victims, 3).await?;
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
    async fn militia() {
        let (mut game, p) = test_game(&["militia"], vec![bot(), bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["militia"]);
        set_hand(&mut game, p[1], &["copper", "estate", "silver", "gold", "curse"]);
        set_hand(&mut game, p[2], &["copper", "silver"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert_eq!(game.state.board(p[0]).coins, 2);
        assert_eq!(
            keys_of(&game, &game.state.board(p[1]).hand),
            vec!["copper", "silver", "gold"]
        );
        assert_eq!(game.state.board(p[2]).hand.len(), 2);
    }
}
