use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "cutpurse".into(),
        name: "Cutpurse".into(),
        set: "seaside".into(),
        text: "+2 Coins. Each other player discards a Copper card (or reveals a hand with no Copper).".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Cutpurse),
        ..Default::default()
    }
}

struct Cutpurse;
impl CardEffect for Cutpurse {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_coins(player, 2);
            for victim in game.undefended_targets(player, &"cutpurse".into()).await? {
                let hand = game.state.board(victim).hand.clone();
                match hand.iter().find(|c| game.state.card_key(**c) == "copper") {
                    Some(copper) => {
                        game.discard_card(victim, *copper, Zone::Hand);
                        let views = game.card_views(&[*copper]);
                        let name = game.state.player_name(victim);
                        game.notify_others(victim, format!("{name} discards"), views);
                    }
                    None => {
                        game.reveal(victim, &hand);
                    }
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
    async fn cutpurse() {
        let (mut game, p) = test_game(&["cutpurse"], vec![bot(), bot(), bot()]).await;
        let hand = set_hand(&mut game, p[0], &["cutpurse"]);
        set_hand(&mut game, p[1], &["estate", "copper", "copper"]);
        set_hand(&mut game, p[2], &["silver", "estate"]);

        play_from_hand(&mut game, p[0], hand[0]).await.unwrap();

        assert_eq!(game.state.board(p[0]).coins, 2);
        assert_eq!(
            keys_of(&game, &game.state.board(p[1]).hand),
            vec!["estate", "copper"]
        );
        assert_eq!(keys_of(&game, &game.state.board(p[1]).discard), vec!["copper"]);
        assert_eq!(game.state.board(p[2]).hand.len(), 2);
    }
}
