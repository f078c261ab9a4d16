use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "bazaar".into(),
        name: "Bazaar".into(),
        set: "seaside".into(),
        text: "+1 Card, +2 Actions, +1 Coin.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Bazaar),
        ..Default::default()
    }
}

struct Bazaar;
impl CardEffect for Bazaar {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 2);
            game.add_coins(player, 1);
            Ok(Resolution::Done)
        })
    }
}
