use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "market".into(),
        name: "Market".into(),
        set: "base".into(),
        text: "+1 Card, +1 Action, +1 Buy, +1 Coin.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Market),
        ..Default::default()
    }
}

struct Market;
impl CardEffect for Market {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            game.add_buys(player, 1);
            game.add_coins(player, 1);
            Ok(Resolution::Done)
        })
    }
}
