use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::modifiers::{CostTarget, LifeTime};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "bridge".into(),
        name: "Bridge".into(),
        set: "intrigue".into(),
        text: "+1 Buy, +1 Coin. All cards (including cards in players' hands) cost 1 Coin less this turn, but not less than 0.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Bridge),
        ..Default::default()
    }
}

struct Bridge;
impl CardEffect for Bridge {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_buys(player, 1);
            game.add_coins(player, 1);
            game.apply_cost_delta(CostTarget::AllCards, -1, LifeTime::ThisTurn);
            Ok(Resolution::Done)
        })
    }
}
