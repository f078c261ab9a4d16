use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::modifiers::{CostTarget, LifeTime};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "highway".into(),
        name: "Highway".into(),
        set: "hinterlands".into(),
        text: "+1 Card, +1 Action. While this is in play, cards cost 1 Coin less, but not less than 0.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Highway),
        ..Default::default()
    }
}

struct Highway;
impl CardEffect for Highway {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            game.apply_cost_delta(CostTarget::AllCards, -1, LifeTime::ThisTurn);
            Ok(Resolution::Done)
        })
    }
}
