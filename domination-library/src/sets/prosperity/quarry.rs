use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::modifiers::{CostTarget, LifeTime};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "quarry".into(),
        name: "Quarry".into(),
        set: "prosperity".into(),
        text: "Worth 1 Coin. While this is in play, Action cards cost 2 Coins less, but not less than 0.".into(),
        cost: 4,
        worth: 1,
        kinds: vec![CardKind::Treasure],
        optional: true,
        effect: effect(Quarry),
        ..Default::default()
    }
}

/// Played cards stay in play until cleanup, so the discount lasts the turn.
struct Quarry;
impl CardEffect for Quarry {
    fn play<'a>(&'a self, game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.apply_cost_delta(CostTarget::Kind(CardKind::Action), -2, LifeTime::ThisTurn);
            Ok(Resolution::Done)
        })
    }
}
