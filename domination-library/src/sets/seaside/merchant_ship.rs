use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "merchant_ship".into(),
        name: "Merchant Ship".into(),
        set: "seaside".into(),
        text: "Now and at the start of your next turn: +2 Coins.".into(),
        cost: 5,
        kinds: vec![CardKind::Action, CardKind::Duration],
        optional: true,
        effect: effect(MerchantShip),
        ..Default::default()
    }
}

struct MerchantShip;
impl CardEffect for MerchantShip {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_coins(player, 2);
            Ok(Resolution::Done)
        })
    }

    fn duration<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a, ()> {
        Box::pin(async move {
            game.add_coins(player, 2);
            Ok(())
        })
    }
}
