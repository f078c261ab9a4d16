use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "woodcutter".into(),
        name: "Woodcutter".into(),
        set: "base".into(),
        text: "+1 Buy, +2 Coins.".into(),
        cost: 3,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Woodcutter),
        ..Default::default()
    }
}

struct Woodcutter;
impl CardEffect for Woodcutter {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_buys(player, 1);
            game.add_coins(player, 2);
            Ok(Resolution::Done)
        })
    }
}
