use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "festival".into(),
        name: "Festival".into(),
        set: "base".into(),
        text: "+2 Actions, +1 Buy, +2 Coins.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Festival),
        ..Default::default()
    }
}

struct Festival;
impl CardEffect for Festival {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_actions(player, 2);
            game.add_buys(player, 1);
            game.add_coins(player, 2);
            Ok(Resolution::Done)
        })
    }
}
