use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "monument".into(),
        name: "Monument".into(),
        set: "prosperity".into(),
        text: "+2 Coins, +1 Victory token.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Monument),
        ..Default::default()
    }
}

struct Monument;
impl CardEffect for Monument {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_coins(player, 2);
            game.add_tokens(player, 1);
            Ok(Resolution::Done)
        })
    }
}
