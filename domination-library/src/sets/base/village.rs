use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "village".into(),
        name: "Village".into(),
        set: "base".into(),
        text: "+1 Card, +2 Actions.".into(),
        cost: 3,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Village),
        ..Default::default()
    }
}

struct Village;
impl CardEffect for Village {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 2);
            Ok(Resolution::Done)
        })
    }
}
