use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "great_hall".into(),
        name: "Great Hall".into(),
        set: "intrigue".into(),
        text: "+1 Card, +1 Action. Worth 1 Victory Point.".into(),
        cost: 3,
        points: 1,
        kinds: vec![CardKind::Action, CardKind::Victory],
        optional: true,
        effect: effect(GreatHall),
        ..Default::default()
    }
}

struct GreatHall;
impl CardEffect for GreatHall {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            Ok(Resolution::Done)
        })
    }
}
