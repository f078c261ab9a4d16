use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "throne_room".into(),
        name: "Throne Room".into(),
        set: "base".into(),
        text: "Choose an Action card in your hand. Play it twice.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(ThroneRoom),
        ..Default::default()
    }
}

/// The action phase resolves the next action twice, the extra action pays for it.
struct ThroneRoom;
impl CardEffect for ThroneRoom {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_actions(player, 1);
            Ok(Resolution::PlayNextActionTimes(2))
        })
    }
}
