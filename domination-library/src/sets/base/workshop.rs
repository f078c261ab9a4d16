use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "workshop".into(),
        name: "Workshop".into(),
        set: "base".into(),
        text: "Gain a card costing up to 4 Coins.".into(),
        cost: 3,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Workshop),
        ..Default::default()
    }
}

struct Workshop;
impl CardEffect for Workshop {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.gain_up_to(player, 4, |_| true, GainTo::Discard).await?;
            Ok(Resolution::Done)
        })
    }
}
