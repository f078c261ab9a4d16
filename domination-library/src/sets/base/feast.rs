use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "feast".into(),
        name: "Feast".into(),
        set: "base".into(),
        text: "Trash this card. Gain a card costing up to 5 Coins.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        trash_after_playing: true,
        optional: true,
        effect: effect(Feast),
        ..Default::default()
    }
}

struct Feast;
impl CardEffect for Feast {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.gain_up_to(player, 5, |_| true, GainTo::Discard).await?;
            Ok(Resolution::Done)
        })
    }
}
