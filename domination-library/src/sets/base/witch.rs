use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "witch".into(),
        name: "Witch".into(),
        set: "base".into(),
        text: "+2 Cards. Each other player gains a Curse card.".into(),
        cost: 5,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Witch),
        ..Default::default()
    }
}

struct Witch;
impl CardEffect for Witch {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 2);
            let curse: CardKey = "curse".into();
            for victim in game.undefended_targets(player, &"witch".into()).await? {
                game.gain_card(victim, &curse, GainTo::Discard).await?;
            }
            Ok(Resolution::Done)
        })
    }
}
