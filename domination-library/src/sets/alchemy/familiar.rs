use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "familiar".into(),
        name: "Familiar".into(),
        set: "alchemy".into(),
        text: "+1 Card, +1 Action. Each other player gains a Curse.".into(),
        cost: 3,
        potion_cost: 1,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Familiar),
        ..Default::default()
    }
}

struct Familiar;
impl CardEffect for Familiar {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            let curse: CardKey = "curse".into();
            for victim in game.undefended_targets(player, &"familiar".into()).await? {
                game.gain_card(victim, &curse, GainTo::Discard).await?;
            }
            Ok(Resolution::Done)
        })
    }
}
