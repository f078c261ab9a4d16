use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "moat".into(),
        name: "Moat".into(),
        set: "base".into(),
        text: "+2 Cards. When another player plays an Attack card, you may reveal this from your hand. If you do, you are unaffected by that Attack.".into(),
        cost: 2,
        kinds: vec![CardKind::Action, CardKind::Reaction],
        optional: true,
        effect: effect(Moat),
        ..Default::default()
    }
}

struct Moat;
impl CardEffect for Moat {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 2);
            Ok(Resolution::Done)
        })
    }

    fn react<'a>(
        &'a self,
        _game: &'a mut Game,
        _player: ActorId,
        _card: CardId,
        _attack: &'a CardKey,
    ) -> EffectFuture<'a, ()> {
        Box::pin(async { Err(Interrupt::Defended) })
    }
}
