use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "border_village".into(),
        name: "Border Village".into(),
        set: "hinterlands".into(),
        text: "+1 Card, +2 Actions. When you gain this, gain a card costing less than this.".into(),
        cost: 6,
        kinds: vec![CardKind::Action],
        optional: true,
        hooks: vec![HookPoint::GainCard],
        effect: effect(BorderVillage),
        ..Default::default()
    }
}

struct BorderVillage;
impl CardEffect for BorderVillage {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 2);
            Ok(Resolution::Done)
        })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::GainCard { player, card } = *event else {
            return None;
        };
        if game.state.card_key(card) != "border_village" {
            return None;
        }
        let cost = game.effective_cost("border_village");
        if cost == 0 {
            return None;
        }
        Some(Box::pin(async move {
            game.gain_up_to(player, cost - 1, |_| true, GainTo::Discard)
                .await?;
            Ok(HookOutcome::Continue)
        }))
    }
}
