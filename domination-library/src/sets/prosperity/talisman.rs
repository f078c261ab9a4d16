use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "talisman".into(),
        name: "Talisman".into(),
        set: "prosperity".into(),
        text: "Worth 1 Coin. While this is in play, when you buy a card costing 4 Coins or less that is not a Victory card, gain a copy of it.".into(),
        cost: 4,
        worth: 1,
        kinds: vec![CardKind::Treasure],
        optional: true,
        hooks: vec![HookPoint::BuyCard],
        effect: effect(Talisman),
        ..Default::default()
    }
}

struct Talisman;
impl CardEffect for Talisman {
    fn play<'a>(&'a self, _game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async { Ok(Resolution::Done) })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::BuyCard { player, card } = *event else {
            return None;
        };
        let key = game.state.card_key(card).clone();
        let bought = game.library.lookup(&key)?;
        if bought.is_victory() || game.effective_cost(&key) > 4 {
            return None;
        }
        let talismans = game
            .state
            .board(player)
            .play_area
            .iter()
            .filter(|c| game.state.card_key(**c) == "talisman")
            .count();
        if talismans == 0 {
            return None;
        }
        Some(Box::pin(async move {
            for _ in 0..talismans {
                game.gain_card(player, &key, GainTo::Discard).await?;
            }
            Ok(HookOutcome::Continue)
        }))
    }
}
