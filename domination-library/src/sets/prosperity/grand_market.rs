use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "grand_market".into(),
        name: "Grand Market".into(),
        set: "prosperity".into(),
        text: "+1 Card, +1 Action, +1 Buy, +2 Coins. You can't buy this if you have any Copper in play.".into(),
        cost: 6,
        kinds: vec![CardKind::Action],
        optional: true,
        hooks: vec![HookPoint::PreBuyCard],
        effect: effect(GrandMarket),
        ..Default::default()
    }
}

struct GrandMarket;
impl CardEffect for GrandMarket {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            game.add_buys(player, 1);
            game.add_coins(player, 2);
            Ok(Resolution::Done)
        })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::PreBuyCard { player, key } = event else {
            return None;
        };
        if key != "grand_market" {
            return None;
        }
        let player = *player;
        Some(Box::pin(async move {
            let copper_in_play = game
                .state
                .board(player)
                .play_area
                .iter()
                .any(|c| game.state.card_key(*c) == "copper");
            if !copper_in_play {
                return Ok(HookOutcome::Continue);
            }
            game.notify(player, "Grand Market can't be bought with Copper in play", vec![]);
            Ok(HookOutcome::AbortPurchase)
        }))
    }
}
