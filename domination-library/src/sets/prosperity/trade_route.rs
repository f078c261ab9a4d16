use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;

const MAT: &str = "trade_route_mat";

fn token(key: &str) -> String {
    format!("trade_route:{key}")
}

pub fn card() -> Card {
    Card {
        key: "trade_route".into(),
        name: "Trade Route".into(),
        set: "prosperity".into(),
        text: "+1 Buy, +1 Coin per token on the Trade Route mat. Trash a card from your hand. Setup: Put a token on each Victory card Supply pile. When a card is gained from that pile, move the token to the Trade Route mat.".into(),
        cost: 3,
        kinds: vec![CardKind::Action],
        optional: true,
        hooks: vec![HookPoint::Setup, HookPoint::GainCard, HookPoint::RenderInfo],
        effect: effect(TradeRoute),
        ..Default::default()
    }
}

struct TradeRoute;
impl CardEffect for TradeRoute {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_buys(player, 1);
            let mat = game.state.counter(MAT);
            game.add_coins(player, mat);

            let hand = game.hand_views(player, |_| true);
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which card do you want to trash?",
                        hand,
                        1,
                        1,
                        SelectPurpose::Trash,
                    ),
                )
                .await?;
            for card in picked {
                game.trash_card(player, card, Zone::Hand);
            }
            Ok(Resolution::Done)
        })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        match *event {
            HookEvent::Setup => {
                let victory_piles = game
                    .state
                    .selected_cards
                    .iter()
                    .filter(|k| game.library.lookup(k).is_some_and(|c| c.is_victory()))
                    .cloned()
                    .collect::<Vec<_>>();
                for key in victory_piles {
                    game.state.set_counter(&token(&key), 1);
                }
                None
            }
            HookEvent::GainCard { card, .. } => {
                let key = token(game.state.card_key(card));
                if game.state.counter(&key) == 0 {
                    return None;
                }
                game.state.set_counter(&key, 0);
                let mat = game.state.counter(MAT) + 1;
                game.state.set_counter(MAT, mat);
                None
            }
            _ => None,
        }
    }

    fn render_info(&self, game: &Game, _player: ActorId) -> Option<String> {
        Some(format!("Trade Route mat: {}", game.state.counter(MAT)))
    }
}
