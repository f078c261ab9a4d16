use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "salvager".into(),
        name: "Salvager".into(),
        set: "seaside".into(),
        text: "+1 Buy. Trash a card from your hand. +Coins equal to its cost.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Salvager),
        ..Default::default()
    }
}

struct Salvager;
impl CardEffect for Salvager {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_buys(player, 1);
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
                let cost = game.effective_cost(game.state.card_key(card));
                game.trash_card(player, card, Zone::Hand);
                game.add_coins(player, cost);
            }
            Ok(Resolution::Done)
        })
    }
}
