use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "chapel".into(),
        name: "Chapel".into(),
        set: "base".into(),
        text: "Trash up to 4 cards from your hand.".into(),
        cost: 2,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Chapel),
        ..Default::default()
    }
}

struct Chapel;
impl CardEffect for Chapel {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let hand = game.hand_views(player, |_| true);
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which cards do you want to trash?",
                        hand,
                        1,
                        4,
                        SelectPurpose::Trash,
                    ),
                )
                .await?;
            let views = game.card_views(&picked);
            for card in picked {
                game.trash_card(player, card, Zone::Hand);
            }
            let name = game.state.player_name(player);
            game.notify_others(player, format!("{name} trashes"), views);
            Ok(Resolution::Done)
        })
    }
}
