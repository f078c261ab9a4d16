use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "cellar".into(),
        name: "Cellar".into(),
        set: "base".into(),
        text: "+1 Action. Discard any number of cards. +1 Card per card discarded.".into(),
        cost: 2,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Cellar),
        ..Default::default()
    }
}

struct Cellar;
impl CardEffect for Cellar {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_actions(player, 1);
            let hand = game.hand_views(player, |_| true);
            let count = hand.len();
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which cards do you want to discard?",
                        hand,
                        0,
                        count,
                        SelectPurpose::Discard,
                    ),
                )
                .await?;
            if picked.is_empty() {
                return Ok(Resolution::Done);
            }

            let views = game.card_views(&picked);
            let name = game.state.player_name(player);
            game.notify_others(player, format!("{name} discards"), views);
            for card in &picked {
                game.discard_card(player, *card, Zone::Hand);
            }
            game.draw_cards(player, picked.len() as u32);
            Ok(Resolution::Done)
        })
    }
}
