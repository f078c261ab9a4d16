use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "secret_chamber".into(),
        name: "Secret Chamber".into(),
        set: "intrigue".into(),
        text: "Discard any number of cards. +1 Coin per card discarded. When another player plays an Attack card, you may reveal this from your hand. If you do, +2 Cards, then put 2 cards from your hand on top of your deck.".into(),
        cost: 2,
        kinds: vec![CardKind::Action, CardKind::Reaction],
        optional: true,
        effect: effect(SecretChamber),
        ..Default::default()
    }
}

struct SecretChamber;
impl CardEffect for SecretChamber {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let hand = game.hand_views(player, |_| true);
            let count = hand.len();
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which cards do you want to discard for +1 coin each?",
                        hand,
                        0,
                        count,
                        SelectPurpose::Discard,
                    ),
                )
                .await?;
            let views = game.card_views(&picked);
            let name = game.state.player_name(player);
            game.notify_others(player, format!("{name} discards"), views);
            for card in &picked {
                game.discard_card(player, *card, Zone::Hand);
            }
            game.add_coins(player, picked.len() as u32);
            Ok(Resolution::Done)
        })
    }

    fn react<'a>(
        &'a self,
        game: &'a mut Game,
        player: ActorId,
        _card: CardId,
        _attack: &'a CardKey,
    ) -> EffectFuture<'a, ()> {
        Box::pin(async move {
            game.draw_cards(player, 2);
            let hand = game.hand_views(player, |_| true);
            let picked = game
                .select_hand_cards(
                    player,
                    SelectHandCards::new(
                        "Which 2 cards do you put back on your deck?",
                        hand,
                        2,
                        2,
                        SelectPurpose::Other,
                    ),
                )
                .await?;
            // the last one ends on top
            for card in picked {
                game.move_card(player, card, Zone::Hand, Zone::Deck);
            }
            Ok(())
        })
    }
}
