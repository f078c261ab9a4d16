use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::events::{SelectHandCards, SelectPurpose};
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "thief".into(),
        name: "Thief".into(),
        set: "base".into(),
        text: "Each other player reveals the top 2 cards of his deck. If they revealed any Treasure cards, they trash one of them that you choose. You may gain any or all of these trashed cards. They discard the other revealed cards.".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Thief),
        ..Default::default()
    }
}

struct Thief;
impl CardEffect for Thief {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            for victim in game.undefended_targets(player, &"thief".into()).await? {
                let mut revealed = vec![];
                for _ in 0..2 {
                    if let Some(card) = game.take_from_deck(victim) {
                        game.state.board_mut(victim).aside.push(card);
                        revealed.push(card);
                    }
                }
                game.reveal(victim, &revealed);

                let treasures = revealed
                    .iter()
                    .copied()
                    .filter(|c| game.lookup_card(*c).is_some_and(|d| d.is_treasure()))
                    .collect::<Vec<_>>();
                let treasures = game.card_views(&treasures);
                let picked = game
                    .select_hand_cards(
                        player,
                        SelectHandCards::new(
                            "Which treasure do you want to trash?",
                            treasures,
                            1,
                            1,
                            SelectPurpose::Other,
                        ),
                    )
                    .await?;

                if let Some(stolen) = picked.first().copied() {
                    game.trash_card(victim, stolen, Zone::Aside);
                    let name = game
                        .lookup_card(stolen)
                        .map(|c| c.name.clone())
                        .unwrap_or_default();
                    if game
                        .ask_yes_no(player, format!("Do you want to gain the trashed {name}?"))
                        .await?
                    {
                        game.state.trash.retain(|c| *c != stolen);
                        game.state.board_mut(player).discard.push(stolen);
                        let views = game.card_views(&[stolen]);
                        let thief = game.state.player_name(player);
                        game.notify_others(player, format!("{thief} gains"), views);
                    }
                }
                for card in revealed.into_iter().filter(|c| Some(c) != picked.first()) {
                    game.discard_card(victim, card, Zone::Aside);
                }
            }
            Ok(Resolution::Done)
        })
    }
}
