use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "library".into(),
        name: "Library".into(),
        set: "base".into(),
        text: "Draw until you have 7 cards in hand. You may set aside any Action cards drawn this way, as you draw them; discard the set aside cards after you finish drawing.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Library),
        ..Default::default()
    }
}

struct Library;
impl CardEffect for Library {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let mut set_aside = vec![];
            while game.state.board(player).hand.len() < 7 {
                let Some(card) = game.take_from_deck(player) else {
                    break;
                };
                let action = game
                    .lookup_card(card)
                    .filter(|c| c.is_action())
                    .map(|c| c.name.clone());
                if let Some(name) = action {
                    game.state.board_mut(player).aside.push(card);
                    if game
                        .ask_yes_no(player, format!("Do you want to set aside {name}?"))
                        .await?
                    {
                        set_aside.push(card);
                        continue;
                    }
                    game.move_card(player, card, Zone::Aside, Zone::Hand);
                    continue;
                }
                game.state.board_mut(player).hand.push(card);
            }
            for card in set_aside {
                game.discard_card(player, card, Zone::Aside);
            }
            Ok(Resolution::Done)
        })
    }
}
