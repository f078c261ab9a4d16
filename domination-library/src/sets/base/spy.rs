use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "spy".into(),
        name: "Spy".into(),
        set: "base".into(),
        text: "+1 Card, +1 Action. Each player (including you) reveals the top card of his deck and either discards it or puts it back, your choice.".into(),
        cost: 4,
        kinds: vec![CardKind::Action, CardKind::Attack],
        optional: true,
        effect: effect(Spy),
        ..Default::default()
    }
}

struct Spy;
impl CardEffect for Spy {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);

            let mut targets = vec![player];
            targets.extend(game.undefended_targets(player, &"spy".into()).await?);
            for target in targets {
                let Some(card) = game.take_from_deck(target) else {
                    continue;
                };
                game.state.board_mut(target).aside.push(card);
                let views = game.reveal(target, &[card]);
                game.notify(target, "you reveal", views.clone());

                let whose = if target == player {
                    "your".to_string()
                } else {
                    format!("{}'s", game.state.player_name(target))
                };
                let shown = views.first().map(|v| v.info.name.clone()).unwrap_or_default();
                if game
                    .ask_yes_no(player, format!("Do you want to discard {whose} {shown}?"))
                    .await?
                {
                    game.discard_card(target, card, Zone::Aside);
                } else {
                    game.move_card(target, card, Zone::Aside, Zone::Deck);
                }
            }
            Ok(Resolution::Done)
        })
    }
}
