use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::hooks::{HookEvent, HookOutcome, HookPoint};
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "treasury".into(),
        name: "Treasury".into(),
        set: "seaside".into(),
        text: "+1 Card, +1 Action, +1 Coin. When you discard this from play, if you didn't buy a Victory card this turn, you may put this on top of your deck.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        hooks: vec![HookPoint::EndOfTurn],
        effect: effect(Treasury),
        ..Default::default()
    }
}

struct Treasury;
impl CardEffect for Treasury {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 1);
            game.add_actions(player, 1);
            game.add_coins(player, 1);
            Ok(Resolution::Done)
        })
    }

    fn on_hook<'a>(
        &'a self,
        game: &'a mut Game,
        event: &'a HookEvent,
    ) -> Option<EffectFuture<'a, HookOutcome>> {
        let HookEvent::EndOfTurn { player } = *event else {
            return None;
        };
        Some(Box::pin(async move {
            let board = game.state.board(player);
            let bought_victory = board
                .bought_this_turn
                .iter()
                .any(|k| game.library.lookup(k).is_some_and(|c| c.is_victory()));
            if bought_victory {
                return Ok(HookOutcome::Continue);
            }
            let treasuries = board
                .play_area
                .iter()
                .copied()
                .filter(|c| game.state.card_key(*c) == "treasury")
                .collect::<Vec<_>>();
            for card in treasuries {
                if game
                    .ask_yes_no(player, "Do you want to put Treasury on top of your deck?")
                    .await?
                {
                    game.move_card(player, card, Zone::PlayArea, Zone::Deck);
                }
            }
            Ok(HookOutcome::Continue)
        }))
    }
}
