use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "adventurer".into(),
        name: "Adventurer".into(),
        set: "base".into(),
        text: "Reveal cards from your deck until you reveal 2 Treasure cards. Put those Treasure cards in your hand and discard the other revealed cards.".into(),
        cost: 6,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Adventurer),
        ..Default::default()
    }
}

struct Adventurer;
impl CardEffect for Adventurer {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let mut revealed = vec![];
            let mut found = 0;
            // set aside while revealing so they can't be reshuffled back in
            while found < 2 {
                let Some(card) = game.take_from_deck(player) else {
                    break;
                };
                revealed.push(card);
                if game.lookup_card(card).is_some_and(|c| c.is_treasure()) {
                    game.state.board_mut(player).hand.push(card);
                    found += 1;
                } else {
                    game.state.board_mut(player).aside.push(card);
                }
            }
            game.reveal(player, &revealed);

            let aside = std::mem::take(&mut game.state.board_mut(player).aside);
            let (others, kept): (Vec<_>, Vec<_>) =
                aside.into_iter().partition(|c| revealed.contains(c));
            let board = game.state.board_mut(player);
            board.aside = kept;
            board.discard.extend(others);
            Ok(Resolution::Done)
        })
    }
}
