use domination_sim::cards::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;
use iter_tools::Itertools;

pub fn card() -> Card {
    Card {
        key: "fairgrounds".into(),
        name: "Fairgrounds".into(),
        set: "cornucopia".into(),
        text: "Worth 2 Victory Points for every 5 differently named cards in your deck (round down).".into(),
        cost: 6,
        kinds: vec![CardKind::Victory],
        optional: true,
        effect: effect(Fairgrounds),
        ..Default::default()
    }
}

struct Fairgrounds;
impl CardEffect for Fairgrounds {
    fn points(&self, _card: &Card, game: &Game, player: ActorId) -> i32 {
        let names = game
            .state
            .board(player)
            .all_cards()
            .map(|c| game.state.card_key(c))
            .unique()
            .count();
        (names / 5 * 2) as i32
    }
}
