use domination_sim::cards::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "gardens".into(),
        name: "Gardens".into(),
        set: "base".into(),
        text: "Worth 1 Victory Point for every 10 cards in your deck (rounded down).".into(),
        cost: 4,
        kinds: vec![CardKind::Victory],
        optional: true,
        effect: effect(Gardens),
        ..Default::default()
    }
}

struct Gardens;
impl CardEffect for Gardens {
    fn points(&self, _card: &Card, game: &Game, player: ActorId) -> i32 {
        (game.state.board(player).all_cards().count() / 10) as i32
    }
}
