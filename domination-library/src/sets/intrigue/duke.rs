use domination_sim::cards::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "duke".into(),
        name: "Duke".into(),
        set: "intrigue".into(),
        text: "Worth 1 Victory Point per Duchy you have.".into(),
        cost: 5,
        kinds: vec![CardKind::Victory],
        optional: true,
        effect: effect(Duke),
        ..Default::default()
    }
}

struct Duke;
impl CardEffect for Duke {
    fn points(&self, _card: &Card, game: &Game, player: ActorId) -> i32 {
        game.state
            .board(player)
            .all_cards()
            .filter(|c| game.state.card_key(*c) == "duchy")
            .count() as i32
    }
}
