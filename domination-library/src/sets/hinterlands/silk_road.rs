use domination_sim::cards::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "silk_road".into(),
        name: "Silk Road".into(),
        set: "hinterlands".into(),
        text: "Worth 1 Victory Point for every 4 Victory cards in your deck (round down).".into(),
        cost: 4,
        kinds: vec![CardKind::Victory],
        optional: true,
        effect: effect(SilkRoad),
        ..Default::default()
    }
}

struct SilkRoad;
impl CardEffect for SilkRoad {
    fn points(&self, _card: &Card, game: &Game, player: ActorId) -> i32 {
        let victory = game
            .state
            .board(player)
            .all_cards()
            .filter(|c| game.lookup_card(*c).is_some_and(|d| d.is_victory()))
            .count();
        (victory / 4) as i32
    }
}
