use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "council_room".into(),
        name: "Council Room".into(),
        set: "base".into(),
        text: "+4 Cards, +1 Buy. Each other player draws a card.".into(),
        cost: 5,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(CouncilRoom),
        ..Default::default()
    }
}

struct CouncilRoom;
impl CardEffect for CouncilRoom {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.draw_cards(player, 4);
            game.add_buys(player, 1);
            for other in game.state.following_players(player) {
                game.draw_cards(other, 1);
            }
            Ok(Resolution::Done)
        })
    }
}
