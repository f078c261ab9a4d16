use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "bank".into(),
        name: "Bank".into(),
        set: "prosperity".into(),
        text: "When you play this, it's worth 1 Coin per Treasure card you have in play (counting this).".into(),
        cost: 7,
        kinds: vec![CardKind::Treasure],
        optional: true,
        effect: effect(Bank),
        ..Default::default()
    }
}

struct Bank;
impl CardEffect for Bank {
    fn play<'a>(&'a self, _game: &'a mut Game, _player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async { Ok(Resolution::Done) })
    }

    fn worth(&self, _card: &Card, game: &Game, player: ActorId) -> u32 {
        game.state
            .board(player)
            .play_area
            .iter()
            .filter(|c| game.lookup_card(**c).is_some_and(|d| d.is_treasure()))
            .count() as u32
    }
}
