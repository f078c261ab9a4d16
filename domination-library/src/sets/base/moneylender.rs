use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "moneylender".into(),
        name: "Moneylender".into(),
        set: "base".into(),
        text: "Trash a Copper from your hand. If you do, +3 Coins.".into(),
        cost: 4,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Moneylender),
        ..Default::default()
    }
}

struct Moneylender;
impl CardEffect for Moneylender {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            let copper = game
                .state
                .board(player)
                .hand
                .iter()
                .copied()
                .find(|c| game.state.card_key(*c) == "copper");
            if let Some(copper) = copper {
                game.trash_card(player, copper, Zone::Hand);
                let views = game.card_views(&[copper]);
                let name = game.state.player_name(player);
                game.notify_others(player, format!("{name} trashes"), views);
                game.add_coins(player, 3);
            }
            Ok(Resolution::Done)
        })
    }
}
