use domination_sim::cards::*;
use domination_sim::effects::*;
use domination_sim::gameplay::Game;
use domination_sim::zones::*;

pub fn card() -> Card {
    Card {
        key: "chancellor".into(),
        name: "Chancellor".into(),
        set: "base".into(),
        text: "+2 Coins. You may immediately put your deck into your discard pile.".into(),
        cost: 3,
        kinds: vec![CardKind::Action],
        optional: true,
        effect: effect(Chancellor),
        ..Default::default()
    }
}

struct Chancellor;
impl CardEffect for Chancellor {
    fn play<'a>(&'a self, game: &'a mut Game, player: ActorId, _card: CardId) -> EffectFuture<'a> {
        Box::pin(async move {
            game.add_coins(player, 2);
            if game.state.board(player).deck.is_empty() {
                return Ok(Resolution::Done);
            }
            if game
                .ask_yes_no(player, "Do you want to put your deck into your discard pile?")
                .await?
            {
                let board = game.state.board_mut(player);
                let deck = std::mem::take(&mut board.deck);
                board.discard.extend(deck);
                let name = game.state.player_name(player);
                game.notify_others(player, format!("{name} puts the deck into the discard pile"), vec![]);
            }
            Ok(Resolution::Done)
        })
    }
}
