use domination_sim::error::RegistryError;
use domination_sim::library::CardRegistry;

mod presets;
mod sets;

pub use presets::{preset, presets, Preset};

/// Basic cards followed by every set, in catalog order.
pub fn setup_library() -> Result<CardRegistry, RegistryError> {
    let mut library = CardRegistry::with_basic_cards();
    sets::append_sets(&mut library)?;
    Ok(library)
}

#[cfg(test)]
pub(crate) mod tests {
    use domination_sim::gameplay::Game;
    use domination_sim::prompters::Policy;
    use domination_sim::tests::*;
    use domination_sim::zones::ActorId;

    /// A started game with the first player at the top of the action phase.
    pub async fn test_game(
        kingdom: &[&str],
        policies: Vec<Option<Box<dyn Policy>>>,
    ) -> (Game, Vec<ActorId>) {
        let library = super::setup_library().expect("library cards have distinct keys");
        let (mut game, players) = setup_game(library, kingdom, policies);
        game.start_game().await.expect("game starts");
        start_turn(&mut game, players[0]);
        (game, players)
    }

    #[test]
    fn every_card_is_a_kingdom_card() {
        let library = super::setup_library().unwrap();
        let kingdom: Vec<_> = library.kingdom_cards().map(|c| c.key.clone()).collect();
        assert_eq!(kingdom.len(), 49);
        for card in library.kingdom_cards() {
            assert!(!card.text.is_empty(), "{} has no text", card.key);
            assert!(!card.kinds.is_empty(), "{} has no kind", card.key);
        }
    }
}
