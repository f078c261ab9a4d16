use domination_sim::cards::Card;
use domination_sim::error::RegistryError;
use domination_sim::library::CardRegistry;

mod alchemy;
mod base;
mod cornucopia;
mod hinterlands;
mod intrigue;
mod prosperity;
mod seaside;

pub fn append_sets(lib: &mut CardRegistry) -> Result<(), RegistryError> {
    let mut sets: Vec<fn() -> Card> = vec![];

    sets.extend(base::set());
    sets.extend(intrigue::set());
    sets.extend(seaside::set());
    sets.extend(prosperity::set());
    sets.extend(hinterlands::set());
    sets.extend(cornucopia::set());
    sets.extend(alchemy::set());

    for card in sets {
        lib.register(card())?;
    }
    Ok(())
}
