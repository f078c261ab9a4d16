use domination_sim::cards::Card;

automod::dir!("src/sets/alchemy");

pub fn set() -> Vec<fn() -> Card> {
    vec![familiar::card]
}
