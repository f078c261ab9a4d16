use domination_sim::cards::Card;

automod::dir!("src/sets/cornucopia");

pub fn set() -> Vec<fn() -> Card> {
    vec![fairgrounds::card, horse_traders::card]
}
