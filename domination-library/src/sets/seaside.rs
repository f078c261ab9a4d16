use domination_sim::cards::Card;

automod::dir!("src/sets/seaside");

pub fn set() -> Vec<fn() -> Card> {
    vec![
        bazaar::card,
        caravan::card,
        cutpurse::card,
        merchant_ship::card,
        salvager::card,
        treasury::card,
    ]
}
