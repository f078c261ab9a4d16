use domination_sim::cards::Card;

automod::dir!("src/sets/intrigue");

pub fn set() -> Vec<fn() -> Card> {
    vec![
        bridge::card,
        duke::card,
        great_hall::card,
        secret_chamber::card,
    ]
}
