use domination_sim::cards::Card;

automod::dir!("src/sets/hinterlands");

pub fn set() -> Vec<fn() -> Card> {
    vec![border_village::card, highway::card, silk_road::card]
}
