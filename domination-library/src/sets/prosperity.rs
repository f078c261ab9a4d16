use domination_sim::cards::Card;

automod::dir!("src/sets/prosperity");

pub fn set() -> Vec<fn() -> Card> {
    vec![
        bank::card,
        goons::card,
        grand_market::card,
        kings_court::card,
        monument::card,
        quarry::card,
        talisman::card,
        trade_route::card,
    ]
}
