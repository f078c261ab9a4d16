use domination_sim::cards::Card;

automod::dir!("src/sets/base");

pub fn set() -> Vec<fn() -> Card> {
    vec![
        adventurer::card,
        bureaucrat::card,
        cellar::card,
        chancellor::card,
        chapel::card,
        council_room::card,
        feast::card,
        festival::card,
        gardens::card,
        laboratory::card,
        library::card,
        market::card,
        militia::card,
        mine::card,
        moat::card,
        moneylender::card,
        remodel::card,
        smithy::card,
        spy::card,
        thief::card,
        throne_room::card,
        village::card,
        witch::card,
        woodcutter::card,
        workshop::card,
    ]
}
