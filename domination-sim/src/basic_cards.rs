use crate::cards::{effect, Card, CardKind, NoEffect, PlainTreasure};

pub fn set() -> Vec<fn() -> Card> {
    vec![copper, silver, gold, potion, estate, duchy, province, curse]
}

fn treasure(key: &str, name: &str, cost: u32, worth: u32, potion: u32) -> Card {
    Card {
        key: key.into(),
        name: name.into(),
        set: "basic".into(),
        cost,
        worth,
        potion,
        kinds: vec![CardKind::Treasure],
        effect: effect(PlainTreasure),
        ..Default::default()
    }
}

fn victory(key: &str, name: &str, cost: u32, points: i32) -> Card {
    Card {
        key: key.into(),
        name: name.into(),
        set: "basic".into(),
        cost,
        points,
        kinds: vec![CardKind::Victory],
        effect: effect(NoEffect),
        ..Default::default()
    }
}

pub fn copper() -> Card {
    treasure("copper", "Copper", 0, 1, 0)
}

pub fn silver() -> Card {
    treasure("silver", "Silver", 3, 2, 0)
}

pub fn gold() -> Card {
    treasure("gold", "Gold", 6, 3, 0)
}

pub fn potion() -> Card {
    treasure("potion", "Potion", 4, 0, 1)
}

pub fn estate() -> Card {
    victory("estate", "Estate", 2, 1)
}

pub fn duchy() -> Card {
    victory("duchy", "Duchy", 5, 3)
}

pub fn province() -> Card {
    victory("province", "Province", 8, 6)
}

pub fn curse() -> Card {
    Card {
        key: "curse".into(),
        name: "Curse".into(),
        set: "basic".into(),
        points: -1,
        kinds: vec![CardKind::Curse],
        ..Default::default()
    }
}
