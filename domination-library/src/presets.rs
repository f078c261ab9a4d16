/// A recommended kingdom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub kingdom: [&'static str; 10],
}

const PRESETS: [Preset; 5] = [
    Preset {
        name: "First Game",
        kingdom: [
            "cellar", "market", "militia", "mine", "moat", "remodel", "smithy", "village",
            "woodcutter", "workshop",
        ],
    },
    Preset {
        name: "Big Money",
        kingdom: [
            "adventurer", "bureaucrat", "chancellor", "chapel", "feast", "laboratory", "market",
            "mine", "moneylender", "throne_room",
        ],
    },
    Preset {
        name: "Interaction",
        kingdom: [
            "bureaucrat", "chancellor", "council_room", "festival", "library", "militia", "moat",
            "spy", "thief", "village",
        ],
    },
    Preset {
        name: "Size Distortion",
        kingdom: [
            "cellar", "chapel", "feast", "gardens", "laboratory", "thief", "village", "witch",
            "woodcutter", "workshop",
        ],
    },
    Preset {
        name: "Village Square",
        kingdom: [
            "bureaucrat", "cellar", "festival", "library", "market", "remodel", "smithy",
            "throne_room", "village", "woodcutter",
        ],
    },
];

pub fn presets() -> &'static [Preset] {
    &PRESETS
}

/// Case-insensitive lookup by name.
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Preset {
    pub fn kingdom(&self) -> Vec<String> {
        self.kingdom.iter().map(|k| k.to_string()).collect()
    }
}
