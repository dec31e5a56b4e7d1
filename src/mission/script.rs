//! Static campaign content: triggers, effects, dialogue and objectives
//!
//! Each mission is a small table of steps. A step names the predicate
//! that completes it, the world effects that fire when it does, and
//! whether the pulled dialogue/objective lines go to every player or
//! just the one who acted. Space, object and character names here must
//! match the shipped world data.

use crate::command::CommandCode;
use crate::mission::campaign::MissionCode;

/// Predicate that completes a mission step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Every player carries the same team tag (needs at least two)
    PlayersShareTeam,
    /// The acting player's latest command matched and succeeded
    CommandSucceeded(CommandCode),
    /// Same, with a specific first argument (case-insensitive)
    CommandSucceededOn(CommandCode, &'static str),
    /// The acting player stands in the named space
    PlayerInSpace(&'static str),
    /// The named link is open
    LinkOpened(&'static str),
    /// Some player holds the named object
    ObjectHeld(&'static str),
    /// The named character is following a player
    CharacterFollowing(&'static str),
    /// The named character has been defeated
    CharacterDefeated(&'static str),
}

/// World side effect applied when a step completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorldEffect {
    /// Spawn a scripted character unless one by that name already exists
    SpawnCharacter(&'static SpawnSpec),
    /// Toggle the global lighting flag
    SetLights(bool),
    /// Teleport the acting player to the named space
    TeleportActivePlayer(&'static str),
}

/// Blueprint for a mission-spawned character
#[derive(Debug, PartialEq, Eq)]
pub struct SpawnSpec {
    pub name: &'static str,
    pub sprite: &'static str,
    pub dead_sprite: &'static str,
    pub health: i32,
    pub friendly: bool,
    pub messages: &'static [&'static str],
    pub space: &'static str,
}

/// One step of a mission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionStep {
    pub trigger: Trigger,
    pub effects: &'static [WorldEffect],
    /// Broadcast steps push their text to every player
    pub broadcast: bool,
}

/// A whole mission: steps plus the lines pulled as they complete
///
/// `dialogue[i]` and `objectives[i]` are consumed when step `i`
/// completes; the objective always points at what to do next.
#[derive(Debug, PartialEq, Eq)]
pub struct MissionScript {
    pub code: MissionCode,
    pub dialogue: &'static [&'static str],
    pub objectives: &'static [&'static str],
    pub steps: &'static [MissionStep],
}

/// Objective shown before the first step of the campaign completes
pub const OPENING_OBJECTIVE: &str = "Find your brother and team up (team <name>).";

static FATHER: SpawnSpec = SpawnSpec {
    name: "father",
    sprite: "[=|=]",
    dead_sprite: "[ _ ]",
    health: 10,
    friendly: true,
    messages: &[
        "You found the old cells, then. Clever.",
        "The attic key is where your mother hid it. The bedroom. Go.",
    ],
    space: "memory",
};

static WARDEN: SpawnSpec = SpawnSpec {
    name: "warden",
    sprite: "{*^*}",
    dead_sprite: "{ - }",
    health: 12,
    friendly: false,
    messages: &["You were never meant to leave."],
    space: "attic",
};

pub static CAMPAIGN_SCRIPTS: [MissionScript; 10] = [
    MissionScript {
        code: MissionCode::TeamUp,
        dialogue: &["ROWAN: Stay close. The house moves when we split up."],
        objectives: &["Find the batteries and the lantern before dark."],
        steps: &[MissionStep {
            trigger: Trigger::PlayersShareTeam,
            effects: &[],
            broadcast: true,
        }],
    },
    MissionScript {
        code: MissionCode::Lantern,
        dialogue: &[
            "MAREN: Dead cells... no, these still hold a charge.",
            "ROWAN: Light. Good. The cellar first.",
        ],
        objectives: &[
            "Take the lantern.",
            "Open the cellar door and restore the power.",
        ],
        steps: &[
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Take, "batteries"),
                effects: &[],
                broadcast: false,
            },
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Take, "lantern"),
                effects: &[],
                broadcast: false,
            },
        ],
    },
    MissionScript {
        code: MissionCode::Generator,
        dialogue: &[
            "MAREN: The hinges scream like they remember us.",
            "The generator coughs, catches, and the house blooms with light.",
        ],
        objectives: &[
            "Reach the generator in the cellar.",
            "Something glints near the portrait in the hall.",
        ],
        steps: &[
            MissionStep {
                trigger: Trigger::LinkOpened("cellardoor"),
                effects: &[],
                broadcast: false,
            },
            MissionStep {
                trigger: Trigger::PlayerInSpace("cellar"),
                effects: &[WorldEffect::SetLights(true)],
                broadcast: true,
            },
        ],
    },
    MissionScript {
        code: MissionCode::Flashback,
        dialogue: &[
            "The frame swallows the light, and the hall is suddenly twenty years younger.",
            "FATHER: The attic key is where your mother hid it. The bedroom. Go.",
        ],
        objectives: &["Speak with your father.", "Climb to the second-floor landing."],
        steps: &[
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Inspect, "portrait"),
                effects: &[
                    WorldEffect::SpawnCharacter(&FATHER),
                    WorldEffect::TeleportActivePlayer("memory"),
                ],
                broadcast: false,
            },
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Chat, "father"),
                effects: &[WorldEffect::TeleportActivePlayer("hall")],
                broadcast: false,
            },
        ],
    },
    MissionScript {
        code: MissionCode::SecondFloor,
        dialogue: &["ROWAN: The stairs held. Barely."],
        objectives: &["Find the medkit; you will need it."],
        steps: &[MissionStep {
            trigger: Trigger::PlayerInSpace("landing"),
            effects: &[],
            broadcast: false,
        }],
    },
    MissionScript {
        code: MissionCode::Medkit,
        dialogue: &[
            "MAREN: Gauze, iodine... it will do.",
            "The sting means it is working.",
        ],
        objectives: &["Patch yourself up (use medkit).", "Search the bedroom."],
        steps: &[
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Take, "medkit"),
                effects: &[],
                broadcast: false,
            },
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Use, "medkit"),
                effects: &[],
                broadcast: false,
            },
        ],
    },
    MissionScript {
        code: MissionCode::Bedroom,
        dialogue: &[
            "The bedroom door gives way to the smell of cold ash.",
            "The melody is the one Lily used to hum.",
        ],
        objectives: &["Inspect the music box.", "Lily is here somewhere. Recruit her."],
        steps: &[
            MissionStep {
                trigger: Trigger::PlayerInSpace("bedroom"),
                effects: &[],
                broadcast: false,
            },
            MissionStep {
                trigger: Trigger::CommandSucceededOn(CommandCode::Inspect, "musicbox"),
                effects: &[],
                broadcast: false,
            },
        ],
    },
    MissionScript {
        code: MissionCode::Companion,
        dialogue: &["LILY: You came back. I kept the key safe."],
        objectives: &["Open the attic hatch and climb to the third floor."],
        steps: &[MissionStep {
            trigger: Trigger::CharacterFollowing("lily"),
            effects: &[],
            broadcast: true,
        }],
    },
    MissionScript {
        code: MissionCode::ThirdFloor,
        dialogue: &[
            "Cold air pours down from the dark.",
            "Something vast unfolds itself between the rafters.",
        ],
        objectives: &["Climb into the attic.", "Defeat the Warden."],
        steps: &[
            MissionStep {
                trigger: Trigger::LinkOpened("attichatch"),
                effects: &[],
                broadcast: false,
            },
            MissionStep {
                trigger: Trigger::PlayerInSpace("attic"),
                effects: &[WorldEffect::SpawnCharacter(&WARDEN)],
                broadcast: true,
            },
        ],
    },
    MissionScript {
        code: MissionCode::Boss,
        dialogue: &["The Warden comes apart like smoke. The house is only a house again."],
        objectives: &["You are free. Leave when you are ready (exit)."],
        steps: &[MissionStep {
            trigger: Trigger::CharacterDefeated("warden"),
            effects: &[],
            broadcast: true,
        }],
    },
];

/// The script for one campaign stage
pub fn script_for(code: MissionCode) -> &'static MissionScript {
    // CAMPAIGN_SCRIPTS is ordered exactly like MissionCode::CAMPAIGN
    &CAMPAIGN_SCRIPTS[MissionCode::CAMPAIGN
        .iter()
        .position(|&m| m == code)
        .unwrap_or(0)]
}
