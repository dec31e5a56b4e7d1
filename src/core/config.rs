//! Game tuning constants collected in one place
//!
//! All magic numbers live here with an explanation of their purpose
//! and how they interact with each other.

/// Configuration for world capacities, combat arithmetic and pacing
///
/// These values match the shipped campaign data. Changing the combat
/// constants rebalances every fight; changing capacities only matters
/// for hand-authored world files that push past them.
#[derive(Debug, Clone)]
pub struct GameConfig {
    // === WORLD CAPACITIES ===
    /// Maximum number of spaces a world file may define
    pub max_spaces: usize,

    /// Maximum number of links a world file may define
    pub max_links: usize,

    /// Maximum number of objects a world file may define
    pub max_objects: usize,

    /// Maximum number of characters, including mission-spawned ones
    ///
    /// The campaign spawns two characters of its own, so authored worlds
    /// should stay at least two below this.
    pub max_characters: usize,

    /// Maximum number of players
    pub max_players: usize,

    // === COMBAT ===
    /// Sides of the attack die; each attack draws 1..=attack_die_sides
    pub attack_die_sides: u32,

    /// Draws at or below this value turn the attack back on the
    /// attacking team (one member takes `enemy_damage`)
    ///
    /// At 3 on a d10, roughly one attack in three recoils.
    pub recoil_threshold: u32,

    /// Damage each attacking-team member contributes on a landed strike
    pub player_damage: i32,

    /// Damage an enemy deals to the drawn victim on a recoil
    pub enemy_damage: i32,

    // === PRESENTATION ===
    /// Pause after each resolved turn, purely for pacing (milliseconds)
    pub turn_pause_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Capacities sized for a single manor
            max_spaces: 32,
            max_links: 64,
            max_objects: 32,
            max_characters: 16,
            max_players: 4,

            // Combat (d10, ~30% recoil chance)
            attack_die_sides: 10,
            recoil_threshold: 3,
            player_damage: 1,
            enemy_damage: 1,

            turn_pause_ms: 400,
        }
    }
}

impl GameConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.attack_die_sides == 0 {
            return Err("attack_die_sides must be at least 1".into());
        }

        if self.recoil_threshold >= self.attack_die_sides {
            return Err(format!(
                "recoil_threshold ({}) must be below attack_die_sides ({}), or no attack can ever land",
                self.recoil_threshold, self.attack_die_sides
            ));
        }

        if self.player_damage <= 0 || self.enemy_damage <= 0 {
            return Err("damage constants must be positive".into());
        }

        if self.max_players == 0 {
            return Err("max_players must be at least 1".into());
        }

        Ok(())
    }
}
