//! Attack resolution arithmetic
//!
//! Pure functions of the drawn values, so both branches are testable
//! without touching the RNG.

/// What an attack resolves to once the dice are down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The enemy turns the blow back on the attacking team; the member
    /// at `victim_index` takes the enemy damage (0 is the player,
    /// 1.. are followers in roster order)
    Recoil { victim_index: usize },
    /// The team's strike lands for `damage`
    Strike { damage: i32 },
}

/// Resolve an attack from the drawn values
///
/// `roll` is the attack die (1..=sides); at or below `recoil_threshold`
/// the enemy redirects the damage onto the team member picked by
/// `victim_index`. Above it, the strike lands for the per-member damage
/// times team size, scaled up once more for each co-located allied
/// player.
pub fn resolve_attack(
    roll: u32,
    recoil_threshold: u32,
    victim_index: usize,
    team_size: usize,
    player_damage: i32,
    allied_players: usize,
) -> AttackOutcome {
    let team_size = team_size.max(1);
    if roll <= recoil_threshold {
        AttackOutcome::Recoil {
            victim_index: victim_index % team_size,
        }
    } else {
        AttackOutcome::Strike {
            damage: player_damage * team_size as i32 * (1 + allied_players as i32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_roll_strikes_for_team_damage() {
        // Solo player, no allies: damage is the base constant
        assert_eq!(
            resolve_attack(9, 3, 0, 1, 1, 0),
            AttackOutcome::Strike { damage: 1 }
        );
        // Two followers triple the damage
        assert_eq!(
            resolve_attack(9, 3, 0, 3, 1, 0),
            AttackOutcome::Strike { damage: 3 }
        );
    }

    #[test]
    fn test_colocated_ally_scales_damage() {
        assert_eq!(
            resolve_attack(10, 3, 0, 2, 1, 1),
            AttackOutcome::Strike { damage: 4 }
        );
    }

    #[test]
    fn test_threshold_roll_recoils() {
        assert_eq!(
            resolve_attack(3, 3, 0, 2, 1, 0),
            AttackOutcome::Recoil { victim_index: 0 }
        );
        assert_eq!(
            resolve_attack(1, 3, 1, 2, 1, 0),
            AttackOutcome::Recoil { victim_index: 1 }
        );
    }

    #[test]
    fn test_victim_index_wraps_to_team() {
        assert_eq!(
            resolve_attack(2, 3, 5, 2, 1, 0),
            AttackOutcome::Recoil { victim_index: 1 }
        );
    }
}
