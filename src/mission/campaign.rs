//! Campaign stages and the active mission state

use serde::{Deserialize, Serialize};

/// The ten campaign stages, in play order
///
/// The campaign only ever moves forward through this enumeration; no
/// stage is revisited.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MissionCode {
    TeamUp,
    Lantern,
    Generator,
    Flashback,
    SecondFloor,
    Medkit,
    Bedroom,
    Companion,
    ThirdFloor,
    Boss,
}

impl MissionCode {
    pub const CAMPAIGN: [MissionCode; 10] = [
        MissionCode::TeamUp,
        MissionCode::Lantern,
        MissionCode::Generator,
        MissionCode::Flashback,
        MissionCode::SecondFloor,
        MissionCode::Medkit,
        MissionCode::Bedroom,
        MissionCode::Companion,
        MissionCode::ThirdFloor,
        MissionCode::Boss,
    ];

    /// The stage after this one; None at the end of the campaign
    pub fn next(self) -> Option<MissionCode> {
        let index = Self::CAMPAIGN.iter().position(|&m| m == self)?;
        Self::CAMPAIGN.get(index + 1).copied()
    }

    /// Stable keyword used on the wire
    pub fn as_str(self) -> &'static str {
        match self {
            MissionCode::TeamUp => "team-up",
            MissionCode::Lantern => "lantern",
            MissionCode::Generator => "generator",
            MissionCode::Flashback => "flashback",
            MissionCode::SecondFloor => "second-floor",
            MissionCode::Medkit => "medkit",
            MissionCode::Bedroom => "bedroom",
            MissionCode::Companion => "companion",
            MissionCode::ThirdFloor => "third-floor",
            MissionCode::Boss => "boss",
        }
    }

    pub fn parse(s: &str) -> Option<MissionCode> {
        Self::CAMPAIGN.iter().copied().find(|m| m.as_str() == s)
    }
}

/// Progress through the active mission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionState {
    pub code: MissionCode,
    /// Step within the active mission; monotonically non-decreasing,
    /// reset to 0 when the next mission starts
    pub step: u32,
    pub dialogue_cursor: usize,
    pub objective_cursor: usize,
    /// Set once the final mission's last step completes
    pub campaign_complete: bool,
}

impl MissionState {
    pub fn new() -> Self {
        Self {
            code: MissionCode::TeamUp,
            step: 0,
            dialogue_cursor: 0,
            objective_cursor: 0,
            campaign_complete: false,
        }
    }
}

impl Default for MissionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_order_is_fixed() {
        assert_eq!(MissionCode::TeamUp.next(), Some(MissionCode::Lantern));
        assert_eq!(MissionCode::ThirdFloor.next(), Some(MissionCode::Boss));
        assert_eq!(MissionCode::Boss.next(), None);
    }

    #[test]
    fn test_codes_round_trip_through_str() {
        for code in MissionCode::CAMPAIGN {
            assert_eq!(MissionCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(MissionCode::parse("prologue"), None);
    }

    #[test]
    fn test_campaign_lists_every_stage_once() {
        for (i, a) in MissionCode::CAMPAIGN.iter().enumerate() {
            for b in &MissionCode::CAMPAIGN[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
