//! Grade domain: seven ordered seniority tiers, G7 (Board) down to G1.
//!
//! The derived `Ord` follows authority: `Grade::G7 > Grade::G1`.

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Grade {
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
}

/// Location token for tier grades (G7..G4).
pub const TIER_LOCATION: &str = "tier";

impl Grade {
    /// Highest authority first (display and distribution order).
    pub const ALL: [Grade; 7] = [
        Grade::G7,
        Grade::G6,
        Grade::G5,
        Grade::G4,
        Grade::G3,
        Grade::G2,
        Grade::G1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::G1 => "G1",
            Grade::G2 => "G2",
            Grade::G3 => "G3",
            Grade::G4 => "G4",
            Grade::G5 => "G5",
            Grade::G6 => "G6",
            Grade::G7 => "G7",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::G7 => "Board / CMD",
            Grade::G6 => "Group Leadership",
            Grade::G5 => "Senior Management",
            Grade::G4 => "Mid Management",
            Grade::G3 => "Lead",
            Grade::G2 => "Specialist",
            Grade::G1 => "Associates",
        }
    }

    /// Enterprise-wide positions that may legitimately have no reporting line.
    pub fn is_root_eligible(self) -> bool {
        matches!(self, Grade::G7 | Grade::G6)
    }

    /// The three highest tiers, counted by the leadership ratio.
    pub fn is_leadership(self) -> bool {
        matches!(self, Grade::G7 | Grade::G6 | Grade::G5)
    }

    pub fn is_tier(self) -> bool {
        self >= Grade::G4
    }

    /// Track id for non-tier grades.
    pub fn track_id(self) -> Option<&'static str> {
        match self {
            Grade::G3 => Some("lead"),
            Grade::G2 => Some("specialist"),
            Grade::G1 => Some("associate"),
            _ => None,
        }
    }

    /// `"tier"` for G7..G4, `"track:<id>"` otherwise.
    pub fn location(self) -> String {
        match self.track_id() {
            Some(track) => format!("track:{track}"),
            None => String::from(TIER_LOCATION),
        }
    }

    /// Sub-levels, highest first. Empty for grades without sub-levels.
    pub fn levels(self) -> &'static [&'static str] {
        match self {
            Grade::G3 | Grade::G2 => &["L2", "L1"],
            Grade::G1 => &["L3", "L2", "L1"],
            _ => &[],
        }
    }

    /// Lowest listed level (e.g. `L1`), if the grade has levels.
    pub fn default_level(self) -> Option<&'static str> {
        self.levels().last().copied()
    }

    pub fn accepts_level(self, level: &str) -> bool {
        self.levels().iter().any(|l| *l == level)
    }

    /// Missing or unknown grades fall to the lowest tier.
    pub fn parse_lenient(s: &str) -> Grade {
        s.parse().unwrap_or(Grade::G1)
    }

    /// Map a seed-catalogue bucket label to its grade.
    pub fn from_bucket(bucket: &str) -> Grade {
        match bucket {
            "Board" => Grade::G7,
            "Leadership" => Grade::G6,
            "Senior Management" => Grade::G5,
            "Mid Management" => Grade::G4,
            "Lead" => Grade::G3,
            "Specialist" => Grade::G2,
            _ => Grade::G1,
        }
    }
}

impl Default for Grade {
    fn default() -> Self { Grade::G1 }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "G1" => Ok(Grade::G1),
            "G2" => Ok(Grade::G2),
            "G3" => Ok(Grade::G3),
            "G4" => Ok(Grade::G4),
            "G5" => Ok(Grade::G5),
            "G6" => Ok(Grade::G6),
            "G7" => Ok(Grade::G7),
            _ => Err(CoreError::InvalidGrade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authority_order() {
        assert!(Grade::G7 > Grade::G6);
        assert!(Grade::G2 > Grade::G1);
        let mut v = alloc::vec![Grade::G1, Grade::G7, Grade::G4];
        v.sort_by(|a, b| b.cmp(a));
        assert_eq!(v, alloc::vec![Grade::G7, Grade::G4, Grade::G1]);
    }

    #[test]
    fn locations_and_levels() {
        assert_eq!(Grade::G4.location(), "tier");
        assert_eq!(Grade::G3.location(), "track:lead");
        assert_eq!(Grade::G1.location(), "track:associate");
        assert_eq!(Grade::G1.default_level(), Some("L1"));
        assert_eq!(Grade::G5.default_level(), None);
        assert!(Grade::G1.accepts_level("L3"));
        assert!(!Grade::G2.accepts_level("L3"));
    }

    #[test]
    fn lenient_parse_defaults_to_lowest() {
        assert_eq!(Grade::parse_lenient("G6"), Grade::G6);
        assert_eq!(Grade::parse_lenient(""), Grade::G1);
        assert_eq!(Grade::parse_lenient("Manager"), Grade::G1);
        assert_eq!("G9".parse::<Grade>(), Err(CoreError::InvalidGrade));
    }
}
