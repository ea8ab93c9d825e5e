use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sport position as submitted with a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "QB")]
    Quarterback,
    #[serde(rename = "RB")]
    RunningBack,
    #[serde(rename = "WR")]
    WideReceiver,
    #[serde(rename = "TE")]
    TightEnd,
    #[serde(rename = "K")]
    Kicker,
    #[serde(rename = "DEF")]
    Defense,
}

/// One of the fixed roster slots every participant has to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "QB")]
    Qb,
    #[serde(rename = "RB1")]
    Rb1,
    #[serde(rename = "RB2")]
    Rb2,
    #[serde(rename = "WR1")]
    Wr1,
    #[serde(rename = "WR2")]
    Wr2,
    #[serde(rename = "TE")]
    Te,
    #[serde(rename = "FLEX")]
    Flex,
    #[serde(rename = "K")]
    K,
    #[serde(rename = "DEF")]
    Def,
}

/// Canonical slot order. Slot assignment always walks this order.
pub const ROSTER_SLOTS: [Slot; 9] = [
    Slot::Qb,
    Slot::Rb1,
    Slot::Rb2,
    Slot::Wr1,
    Slot::Wr2,
    Slot::Te,
    Slot::Flex,
    Slot::K,
    Slot::Def,
];

pub const ROSTER_SIZE: usize = ROSTER_SLOTS.len();

impl Position {
    /// Slots this position may occupy, most specific first.
    pub fn eligible_slots(&self) -> &'static [Slot] {
        match self {
            Position::Quarterback => &[Slot::Qb],
            Position::RunningBack => &[Slot::Rb1, Slot::Rb2, Slot::Flex],
            Position::WideReceiver => &[Slot::Wr1, Slot::Wr2, Slot::Flex],
            Position::TightEnd => &[Slot::Te, Slot::Flex],
            Position::Kicker => &[Slot::K],
            Position::Defense => &[Slot::Def],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Quarterback => "QB",
            Position::RunningBack => "RB",
            Position::WideReceiver => "WR",
            Position::TightEnd => "TE",
            Position::Kicker => "K",
            Position::Defense => "DEF",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosition(pub String);

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown position: {}", self.0)
    }
}

impl std::error::Error for UnknownPosition {}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "QB" => Ok(Position::Quarterback),
            "RB" => Ok(Position::RunningBack),
            "WR" => Ok(Position::WideReceiver),
            "TE" => Ok(Position::TightEnd),
            "K" | "PK" => Ok(Position::Kicker),
            "DEF" | "DST" | "D/ST" => Ok(Position::Defense),
            _ => Err(UnknownPosition(s.to_string())),
        }
    }
}

impl Slot {
    pub fn label(&self) -> &'static str {
        match self {
            Slot::Qb => "QB",
            Slot::Rb1 => "RB1",
            Slot::Rb2 => "RB2",
            Slot::Wr1 => "WR1",
            Slot::Wr2 => "WR2",
            Slot::Te => "TE",
            Slot::Flex => "FLEX",
            Slot::K => "K",
            Slot::Def => "DEF",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Open slots `position` may legally fill next, in canonical order.
///
/// FLEX sorts last in canonical order, so position-specific slots are always
/// offered before it. An empty result means the pick must be rejected.
pub fn open_slots(position: Position, filled: &[Slot]) -> Vec<Slot> {
    let eligible = position.eligible_slots();
    ROSTER_SLOTS
        .iter()
        .copied()
        .filter(|slot| eligible.contains(slot) && !filled.contains(slot))
        .collect()
}

/// The slot a pick of `position` lands in, if any.
pub fn assign_slot(position: Position, filled: &[Slot]) -> Option<Slot> {
    open_slots(position, filled).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("QB", Position::Quarterback)]
    #[case("rb", Position::RunningBack)]
    #[case(" WR ", Position::WideReceiver)]
    #[case("te", Position::TightEnd)]
    #[case("K", Position::Kicker)]
    #[case("PK", Position::Kicker)]
    #[case("DEF", Position::Defense)]
    #[case("D/ST", Position::Defense)]
    fn test_parse_position(#[case] label: &str, #[case] expected: Position) {
        assert_eq!(label.parse::<Position>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_position() {
        let err = "LB".parse::<Position>().unwrap_err();
        assert_eq!(err, UnknownPosition("LB".to_string()));
    }

    #[rstest]
    #[case(Position::Quarterback, &[], vec![Slot::Qb])]
    #[case(Position::RunningBack, &[], vec![Slot::Rb1, Slot::Rb2, Slot::Flex])]
    #[case(Position::RunningBack, &[Slot::Rb1], vec![Slot::Rb2, Slot::Flex])]
    #[case(Position::RunningBack, &[Slot::Rb1, Slot::Rb2], vec![Slot::Flex])]
    #[case(Position::WideReceiver, &[Slot::Flex], vec![Slot::Wr1, Slot::Wr2])]
    #[case(Position::TightEnd, &[Slot::Te], vec![Slot::Flex])]
    #[case(Position::TightEnd, &[Slot::Te, Slot::Flex], vec![])]
    #[case(Position::Kicker, &[Slot::K], vec![])]
    #[case(Position::Defense, &[Slot::Qb, Slot::K], vec![Slot::Def])]
    fn test_open_slots(
        #[case] position: Position,
        #[case] filled: &[Slot],
        #[case] expected: Vec<Slot>,
    ) {
        assert_eq!(open_slots(position, filled), expected);
    }

    #[test]
    fn test_flex_only_after_specific_slots() {
        let mut filled = Vec::new();
        for expected in [Slot::Rb1, Slot::Rb2, Slot::Flex] {
            let slot = assign_slot(Position::RunningBack, &filled).unwrap();
            assert_eq!(slot, expected);
            filled.push(slot);
        }
        assert_eq!(assign_slot(Position::RunningBack, &filled), None);
        assert_eq!(assign_slot(Position::WideReceiver, &filled), Some(Slot::Wr1));
    }

    #[test]
    fn test_full_roster_has_no_open_slots() {
        for position in [
            Position::Quarterback,
            Position::RunningBack,
            Position::WideReceiver,
            Position::TightEnd,
            Position::Kicker,
            Position::Defense,
        ] {
            assert!(open_slots(position, &ROSTER_SLOTS).is_empty());
        }
    }

    #[test]
    fn test_slot_serialization_uses_labels() {
        assert_eq!(serde_json::to_string(&Slot::Rb2).unwrap(), "\"RB2\"");
        assert_eq!(serde_json::to_string(&Slot::Flex).unwrap(), "\"FLEX\"");
        assert_eq!(
            serde_json::to_string(&Position::Defense).unwrap(),
            "\"DEF\""
        );
    }
}
