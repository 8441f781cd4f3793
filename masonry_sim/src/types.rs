// Core types shared across the simulation.
//
// Defines brick kinds and physical dimensions, the stride identifier
// (`StrideId` — a value type ordered numerically by `(block, substride)`,
// replacing the string labels a naive implementation would sort
// lexicographically), cell addresses, and the bond/strategy selectors.
// All types derive `Serialize` and `Deserialize` for save/load.
//
// **Critical constraint: determinism.** `StrideId` ordering drives the
// build sequence; it must be a total order on `(block, substride)` as
// integers, never on a rendered string.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Physical brick dimensions (mm)
// ---------------------------------------------------------------------------

/// Length of a full (stretcher) brick.
pub const FULL_BRICK_MM: u32 = 210;
/// Length of a half brick, and of a header brick seen face-on.
pub const HALF_BRICK_MM: u32 = 100;
/// Vertical head joint between bricks in a course.
pub const HEAD_JOINT_MM: u32 = 10;
/// Brick height.
pub const BRICK_HEIGHT_MM: f64 = 50.0;
/// Horizontal bed joint between courses.
pub const BED_JOINT_MM: f64 = 12.5;
/// Height of one course: brick plus bed joint.
pub const COURSE_HEIGHT_MM: f64 = BRICK_HEIGHT_MM + BED_JOINT_MM;

// ---------------------------------------------------------------------------
// Brick kinds
// ---------------------------------------------------------------------------

/// The kind of a single placement unit in a course.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickKind {
    /// Full stretcher brick (210 mm).
    Full,
    /// Half brick (100 mm).
    Half,
    /// Header brick laid across the wall, showing its 100 mm face.
    Front,
    /// Non-physical spacer of the given width in mm-equivalent units (0–3).
    /// Gaps require no placement action and render as blank width.
    Gap(u32),
}

impl BrickKind {
    /// Physical length along the course, in mm.
    pub fn length_mm(self) -> u32 {
        match self {
            Self::Full => FULL_BRICK_MM,
            Self::Half | Self::Front => HALF_BRICK_MM,
            Self::Gap(units) => units,
        }
    }

    /// Gaps are spacers: pre-built, no stride capacity, no placement action.
    pub fn is_gap(self) -> bool {
        matches!(self, Self::Gap(_))
    }
}

// ---------------------------------------------------------------------------
// Stride identity
// ---------------------------------------------------------------------------

/// Identifies one stride: a vertical reach block crossed with a horizontal
/// segment of one course. Both indices are 1-based.
///
/// The derived `Ord` compares `block` first, then `substride`, as integers —
/// so `S1_10` sorts after `S1_9` and before `S2_1`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct StrideId {
    pub block: u32,
    pub substride: u32,
}

impl StrideId {
    pub const fn new(block: u32, substride: u32) -> Self {
        Self { block, substride }
    }
}

impl fmt::Display for StrideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}_{}", self.block, self.substride)
    }
}

/// The stride label carried by every cell after assignment.
///
/// `Unassigned` is the error-indicating sentinel (rendered `S0_0`); a
/// non-gap cell still carrying it when sequencing or estimation runs is an
/// assigner defect, surfaced as `SimError::InvariantViolation`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrideLabel {
    /// The assigner never reached this cell. Not a valid label.
    #[default]
    Unassigned,
    /// Spacer cell — consumes cursor length but belongs to no stride.
    Gap,
    /// Assigned exactly once by the stride assigner; immutable thereafter.
    Assigned(StrideId),
}

impl fmt::Display for StrideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unassigned => write!(f, "S0_0"),
            Self::Gap => write!(f, "GAP"),
            Self::Assigned(id) => write!(f, "{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell addressing
// ---------------------------------------------------------------------------

/// Address of a cell in the wall grid: course index (bottom-to-top insertion
/// order) and cell index within the course (left to right).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct CellAddr {
    pub course: usize,
    pub cell: usize,
}

impl CellAddr {
    pub const fn new(course: usize, cell: usize) -> Self {
        Self { course, cell }
    }
}

// ---------------------------------------------------------------------------
// Run selectors
// ---------------------------------------------------------------------------

/// Bond pattern used to generate the wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bond {
    Stretcher,
    Flemish,
    Wild,
}

impl FromStr for Bond {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, SimError> {
        match s {
            "stretcher" => Ok(Self::Stretcher),
            "flemish" => Ok(Self::Flemish),
            "wild" => Ok(Self::Wild),
            other => Err(SimError::Config(format!(
                "unknown bond '{other}' (expected stretcher, flemish, or wild)"
            ))),
        }
    }
}

/// Execution strategy for the cost model.
///
/// An unrecognized strategy string is rejected at the parse boundary; the
/// core never sees an invalid selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Robot routes by stride — one horizontal move per distinct stride.
    Stride,
    /// Naive left-right-left sweep across the full row width per course.
    Sequential,
}

impl FromStr for Strategy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, SimError> {
        match s {
            "stride" => Ok(Self::Stride),
            "sequential" => Ok(Self::Sequential),
            other => Err(SimError::Config(format!(
                "unknown strategy '{other}' (expected stride or sequential)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_id_orders_numerically_not_lexicographically() {
        // "S1_10" < "S1_9" as strings — the value type must not reproduce that.
        let s1_9 = StrideId::new(1, 9);
        let s1_10 = StrideId::new(1, 10);
        let s2_1 = StrideId::new(2, 1);
        assert!(s1_9 < s1_10);
        assert!(s1_10 < s2_1);
        // The string comparison really is wrong, which is why it was replaced.
        assert!(s1_10.to_string() < s1_9.to_string());
    }

    #[test]
    fn stride_label_rendering() {
        assert_eq!(StrideLabel::Unassigned.to_string(), "S0_0");
        assert_eq!(StrideLabel::Gap.to_string(), "GAP");
        assert_eq!(
            StrideLabel::Assigned(StrideId::new(3, 2)).to_string(),
            "S3_2"
        );
    }

    #[test]
    fn brick_lengths() {
        assert_eq!(BrickKind::Full.length_mm(), 210);
        assert_eq!(BrickKind::Half.length_mm(), 100);
        assert_eq!(BrickKind::Front.length_mm(), 100);
        assert_eq!(BrickKind::Gap(2).length_mm(), 2);
        assert!(BrickKind::Gap(0).is_gap());
        assert!(!BrickKind::Front.is_gap());
    }

    #[test]
    fn course_height_is_brick_plus_bed_joint() {
        assert_eq!(COURSE_HEIGHT_MM, 62.5);
    }

    #[test]
    fn selector_parsing() {
        assert_eq!("wild".parse::<Bond>().unwrap(), Bond::Wild);
        assert_eq!("stride".parse::<Strategy>().unwrap(), Strategy::Stride);
        assert!("diagonal".parse::<Bond>().is_err());
        assert!("teleport".parse::<Strategy>().is_err());
    }

    #[test]
    fn stride_id_serialization_roundtrip() {
        let id = StrideId::new(2, 11);
        let json = serde_json::to_string(&id).unwrap();
        let restored: StrideId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, restored);
    }
}
