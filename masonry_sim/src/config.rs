// Data-driven simulation configuration.
//
// All tunable parameters live here in two structs, loaded from JSON or
// constructed in code. The sim never uses magic numbers for robot
// capability or cost — it reads from the config:
//
// - `RobotConfig`: the robot's reach limits and time/energy cost
//   constants. Defaults mirror the reference robot (800 mm horizontal
//   reach, 1300 mm vertical reach ≈ 20 courses).
// - `WallSpec`: what to build — bond pattern, course count, wall width,
//   and the PRNG seed for wild bond.
//
// Both validate at `BuildSim` construction; invalid values are rejected
// with `SimError::Config` before any generation or assignment runs.
//
// See also: `sim.rs` which owns both structs as part of `BuildSim`,
// `stride.rs` for how reach limits partition the wall, `estimate.rs` for
// the cost constants.
//
// **Critical constraint: determinism.** Config values feed directly into
// simulation logic; identical `(WallSpec, RobotConfig)` pairs must produce
// identical walls and plans.

use crate::error::SimError;
use crate::types::{Bond, COURSE_HEIGHT_MM, FULL_BRICK_MM, HEAD_JOINT_MM};
use serde::{Deserialize, Serialize};

/// Robot arm reach limits and cost-model constants.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobotConfig {
    /// Max horizontal reach per stride, mm.
    pub max_stride_width_mm: f64,
    /// Max vertical reach of the arm before repositioning, mm.
    pub max_stride_height_mm: f64,
    /// Height of one course, mm. Normally `COURSE_HEIGHT_MM`.
    pub course_height_mm: f64,
    /// Seconds to place one brick.
    pub per_brick_placement_s: f64,
    /// Seconds to move horizontally to the next stride.
    pub per_horizontal_move_s: f64,
    /// Seconds to move vertically to the next reach block.
    pub per_vertical_move_s: f64,
    /// Continuous energy draw while working, kWh per second.
    pub energy_per_second_kwh: f64,
    /// Discrete energy cost per movement, kWh.
    pub per_move_energy_kwh: f64,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            max_stride_width_mm: 800.0,
            max_stride_height_mm: 1300.0,
            course_height_mm: COURSE_HEIGHT_MM,
            per_brick_placement_s: 2.0,
            per_horizontal_move_s: 10.0,
            per_vertical_move_s: 15.0,
            energy_per_second_kwh: 0.5,
            per_move_energy_kwh: 0.05,
        }
    }
}

impl RobotConfig {
    /// Reject non-positive scalars and a vertical reach shorter than one
    /// course (which would make the block partition empty).
    pub fn validate(&self) -> Result<(), SimError> {
        let scalars = [
            ("max_stride_width_mm", self.max_stride_width_mm),
            ("max_stride_height_mm", self.max_stride_height_mm),
            ("course_height_mm", self.course_height_mm),
            ("per_brick_placement_s", self.per_brick_placement_s),
            ("per_horizontal_move_s", self.per_horizontal_move_s),
            ("per_vertical_move_s", self.per_vertical_move_s),
            ("energy_per_second_kwh", self.energy_per_second_kwh),
            ("per_move_energy_kwh", self.per_move_energy_kwh),
        ];
        for (name, value) in scalars {
            if value <= 0.0 || !value.is_finite() {
                return Err(SimError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        if self.max_stride_height_mm < self.course_height_mm {
            return Err(SimError::Config(format!(
                "max_stride_height_mm ({}) is shorter than one course ({})",
                self.max_stride_height_mm, self.course_height_mm
            )));
        }
        Ok(())
    }

    /// How many courses fit in one vertical reach block.
    /// `floor(max_stride_height / course_height)`, at least 1 after
    /// `validate()`.
    pub fn courses_per_block(&self) -> usize {
        (self.max_stride_height_mm / self.course_height_mm).floor() as usize
    }
}

/// What to build: bond pattern, size, and generation seed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WallSpec {
    pub bond: Bond,
    /// Number of courses, bottom to top.
    pub rows: usize,
    /// Wall width, mm.
    pub width_mm: u32,
    /// Seed for wild bond generation. Ignored by deterministic bonds.
    pub seed: u64,
}

impl Default for WallSpec {
    fn default() -> Self {
        Self {
            bond: Bond::Stretcher,
            rows: 32,
            width_mm: 2300,
            seed: 0,
        }
    }
}

impl WallSpec {
    /// A zero-row wall is legal (the empty-grid edge case); a wall narrower
    /// than one full brick plus joint is not.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.width_mm < FULL_BRICK_MM + HEAD_JOINT_MM {
            return Err(SimError::Config(format!(
                "width_mm ({}) cannot fit a single full brick",
                self.width_mm
            )));
        }
        Ok(())
    }
}
