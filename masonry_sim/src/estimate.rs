// Time/energy cost model and stride metrics.
//
// Projects the total build time and energy for the two execution
// strategies over an assigned wall:
//
// - Shared baseline: placement time (one constant per brick) plus
//   vertical repositioning time (`floor(wall_height / max_stride_height)`
//   moves).
// - `Strategy::Stride`: one horizontal move (and one discrete move-energy
//   charge) per distinct stride rectangle.
// - `Strategy::Sequential`: a robot with no stride routing sweeps
//   left-right-left across the full row width — two horizontal moves per
//   course.
//
// `energy = time × continuous_draw + movement_energy`. The dual model
// exists so the efficiency gain of stride routing is measurable rather
// than asserted; the presentation layer's grading is derived entirely
// from this one comparison.
//
// Metrics and estimates are pure functions of the annotated wall and may
// be recomputed any number of times. Both refuse to run before stride
// assignment.
//
// See also: `stride.rs` for the labels counted here, `config.rs` for the
// cost constants, `plan.rs` for the sequence the stride strategy executes.

use crate::config::RobotConfig;
use crate::error::SimError;
use crate::types::{Strategy, StrideId, StrideLabel};
use crate::wall::{Phase, Wall};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Aggregate stride statistics for the end-of-run report.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_bricks: usize,
    pub total_strides: usize,
    /// 0 when the wall has no strides (empty grid), never a division error.
    pub avg_bricks_per_stride: f64,
}

/// Projected cost of one full build run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CostReport {
    pub time_seconds: f64,
    pub energy_kwh: f64,
}

/// Count of unique stride ids across the whole wall. Order is irrelevant
/// here, so a hash set is fine.
fn distinct_stride_count(wall: &Wall) -> usize {
    let mut seen: FxHashSet<StrideId> = FxHashSet::default();
    for (_, cell) in wall.iter_cells() {
        if let StrideLabel::Assigned(id) = cell.label {
            seen.insert(id);
        }
    }
    seen.len()
}

fn require_assigned(wall: &Wall) -> Result<(), SimError> {
    if wall.phase() != Phase::Assigned {
        return Err(SimError::InvariantViolation(
            "metrics requested before stride assignment".into(),
        ));
    }
    Ok(())
}

/// Stride metrics for the report panel.
pub fn metrics(wall: &Wall) -> Result<Metrics, SimError> {
    require_assigned(wall)?;
    let total_bricks = wall.total_bricks();
    let total_strides = distinct_stride_count(wall);
    let avg_bricks_per_stride = if total_strides == 0 {
        0.0
    } else {
        total_bricks as f64 / total_strides as f64
    };
    Ok(Metrics {
        total_bricks,
        total_strides,
        avg_bricks_per_stride,
    })
}

/// Project time and energy for one strategy.
pub fn estimate(
    wall: &Wall,
    config: &RobotConfig,
    strategy: Strategy,
) -> Result<CostReport, SimError> {
    require_assigned(wall)?;

    let placement_time = wall.total_bricks() as f64 * config.per_brick_placement_s;
    let vertical_blocks = (wall.height_mm() / config.max_stride_height_mm).floor();
    let vertical_time = vertical_blocks * config.per_vertical_move_s;

    let (movement_time, movement_energy) = match strategy {
        Strategy::Stride => {
            let strides = distinct_stride_count(wall) as f64;
            (
                strides * config.per_horizontal_move_s,
                strides * config.per_move_energy_kwh,
            )
        }
        Strategy::Sequential => {
            let sweeps = wall.rows() as f64 * 2.0;
            (
                sweeps * config.per_horizontal_move_s,
                sweeps * config.per_move_energy_kwh,
            )
        }
    };

    let time_seconds = placement_time + vertical_time + movement_time;
    let energy_kwh = time_seconds * config.energy_per_second_kwh + movement_energy;
    Ok(CostReport {
        time_seconds,
        energy_kwh,
    })
}
