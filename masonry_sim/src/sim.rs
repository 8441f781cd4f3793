// Top-level simulation driver.
//
// `BuildSim` is the single owner of one wall-building run: the wall spec,
// the robot config, the PRNG, and the annotated wall itself. Construction
// is eager — `new()` validates both configs, generates the wall from the
// chosen bond, and runs stride assignment exactly once, so every
// `BuildSim` handed to a caller is fully annotated.
//
// Everything downstream is a pure read: `build_order()`, `metrics()`, and
// `estimate()` can be recomputed any number of times. The only mutations
// after construction are the build-stepping calls (`apply_step`,
// `mark_next_unbuilt`), which flip cell `built` flags for the presentation
// layer's step-by-step display.
//
// Each run owns its wall exclusively; simulating several walls in
// parallel means constructing several independent `BuildSim` values with
// no shared state.
//
// Save/load: `BuildSim` derives serde and round-trips through
// `to_json()`/`from_json()` with the PRNG stream position intact.
//
// See also: `bond.rs` for generation, `stride.rs` for assignment,
// `plan.rs`/`estimate.rs` for the consumers, `config.rs` for validation.
//
// **Critical constraint: determinism.** A `BuildSim` is a pure function of
// `(WallSpec, RobotConfig)` — identical inputs produce identical walls,
// plans, and reports.

use crate::bond;
use crate::config::{RobotConfig, WallSpec};
use crate::error::SimError;
use crate::estimate::{self, CostReport, Metrics};
use crate::plan::{self, BuildPlan, PlanStep};
use crate::prng::BondRng;
use crate::stride;
use crate::types::{CellAddr, Strategy};
use crate::wall::Wall;
use serde::{Deserialize, Serialize};

/// One wall-building run: annotated wall plus everything that produced it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildSim {
    spec: WallSpec,
    config: RobotConfig,
    rng: BondRng,
    wall: Wall,
}

impl BuildSim {
    /// Validate, generate, and assign. The returned sim is fully annotated.
    pub fn new(spec: WallSpec, config: RobotConfig) -> Result<Self, SimError> {
        config.validate()?;
        spec.validate()?;
        let mut rng = BondRng::new(spec.seed);
        let mut wall = bond::generate(&spec, config.course_height_mm, &mut rng);
        stride::assign_strides(&mut wall, &config);
        Ok(Self {
            spec,
            config,
            rng,
            wall,
        })
    }

    pub fn spec(&self) -> &WallSpec {
        &self.spec
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    /// The stride-ordered build sequence.
    pub fn build_order(&self) -> Result<BuildPlan, SimError> {
        plan::build_order(&self.wall)
    }

    /// Mark the brick of one plan step as placed.
    pub fn apply_step(&mut self, step: &PlanStep) {
        self.wall.mark_built(step.addr);
    }

    /// Naive sequential step: place the next unbuilt brick bottom-up.
    pub fn mark_next_unbuilt(&mut self) -> Option<CellAddr> {
        self.wall.mark_next_unbuilt()
    }

    pub fn all_built(&self) -> bool {
        self.wall.all_built()
    }

    pub fn metrics(&self) -> Result<Metrics, SimError> {
        estimate::metrics(&self.wall)
    }

    pub fn estimate(&self, strategy: Strategy) -> Result<CostReport, SimError> {
        estimate::estimate(&self.wall, &self.config, strategy)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
