// Build-order sequencing over the assigned strides.
//
// Groups every placeable cell by its stride id and linearizes the groups
// in ascending `(block, substride)` order — the robot climbs one reach
// block at a time and sweeps its horizontal positions in order. Within a
// stride, cells keep the order in which the generator produced them
// (course by course, left to right), so the robot lays each rectangle
// bottom-up.
//
// Ordering rides on `StrideId`'s derived integer `Ord` inside a
// `BTreeMap`; there is no string comparison anywhere, so `S1_10` can never
// sort before `S1_9`.
//
// Cells already built at generation time (gaps) require no action and are
// excluded. A non-gap cell still carrying the unassigned sentinel is an
// assigner defect and aborts sequencing with an invariant violation.
//
// See also: `stride.rs` for the labels consumed here, `wall.rs` for the
// phase flag, `sim.rs` for the owning driver.
//
// **Critical constraint: determinism.** `BTreeMap` iteration order is the
// build order. No hash maps.

use crate::error::SimError;
use crate::types::{CellAddr, StrideId, StrideLabel};
use crate::wall::{Phase, Wall};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One placement step of the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub addr: CellAddr,
    pub stride: StrideId,
}

/// The full ordered build sequence.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BuildPlan {
    pub steps: Vec<PlanStep>,
}

impl BuildPlan {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Sequence the annotated wall into a build plan.
pub fn build_order(wall: &Wall) -> Result<BuildPlan, SimError> {
    if wall.phase() != Phase::Assigned {
        return Err(SimError::InvariantViolation(
            "build order requested before stride assignment".into(),
        ));
    }

    let mut groups: BTreeMap<StrideId, Vec<CellAddr>> = BTreeMap::new();
    for (addr, cell) in wall.iter_cells() {
        match cell.label {
            StrideLabel::Gap => {}
            StrideLabel::Assigned(id) => groups.entry(id).or_default().push(addr),
            StrideLabel::Unassigned => {
                return Err(SimError::InvariantViolation(format!(
                    "cell at course {}, index {} has no stride assignment",
                    addr.course, addr.cell
                )));
            }
        }
    }

    let steps = groups
        .into_iter()
        .flat_map(|(stride, addrs)| {
            addrs.into_iter().map(move |addr| PlanStep { addr, stride })
        })
        .collect();
    Ok(BuildPlan { steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RobotConfig;
    use crate::stride::assign_strides;
    use crate::types::BrickKind;
    use crate::wall::BrickCell;

    fn labelled_wall(labels: &[(u32, u32)]) -> Wall {
        // One course, one cell per label, phase forced to Assigned.
        let course = labels
            .iter()
            .map(|&(block, substride)| BrickCell {
                kind: BrickKind::Full,
                built: false,
                label: StrideLabel::Assigned(StrideId::new(block, substride)),
            })
            .collect();
        let mut wall = Wall::from_courses(vec![course], 2300, 62.5);
        wall.phase = Phase::Assigned;
        wall
    }

    #[test]
    fn strides_order_numerically_past_nine() {
        // Regression against string-sorted labels, where "S1_10" lands
        // before "S1_9" and "S2_1" lands between them.
        let wall = labelled_wall(&[(1, 10), (2, 1), (1, 9), (1, 1)]);
        let plan = build_order(&wall).unwrap();
        let order: Vec<StrideId> = plan.steps.iter().map(|s| s.stride).collect();
        assert_eq!(
            order,
            vec![
                StrideId::new(1, 1),
                StrideId::new(1, 9),
                StrideId::new(1, 10),
                StrideId::new(2, 1),
            ]
        );

        // The naive string sort really does get this wrong.
        let mut strings: Vec<String> = order.iter().map(|id| id.to_string()).collect();
        strings.sort();
        assert_eq!(strings, vec!["S1_1", "S1_10", "S1_9", "S2_1"]);
    }

    #[test]
    fn cells_within_a_stride_keep_production_order() {
        let wall = labelled_wall(&[(1, 1), (1, 1), (1, 2), (1, 1)]);
        let plan = build_order(&wall).unwrap();
        let addrs: Vec<usize> = plan.steps.iter().map(|s| s.addr.cell).collect();
        // Stride (1,1) cells in left-to-right order, then stride (1,2).
        assert_eq!(addrs, vec![0, 1, 3, 2]);
    }

    #[test]
    fn gaps_are_excluded_from_the_plan() {
        let course = vec![
            BrickCell::new(BrickKind::Gap(2)),
            BrickCell::new(BrickKind::Full),
        ];
        let mut wall = Wall::from_courses(vec![course], 2300, 62.5);
        assign_strides(&mut wall, &RobotConfig::default());
        let plan = build_order(&wall).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.steps[0].addr, CellAddr::new(0, 1));
    }

    #[test]
    fn unassigned_cell_aborts_sequencing() {
        let course = vec![BrickCell::new(BrickKind::Full)];
        let mut wall = Wall::from_courses(vec![course], 2300, 62.5);
        // Phase forced without running the assigner: the sentinel survives.
        wall.phase = Phase::Assigned;
        let err = build_order(&wall).unwrap_err();
        assert!(matches!(err, SimError::InvariantViolation(_)));
    }

    #[test]
    fn sequencing_before_assignment_is_refused() {
        let wall = Wall::from_courses(vec![], 2300, 62.5);
        assert!(matches!(
            build_order(&wall),
            Err(SimError::InvariantViolation(_))
        ));
    }

    #[test]
    fn plan_covers_every_brick_exactly_once() {
        let spec = crate::config::WallSpec::default();
        let mut rng = crate::prng::BondRng::new(spec.seed);
        let mut wall = crate::bond::generate(&spec, 62.5, &mut rng);
        assign_strides(&mut wall, &RobotConfig::default());
        let plan = build_order(&wall).unwrap();
        assert_eq!(plan.len(), wall.total_bricks());
        let mut seen = std::collections::BTreeSet::new();
        for step in &plan.steps {
            assert!(seen.insert(step.addr), "duplicate step at {:?}", step.addr);
        }
    }

    #[test]
    fn blocks_build_bottom_up() {
        let spec = crate::config::WallSpec {
            rows: 45,
            ..crate::config::WallSpec::default()
        };
        let mut rng = crate::prng::BondRng::new(spec.seed);
        let mut wall = crate::bond::generate(&spec, 62.5, &mut rng);
        assign_strides(&mut wall, &RobotConfig::default());
        let plan = build_order(&wall).unwrap();
        // Block ids never decrease along the plan.
        let mut last_block = 0;
        for step in &plan.steps {
            assert!(step.stride.block >= last_block);
            last_block = step.stride.block;
        }
        assert_eq!(last_block, 3);
    }
}
