// The wall grid — courses of brick cells, the simulation's spatial truth.
//
// The wall is stored as a `Vec<Course>` in insertion order (bottom to top;
// top-down display is a presentation concern handled by the CLI). It is
// built once by the bond generator (`bond.rs`) and never resized by the
// core — after generation, only each cell's `built` flag and stride label
// are mutated in place.
//
// The `phase` flag tracks the `Unassigned → Assigned` transition: stride
// assignment (`stride.rs`) takes the wall by exclusive borrow exactly once;
// sequencing and estimation take it by shared borrow and refuse to run
// before assignment. Re-running assignment on an already-annotated wall is
// not supported.
//
// See also: `bond.rs` for generation, `stride.rs` for assignment,
// `plan.rs`/`estimate.rs` for the read-only consumers, `sim.rs` which owns
// the wall as part of `BuildSim`.
//
// **Critical constraint: determinism.** Cell iteration is always course
// order then cell order — no hash-ordered traversal anywhere.

use crate::types::{BrickKind, CellAddr, StrideLabel};
use serde::{Deserialize, Serialize};

/// One placement unit in a course.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickCell {
    pub kind: BrickKind,
    /// Mutated by the build simulation. Gap cells start `true` — they
    /// require no action.
    pub built: bool,
    /// Assigned exactly once by the stride assigner.
    pub label: StrideLabel,
}

impl BrickCell {
    pub fn new(kind: BrickKind) -> Self {
        Self {
            kind,
            built: kind.is_gap(),
            label: StrideLabel::Unassigned,
        }
    }
}

/// One course of the wall, left to right.
pub type Course = Vec<BrickCell>;

/// Assignment phase of the wall. Checked at the start of sequencing and
/// estimation; see `plan.rs` and `estimate.rs`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Unassigned,
    Assigned,
}

/// The wall grid.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Wall {
    pub(crate) courses: Vec<Course>,
    width_mm: u32,
    height_mm: f64,
    pub(crate) phase: Phase,
}

impl Wall {
    /// Assemble a wall from generated courses. Height is derived from the
    /// course count; see `bond.rs` for the only caller.
    pub(crate) fn from_courses(courses: Vec<Course>, width_mm: u32, course_height_mm: f64) -> Self {
        let height_mm = courses.len() as f64 * course_height_mm;
        Self {
            courses,
            width_mm,
            height_mm,
            phase: Phase::Unassigned,
        }
    }

    pub fn width_mm(&self) -> u32 {
        self.width_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.height_mm
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of courses.
    pub fn rows(&self) -> usize {
        self.courses.len()
    }

    /// Shared view of the courses, bottom to top.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn cell(&self, addr: CellAddr) -> Option<&BrickCell> {
        self.courses.get(addr.course)?.get(addr.cell)
    }

    /// Iterate all cells in deterministic course-then-cell order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellAddr, &BrickCell)> {
        self.courses.iter().enumerate().flat_map(|(course, row)| {
            row.iter()
                .enumerate()
                .map(move |(cell, brick)| (CellAddr::new(course, cell), brick))
        })
    }

    /// Count of physical (non-gap) cells.
    pub fn total_bricks(&self) -> usize {
        self.iter_cells().filter(|(_, c)| !c.kind.is_gap()).count()
    }

    /// Mark the cell at `addr` built. Out-of-bounds addresses are no-ops,
    /// mirroring the out-of-bounds write behavior of the grid.
    pub fn mark_built(&mut self, addr: CellAddr) {
        if let Some(row) = self.courses.get_mut(addr.course)
            && let Some(cell) = row.get_mut(addr.cell)
        {
            cell.built = true;
        }
    }

    /// Mark the first unbuilt cell (scanning bottom-up, left to right) as
    /// built and return its address. `None` when the wall is complete.
    /// This is the naive sequential build step.
    pub fn mark_next_unbuilt(&mut self) -> Option<CellAddr> {
        for (course, row) in self.courses.iter_mut().enumerate() {
            for (cell, brick) in row.iter_mut().enumerate() {
                if !brick.built {
                    brick.built = true;
                    return Some(CellAddr::new(course, cell));
                }
            }
        }
        None
    }

    pub fn all_built(&self) -> bool {
        self.iter_cells().all(|(_, c)| c.built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::COURSE_HEIGHT_MM;

    fn two_course_wall() -> Wall {
        let courses = vec![
            vec![
                BrickCell::new(BrickKind::Full),
                BrickCell::new(BrickKind::Gap(2)),
                BrickCell::new(BrickKind::Half),
            ],
            vec![BrickCell::new(BrickKind::Half), BrickCell::new(BrickKind::Full)],
        ];
        Wall::from_courses(courses, 2300, COURSE_HEIGHT_MM)
    }

    #[test]
    fn gap_cells_start_built() {
        let wall = two_course_wall();
        let gap = wall.cell(CellAddr::new(0, 1)).unwrap();
        assert!(gap.built);
        let brick = wall.cell(CellAddr::new(0, 0)).unwrap();
        assert!(!brick.built);
    }

    #[test]
    fn total_bricks_excludes_gaps() {
        assert_eq!(two_course_wall().total_bricks(), 4);
    }

    #[test]
    fn height_derives_from_course_count() {
        assert_eq!(two_course_wall().height_mm(), 125.0);
    }

    #[test]
    fn mark_next_unbuilt_scans_bottom_up_and_skips_gaps() {
        let mut wall = two_course_wall();
        // The gap at (0,1) is already built, so the scan visits (0,0),
        // (0,2), then course 1.
        assert_eq!(wall.mark_next_unbuilt(), Some(CellAddr::new(0, 0)));
        assert_eq!(wall.mark_next_unbuilt(), Some(CellAddr::new(0, 2)));
        assert_eq!(wall.mark_next_unbuilt(), Some(CellAddr::new(1, 0)));
        assert_eq!(wall.mark_next_unbuilt(), Some(CellAddr::new(1, 1)));
        assert_eq!(wall.mark_next_unbuilt(), None);
        assert!(wall.all_built());
    }

    #[test]
    fn out_of_bounds_mark_is_noop() {
        let mut wall = two_course_wall();
        wall.mark_built(CellAddr::new(9, 9));
        assert!(!wall.all_built());
    }

    #[test]
    fn new_wall_is_unassigned() {
        assert_eq!(two_course_wall().phase(), Phase::Unassigned);
    }
}
