// Bond pattern generation — populates the wall grid course by course.
//
// The generator is the sole producer of `Wall` values. Each bond fills
// courses left to right until the next unit (plus its head joint) would
// overrun the wall width, closing with a half brick where one fits:
//
// - **Stretcher**: full bricks; odd courses start and end with a half
//   brick for the running-bond offset.
// - **Flemish**: alternating stretcher (Full) and header (Front) units;
//   odd courses lead with a small gap spacer and a header so the joints
//   land between the course below's units.
// - **Wild**: randomized Full/Half per cell. Row-to-row structure is
//   carried in an explicit `PatternState` fold: the leading offset must
//   alternate with the previous course, and a unit whose head joint would
//   align with one in the course below is swapped for the other kind when
//   the swap is legal (fits, and does not stack two halves).
//
// Called during `BuildSim::new()` to build the wall before stride
// assignment. Gap cells are created pre-built — they require no action.
//
// See also: `wall.rs` for the grid being populated, `config.rs` for
// `WallSpec`, `prng.rs` for the PRNG, `sim.rs` which calls `generate()`.
//
// **Critical constraint: determinism.** All randomness comes from the
// `BondRng` passed by the caller. Integer arithmetic only for lengths.

use crate::config::WallSpec;
use crate::prng::BondRng;
use crate::types::{Bond, BrickKind, FULL_BRICK_MM, HALF_BRICK_MM, HEAD_JOINT_MM};
use crate::wall::{BrickCell, Course, Wall};
use smallvec::SmallVec;

/// Row-generation state carried between wild bond courses.
///
/// `joints` holds the x position (mm from the left wall edge) of every head
/// joint in the finished course, excluding the wall ends.
#[derive(Clone, Debug)]
pub struct PatternState {
    pub offset_mm: u32,
    pub joints: SmallVec<[u32; 32]>,
}

/// Generate the full wall for the given spec. `course_height_mm` comes from
/// the robot config and only affects the reported wall height.
pub fn generate(spec: &WallSpec, course_height_mm: f64, rng: &mut BondRng) -> Wall {
    let courses: Vec<Course> = match spec.bond {
        Bond::Stretcher => (0..spec.rows)
            .map(|row| stretcher_course(row, spec.width_mm))
            .collect(),
        Bond::Flemish => (0..spec.rows)
            .map(|row| flemish_course(row, spec.width_mm))
            .collect(),
        Bond::Wild => {
            let mut courses = Vec::with_capacity(spec.rows);
            let mut state: Option<PatternState> = None;
            for _ in 0..spec.rows {
                let (course, next) = wild_course(spec.width_mm, state.as_ref(), rng);
                courses.push(course);
                state = Some(next);
            }
            courses
        }
    };
    Wall::from_courses(courses, spec.width_mm, course_height_mm)
}

/// Running bond: odd courses are offset by half a brick, so they start and
/// end with a half.
fn stretcher_course(row: usize, width_mm: u32) -> Course {
    let mut course = Course::new();
    let offset = if row % 2 == 1 {
        HALF_BRICK_MM + HEAD_JOINT_MM
    } else {
        0
    };
    let mut remaining = width_mm - offset;
    if offset > 0 {
        course.push(BrickCell::new(BrickKind::Half));
    }
    while remaining >= FULL_BRICK_MM + HEAD_JOINT_MM {
        course.push(BrickCell::new(BrickKind::Full));
        remaining -= FULL_BRICK_MM + HEAD_JOINT_MM;
    }
    if offset > 0 && remaining >= HALF_BRICK_MM {
        course.push(BrickCell::new(BrickKind::Half));
    }
    course
}

/// Flemish bond: stretchers and headers alternate within every course; odd
/// courses are phase-shifted by a leading header behind a small spacer.
fn flemish_course(row: usize, width_mm: u32) -> Course {
    let mut course = Course::new();
    let mut remaining = width_mm;
    let mut next_full = row % 2 == 0;
    if row % 2 == 1 {
        // Spacer breaks joint alignment with the course below.
        course.push(BrickCell::new(BrickKind::Gap(3)));
        remaining -= 3;
    }
    loop {
        let kind = if next_full {
            BrickKind::Full
        } else {
            BrickKind::Front
        };
        let need = kind.length_mm() + HEAD_JOINT_MM;
        if remaining < need {
            if remaining >= HALF_BRICK_MM {
                course.push(BrickCell::new(BrickKind::Half));
            }
            break;
        }
        course.push(BrickCell::new(kind));
        remaining -= need;
        next_full = !next_full;
    }
    course
}

/// Wild bond: random Full/Half sequence constrained by the previous course.
///
/// Constraints, in priority order: the unit must fit the remaining width,
/// two halves never sit side by side, and the unit's head joint must not
/// align with a joint in the course below. The joint-alignment rule is the
/// soft one: when both kinds would align, the fitting kind goes down anyway
/// — a real bricklayer breaks the aesthetic rule before leaving a hole.
fn wild_course(
    width_mm: u32,
    prev: Option<&PatternState>,
    rng: &mut BondRng,
) -> (Course, PatternState) {
    let mut course = Course::new();
    let mut joints: SmallVec<[u32; 32]> = SmallVec::new();

    // The leading offset alternates with the previous course; the first
    // course picks at random.
    let offset = match prev {
        Some(state) if state.offset_mm == 0 => HALF_BRICK_MM + HEAD_JOINT_MM,
        Some(_) => 0,
        None if rng.chance(50) => HALF_BRICK_MM + HEAD_JOINT_MM,
        None => 0,
    };

    let mut cursor = 0u32;
    let mut last_was_half = false;
    if offset > 0 {
        course.push(BrickCell::new(BrickKind::Half));
        cursor = HALF_BRICK_MM;
        joints.push(cursor);
        cursor += HEAD_JOINT_MM;
        last_was_half = true;
    }

    loop {
        let space = width_mm.saturating_sub(cursor);
        if space < HALF_BRICK_MM {
            break;
        }
        let fits_full = space >= FULL_BRICK_MM;
        // Only a half fits but a half just went down: close the course
        // early rather than stack two halves.
        if !fits_full && last_was_half {
            break;
        }

        let preferred = if rng.chance(70) {
            [BrickKind::Full, BrickKind::Half]
        } else {
            [BrickKind::Half, BrickKind::Full]
        };
        let mut chosen = None;
        for kind in preferred {
            if kind == BrickKind::Full && !fits_full {
                continue;
            }
            if kind == BrickKind::Half && last_was_half {
                continue;
            }
            let joint_x = cursor + kind.length_mm();
            let aligned = joint_x < width_mm
                && prev.is_some_and(|state| state.joints.contains(&joint_x));
            if aligned {
                continue;
            }
            chosen = Some(kind);
            break;
        }
        let kind = chosen.unwrap_or(if fits_full {
            BrickKind::Full
        } else {
            BrickKind::Half
        });

        course.push(BrickCell::new(kind));
        cursor += kind.length_mm();
        if cursor < width_mm {
            joints.push(cursor);
        }
        cursor += HEAD_JOINT_MM;
        last_was_half = kind == BrickKind::Half;
    }

    (
        course,
        PatternState {
            offset_mm: offset,
            joints,
        },
    )
}
