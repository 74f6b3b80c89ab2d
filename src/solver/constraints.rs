//! Hard feasibility rules for a single placement.

use crate::config::SolverConfig;
use crate::expand::LessonUnit;

use super::occupancy::OccupancyBoard;

/// Why a slot was rejected for a unit. Variants follow check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    TeacherBlocked,
    ClassBusy,
    TeacherBusy,
    DailyCapReached,
}

/// Check whether `unit` may be placed at `slot_idx`.
///
/// Rules run in a fixed order and stop at the first failure:
/// 1. teacher availability
/// 2. class uniqueness
/// 3. teacher uniqueness
/// 4. per-class daily cap
///
/// All four are hard; none are ever relaxed. Pure over the committed state,
/// no side effects.
pub fn check_placement(
    unit: &LessonUnit,
    slot_idx: usize,
    board: &OccupancyBoard,
    config: &SolverConfig,
) -> Result<(), Rejection> {
    if board.is_teacher_blocked(unit.teacher, slot_idx) {
        return Err(Rejection::TeacherBlocked);
    }
    if board.is_class_busy(unit.class, slot_idx) {
        return Err(Rejection::ClassBusy);
    }
    if board.is_teacher_busy(unit.teacher, slot_idx) {
        return Err(Rejection::TeacherBusy);
    }
    let day = board.slot_day(slot_idx);
    if board.class_lessons_on(unit.class, day) >= config.max_daily_lessons_per_class {
        return Err(Rejection::DailyCapReached);
    }
    Ok(())
}
