//! Fitness scoring for assignments.
//!
//! Scoring never affects validity; it ranks already valid assignments.
//! The value is a relative quality signal with no absolute meaning and no
//! "good enough" threshold.

use rustc_hash::FxHashMap;

use crate::config::SolverConfig;
use crate::expand::LessonUnit;
use crate::interner::IdInt;
use crate::models::TimeSlot;

use super::state::Placement;

/// Score a (possibly partial) assignment. Higher is better.
///
/// Formula: `double_lesson_bonus * pairs - gap_weight * gap_periods`,
/// with each term dropped when its config toggle is off.
pub fn score_schedule(
    placements: &[Placement],
    units: &[LessonUnit],
    slots: &[TimeSlot],
    config: &SolverConfig,
) -> f64 {
    let mut score = 0.0;
    if config.minimize_gaps {
        score -= config.gap_weight * teacher_gap_periods(placements, units, slots) as f64;
    }
    if config.prefer_double_lessons {
        score += config.double_lesson_bonus * double_lesson_pairs(placements, units, slots) as f64;
    }
    score
}

/// Total free periods sitting between a teacher's lessons on one day,
/// summed over all teachers and days.
///
/// For each adjacent pair of occupied periods p1 < p2 the gap is `p2 - p1 - 1`;
/// lessons in consecutive periods contribute nothing. Pairs on different days
/// never count.
pub fn teacher_gap_periods(
    placements: &[Placement],
    units: &[LessonUnit],
    slots: &[TimeSlot],
) -> u32 {
    let mut by_teacher_day: FxHashMap<(IdInt, u8), Vec<u8>> = FxHashMap::default();
    for placement in placements {
        let unit = &units[placement.unit_idx];
        let slot = slots[placement.slot_idx];
        by_teacher_day
            .entry((unit.teacher, slot.day))
            .or_default()
            .push(slot.period);
    }

    let mut gaps = 0u32;
    for periods in by_teacher_day.values_mut() {
        periods.sort_unstable();
        for pair in periods.windows(2) {
            gaps += (pair[1] - pair[0]).saturating_sub(1) as u32;
        }
    }
    gaps
}

/// Count of same-subject pairs a class takes in consecutive periods of one
/// day, summed over all classes and days.
///
/// A run of three consecutive same-subject lessons counts as two pairs.
pub fn double_lesson_pairs(
    placements: &[Placement],
    units: &[LessonUnit],
    slots: &[TimeSlot],
) -> u32 {
    let mut by_class_day: FxHashMap<(IdInt, u8), Vec<(u8, IdInt)>> = FxHashMap::default();
    for placement in placements {
        let unit = &units[placement.unit_idx];
        let slot = slots[placement.slot_idx];
        by_class_day
            .entry((unit.class, slot.day))
            .or_default()
            .push((slot.period, unit.subject));
    }

    let mut pairs = 0u32;
    for lessons in by_class_day.values_mut() {
        lessons.sort_unstable();
        for pair in lessons.windows(2) {
            let (p1, s1) = pair[0];
            let (p2, s2) = pair[1];
            if p2 - p1 == 1 && s1 == s2 {
                pairs += 1;
            }
        }
    }
    pairs
}
