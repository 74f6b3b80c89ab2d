//! Weekly timetable generation engine.
//!
//! Expands weekly lesson demands into atomic units, assigns them to a fixed
//! day/period grid by randomized depth-first search with backtracking, and
//! returns the best schedule found together with a fitness score and
//! advisory conflict notes.
//!
//! The library entry points are [`solve`], [`solve_seeded`], and
//! [`solve_with_order`]; [`service::spawn_solve`] wraps a run in a
//! background-thread job with a tagged terminal reply.

use rustc_hash::FxHashMap;
use thiserror::Error;

pub mod config;
pub mod expand;
pub mod interner;
pub mod logging;
pub mod models;
pub mod service;
pub mod solver;

pub use config::SolverConfig;
pub use expand::{expand_demands, LessonUnit};
pub use interner::{IdInt, IdInterner};
pub use models::{
    GenerationInput, GenerationOutput, LessonDemand, ScheduleEntry, TeacherAvailability, TimeSlot,
    DAYS_PER_WEEK,
};
pub use service::{spawn_solve, SolveJob, SolveRecord, SolveReply};
pub use solver::{
    assemble_output, DomainOrder, OccupancyBoard, SearchEngine, SearchOutcome, SearchStats,
    ShuffledOrder, SlotOrder, StopReason,
};

/// Input faults that prevent a generation run from starting.
///
/// Failing to find a complete schedule is not an error; it surfaces as
/// advisory `conflicts` on a normal output.
#[derive(Error, Debug)]
pub enum SolveError {
    #[error("Duplicate slot in domain: {0:?}")]
    DuplicateSlot(TimeSlot),
    #[error("Slot day out of range: {0:?}")]
    DayOutOfRange(TimeSlot),
}

/// Generate a schedule with a fresh randomized slot order.
///
/// Re-invoking on the same input may legitimately return a different,
/// possibly better, schedule.
pub fn solve(input: &GenerationInput) -> Result<GenerationOutput, SolveError> {
    solve_with_order(input, ShuffledOrder::from_os())
}

/// Generate a schedule with a fixed seed.
///
/// Identical input and seed yield an identical schedule.
pub fn solve_seeded(input: &GenerationInput, seed: u64) -> Result<GenerationOutput, SolveError> {
    solve_with_order(input, ShuffledOrder::seeded(seed))
}

/// Generate a schedule with a caller-supplied slot order provider.
pub fn solve_with_order<O: SlotOrder>(
    input: &GenerationInput,
    order: O,
) -> Result<GenerationOutput, SolveError> {
    let slot_index = index_slots(&input.slots)?;

    let mut interner = IdInterner::with_capacity(input.lessons.len() * 3);
    let units = expand_demands(&input.lessons, &mut interner);

    let mut board = OccupancyBoard::new(interner.len(), &input.slots);
    for availability in &input.availability {
        // Teachers that teach nothing need no board row.
        let teacher = match interner.get(&availability.teacher_id) {
            Some(teacher) => teacher,
            None => continue,
        };
        // Blocked slots outside the grid can never be tried; skip them.
        for blocked in &availability.blocked {
            if let Some(&slot_idx) = slot_index.get(blocked) {
                board.block_teacher(teacher, slot_idx);
            }
        }
    }

    let engine = SearchEngine::new(&units, &input.slots, &input.config, order, board);
    let outcome = engine.run();
    Ok(assemble_output(&outcome, &units, &input.slots, &interner))
}

/// Validate the grid and index slots for lookups.
fn index_slots(slots: &[TimeSlot]) -> Result<FxHashMap<TimeSlot, usize>, SolveError> {
    let mut index = FxHashMap::with_capacity_and_hasher(slots.len(), Default::default());
    for (slot_idx, slot) in slots.iter().enumerate() {
        if slot.day as usize >= DAYS_PER_WEEK {
            return Err(SolveError::DayOutOfRange(*slot));
        }
        if index.insert(*slot, slot_idx).is_some() {
            return Err(SolveError::DuplicateSlot(*slot));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rustc_hash::FxHashSet;

    fn demand(subject: &str, teacher: &str, class: &str, quantity: u32) -> LessonDemand {
        LessonDemand {
            subject_id: subject.to_string(),
            teacher_id: teacher.to_string(),
            class_id: class.to_string(),
            quantity,
        }
    }

    fn grid(days: u8, periods: u8) -> Vec<TimeSlot> {
        let mut slots = Vec::new();
        for day in 0..days {
            for period in 0..periods {
                slots.push(TimeSlot { day, period });
            }
        }
        slots
    }

    /// Panics unless all four hard rules hold for the returned schedule.
    fn assert_hard_rules(input: &GenerationInput, output: &GenerationOutput) {
        let mut class_slots = FxHashSet::default();
        let mut teacher_slots = FxHashSet::default();
        let mut daily: FxHashMap<(String, u8), u32> = FxHashMap::default();

        for entry in &output.schedule {
            assert!(
                class_slots.insert((entry.class_id.clone(), entry.day, entry.period)),
                "class double-booked: {:?}",
                entry
            );
            assert!(
                teacher_slots.insert((entry.teacher_id.clone(), entry.day, entry.period)),
                "teacher double-booked: {:?}",
                entry
            );
            *daily
                .entry((entry.class_id.clone(), entry.day))
                .or_insert(0) += 1;
        }

        for ((class_id, day), count) in &daily {
            assert!(
                *count <= input.config.max_daily_lessons_per_class,
                "class {} over the daily cap on day {}: {}",
                class_id,
                day,
                count
            );
        }

        for availability in &input.availability {
            for blocked in &availability.blocked {
                let hit = output.schedule.iter().any(|entry| {
                    entry.teacher_id == availability.teacher_id
                        && entry.day == blocked.day
                        && entry.period == blocked.period
                });
                assert!(
                    !hit,
                    "teacher {} scheduled in blocked slot {:?}",
                    availability.teacher_id, blocked
                );
            }
        }
    }

    #[test]
    fn test_empty_input_is_a_complete_empty_schedule() {
        let input = GenerationInput {
            lessons: Vec::new(),
            slots: grid(5, 4),
            availability: Vec::new(),
            config: Default::default(),
        };
        let output = solve_seeded(&input, 1).unwrap();
        assert!(output.schedule.is_empty());
        assert_eq!(output.fitness, 0.0);
        assert!(output.conflicts.is_empty());
    }

    #[test]
    fn test_duplicate_slot_is_rejected() {
        let mut slots = grid(2, 2);
        slots.push(TimeSlot { day: 1, period: 1 });
        let input = GenerationInput {
            lessons: vec![demand("math", "t1", "5a", 1)],
            slots,
            availability: Vec::new(),
            config: Default::default(),
        };
        match solve_seeded(&input, 1) {
            Err(SolveError::DuplicateSlot(slot)) => {
                assert_eq!(slot, TimeSlot { day: 1, period: 1 });
            }
            other => panic!("expected DuplicateSlot, got {:?}", other),
        }
    }

    #[test]
    fn test_day_out_of_range_is_rejected() {
        let input = GenerationInput {
            lessons: Vec::new(),
            slots: vec![TimeSlot { day: 5, period: 0 }],
            availability: Vec::new(),
            config: Default::default(),
        };
        assert!(matches!(
            solve_seeded(&input, 1),
            Err(SolveError::DayOutOfRange(_))
        ));
    }

    #[test]
    fn test_full_week_comes_back_complete() {
        let input = GenerationInput {
            lessons: vec![
                demand("math", "t1", "5a", 4),
                demand("en", "t2", "5a", 4),
                demand("art", "t3", "5a", 4),
                demand("math", "t1", "5b", 4),
                demand("en", "t2", "5b", 4),
                demand("sci", "t4", "5b", 4),
                demand("math", "t1", "5c", 4),
                demand("art", "t3", "5c", 4),
                demand("sci", "t4", "5c", 4),
            ],
            slots: grid(5, 6),
            availability: Vec::new(),
            config: Default::default(),
        };
        let output = solve_seeded(&input, 42).unwrap();
        assert_eq!(output.schedule.len(), 36);
        assert!(output.conflicts.is_empty());
        assert_hard_rules(&input, &output);
    }

    #[test]
    fn test_blocked_day_shrinks_the_partial() {
        // One slot per day; day 0 blocked for the only teacher leaves four
        // usable slots for five lessons.
        let input = GenerationInput {
            lessons: vec![demand("math", "t1", "5a", 5)],
            slots: grid(5, 1),
            availability: vec![TeacherAvailability {
                teacher_id: "t1".to_string(),
                blocked: vec![TimeSlot { day: 0, period: 0 }],
            }],
            config: Default::default(),
        };
        let output = solve_seeded(&input, 2).unwrap();
        assert_eq!(output.schedule.len(), 4);
        assert_eq!(output.conflicts.len(), 1);
        assert_hard_rules(&input, &output);
    }

    #[test]
    fn test_blocked_slot_outside_grid_is_ignored() {
        let input = GenerationInput {
            lessons: vec![demand("math", "t1", "5a", 1)],
            slots: grid(2, 2),
            availability: vec![TeacherAvailability {
                teacher_id: "t1".to_string(),
                blocked: vec![TimeSlot { day: 4, period: 9 }],
            }],
            config: Default::default(),
        };
        let output = solve_seeded(&input, 3).unwrap();
        assert_eq!(output.schedule.len(), 1);
        assert!(output.conflicts.is_empty());
    }

    #[test]
    fn test_seed_determinism_end_to_end() {
        let input = GenerationInput {
            lessons: vec![
                demand("math", "t1", "5a", 3),
                demand("en", "t2", "5b", 2),
                demand("art", "t1", "5b", 1),
            ],
            slots: grid(5, 2),
            availability: Vec::new(),
            config: Default::default(),
        };
        let first = solve_seeded(&input, 99).unwrap();
        let second = solve_seeded(&input, 99).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_random_instances_respect_hard_rules() {
        let mut rng = StdRng::seed_from_u64(0xBEEF);
        for round in 0..40u64 {
            let n_teachers: usize = rng.random_range(1..=4);
            let n_classes: usize = rng.random_range(1..=4);
            let n_subjects: usize = rng.random_range(1..=3);
            let days: u8 = rng.random_range(1..=5);
            let periods: u8 = rng.random_range(1..=4);

            let n_demands: usize = rng.random_range(1..=5);
            let mut lessons = Vec::with_capacity(n_demands);
            for _ in 0..n_demands {
                lessons.push(LessonDemand {
                    subject_id: format!("s{}", rng.random_range(0..n_subjects)),
                    teacher_id: format!("t{}", rng.random_range(0..n_teachers)),
                    class_id: format!("c{}", rng.random_range(0..n_classes)),
                    quantity: rng.random_range(0..=3),
                });
            }

            let slots = grid(days, periods);
            let mut availability = Vec::new();
            for teacher in 0..n_teachers {
                if rng.random_bool(0.5) {
                    let blocked: Vec<TimeSlot> = slots
                        .iter()
                        .copied()
                        .filter(|_| rng.random_bool(0.2))
                        .collect();
                    availability.push(TeacherAvailability {
                        teacher_id: format!("t{}", teacher),
                        blocked,
                    });
                }
            }

            let config = SolverConfig {
                max_daily_lessons_per_class: rng.random_range(1..=4),
                // Keep pathological instances cheap; partial results are
                // still checkable.
                time_budget_ms: 250,
                ..Default::default()
            };

            let input = GenerationInput {
                lessons,
                slots,
                availability,
                config,
            };
            let output = solve_seeded(&input, round).unwrap();
            assert_hard_rules(&input, &output);
        }
    }
}
