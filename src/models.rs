//! Core data types for the timetabling system.

use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;

/// Length of the school week. Slot days must be below this.
pub const DAYS_PER_WEEK: usize = 5;

/// A cell in the weekly grid: day 0..=4 (Monday..Friday) and a period index.
///
/// The period count is not fixed; the slot list supplied in
/// [`GenerationInput`] defines the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeSlot {
    pub day: u8,
    pub period: u8,
}

/// A weekly teaching requirement: `quantity` lessons of one subject,
/// taught by one teacher to one class.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LessonDemand {
    pub subject_id: String,
    pub teacher_id: String,
    pub class_id: String,
    pub quantity: u32,
}

/// Slots a teacher cannot teach in.
///
/// Teachers without an entry are fully available. Blocked slots outside the
/// grid are ignored; they can never be tried.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeacherAvailability {
    pub teacher_id: String,
    #[serde(default)]
    pub blocked: Vec<TimeSlot>,
}

/// One committed lesson placement in caller vocabulary.
///
/// `unit_id` is the declaration-order ordinal of the placed lesson unit,
/// stable across runs of the same input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub unit_id: u32,
    pub day: u8,
    pub period: u8,
    pub subject_id: String,
    pub teacher_id: String,
    pub class_id: String,
}

/// Input to a single generation run.
///
/// Every reference is resolved by the caller; the engine performs no lookups
/// outside this object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationInput {
    pub lessons: Vec<LessonDemand>,
    pub slots: Vec<TimeSlot>,
    #[serde(default)]
    pub availability: Vec<TeacherAvailability>,
    #[serde(default)]
    pub config: SolverConfig,
}

/// Result of a generation run.
///
/// `conflicts` is advisory free text: empty when the schedule is complete,
/// one note per shortfall otherwise. Callers should branch on emptiness
/// only, never on the wording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOutput {
    pub schedule: Vec<ScheduleEntry>,
    pub fitness: f64,
    pub conflicts: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_ordering() {
        let a = TimeSlot { day: 0, period: 3 };
        let b = TimeSlot { day: 1, period: 0 };
        let c = TimeSlot { day: 1, period: 2 };
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_input_deserializes_with_defaults() {
        let input: GenerationInput = serde_json::from_str(
            r#"{
                "lessons": [
                    {"subject_id": "math", "teacher_id": "t1", "class_id": "5a", "quantity": 2}
                ],
                "slots": [{"day": 0, "period": 0}, {"day": 0, "period": 1}]
            }"#,
        )
        .unwrap();

        assert_eq!(input.lessons.len(), 1);
        assert_eq!(input.slots.len(), 2);
        assert!(input.availability.is_empty());
        assert_eq!(input.config.max_daily_lessons_per_class, 6);
    }
}
