//! Configuration for the timetable solver.

use serde::{Deserialize, Serialize};

/// Policy knobs for a generation run.
///
/// The hard daily cap, the scoring weights, and the search budget all live
/// here so callers tune behavior per invocation. Every field has a default;
/// a partial JSON object deserializes with the rest filled in.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Hard cap on lessons per class per day
    pub max_daily_lessons_per_class: u32,
    /// Apply the teacher gap penalty when scoring
    pub minimize_gaps: bool,
    /// Penalty per free period between two same-day lessons of one teacher
    pub gap_weight: f64,
    /// Reward consecutive same-subject lessons for a class
    pub prefer_double_lessons: bool,
    /// Bonus per same-subject pair in consecutive periods
    pub double_lesson_bonus: f64,
    /// Wall-clock search budget in milliseconds
    pub time_budget_ms: u64,
    /// Logging verbosity (0=silent, 1=changes, 2=checks, 3=debug)
    pub verbosity: u8,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_daily_lessons_per_class: 6,
            minimize_gaps: true,
            gap_weight: 1.0,
            prefer_double_lessons: true,
            double_lesson_bonus: 10.0,
            time_budget_ms: 60_000,
            verbosity: 0,
        }
    }
}
