//! Backtracking timetable search.
//!
//! This module provides a depth-first search over expanded lesson units with
//! an explicit frame stack, per-frame randomized slot orders, hard-constraint
//! validation, and best-partial tracking under a wall-clock budget.

mod constraints;
mod engine;
mod occupancy;
mod order;
mod scoring;
mod state;

pub use constraints::{check_placement, Rejection};
pub use engine::{assemble_output, SearchEngine, SearchOutcome, SearchStats, StopReason};
pub use occupancy::OccupancyBoard;
pub use order::{DomainOrder, ShuffledOrder, SlotOrder};
pub use scoring::{double_lesson_pairs, score_schedule, teacher_gap_periods};
pub use state::{BestSnapshot, Placement, SearchState};
