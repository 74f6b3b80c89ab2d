//! Mutable state of one search run.

use crate::expand::LessonUnit;

use super::occupancy::OccupancyBoard;

/// A unit committed to a grid slot, both by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub unit_idx: usize,
    pub slot_idx: usize,
}

/// Deepest valid assignment seen so far.
///
/// Owned copy, never aliased with the working trail, so backtracking cannot
/// disturb an already recorded result.
#[derive(Clone, Debug, Default)]
pub struct BestSnapshot {
    pub placements: Vec<Placement>,
    pub fitness: f64,
    pub complete: bool,
}

/// Committed placements, the boards derived from them, and the best snapshot.
///
/// Owned by exactly one engine for the duration of one run; concurrent runs
/// never share state.
pub struct SearchState {
    pub committed: Vec<Placement>,
    pub board: OccupancyBoard,
    pub best: BestSnapshot,
}

impl SearchState {
    pub fn new(board: OccupancyBoard) -> Self {
        Self {
            committed: Vec::new(),
            board,
            best: BestSnapshot::default(),
        }
    }

    /// Commit a unit to a slot, updating boards and the trail together.
    pub fn commit(&mut self, units: &[LessonUnit], unit_idx: usize, slot_idx: usize) {
        let unit = &units[unit_idx];
        self.board.commit(unit.teacher, unit.class, slot_idx);
        self.committed.push(Placement { unit_idx, slot_idx });
    }

    /// Undo the most recent commit. Exact inverse of `commit`.
    pub fn undo(&mut self, units: &[LessonUnit]) -> Option<Placement> {
        let placement = self.committed.pop()?;
        let unit = &units[placement.unit_idx];
        self.board.undo(unit.teacher, unit.class, placement.slot_idx);
        Some(placement)
    }

    /// Replace the best snapshot with a copy of the current trail.
    pub fn record_best(&mut self, fitness: f64, complete: bool) {
        self.best = BestSnapshot {
            placements: self.committed.clone(),
            fitness,
            complete,
        };
    }

    /// Number of committed placements.
    pub fn depth(&self) -> usize {
        self.committed.len()
    }
}
