//! Depth-first timetable search with an explicit frame stack.
//!
//! One frame per lesson unit, each holding its own freshly arranged slot
//! trial order. Frames commit the first slot that passes all hard checks and
//! push the next frame; a frame that runs out of slots pops and the parent
//! undoes its commitment. The first complete assignment wins. The deepest
//! partial assignment seen is kept as a fallback for exhausted or timed-out
//! searches.

use std::time::{Duration, Instant};

use crate::config::SolverConfig;
use crate::expand::LessonUnit;
use crate::interner::IdInterner;
use crate::models::{GenerationOutput, ScheduleEntry, TimeSlot};
use crate::{log_changes, log_checks, log_debug};

use super::constraints::check_placement;
use super::occupancy::OccupancyBoard;
use super::order::SlotOrder;
use super::scoring::score_schedule;
use super::state::{BestSnapshot, Placement, SearchState};

/// Why the search stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// Every unit was placed; the schedule is complete.
    Complete,
    /// The root frame ran out of slots; no complete valid schedule exists.
    Exhausted,
    /// The wall-clock budget ran out first.
    TimedOut,
}

/// Counters for verbosity-gated reporting. Not part of the caller contract.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Frame visits (loop iterations)
    pub frames: u64,
    /// Slot trials checked against the hard rules
    pub trials: u64,
    /// Commitments undone after a child frame failed
    pub backtracks: u64,
}

/// One depth of the search: a unit, its private trial order, and a cursor.
struct Frame {
    unit_idx: usize,
    trial_order: Vec<usize>,
    cursor: usize,
}

/// A finished search: the best placements found and how the search ended.
#[derive(Debug)]
pub struct SearchOutcome {
    pub placements: Vec<Placement>,
    pub fitness: f64,
    pub stop: StopReason,
    pub stats: SearchStats,
}

/// Backtracking engine over one expanded unit list.
///
/// Owns all mutable search state for the duration of one run; independent
/// engines never share anything.
pub struct SearchEngine<'a, O: SlotOrder> {
    units: &'a [LessonUnit],
    slots: &'a [TimeSlot],
    config: &'a SolverConfig,
    order: O,
    state: SearchState,
    stats: SearchStats,
}

impl<'a, O: SlotOrder> SearchEngine<'a, O> {
    /// Create an engine over pre-expanded units and a prepared board.
    ///
    /// The board must already carry the teacher blocked slots; the engine
    /// only ever adds and removes committed placements.
    pub fn new(
        units: &'a [LessonUnit],
        slots: &'a [TimeSlot],
        config: &'a SolverConfig,
        order: O,
        board: OccupancyBoard,
    ) -> Self {
        Self {
            units,
            slots,
            config,
            order,
            state: SearchState::new(board),
            stats: SearchStats::default(),
        }
    }

    /// Run the search to its first terminal state.
    pub fn run(mut self) -> SearchOutcome {
        let verbosity = self.config.verbosity;
        let deadline = Instant::now().checked_add(Duration::from_millis(self.config.time_budget_ms));

        if self.units.is_empty() {
            log_changes!(verbosity, "Nothing to place, returning empty schedule");
            return SearchOutcome {
                placements: Vec::new(),
                fitness: 0.0,
                stop: StopReason::Complete,
                stats: self.stats,
            };
        }

        let mut stack: Vec<Frame> = Vec::with_capacity(self.units.len());
        stack.push(self.new_frame(0));
        let mut stop = StopReason::Exhausted;

        loop {
            self.stats.frames += 1;

            // Keep the deepest valid partial assignment as the fallback result.
            if self.state.depth() > self.state.best.placements.len() {
                let fitness =
                    score_schedule(&self.state.committed, self.units, self.slots, self.config);
                self.state.record_best(fitness, false);
                log_debug!(
                    verbosity,
                    "  Best partial now {} of {} placements",
                    self.state.depth(),
                    self.units.len()
                );
            }

            // Cooperative budget check, once per frame visit.
            if deadline.is_some_and(|d| Instant::now() >= d) {
                stop = StopReason::TimedOut;
                log_changes!(
                    verbosity,
                    "Time budget exhausted with {} of {} lessons placed",
                    self.state.best.placements.len(),
                    self.units.len()
                );
                break;
            }

            let frame = match stack.last_mut() {
                Some(frame) => frame,
                // The root ran out of orderings; the search space is exhausted.
                None => {
                    log_changes!(
                        verbosity,
                        "Search space exhausted with {} of {} lessons placed",
                        self.state.best.placements.len(),
                        self.units.len()
                    );
                    break;
                }
            };
            let unit_idx = frame.unit_idx;

            // Draw trial slots until one passes all hard checks.
            let mut chosen: Option<usize> = None;
            while frame.cursor < frame.trial_order.len() {
                let slot_idx = frame.trial_order[frame.cursor];
                frame.cursor += 1;
                self.stats.trials += 1;

                match check_placement(&self.units[unit_idx], slot_idx, &self.state.board, self.config)
                {
                    Ok(()) => {
                        chosen = Some(slot_idx);
                        break;
                    }
                    Err(reason) => {
                        let slot = self.slots[slot_idx];
                        log_checks!(
                            verbosity,
                            "    Rejected unit {} at day {} period {}: {:?}",
                            unit_idx,
                            slot.day,
                            slot.period,
                            reason
                        );
                    }
                }
            }

            match chosen {
                Some(slot_idx) => {
                    self.state.commit(self.units, unit_idx, slot_idx);
                    let slot = self.slots[slot_idx];
                    log_changes!(
                        verbosity,
                        "  Placed unit {} at day {} period {}",
                        unit_idx,
                        slot.day,
                        slot.period
                    );

                    if self.state.depth() == self.units.len() {
                        // First complete assignment wins; constraints hold by
                        // construction.
                        let fitness = score_schedule(
                            &self.state.committed,
                            self.units,
                            self.slots,
                            self.config,
                        );
                        self.state.record_best(fitness, true);
                        log_changes!(
                            verbosity,
                            "Complete schedule found, fitness {:.1}",
                            fitness
                        );
                        stop = StopReason::Complete;
                        break;
                    }

                    let next = self.new_frame(self.state.depth());
                    stack.push(next);
                }
                None => {
                    log_debug!(verbosity, "  Unit {} out of slots, popping frame", unit_idx);
                    stack.pop();
                    // Undo the parent commitment that opened this frame. The
                    // root frame has none.
                    if self.state.undo(self.units).is_some() {
                        self.stats.backtracks += 1;
                    }
                }
            }
        }

        log_debug!(
            verbosity,
            "Search stats: {} frames, {} trials, {} backtracks",
            self.stats.frames,
            self.stats.trials,
            self.stats.backtracks
        );

        let BestSnapshot {
            placements, fitness, ..
        } = self.state.best;
        SearchOutcome {
            placements,
            fitness,
            stop,
            stats: self.stats,
        }
    }

    /// Build a frame for `unit_idx` with a freshly arranged trial order.
    fn new_frame(&mut self, unit_idx: usize) -> Frame {
        let mut trial_order: Vec<usize> = (0..self.slots.len()).collect();
        self.order.arrange(&mut trial_order);
        Frame {
            unit_idx,
            trial_order,
            cursor: 0,
        }
    }
}

/// Package a finished search as the caller-facing output.
///
/// Entries appear in commit order with string IDs resolved back through the
/// interner. `conflicts` stays empty only for a complete schedule.
pub fn assemble_output(
    outcome: &SearchOutcome,
    units: &[LessonUnit],
    slots: &[TimeSlot],
    interner: &IdInterner,
) -> GenerationOutput {
    let mut schedule = Vec::with_capacity(outcome.placements.len());
    for placement in &outcome.placements {
        let unit = &units[placement.unit_idx];
        let slot = slots[placement.slot_idx];
        schedule.push(ScheduleEntry {
            unit_id: unit.ordinal,
            day: slot.day,
            period: slot.period,
            subject_id: interner.resolve(unit.subject).unwrap_or("").to_string(),
            teacher_id: interner.resolve(unit.teacher).unwrap_or("").to_string(),
            class_id: interner.resolve(unit.class).unwrap_or("").to_string(),
        });
    }

    let conflicts = match outcome.stop {
        StopReason::Complete => Vec::new(),
        StopReason::Exhausted => vec![format!(
            "no complete valid schedule exists for this input; placed {} of {} lessons",
            outcome.placements.len(),
            units.len()
        )],
        StopReason::TimedOut => vec![format!(
            "search stopped at the time budget; placed {} of {} lessons",
            outcome.placements.len(),
            units.len()
        )],
    };

    GenerationOutput {
        schedule,
        fitness: outcome.fitness,
        conflicts,
    }
}
