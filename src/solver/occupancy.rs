//! Week occupancy boards for teachers and classes.

use crate::interner::IdInt;
use crate::models::{TimeSlot, DAYS_PER_WEEK};

/// Busy and blocked boards kept in lockstep with the committed placements.
///
/// One row per interned ID, one column per grid slot.
/// Invariant: `commit` and `undo` are exact inverses, so the boards always
/// reflect the placement trail that produced them. Queries are O(1).
#[derive(Clone, Debug)]
pub struct OccupancyBoard {
    /// Day of each grid slot, indexed by slot position
    slot_day: Vec<u8>,
    /// (teacher, slot) cells holding a committed lesson
    teacher_busy: Vec<Vec<bool>>,
    /// (class, slot) cells holding a committed lesson
    class_busy: Vec<Vec<bool>>,
    /// Committed lessons per class per day
    class_daily: Vec<[u32; DAYS_PER_WEEK]>,
    /// (teacher, slot) cells declared unavailable; fixed after construction
    teacher_blocked: Vec<Vec<bool>>,
}

impl OccupancyBoard {
    /// Create empty boards for `n_ids` interned entities over `slots`.
    pub fn new(n_ids: usize, slots: &[TimeSlot]) -> Self {
        let n_slots = slots.len();
        Self {
            slot_day: slots.iter().map(|slot| slot.day).collect(),
            teacher_busy: vec![vec![false; n_slots]; n_ids],
            class_busy: vec![vec![false; n_slots]; n_ids],
            class_daily: vec![[0; DAYS_PER_WEEK]; n_ids],
            teacher_blocked: vec![vec![false; n_slots]; n_ids],
        }
    }

    /// Declare a slot unavailable for a teacher. Construction-time only.
    pub fn block_teacher(&mut self, teacher: IdInt, slot_idx: usize) {
        self.teacher_blocked[teacher as usize][slot_idx] = true;
    }

    #[inline]
    pub fn is_teacher_blocked(&self, teacher: IdInt, slot_idx: usize) -> bool {
        self.teacher_blocked[teacher as usize][slot_idx]
    }

    #[inline]
    pub fn is_teacher_busy(&self, teacher: IdInt, slot_idx: usize) -> bool {
        self.teacher_busy[teacher as usize][slot_idx]
    }

    #[inline]
    pub fn is_class_busy(&self, class: IdInt, slot_idx: usize) -> bool {
        self.class_busy[class as usize][slot_idx]
    }

    /// Committed lessons for a class on one day.
    #[inline]
    pub fn class_lessons_on(&self, class: IdInt, day: u8) -> u32 {
        self.class_daily[class as usize][day as usize]
    }

    /// Day of a grid slot.
    #[inline]
    pub fn slot_day(&self, slot_idx: usize) -> u8 {
        self.slot_day[slot_idx]
    }

    /// Mark a placement. The slot must currently be free for both parties.
    pub fn commit(&mut self, teacher: IdInt, class: IdInt, slot_idx: usize) {
        debug_assert!(!self.teacher_busy[teacher as usize][slot_idx]);
        debug_assert!(!self.class_busy[class as usize][slot_idx]);
        self.teacher_busy[teacher as usize][slot_idx] = true;
        self.class_busy[class as usize][slot_idx] = true;
        self.class_daily[class as usize][self.slot_day[slot_idx] as usize] += 1;
    }

    /// Reverse a `commit` of the same placement.
    pub fn undo(&mut self, teacher: IdInt, class: IdInt, slot_idx: usize) {
        debug_assert!(self.teacher_busy[teacher as usize][slot_idx]);
        debug_assert!(self.class_busy[class as usize][slot_idx]);
        self.teacher_busy[teacher as usize][slot_idx] = false;
        self.class_busy[class as usize][slot_idx] = false;
        self.class_daily[class as usize][self.slot_day[slot_idx] as usize] -= 1;
    }
}
