//! Demand expansion: weekly demands to ordered atomic lesson units.

use rustc_hash::FxHashMap;

use crate::interner::{IdInt, IdInterner};
use crate::models::LessonDemand;

/// One occurrence of a lesson, the atomic unit of placement.
///
/// `ordinal` is the unit's position in declaration order (demands in input
/// order, one demand's occurrences consecutive). It survives reordering and
/// becomes `ScheduleEntry::unit_id`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LessonUnit {
    pub ordinal: u32,
    pub demand_index: usize,
    pub subject: IdInt,
    pub teacher: IdInt,
    pub class: IdInt,
}

/// Expand demands into placement units, ordered hardest-first.
///
/// Every demand appears exactly `quantity` times. Units are sorted by
/// descending total weekly load of their teacher, so heavily booked teachers
/// are placed while the grid is still open. The sort is stable: units with
/// equal load keep declaration order.
pub fn expand_demands(demands: &[LessonDemand], interner: &mut IdInterner) -> Vec<LessonUnit> {
    let mut units: Vec<LessonUnit> = Vec::new();
    let mut teacher_load: FxHashMap<IdInt, u32> = FxHashMap::default();

    for (demand_index, demand) in demands.iter().enumerate() {
        let subject = interner.intern(&demand.subject_id);
        let teacher = interner.intern(&demand.teacher_id);
        let class = interner.intern(&demand.class_id);
        *teacher_load.entry(teacher).or_insert(0) += demand.quantity;

        for _ in 0..demand.quantity {
            units.push(LessonUnit {
                ordinal: units.len() as u32,
                demand_index,
                subject,
                teacher,
                class,
            });
        }
    }

    units.sort_by_key(|unit| {
        std::cmp::Reverse(teacher_load.get(&unit.teacher).copied().unwrap_or(0))
    });
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demand(subject: &str, teacher: &str, class: &str, quantity: u32) -> LessonDemand {
        LessonDemand {
            subject_id: subject.to_string(),
            teacher_id: teacher.to_string(),
            class_id: class.to_string(),
            quantity,
        }
    }

    #[test]
    fn test_quantity_expansion() {
        let demands = vec![demand("math", "t1", "5a", 3), demand("art", "t2", "5b", 1)];
        let mut interner = IdInterner::default();
        let units = expand_demands(&demands, &mut interner);

        assert_eq!(units.len(), 4);
        assert_eq!(units.iter().filter(|u| u.demand_index == 0).count(), 3);
        assert_eq!(units.iter().filter(|u| u.demand_index == 1).count(), 1);
    }

    #[test]
    fn test_heaviest_teacher_first() {
        // t2 carries 4 weekly lessons, t1 only 1
        let demands = vec![
            demand("math", "t1", "5a", 1),
            demand("en", "t2", "5a", 3),
            demand("en", "t2", "5b", 1),
        ];
        let mut interner = IdInterner::default();
        let units = expand_demands(&demands, &mut interner);

        assert_eq!(units.len(), 5);
        let t2 = interner.get("t2").unwrap();
        for unit in &units[..4] {
            assert_eq!(unit.teacher, t2);
        }
        let t1 = interner.get("t1").unwrap();
        assert_eq!(units[4].teacher, t1);
    }

    #[test]
    fn test_equal_load_keeps_declaration_order() {
        let demands = vec![demand("math", "t1", "5a", 2), demand("en", "t2", "5b", 2)];
        let mut interner = IdInterner::default();
        let units = expand_demands(&demands, &mut interner);

        let ordinals: Vec<u32> = units.iter().map(|u| u.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
        assert_eq!(units[0].demand_index, 0);
        assert_eq!(units[1].demand_index, 0);
        assert_eq!(units[2].demand_index, 1);
        assert_eq!(units[3].demand_index, 1);
    }

    #[test]
    fn test_ordinals_follow_declaration_even_when_reordered() {
        let demands = vec![demand("math", "t1", "5a", 1), demand("en", "t2", "5b", 2)];
        let mut interner = IdInterner::default();
        let units = expand_demands(&demands, &mut interner);

        // t2's units sort ahead of t1's, but keep their declaration ordinals
        assert_eq!(units[0].ordinal, 1);
        assert_eq!(units[1].ordinal, 2);
        assert_eq!(units[2].ordinal, 0);
    }

    #[test]
    fn test_zero_quantity_and_empty() {
        let mut interner = IdInterner::default();
        assert!(expand_demands(&[], &mut interner).is_empty());

        let demands = vec![demand("math", "t1", "5a", 0)];
        assert!(expand_demands(&demands, &mut interner).is_empty());
    }
}
