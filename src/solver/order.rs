//! Slot trial ordering for the search.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Produces the order in which a search frame tries grid slots.
///
/// The engine asks for a fresh arrangement on every frame push, so two
/// visits to the same depth explore in different orders.
pub trait SlotOrder {
    /// Arrange slot indices in place into trial order.
    fn arrange(&mut self, slot_indices: &mut [usize]);
}

/// Uniform random shuffle. The production default.
pub struct ShuffledOrder {
    rng: StdRng,
}

impl ShuffledOrder {
    /// Seed from the operating system; every run explores differently.
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Fixed seed: identical input yields identical schedules.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SlotOrder for ShuffledOrder {
    fn arrange(&mut self, slot_indices: &mut [usize]) {
        slot_indices.shuffle(&mut self.rng);
    }
}

/// Grid declaration order, unchanged. Makes searches fully deterministic.
pub struct DomainOrder;

impl SlotOrder for DomainOrder {
    fn arrange(&mut self, _slot_indices: &mut [usize]) {}
}
