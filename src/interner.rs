//! Interning of entity ID strings.
//!
//! Teacher, class, and subject IDs arrive as strings. The solver's hot loop
//! indexes boards by dense integers instead, so every ID is interned once up
//! front and resolved back to a string only when the result is assembled.

use rustc_hash::FxHashMap;

/// Interned entity ID. Dense, starting at zero, in first-seen order.
pub type IdInt = u32;

/// Two-way map between entity ID strings and their interned integers.
///
/// Teachers, classes, and subjects share one namespace. A teacher and a
/// class with the same ID string intern to the same integer, which is
/// harmless: each integer is only ever used in its own role's board.
#[derive(Debug, Clone)]
pub struct IdInterner {
    ids: FxHashMap<String, IdInt>,
    names: Vec<String>,
}

impl IdInterner {
    /// Create an interner sized for `capacity` distinct IDs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            names: Vec::with_capacity(capacity),
        }
    }

    /// Intern an ID string, reusing the integer of an ID seen before.
    pub fn intern(&mut self, name: &str) -> IdInt {
        match self.ids.get(name) {
            Some(&id) => id,
            None => {
                let id = self.names.len() as IdInt;
                self.names.push(name.to_string());
                self.ids.insert(name.to_string(), id);
                id
            }
        }
    }

    /// Look up an already interned ID string.
    #[inline]
    pub fn get(&self, name: &str) -> Option<IdInt> {
        self.ids.get(name).copied()
    }

    /// Resolve an integer back to its ID string.
    #[inline]
    pub fn resolve(&self, id: IdInt) -> Option<&str> {
        self.names.get(id as usize).map(|name| name.as_str())
    }

    /// Number of distinct interned IDs.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for IdInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
