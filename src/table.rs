//! Resize policy, lifecycle, and the public `TaggedTable` API.
//!
//! This layer owns the load-factor window. After every insert or delete
//! that changes the live count it re-evaluates the load and asks the
//! structural layer to rebuild at double or half capacity. The structural
//! layer never resizes itself.

use core::fmt;

use crate::key::Key;
use crate::raw::{self, InsertOutcome, RawTable, INITIAL_CAPACITY};
use crate::value::Value;

/// Grow when `(live + tombstones) / capacity` exceeds this.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;
/// Shrink when `live / capacity` falls below this (down to the initial
/// capacity, never further).
pub const DEFAULT_MIN_LOAD_FACTOR: f64 = 0.25;

/// Rejected load-factor configuration. The window must satisfy
/// `0 < min < max < 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InvalidLoadFactors {
    pub max: f64,
    pub min: f64,
}

impl fmt::Display for InvalidLoadFactors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "load factors must satisfy 0 < min < max < 1, got min={} max={}",
            self.min, self.max
        )
    }
}

impl std::error::Error for InvalidLoadFactors {}

/// Insert failure.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InsertError {
    /// Growth was refused at the capacity ceiling and the array holds no
    /// empty slot, no reusable tombstone, and no matching key. The table is
    /// unchanged.
    TableFull,
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsertError::TableFull => write!(f, "table is full and cannot grow"),
        }
    }
}

impl std::error::Error for InsertError {}

/// An open-addressing hash table from tagged primitive keys ([`Key`]) to
/// self-describing tagged values ([`Value`]).
///
/// Collisions resolve by linear probing with wraparound; deletion uses
/// tombstones; the backing array doubles past the high-water load factor
/// and halves below the low-water mark (never under the initial capacity
/// of 16). String keys are copied into table-owned buffers at insert;
/// callers keep whatever they passed in.
#[derive(Debug)]
pub struct TaggedTable {
    raw: RawTable,
    max_load_factor: f64,
    min_load_factor: f64,
}

impl TaggedTable {
    /// An empty table at the initial capacity with the default load-factor
    /// window.
    pub fn new() -> Self {
        Self {
            raw: RawTable::with_capacity(INITIAL_CAPACITY),
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            min_load_factor: DEFAULT_MIN_LOAD_FACTOR,
        }
    }

    /// An empty table with a custom load-factor window.
    pub fn with_load_factors(max: f64, min: f64) -> Result<Self, InvalidLoadFactors> {
        if !(0.0 < min && min < max && max < 1.0) {
            return Err(InvalidLoadFactors { max, min });
        }
        Ok(Self {
            raw: RawTable::with_capacity(INITIAL_CAPACITY),
            max_load_factor: max,
            min_load_factor: min,
        })
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.raw.live()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.live() == 0
    }

    /// Current slot-array capacity. Always a power of two.
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.raw.live() as f64 / self.raw.capacity() as f64
    }

    /// Lowest index that may hold an occupied slot; `None` when empty.
    /// Conservative between rebuilds, exact right after one.
    pub fn first_occupied_index(&self) -> Option<usize> {
        self.raw.first_occupied()
    }

    /// Highest index that may hold an occupied slot; `None` when empty.
    pub fn last_occupied_index(&self) -> Option<usize> {
        self.raw.last_occupied()
    }

    /// Insert or update. Returns the previous value when the key already
    /// existed (the entry count is unchanged in that case), `None` when a
    /// new entry was placed. A resize triggered by the insert completes
    /// before this returns.
    pub fn insert<'a>(
        &mut self,
        key: impl Into<Key<'a>>,
        value: Value,
    ) -> Result<Option<Value>, InsertError> {
        match self.raw.insert(key.into(), value) {
            Ok(InsertOutcome::Inserted) => {
                self.grow_if_overloaded();
                Ok(None)
            }
            Ok(InsertOutcome::Updated(old)) => Ok(Some(old)),
            Err(raw::RawFull) => Err(InsertError::TableFull),
        }
    }

    /// Borrow the value stored under `key`.
    pub fn get<'a>(&self, key: impl Into<Key<'a>>) -> Option<&Value> {
        self.raw.lookup(&key.into())
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut<'a>(&mut self, key: impl Into<Key<'a>>) -> Option<&mut Value> {
        self.raw.lookup_mut(&key.into())
    }

    pub fn contains_key<'a>(&self, key: impl Into<Key<'a>>) -> bool {
        self.raw.lookup(&key.into()).is_some()
    }

    /// Remove an entry, returning its value; `None` when the key is absent.
    /// A shrink triggered by the removal completes before this returns.
    pub fn remove<'a>(&mut self, key: impl Into<Key<'a>>) -> Option<Value> {
        let removed = self.raw.remove(&key.into());
        if removed.is_some() {
            self.shrink_if_underloaded();
        }
        removed
    }

    /// Release every entry and reset to a fresh array at the initial
    /// capacity. The table stays usable; calling this twice is the same as
    /// calling it once.
    pub fn clear(&mut self) {
        self.raw = RawTable::with_capacity(INITIAL_CAPACITY);
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.raw.iter(),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        IterMut {
            inner: self.raw.iter_mut(),
        }
    }

    // Tombstones lengthen probe chains exactly like occupied slots, so they
    // count as load at the high-water mark. Rebuild drops them, so a grow
    // can leave the true load well under max.
    fn grow_if_overloaded(&mut self) {
        let capacity = self.raw.capacity();
        let loaded = (self.raw.live() + self.raw.tombstones()) as f64;
        if loaded / capacity as f64 > self.max_load_factor {
            // Refused at the representable ceiling; the insert stands and
            // later inserts may fail with TableFull.
            if let Some(next) = capacity.checked_mul(2) {
                self.raw.rebuild(next);
            }
        }
    }

    fn shrink_if_underloaded(&mut self) {
        let capacity = self.raw.capacity();
        if capacity > INITIAL_CAPACITY
            && (self.raw.live() as f64) / (capacity as f64) < self.min_load_factor
        {
            self.raw.rebuild((capacity / 2).max(INITIAL_CAPACITY));
        }
    }
}

impl Default for TaggedTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over entries in slot order. No ordering guarantee beyond that.
pub struct Iter<'a> {
    inner: raw::Iter<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (Key<'a>, &'a Value);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Iterator over entries yielding mutable value references.
pub struct IterMut<'a> {
    inner: raw::IterMut<'a>,
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (Key<'a>, &'a mut Value);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
