//! tagged-table: an open-addressing hash table from tagged primitive keys
//! to self-describing tagged values.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a single-threaded associative container whose keys come from a
//!   small closed set of kinds (integer, string) and whose values carry
//!   their own kind tag, byte size, and pass method — built in small,
//!   verifiable layers so each piece can be reasoned about independently.
//! - Layers:
//!   - `Key`/`Value` model: sum types whose variant *is* the kind tag, so a
//!     tag/payload mismatch is unrepresentable. Call-site keys borrow;
//!     stored keys own their buffer.
//!   - Hash functions: Knuth multiplicative for integers, DJB2 for strings;
//!     bucket index by mask (capacity is always a power of two).
//!   - `RawTable` (structural): slot array, linear probing with wraparound,
//!     tombstone deletion, rebuild into a fresh array. No resize policy.
//!   - `TaggedTable` (policy): load-factor window, grow/shrink triggers,
//!     lifecycle, public API.
//!
//! Constraints
//! - Single-threaded: values may hold `Rc` payloads, so the table is
//!   `!Send`/`!Sync`; access from multiple threads must be serialized
//!   externally.
//! - Every operation is synchronous and bounded: O(capacity) worst-case
//!   probe, O(capacity) rebuild.
//! - The table owns its slot array, every stored key, and every by-copy
//!   payload; by-reference payloads are co-owned with the caller via `Rc`.
//! - Probe sequences never cross an empty slot on the way to a live entry;
//!   deletion tombstones its slot to keep later cluster members reachable.
//!
//! Resize invariants
//! - Capacity doubles when `(live + tombstones) / capacity` passes the
//!   high-water mark and halves when `live / capacity` drops under the
//!   low-water mark, never below the initial capacity of 16.
//! - Rebuild re-buckets every live entry from its stored key and drops all
//!   tombstones; it is the only point where tombstone count is reclaimed.
//!
//! Notes and non-goals
//! - No iteration-order guarantee; iteration is in slot order, and only the
//!   first/last occupied-index bounds are tracked.
//! - No user-defined key kinds; the key set is closed by design.
//! - No interior locking or thread-safety of any kind.
//! - Call-site ergonomics (inferring tags from untyped arguments) live
//!   outside this crate; callers construct `Key`/`Value` explicitly.

mod hash;
mod key;
#[cfg(feature = "bench_internal")]
pub mod raw;
#[cfg(not(feature = "bench_internal"))]
mod raw;
mod table;
mod value;

// Public surface
pub use key::Key;
pub use table::{
    InsertError, InvalidLoadFactors, Iter, IterMut, TaggedTable, DEFAULT_MAX_LOAD_FACTOR,
    DEFAULT_MIN_LOAD_FACTOR,
};
pub use value::{BlobPayload, PassMethod, StrPayload, Value, ValueKind};
