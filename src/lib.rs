//! A string-keyed hash table that repairs probe clusters on delete instead of leaving tombstones.
//!
//! [`ProbeTable`] stores its entries in one flat array of slots and resolves collisions with
//! linear probing: a key that finds its home slot taken moves on to the next slot, wrapping around
//! at the end, until it finds either itself or an empty slot. Lookups rely on one property of that
//! array: between a key's home slot and the slot the key actually lives in, there is never an
//! empty slot.
//!
//! Most open addressing tables protect that property on removal by leaving a "tombstone" behind,
//! a marker that lookups step over but that inserts may reuse. Tombstones pile up, slow down
//! lookups, and eventually force a rebuild. This crate takes the other route. When an entry is
//! deleted, every entry from the freed slot up to the next empty slot is taken out and inserted
//! again. Entries whose probe sequence passed through the freed slot settle into the gap, and the
//! array ends up exactly as if the deleted entry had never been inserted.
//!
//! The trade-offs, compared with a tombstone-based table:
//!
//!  - Deletes cost time proportional to the cluster they hit, not constant time.
//!  - Lookups never step over dead slots, and `len` is always exact.
//!  - There is nothing to clean up later, so no delete-heavy workload degrades the table.
//!
//! # Growth
//!
//! Tables grow through a fixed schedule of primes (3, 7, 11, 17, 23, ...), about 1.2x apart
//! once past the smallest few, and past its end through the next prime at or above twice the
//! current size. A table grows as soon as an insert would claim its last empty slot, so there is
//! always at least one empty slot to end a probe. Growth is all-at-once: a new table is allocated
//! and every entry is inserted into it again. The hash depends on the table size, so entries
//! generally land in different slots afterwards.
//!
//! # Hashing
//!
//! Keys are hashed with a small polynomial hash over their characters whose multiplier is
//! reduced modulo the table size. It is fast and spreads short keys well, but it offers no
//! protection against adversarial keys. Do not use this table for keys chosen by an attacker.
//!
//! # Logging
//!
//! Growth events are reported at `debug` level and cluster repairs at `trace` level through the
//! [`log`](https://docs.rs/log) facade. Nothing is printed unless the application installs a
//! logger.
//!
//! # Features
//!
//!  - `inline-more` (default): marks far more functions `#[inline]`.
//!  - `std`: implements `std::error::Error` for [`Error`].

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;
#[cfg(all(feature = "std", not(test)))]
extern crate std;

mod error;
pub mod raw;
mod schedule;
mod table;

pub use error::Error;
pub use table::{IntoIter, Iter, Keys, ProbeTable, Values, DEFAULT_TABLE_SIZE};
