//! A fixed-capacity linear probing table.
//!
//! [`RawTable`] never grows. Once an insert would leave it without an empty slot, [`probe`]
//! reports [`Error::TableFull`] and it is up to the caller to build a larger table and move the
//! entries over. [`ProbeTable`](crate::ProbeTable) does exactly that.
//!
//! [`probe`]: RawTable::probe

use crate::Error;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::{mem, slice};

/// Initial value of the running multiplier in [`RawTable::hash`].
const HASH_SEED: u128 = 31415;

/// Factor the running multiplier is scaled by after each character.
const HASH_BASE: u128 = 31;

/// A single position in the slot array.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<V> {
    /// Nothing is stored here. A probe that reaches an empty slot stops.
    Empty,
    /// Holds one entry.
    Occupied {
        /// The entry's key.
        key: String,
        /// The entry's value.
        value: V,
    },
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<V> Slot<V> {
    /// Returns true if the slot holds an entry.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }
}

/// A fixed-length array of [`Slot`]s addressed by linear probing.
///
/// For every occupied slot, walking forward from the hash of its key reaches the slot without
/// passing through an empty one. Every method that changes the table keeps this true as long as
/// callers only place entries at indices returned by [`probe`](RawTable::probe).
#[derive(Clone)]
pub struct RawTable<V> {
    slots: Box<[Slot<V>]>,
    items: usize,
}

impl<V> RawTable<V> {
    /// Allocates a table with exactly `buckets` slots, all empty.
    ///
    /// A request for zero slots gets one.
    ///
    /// # Panics
    ///
    /// Panics if the slot array cannot be allocated. See
    /// [`try_with_buckets`](RawTable::try_with_buckets) for a fallible version.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn with_buckets(buckets: usize) -> Self {
        match Self::try_with_buckets(buckets) {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }

    /// Allocates a table with exactly `buckets` slots, all empty.
    ///
    /// Fails with [`Error::InvalidCapacity`] if the slot array would not fit in memory.
    pub fn try_with_buckets(buckets: usize) -> Result<Self, Error> {
        let buckets = buckets.max(1);
        match buckets.checked_mul(mem::size_of::<Slot<V>>()) {
            Some(bytes) if bytes <= isize::MAX as usize => {}
            _ => return Err(Error::InvalidCapacity),
        }

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(buckets)
            .map_err(|_| Error::InvalidCapacity)?;
        slots.resize_with(buckets, Slot::default);
        Ok(Self {
            slots: slots.into_boxed_slice(),
            items: 0,
        })
    }

    /// Returns the number of slots.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn buckets(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of occupied slots.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn len(&self) -> usize {
        self.items
    }

    /// Returns true if no slot is occupied.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn is_empty(&self) -> bool {
        self.items == 0
    }

    /// Returns true if every slot is occupied.
    ///
    /// Since [`probe`](RawTable::probe) always keeps one slot free, this only holds for a table
    /// whose entries were written without probing first.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn is_full(&self) -> bool {
        self.items == self.buckets()
    }

    /// Maps `key` to the slot its probe sequence starts at.
    ///
    /// The hash is a Horner-style polynomial over the key's characters whose multiplier is
    /// itself reduced modulo `buckets - 1` at every step, so the same key lands on unrelated
    /// slots in tables of different sizes.
    pub fn hash(&self, key: &str) -> usize {
        let buckets = self.buckets() as u128;
        if buckets == 1 {
            return 0;
        }

        let mut value = 0u128;
        let mut multiplier = HASH_SEED;
        for c in key.chars() {
            value = (u128::from(u32::from(c)) + multiplier * value) % buckets;
            multiplier = multiplier * HASH_BASE % (buckets - 1);
        }
        value as usize
    }

    /// Finds the slot for `key`.
    ///
    /// Walks forward from [`hash`](RawTable::hash)`(key)`, wrapping around, for at most one lap.
    /// The slot holding `key` is returned in both modes. In insert mode, the first empty slot is
    /// returned instead if `key` is absent; in lookup mode an empty slot ends the search with
    /// [`Error::KeyNotFound`].
    ///
    /// Insert mode fails with [`Error::TableFull`] if claiming the empty slot would leave the
    /// table without any empty slot.
    pub fn probe(&self, key: &str, for_insert: bool) -> Result<usize, Error> {
        if for_insert && self.is_full() {
            return Err(Error::TableFull);
        }

        let buckets = self.buckets();
        let mut pos = self.hash(key);
        for _ in 0..buckets {
            match self.slots[pos] {
                Slot::Empty if for_insert => {
                    if self.items + 1 >= buckets {
                        return Err(Error::TableFull);
                    }
                    return Ok(pos);
                }
                Slot::Empty => return Err(Error::KeyNotFound),
                Slot::Occupied { key: ref k, .. } if k == key => return Ok(pos),
                Slot::Occupied { .. } => pos = (pos + 1) % buckets,
            }
        }
        Err(Error::KeyNotFound)
    }

    /// Returns the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.buckets()`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn slot(&self, index: usize) -> &Slot<V> {
        &self.slots[index]
    }

    /// Stores `key` and `value` at `index`, returning the value it replaces, if any.
    ///
    /// The index should come from [`probe`](RawTable::probe) in insert mode for the same key.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.buckets()`.
    pub fn write(&mut self, index: usize, key: String, value: V) -> Option<V> {
        let slot = &mut self.slots[index];
        if let Slot::Occupied {
            key: ref k,
            value: ref mut old,
        } = *slot
        {
            debug_assert_eq!(*k, key, "overwriting a different key");
            return Some(mem::replace(old, value));
        }
        *slot = Slot::Occupied { key, value };
        self.items += 1;
        None
    }

    /// Empties the slot at `index` and returns what it held.
    ///
    /// This alone can strand entries later in the same cluster; the caller is responsible for
    /// moving them.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.buckets()`.
    pub fn take(&mut self, index: usize) -> Option<(String, V)> {
        match mem::take(&mut self.slots[index]) {
            Slot::Empty => None,
            Slot::Occupied { key, value } => {
                self.items -= 1;
                Some((key, value))
            }
        }
    }

    /// Empties every slot without changing the number of slots.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.items = 0;
    }

    /// Returns an iterator over the occupied slots in slot-array order.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter(&self) -> RawIter<'_, V> {
        RawIter {
            slots: self.slots.iter(),
            items: self.items,
        }
    }
}

impl<V> IntoIterator for RawTable<V> {
    type Item = (String, V);
    type IntoIter = RawIntoIter<V>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> RawIntoIter<V> {
        RawIntoIter {
            slots: Vec::from(self.slots).into_iter(),
            items: self.items,
        }
    }
}

/// Iterator over the entries of a [`RawTable`], in slot-array order.
pub struct RawIter<'a, V> {
    slots: slice::Iter<'a, Slot<V>>,
    items: usize,
}

impl<V> Clone for RawIter<'_, V> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            items: self.items,
        }
    }
}

impl<'a, V> Iterator for RawIter<'a, V> {
    type Item = (&'a str, &'a V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.items == 0 {
            return None;
        }
        for slot in &mut self.slots {
            if let Slot::Occupied { ref key, ref value } = *slot {
                self.items -= 1;
                return Some((key.as_str(), value));
            }
        }
        None
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<V> ExactSizeIterator for RawIter<'_, V> {}
impl<V> FusedIterator for RawIter<'_, V> {}

/// Iterator which consumes a table and returns its entries.
pub struct RawIntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
    items: usize,
}

impl<V> Iterator for RawIntoIter<V> {
    type Item = (String, V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(String, V)> {
        if self.items == 0 {
            return None;
        }
        for slot in &mut self.slots {
            if let Slot::Occupied { key, value } = slot {
                self.items -= 1;
                return Some((key, value));
            }
        }
        None
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.items, Some(self.items))
    }
}

impl<V> ExactSizeIterator for RawIntoIter<V> {}
impl<V> FusedIterator for RawIntoIter<V> {}
