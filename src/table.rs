use crate::raw::{RawIntoIter, RawIter, RawTable, Slot};
use crate::{schedule, Error};
use alloc::string::{String, ToString};
use core::fmt;
use core::iter::{FromIterator, FusedIterator};
use core::mem;
use log::{debug, trace};

/// Number of slots in a table built with [`ProbeTable::default`].
pub const DEFAULT_TABLE_SIZE: usize = 17;

/// A string-keyed hash table using linear probing.
///
/// Collisions are resolved by walking forward from the key's home slot to the next free one.
/// Removal does not leave tombstones behind. Instead, every entry between the freed slot and the
/// next empty slot is taken out and inserted again, so that no entry is cut off from its home
/// slot by the new gap. This makes [`delete`](ProbeTable::delete) proportional to the size of the
/// cluster it hits, but keeps lookups free of tombstone checks and [`len`](ProbeTable::len) exact.
///
/// The table grows through a schedule of prime sizes. Growth happens before an insert would
/// occupy the last empty slot, so there is always at least one empty slot and every probe ends.
///
/// # Examples
///
/// ```
/// use probetable::{Error, ProbeTable};
///
/// let mut table = ProbeTable::new(5);
/// for i in 0..10 {
///     table.insert(i.to_string(), i);
/// }
/// assert_eq!(table.capacity(), 11);
/// assert_eq!(table.get("7"), Ok(&7));
///
/// assert_eq!(table.delete("7"), Ok(7));
/// assert_eq!(table.get("7"), Err(Error::KeyNotFound));
/// assert_eq!(table.len(), 9);
/// ```
#[derive(Clone)]
pub struct ProbeTable<V> {
    table: RawTable<V>,
    // Index into the prime schedule of the next capacity to grow into.
    cursor: usize,
}

impl<V> ProbeTable<V> {
    /// Creates an empty table with `capacity` slots.
    ///
    /// A capacity of zero is treated as one. The capacity is used as given; only capacities the
    /// table grows into are taken from the prime schedule.
    ///
    /// # Panics
    ///
    /// Panics if the slot array cannot be allocated.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(table) => table,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates an empty table with `capacity` slots, failing with [`Error::InvalidCapacity`] if
    /// the slot array cannot be allocated.
    pub fn try_new(capacity: usize) -> Result<Self, Error> {
        Ok(Self {
            table: RawTable::try_with_buckets(capacity)?,
            cursor: schedule::cursor_after(capacity),
        })
    }

    /// Returns the number of entries in the table.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table holds no entries.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns true if every slot is occupied.
    ///
    /// The table grows before this can happen, so outside of the table's own methods this is
    /// always false.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn is_full(&self) -> bool {
        self.table.is_full()
    }

    /// Returns the number of slots in the table.
    ///
    /// At most `capacity() - 1` entries fit before the next insert of a new key grows the table.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn capacity(&self) -> usize {
        self.table.buckets()
    }

    /// Returns the slot index `key`'s probe sequence starts at for the current capacity.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn hash(&self, key: &str) -> usize {
        self.table.hash(key)
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: &str) -> Result<&V, Error> {
        let index = self.table.probe(key, false)?;
        match *self.table.slot(index) {
            Slot::Occupied { ref value, .. } => Ok(value),
            Slot::Empty => Err(Error::KeyNotFound),
        }
    }

    /// Returns true if the table holds an entry for `key`.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.probe(key, false).is_ok()
    }

    /// Stores `value` for `key`, growing the table if needed.
    ///
    /// If the table already held an entry for `key`, its value is replaced and returned, and the
    /// number of entries does not change.
    ///
    /// # Panics
    ///
    /// Panics if the table would have to grow past `usize::MAX` slots. See
    /// [`try_insert`](ProbeTable::try_insert) for a version that reports this instead.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(old) => old,
            Err(e) => panic!("{}", e),
        }
    }

    /// Stores `value` for `key`, growing the table if needed.
    ///
    /// Fails with [`Error::CapacityExhausted`] or [`Error::InvalidCapacity`] only if the larger
    /// table cannot be represented or allocated. The table is unchanged in that case.
    pub fn try_insert(&mut self, key: impl Into<String>, value: V) -> Result<Option<V>, Error> {
        let key = key.into();
        loop {
            match self.table.probe(&key, true) {
                Ok(index) => return Ok(self.table.write(index, key, value)),
                // Each growth strictly increases the capacity, so this ends.
                Err(Error::TableFull) => self.grow()?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// Every entry in the rest of the cluster after the freed slot is reinserted so that it
    /// stays reachable from its home slot.
    pub fn delete(&mut self, key: &str) -> Result<V, Error> {
        let index = self.table.probe(key, false)?;
        let (_, value) = self.table.take(index).ok_or(Error::KeyNotFound)?;
        self.repair(index);
        Ok(value)
    }

    /// Removes every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the entries, in slot order.
    ///
    /// The order depends on the current capacity and on the order of earlier inserts and deletes.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys, in slot order.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in slot order.
    #[cfg_attr(feature = "inline-more", inline)]
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) -> Result<(), Error> {
        let capacity = schedule::next(self.cursor, self.capacity())?;
        let grown = ProbeTable::try_new(capacity)?;
        let old = mem::replace(self, grown);
        debug!(
            "growing probe table from {} to {} slots ({} entries)",
            old.capacity(),
            capacity,
            old.len()
        );

        // Every old entry fits without the new table growing, since it is strictly larger.
        for (key, value) in old.table {
            let index = self.table.probe(&key, true)?;
            self.table.write(index, key, value);
        }
        Ok(())
    }

    /// Reinserts every entry from just past `freed` up to the next empty slot.
    fn repair(&mut self, freed: usize) {
        let capacity = self.capacity();
        let mut pos = (freed + 1) % capacity;
        let mut moved = 0;
        while let Some((key, value)) = self.table.take(pos) {
            // The entry was just taken out, so there is more room than before the delete and
            // this cannot grow the table.
            if cfg!(debug_assertions) {
                self.insert(key, value);
                assert_eq!(capacity, self.capacity(), "resize during cluster repair");
            } else {
                self.insert(key, value);
            }
            moved += 1;
            pos = (pos + 1) % capacity;
        }
        trace!("freed slot {}, reinserted {} entries", freed, moved);
    }
}

impl<V: fmt::Display> ProbeTable<V> {
    /// Returns one `(key,value)` line per entry, in slot order.
    ///
    /// Intended for diagnostics. The order is not stable across inserts, deletes or growth.
    pub fn to_debug_string(&self) -> String {
        self.to_string()
    }
}

impl<V> Default for ProbeTable<V> {
    /// Creates an empty table with [`DEFAULT_TABLE_SIZE`] slots.
    #[cfg_attr(feature = "inline-more", inline)]
    fn default() -> Self {
        Self::new(DEFAULT_TABLE_SIZE)
    }
}

impl<V: fmt::Debug> fmt::Debug for ProbeTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: fmt::Display> fmt::Display for ProbeTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            writeln!(f, "({},{})", key, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for ProbeTable<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ProbeTable<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<'a, V> IntoIterator for &'a ProbeTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<V> IntoIterator for ProbeTable<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    #[cfg_attr(feature = "inline-more", inline)]
    fn into_iter(self) -> IntoIter<V> {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

/// An iterator over the entries of a `ProbeTable`.
///
/// This `struct` is created by the [`iter`](ProbeTable::iter) method on [`ProbeTable`].
pub struct Iter<'a, V> {
    inner: RawIter<'a, V>,
}

impl<V> Clone for Iter<'_, V> {
    #[cfg_attr(feature = "inline-more", inline)]
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the entries of a `ProbeTable`.
pub struct IntoIter<V> {
    inner: RawIntoIter<V>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<(String, V)> {
        self.inner.next()
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

/// An iterator over the keys of a `ProbeTable`.
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<&'a str> {
        self.inner.next().map(|(k, _)| k)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}
impl<V> FusedIterator for Keys<'_, V> {}

/// An iterator over the values of a `ProbeTable`.
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    #[cfg_attr(feature = "inline-more", inline)]
    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    #[cfg_attr(feature = "inline-more", inline)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}
impl<V> FusedIterator for Values<'_, V> {}
