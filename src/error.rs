use core::fmt;

/// The error type for operations on a [`ProbeTable`](crate::ProbeTable) and its
/// [`RawTable`](crate::raw::RawTable).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The key is not present in the table.
    KeyNotFound,

    /// A fixed-capacity table has no room for another key.
    ///
    /// Only [`RawTable`](crate::raw::RawTable) reports this. `ProbeTable` turns it into a
    /// growth step and never returns it.
    TableFull,

    /// The next capacity in the growth schedule does not fit in a `usize`.
    CapacityExhausted,

    /// The requested capacity cannot be allocated.
    InvalidCapacity,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::KeyNotFound => f.write_str("key not found"),
            Error::TableFull => f.write_str("hash table is full"),
            Error::CapacityExhausted => f.write_str("hash table capacity overflow"),
            Error::InvalidCapacity => f.write_str("requested capacity is too large to allocate"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
