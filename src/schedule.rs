//! The capacities a table grows through.
//!
//! Growth walks a fixed list of primes, about 1.2x apart once past the smallest few. Past the
//! end of the list the next capacity is computed as the smallest prime at or above twice the
//! current one, so a table only runs out of capacities when the arithmetic itself overflows.

use crate::Error;

pub(crate) const PRIMES: [usize; 72] = [
    3, 7, 11, 17, 23, 29, 37, 47, 59, 71, 89, 107, 131, 163, 197, 239, 293, 353, 431, 521, 631,
    761, 919, 1103, 1327, 1597, 1931, 2333, 2801, 3371, 4049, 4861, 5839, 7013, 8419, 10103,
    12143, 14591, 17519, 21023, 25229, 30313, 36353, 43627, 52361, 62851, 75521, 90523, 108631,
    130363, 156437, 187751, 225307, 270371, 324449, 389357, 467237, 560689, 672827, 807403,
    968897, 1162687, 1395263, 1674319, 2009191, 2411033, 2893249, 3471899, 4166287, 4999559,
    5999471, 7199369,
];

/// Returns the index of the first scheduled capacity strictly greater than `capacity`.
///
/// For capacities beyond the last listed prime this is `PRIMES.len()`, which [`next`] treats as
/// "compute the next capacity from the current one".
pub(crate) fn cursor_after(capacity: usize) -> usize {
    PRIMES.partition_point(|&p| p <= capacity)
}

/// Returns the capacity to grow into from `capacity`, given the current schedule cursor.
///
/// The result is always strictly greater than `capacity`.
pub(crate) fn next(cursor: usize, capacity: usize) -> Result<usize, Error> {
    match PRIMES.get(cursor) {
        Some(&p) if p > capacity => Ok(p),
        _ => {
            let target = capacity.checked_mul(2).ok_or(Error::CapacityExhausted)?;
            next_prime_at_least(target.max(3)).ok_or(Error::CapacityExhausted)
        }
    }
}

fn next_prime_at_least(n: usize) -> Option<usize> {
    let mut candidate = n | 1;
    loop {
        if is_prime(candidate) {
            return Some(candidate);
        }
        candidate = candidate.checked_add(2)?;
    }
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3usize;
    while let Some(sq) = d.checked_mul(d) {
        if sq > n {
            break;
        }
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
