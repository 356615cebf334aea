//! Ordered map key for floating-point time values.

use std::cmp::Ordering;

/// A time value usable as a `BTreeMap` key.
///
/// Ordering is `f64::total_cmp`; equality matches the exact-value semantics
/// of the sparse table (a query at 50.0 does not see an event at 50.0001).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TimeKey(f64);

impl TimeKey {
    pub(crate) fn new(time: f64) -> Self {
        Self(time)
    }

    pub(crate) fn value(self) -> f64 {
        self.0
    }
}

impl Eq for TimeKey {}

impl PartialOrd for TimeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}
