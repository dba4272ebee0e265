//! Three-way comparators consumed by the sorts and the `_by` structural
//! predicates.
//!
//! A comparator is any `Fn(&T, &T) -> Ordering` that is total and
//! consistent; `Ordering` carries the negative/zero/positive contract.
//! Defaults are explicit parameters at every call site, never module
//! state: handle identity is the default for structural predicates, and
//! the functions here cover the common payload orderings.

use std::cmp::Ordering;

/// Direct value comparison for any `Ord` payload: strings, integers, and
/// anything else with a total order.
pub fn value_compare<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Total comparison over floats; `total_cmp` leaves no incomparable
/// values.
pub fn float_compare(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// Records that expose a dedicated ordering key.
pub trait Keyed {
    type Key: Ord;

    fn key(&self) -> &Self::Key;
}

/// Compares two records by their [`Keyed::key`], leaving the rest of the
/// record out of the ordering.
pub fn key_compare<T: Keyed>(a: &T, b: &T) -> Ordering {
    a.key().cmp(b.key())
}
