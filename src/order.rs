//! Insertion-point search for comparator-ordered sibling collections.

use std::cmp::Ordering;

/// Find the index at which to insert `element` into `items` while keeping
/// the order established by `comparator`.
///
/// Scans left to right and returns the index of the first item comparing
/// `Greater` than `element`, or the item count if none does. Equal keys
/// therefore insert after their run, preserving insertion order among ties.
///
/// `items` must already satisfy the comparator's order; the result is
/// deterministic but unspecified otherwise. Accepts any iterator so callers
/// can feed lazily materialized values and stop at the insertion point.
pub fn find_insert_index<T, F, I>(comparator: F, items: I, element: &T) -> usize
where
    F: Fn(&T, &T) -> Ordering,
    I: IntoIterator<Item = T>,
{
    let mut index = 0;
    for existing in items {
        if comparator(&existing, element) == Ordering::Greater {
            return index;
        }
        index += 1;
    }
    index
}
