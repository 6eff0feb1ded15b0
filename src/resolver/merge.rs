//! Sorted-sequence intersection

use std::cmp::Ordering;

/// Intersect two sorted slices with a single linear merge.
///
/// Both inputs must be sorted ascending. Neither input is modified; the
/// common elements are returned in ascending order.
pub fn intersect_sorted<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                result.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }

    result
}
