//! Partial top-k sorting for ranked results.
//!
//! Queries routinely score thousands of candidates but return a handful, so
//! fully sorting the result vector is wasted work. [`partial_sort`] selects
//! the top `k` elements in linear time, sorts just those, and drops the
//! rest.

/// Keep and sort the best `max_items` elements of `items`.
///
/// "Best" means least under `T`'s ordering -- ranked results compare best
/// first. With `max_items == 0` (no cap) or a cap at least as large as the
/// vector, the whole vector is stably sorted and nothing is dropped.
/// Otherwise an nth-element selection partitions the top `max_items`
/// elements to the front, that prefix is sorted, and the tail is truncated.
///
/// # Examples
///
/// ```
/// use fuzzident::partial_sort;
///
/// let mut items = vec![5, 1, 4, 2, 3];
/// partial_sort(&mut items, 2);
/// assert_eq!(items, [1, 2]);
///
/// let mut uncapped = vec![3, 1, 2];
/// partial_sort(&mut uncapped, 0);
/// assert_eq!(uncapped, [1, 2, 3]);
/// ```
pub fn partial_sort<T: Ord>(items: &mut Vec<T>, max_items: usize) {
    if max_items == 0 || max_items >= items.len() {
        items.sort();
        return;
    }
    items.select_nth_unstable(max_items - 1);
    items[..max_items].sort();
    items.truncate(max_items);
}
