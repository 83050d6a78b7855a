/*!
 * List Slicing
 * Ordinal range views over block and process lists
 */

use std::ops::Range;

/// Sub-slice for `range`, clamped so out-of-range bounds yield a shorter (or empty) slice
pub fn slice_range<T>(items: &[T], range: Range<usize>) -> &[T] {
    let end = range.end.min(items.len());
    let start = range.start.min(end);
    &items[start..end]
}

/// 1-based page of `per_page` items; page 0 is treated as page 1
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page);
    slice_range(items, start..start.saturating_add(per_page))
}

/// Number of pages needed to show `len` items
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        0
    } else {
        len.div_ceil(per_page)
    }
}
