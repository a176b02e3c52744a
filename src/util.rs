/// The order in which the indices `0..len` of a sorted sequence are inserted to rebuild a tree of
/// minimal height: the midpoint of the current range first, then the range to its right, then the
/// range to its left. For an even-length range the lower of the two middles is chosen.
pub(crate) fn midpoint_order(len: usize) -> Vec<usize> {
    let mut order = Vec::with_capacity(len);
    push_midpoints(0, len, &mut order);
    order
}

/// Recursive helper for [`midpoint_order`] over the half-open range `start..end`.
fn push_midpoints(start: usize, end: usize, order: &mut Vec<usize>) {
    if start < end {
        let mid = start + (end - start - 1) / 2;
        order.push(mid);
        push_midpoints(mid + 1, end, order);
        push_midpoints(start, mid, order);
    }
}
