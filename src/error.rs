//! Errors for the sorted-sequence round trip.
//!
//! Duplicate inserts and failed lookups are ordinary outcomes (`false`, `None`, `0`) and never
//! show up here. Only a caller handing the tree a sequence it can't honor does.

use thiserror::Error;

/// A precondition of [`Tree::drain_into`][crate::Tree::drain_into] or
/// [`Tree::fill_from`][crate::Tree::fill_from] was violated. When one of these is returned the
/// tree and the caller's slots are left exactly as they were.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum SequenceError {
    /// The destination has fewer slots than the tree has elements.
    #[error("destination has {capacity} slots but the tree holds {len} elements")]
    InsufficientCapacity {
        /// How many elements the tree holds.
        len: usize,
        /// How many slots the destination has.
        capacity: usize,
    },
    /// The sequence has more leading elements than the tree will rebuild from.
    #[error("sequence holds {count} elements, more than the limit of {limit}")]
    TooLong {
        /// How many leading elements were counted before the first empty slot.
        count: usize,
        /// The most elements allowed.
        limit: usize,
    },
    /// The element at `index` is not strictly greater than the one before it.
    #[error("sequence is not strictly ascending at index {index}")]
    NotAscending {
        /// Index of the first out-of-order (or duplicate) element.
        index: usize,
    },
}
