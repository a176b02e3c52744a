//! This crate exposes an owned Binary Search Tree (BST) of unique elements, along with a way to
//! rebuild it into a shape of minimal height.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores one element
//! and will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an
//!    element less than its own element.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an
//!    element greater than its own element.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for an element takes `O(height)` (where `height` is the number of `Node`s on the
//! longest path from the root to a leaf). [`Tree`] never rebalances itself, so inserting
//! elements in sorted order gives a tree whose height is its length. Draining the tree into a
//! sorted sequence with [`Tree::drain_into`] and filling it back up with [`Tree::fill_from`]
//! restores a height of `⌈lg(N + 1)⌉`.
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree: Tree<_> = (1..=15).collect();
//! assert_eq!(tree.height(), 15);
//!
//! let mut slots: Vec<Option<i32>> = vec![None; tree.len()];
//! tree.drain_into(&mut slots).unwrap();
//! assert!(tree.is_empty());
//!
//! tree.fill_from(&mut slots).unwrap();
//! assert_eq!(tree.height(), 4);
//! assert_eq!(tree.len(), 15);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod ordered;
mod sideways;
mod util;

pub use error::SequenceError;
pub use ordered::{Iter, Tree, DEFAULT_SEQUENCE_LIMIT};
pub use sideways::{Sideways, SidewaysOptions};
