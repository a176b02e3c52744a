//! An owned, unbalanced BST of unique elements. Every `Node` owns its element and its two
//! (possibly empty) child slots outright, so copying a tree copies every node and dropping it
//! releases every node. The tree never rebalances itself on insert; the only way to restore a
//! minimal height is to drain it into a sorted sequence and fill it back up.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert_eq!(tree.retrieve(&5), None);
//!
//! assert!(tree.insert(5));
//! assert!(tree.insert(3));
//!
//! // Elements are unique so a second 5 is turned away.
//! assert!(!tree.insert(5));
//!
//! assert_eq!(tree.retrieve(&3), Some(&3));
//! assert_eq!(tree.depth(&5), 1);
//! assert_eq!(tree.depth(&3), 2);
//! assert_eq!(tree.to_string(), "3 5 \n");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use log::{debug, trace, warn};

use crate::error::SequenceError;
use crate::sideways::{Sideways, SidewaysOptions};
use crate::util::midpoint_order;

/// The most leading elements [`Tree::fill_from`] will rebuild from.
pub const DEFAULT_SEQUENCE_LIMIT: usize = 100;

/// A Binary Search Tree holding unique elements. This can be used for inserting and retrieving
/// elements, and for rebuilding itself into a shape of minimal height via a sorted sequence.
///
/// Two trees are equal when they have the same shape and equal elements in the same positions.
/// Holding the same elements is not enough.
pub struct Tree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: Node::clone_subtree(self.root()),
            len: self.len,
        }
    }

    /// Releases everything this tree holds before copying `source` in.
    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.root = Node::clone_subtree(source.root());
        self.len = source.len;
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        Node::same_shape(self.root(), other.root())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("root", &self.root())
            .finish()
    }
}

/// Writes every element in ascending order, each followed by a space, then a newline. An empty
/// tree writes just the newline.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in self {
            write!(f, "{} ", element)?;
        }
        writeln!(f)
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    /// Inserts each element in turn. Duplicates are dropped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a tree of minimal height from a vector that is sorted in strictly ascending order.
    /// There is no limit on the length of `sorted`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{SequenceError, Tree};
    ///
    /// let tree = Tree::from_sorted(vec![1, 2, 3, 4, 5, 6, 7]).unwrap();
    /// assert_eq!(tree.height(), 3);
    /// assert_eq!(tree.depth(&4), 1);
    ///
    /// assert_eq!(
    ///     Tree::from_sorted(vec![1, 3, 2]).unwrap_err(),
    ///     SequenceError::NotAscending { index: 2 }
    /// );
    /// ```
    pub fn from_sorted(sorted: Vec<T>) -> Result<Self, SequenceError>
    where
        T: Ord,
    {
        let mut slots: Vec<Option<T>> = sorted.into_iter().map(Some).collect();
        let mut tree = Self::new();
        tree.fill_from_with_limit(&mut slots, usize::MAX)?;
        Ok(tree)
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// How many elements the tree holds.
    pub fn len(&self) -> usize {
        self.len
    }

    /// How many levels the tree has. An empty tree has a height of 0 and a lone root has a
    /// height of 1.
    pub fn height(&self) -> usize {
        Node::height(self.root())
    }

    /// Releases every node and element, leaving the tree empty. Children are released before
    /// their parent and a node's element before the node itself. Clearing an empty tree does
    /// nothing.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            release(Some(root));
            trace!("cleared tree of {} elements", self.len);
        }
        self.len = 0;
    }

    /// Inserts `element` unless an equal element is already in the tree. Returns whether it was
    /// inserted. A rejected element is dropped and the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, element: T) -> bool
    where
        T: Ord,
    {
        let inserted = Node::insert(&mut self.root, element);

        if inserted {
            self.len += 1;
            trace!("inserted element, tree now holds {}", self.len);
        } else {
            trace!("rejected duplicate element");
        }
        inserted
    }

    /// Finds the element in this tree equal to `query`. The tree keeps ownership of what it
    /// returns.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.retrieve(&1), Some(&1));
    /// assert_eq!(tree.retrieve(&42), None);
    /// ```
    pub fn retrieve(&self, query: &T) -> Option<&T>
    where
        T: Ord,
    {
        Node::retrieve(self.root(), query)
    }

    /// The level `query` sits on, counting the root as 1. Returns 0 if it isn't in the tree.
    ///
    /// This searches both subtrees of every node it visits rather than following the ordering,
    /// so it takes `O(n)` time even on a balanced tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].iter().copied().collect();
    ///
    /// assert_eq!(tree.depth(&5), 1);
    /// assert_eq!(tree.depth(&8), 2);
    /// assert_eq!(tree.depth(&4), 3);
    /// assert_eq!(tree.depth(&7), 0);
    /// ```
    pub fn depth(&self, query: &T) -> usize
    where
        T: PartialEq,
    {
        Node::depth(self.root(), query)
    }

    /// Iterates over the elements in ascending order without disturbing the tree.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        iter.push_left_spine(self.root());
        iter
    }

    /// Moves every element into `slots` in ascending order, starting at index 0, and leaves the
    /// tree empty. Slots past the tree's length are left alone. Returns how many slots were
    /// written.
    ///
    /// # Errors
    ///
    /// [`SequenceError::InsufficientCapacity`] if `slots` is shorter than the tree. Nothing is
    /// moved in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].iter().copied().collect();
    /// let mut slots: Vec<Option<i32>> = vec![None; 4];
    ///
    /// assert_eq!(tree.drain_into(&mut slots), Ok(3));
    /// assert_eq!(slots, [Some(1), Some(2), Some(3), None]);
    /// assert!(tree.is_empty());
    /// ```
    pub fn drain_into(&mut self, slots: &mut [Option<T>]) -> Result<usize, SequenceError> {
        if slots.len() < self.len {
            warn!(
                "refusing to drain {} elements into {} slots",
                self.len,
                slots.len()
            );
            return Err(SequenceError::InsufficientCapacity {
                len: self.len,
                capacity: slots.len(),
            });
        }

        let mut index = 0;
        for (slot, element) in slots.iter_mut().zip(Drain::new(self.root.take())) {
            *slot = Some(element);
            index += 1;
        }
        self.len = 0;

        debug!("drained {} elements into a sorted sequence", index);
        Ok(index)
    }

    /// Moves every element into a new vector in ascending order and leaves the tree empty.
    pub fn drain_sorted(&mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len);
        sorted.extend(Drain::new(self.root.take()));
        self.len = 0;

        debug!("drained {} elements into a vector", sorted.len());
        sorted
    }

    /// Inserts the leading elements of `slots`, up to the first empty slot or the end of the
    /// slice, in an order that gives them a shape of minimal height. Each slot is emptied as its
    /// element is taken. Returns how many elements were inserted; if the tree wasn't empty, any
    /// element equal to one already present is dropped instead.
    ///
    /// This is [`fill_from_with_limit`][Tree::fill_from_with_limit] with a limit of
    /// [`DEFAULT_SEQUENCE_LIMIT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// // Inserting in ascending order gives a tree that's really a list.
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// assert_eq!(tree.height(), 7);
    ///
    /// let mut slots: Vec<Option<i32>> = vec![None; 7];
    /// tree.drain_into(&mut slots).unwrap();
    /// tree.fill_from(&mut slots).unwrap();
    ///
    /// assert_eq!(tree.height(), 3);
    /// assert!(slots.iter().all(Option::is_none));
    /// ```
    pub fn fill_from(&mut self, slots: &mut [Option<T>]) -> Result<usize, SequenceError>
    where
        T: Ord,
    {
        self.fill_from_with_limit(slots, DEFAULT_SEQUENCE_LIMIT)
    }

    /// Like [`fill_from`][Tree::fill_from] but accepting up to `limit` leading elements.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::TooLong`] if there are more than `limit` leading elements.
    /// - [`SequenceError::NotAscending`] if the leading elements are not strictly ascending.
    ///
    /// Nothing is taken from `slots` and the tree is unchanged in either case.
    pub fn fill_from_with_limit(
        &mut self,
        slots: &mut [Option<T>],
        limit: usize,
    ) -> Result<usize, SequenceError>
    where
        T: Ord,
    {
        let count = slots.iter().take_while(|slot| slot.is_some()).count();
        if count > limit {
            warn!("refusing to fill from {} elements, limit is {}", count, limit);
            return Err(SequenceError::TooLong { count, limit });
        }

        let leading = &slots[..count];
        if let Some(index) = (1..count).find(|&i| leading[i - 1] >= leading[i]) {
            warn!("refusing to fill from a sequence out of order at {}", index);
            return Err(SequenceError::NotAscending { index });
        }

        let mut inserted = 0;
        for index in midpoint_order(count) {
            if let Some(element) = slots[index].take() {
                if self.insert(element) {
                    inserted += 1;
                }
            }
        }

        debug!("filled {} of {} elements from a sorted sequence", inserted, count);
        Ok(inserted)
    }

    /// A view of the tree that renders it on its side, one element per line: right subtrees above
    /// their parent, left subtrees below, and deeper elements indented further.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].iter().copied().collect();
    ///
    /// assert_eq!(
    ///     tree.sideways().indent(1).to_string(),
    ///     "   3\n  2\n   1\n"
    /// );
    /// ```
    pub fn sideways(&self) -> Sideways<'_, T> {
        Sideways::new(self, SidewaysOptions::default())
    }

    /// Writes the [`sideways`][Tree::sideways] rendering with default options to `out`.
    pub fn display_sideways<W>(&self, out: &mut W) -> fmt::Result
    where
        W: fmt::Write,
        T: fmt::Display,
    {
        write!(out, "{}", self.sideways())
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }
}

/// An iterator over a [`Tree`]'s elements in ascending order. Created by [`Tree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose element hasn't been yielded yet, and whose right subtree hasn't been visited.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A `Node` owns one element and up to two children.
///
/// Every walk over nodes keeps its own stack rather than recursing, because a tree built from
/// sorted input is as tall as it is long.
pub(crate) struct Node<T> {
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
    element: T,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<T> Node<T> {
    fn new_boxed(element: T) -> Box<Self> {
        Box::new(Self {
            left: None,
            right: None,
            element,
        })
    }

    pub(crate) fn element(&self) -> &T {
        &self.element
    }

    pub(crate) fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    pub(crate) fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// How many levels the subtree rooted at `root` has.
    fn height(root: Option<&Self>) -> usize {
        let mut tallest = 0;
        let mut stack: Vec<(&Self, usize)> = root.map(|n| (n, 1)).into_iter().collect();
        while let Some((node, level)) = stack.pop() {
            tallest = tallest.max(level);
            stack.extend(node.left().map(|n| (n, level + 1)));
            stack.extend(node.right().map(|n| (n, level + 1)));
        }
        tallest
    }

    /// Both empty, or equal elements here with equal right and left subtrees.
    fn same_shape(this: Option<&Self>, other: Option<&Self>) -> bool
    where
        T: PartialEq,
    {
        let mut pairs = vec![(this, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (Some(this), Some(other)) => {
                    if this.element != other.element {
                        return false;
                    }
                    pairs.push((this.left(), other.left()));
                    pairs.push((this.right(), other.right()));
                }
                (None, None) => {}
                _ => return false,
            }
        }
        true
    }

    /// Follows `link` down to an empty child slot and attaches `element` there as a leaf. Returns
    /// `false` without attaching anything if an equal element is on the way.
    fn insert(mut link: &mut Option<Box<Self>>, element: T) -> bool
    where
        T: Ord,
    {
        while let Some(node) = link {
            link = match element.cmp(&node.element) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => return false,
                Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Self::new_boxed(element));
        true
    }

    fn retrieve<'a>(mut node: Option<&'a Self>, query: &T) -> Option<&'a T>
    where
        T: Ord,
    {
        while let Some(n) = node {
            node = match query.cmp(&n.element) {
                Ordering::Less => n.left(),
                Ordering::Equal => return Some(&n.element),
                Ordering::Greater => n.right(),
            };
        }
        None
    }

    /// Visits every node without consulting the ordering. A match ends the search below it, and
    /// the deepest such match wins.
    fn depth(root: Option<&Self>, query: &T) -> usize
    where
        T: PartialEq,
    {
        let mut deepest = 0;
        let mut stack: Vec<(&Self, usize)> = root.map(|n| (n, 1)).into_iter().collect();
        while let Some((node, level)) = stack.pop() {
            if node.element == *query {
                deepest = deepest.max(level);
                continue;
            }
            stack.extend(node.left().map(|n| (n, level + 1)));
            stack.extend(node.right().map(|n| (n, level + 1)));
        }
        deepest
    }

    /// A copy of the subtree rooted at `root`, built bottom-up: each node is copied once both of
    /// its children have been.
    fn clone_subtree(root: Option<&Self>) -> Option<Box<Self>>
    where
        T: Clone,
    {
        let mut pending: Vec<(&Self, bool)> = root.map(|n| (n, false)).into_iter().collect();
        let mut built: Vec<Box<Self>> = Vec::new();

        while let Some((node, children_built)) = pending.pop() {
            if children_built {
                let right = node.right.as_ref().and_then(|_| built.pop());
                let left = node.left.as_ref().and_then(|_| built.pop());
                built.push(Box::new(Self {
                    left,
                    right,
                    element: node.element.clone(),
                }));
            } else {
                pending.push((node, true));
                pending.extend(node.right().map(|n| (n, false)));
                pending.extend(node.left().map(|n| (n, false)));
            }
        }
        built.pop()
    }
}

/// Releases the subtree rooted at `root`: each node's left subtree, then its right subtree, then
/// its element.
fn release<T>(root: Option<Box<Node<T>>>) {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        if let Some(left) = node.left.take() {
            stack.push(node);
            stack.push(left);
        } else if let Some(right) = node.right.take() {
            stack.push(node);
            stack.push(right);
        }
    }
}

/// Moves the elements out of a detached subtree in ascending order.
struct Drain<T> {
    /// Nodes with their left subtree already taken, whose element hasn't been yielded yet.
    stack: Vec<Box<Node<T>>>,
}

impl<T> Drain<T> {
    fn new(root: Option<Box<Node<T>>>) -> Self {
        let mut drain = Self { stack: Vec::new() };
        drain.push_left_spine(root);
        drain
    }

    fn push_left_spine(&mut self, mut next: Option<Box<Node<T>>>) {
        while let Some(mut node) = next {
            next = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for Drain<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        Some(node.element)
    }
}

impl<T> Drop for Drain<T> {
    fn drop(&mut self) {
        for node in self.stack.drain(..) {
            release(Some(node));
        }
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a set.
    /// This way we can ensure that after a random smattering of inserts
    /// and round trips we have the same elements in both.
    fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>)
    where
        T: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(x) => {
                    assert_eq!(bst.insert(x.clone()), set.insert(x.clone()));
                }
                Op::Retrieve(x) => {
                    assert_eq!(bst.retrieve(x), set.get(x));
                }
                Op::Rebuild => {
                    let mut slots: Vec<Option<T>> = vec![None; bst.len()];
                    bst.drain_into(&mut slots).unwrap();
                    bst.fill_from_with_limit(&mut slots, usize::MAX).unwrap();
                }
                Op::Iter => {
                    assert!(bst.iter().eq(set.iter()));
                }
            }
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set);
            tree.len() == set.len() && set.iter().all(|x| tree.retrieve(x) == Some(x))
        }
    }

    quickcheck::quickcheck! {
        fn duplicate_insert_keeps_shape(xs: Vec<i8>) -> bool {
            let mut tree: Tree<_> = xs.iter().copied().collect();
            let before = tree.clone();

            xs.iter().all(|x| !tree.insert(*x)) && tree == before
        }
    }

    quickcheck::quickcheck! {
        fn depth_agrees_with_guided_descent(xs: Vec<i8>, query: i8) -> bool {
            let tree: Tree<_> = xs.iter().copied().collect();

            let mut expected = 0;
            let mut node = tree.root();
            let mut level = 1;
            while let Some(n) = node {
                match query.cmp(n.element()) {
                    Ordering::Less => node = n.left(),
                    Ordering::Equal => {
                        expected = level;
                        break;
                    }
                    Ordering::Greater => node = n.right(),
                }
                level += 1;
            }

            tree.depth(&query) == expected
        }
    }
}
