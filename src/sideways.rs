//! A diagnostic rendering of a [`Tree`] rotated on its side.
//!
//! Each element gets its own line. Right subtrees are written above their parent and left
//! subtrees below, so reading top to bottom gives the elements in descending order. An element
//! at depth `d` (the root being depth 1) is preceded by `d + 1` indent units.
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let tree: Tree<_> = [5, 3, 8, 1, 4].iter().copied().collect();
//!
//! let expected = "\
//! \x20           8
//! \x20       5
//! \x20               4
//! \x20           3
//! \x20               1
//! ";
//! assert_eq!(tree.sideways().to_string(), expected);
//! ```

use std::fmt;

use crate::ordered::{Node, Tree};

/// How a [`Sideways`] rendering is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidewaysOptions {
    /// Spaces per indent unit.
    pub indent: usize,
}

impl Default for SidewaysOptions {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

/// A [`Tree`] that displays sideways. Created by [`Tree::sideways`].
pub struct Sideways<'a, T> {
    tree: &'a Tree<T>,
    options: SidewaysOptions,
}

impl<'a, T> Sideways<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, options: SidewaysOptions) -> Self {
        Self { tree, options }
    }

    /// Use `indent` spaces per indent unit.
    pub fn indent(mut self, indent: usize) -> Self {
        self.options.indent = indent;
        self
    }

    /// Replace every layout option at once.
    pub fn options(mut self, options: SidewaysOptions) -> Self {
        self.options = options;
        self
    }

    /// Right subtree, this node, then left subtree, so the largest element comes out first.
    fn write_nodes(&self, f: &mut fmt::Formatter<'_>, root: &Node<T>) -> fmt::Result
    where
        T: fmt::Display,
    {
        let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
        let mut next = Some((root, 1));
        loop {
            while let Some((node, depth)) = next {
                stack.push((node, depth));
                next = node.right().map(|n| (n, depth + 1));
            }

            let (node, depth) = match stack.pop() {
                Some(entry) => entry,
                None => return Ok(()),
            };
            let width = (depth + 1) * self.options.indent;
            writeln!(f, "{:width$}{}", "", node.element(), width = width)?;
            next = node.left().map(|n| (n, depth + 1));
        }
    }
}

impl<'a, T> fmt::Display for Sideways<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tree.root() {
            Some(root) => self.write_nodes(f, root),
            None => Ok(()),
        }
    }
}
