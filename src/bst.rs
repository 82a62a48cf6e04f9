//! An ordered set implemented with a plain binary search tree.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use tracing::debug;

use crate::error::TreeError;
use crate::sequence::Sequence;

/// An ordered set implemented with an unbalanced binary search tree.
///
/// Elements are placed where the search for them ends and the tree is never
/// restructured, so its shape depends on the insertion order.
/// Duplicate elements are rejected.
///
/// ```
/// use ordered_trees::{BsTree, TreeError};
/// let mut tree = BsTree::new();
/// for value in [2, 1, 3] {
///     tree.insert(value).unwrap();
/// }
/// assert_eq!(tree.insert(3), Err(TreeError::DuplicateElement));
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.remove(&2), Ok(2));
/// assert_eq!(tree.root(), Some(&3));
/// ```
pub struct BsTree<E> {
    root: Link<E>,
    num_nodes: usize,
}

struct Node<E> {
    element: E,
    left: Link<E>,
    right: Link<E>,
}

type Link<E> = Option<Box<Node<E>>>;

/// An iterator over the elements of a binary search tree in ascending order.
pub struct Iter<'a, E> {
    stack: Vec<&'a Node<E>>,
    remaining: usize,
}

impl<E: Ord> BsTree<E> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns a reference to the element in the tree that is equal to the given value.
    pub fn find<Q>(&self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = &self.root;
        while let Some(node) = current {
            current = match value.cmp(node.element.borrow()) {
                Ordering::Equal => return Ok(&node.element),
                Ordering::Less => &node.left,
                Ordering::Greater => &node.right,
            };
        }
        Err(TreeError::ElementNotFound)
    }

    /// Returns true if the tree contains an element equal to the given value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(value).is_ok()
    }

    /// Inserts an element as a new leaf.
    /// Fails if an equal element is already present, leaving the tree untouched.
    pub fn insert(&mut self, element: E) -> Result<(), TreeError> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = match element.cmp(&node.element) {
                Ordering::Equal => return Err(TreeError::DuplicateElement),
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
            };
        }
        *link = Some(Box::new(Node {
            element,
            left: None,
            right: None,
        }));
        self.num_nodes += 1;
        Ok(())
    }

    /// Removes the element equal to the given value from the tree and returns it.
    ///
    /// A node with two children is replaced by its in-order successor.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut link = &mut self.root;
        loop {
            let ordering = match link {
                None => return Err(TreeError::ElementNotFound),
                Some(node) => value.cmp(node.element.borrow()),
            };
            match ordering {
                Ordering::Equal => break,
                Ordering::Less => {
                    if let Some(node) = link {
                        link = &mut node.left;
                    }
                }
                Ordering::Greater => {
                    if let Some(node) = link {
                        link = &mut node.right;
                    }
                }
            }
        }

        let Some(mut node) = link.take() else {
            return Err(TreeError::ElementNotFound);
        };
        *link = match (node.left.take(), node.right.take()) {
            (None, child) | (child, None) => child,
            (left, mut right) => match unlink_leftmost(&mut right) {
                Some(mut successor) => {
                    successor.left = left;
                    successor.right = right;
                    Some(successor)
                }
                None => left,
            },
        };
        self.num_nodes -= 1;
        Ok(node.element)
    }

    /// Asserts that the elements are strictly ascending and the node count is right.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let mut num_nodes = 0;
        let mut stack: Vec<&Node<E>> = self.root.iter().map(|root| &**root).collect();
        while let Some(node) = stack.pop() {
            if let Some(left) = &node.left {
                assert!(left.element < node.element);
                stack.push(left);
            }
            if let Some(right) = &node.right {
                assert!(right.element > node.element);
                stack.push(right);
            }
            num_nodes += 1;
        }
        assert_eq!(num_nodes, self.num_nodes);

        let mut previous: Option<&E> = None;
        for element in self.iter() {
            if let Some(previous) = previous {
                assert!(previous < element);
            }
            previous = Some(element);
        }
    }
}

impl<E> BsTree<E> {
    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the element at the root of the tree.
    pub fn root(&self) -> Option<&E> {
        self.root.as_ref().map(|root| &root.element)
    }

    /// Returns the number of levels of the tree, zero for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<&Node<E>> = self.root.iter().map(|root| &**root).collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left.iter().chain(node.right.iter()))
                .map(|child| &**child)
                .collect();
        }
        height
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!(nodes = self.num_nodes, "clearing binary search tree");
        }
        // Detach children before dropping a node, degenerate trees can be very deep
        let mut stack: Vec<Box<Node<E>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.num_nodes = 0;
    }

    /// Gets an iterator over the elements of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, E> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.num_nodes,
        };
        iter.push_left(&self.root);
        iter
    }

    /// Copies the elements of the tree, in ascending order, into a new sequence.
    pub fn elements<S>(&self) -> S
    where
        E: Clone,
        S: Sequence<E>,
    {
        let mut elements = S::default();
        for element in self.iter() {
            elements.append(element.clone());
        }
        elements
    }

    /// Prints the elements of the tree in ascending order to stdout.
    pub fn print(&self)
    where
        E: fmt::Display,
    {
        println!("{self}");
    }
}

/// Detaches the smallest node of the subtree, splicing its right child into its place.
fn unlink_leftmost<E>(mut link: &mut Link<E>) -> Link<E> {
    while link.as_ref().is_some_and(|node| node.left.is_some()) {
        if let Some(node) = link {
            link = &mut node.left;
        }
    }
    let mut node = link.take()?;
    *link = node.right.take();
    Some(node)
}

impl<E> Drop for BsTree<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E: Ord> Default for BsTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord> FromIterator<E> for BsTree<E> {
    /// Builds a tree from the given elements, skipping duplicates.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::new();
        for element in iter {
            let _ = tree.insert(element);
        }
        tree
    }
}

impl<E: fmt::Debug> fmt::Debug for BsTree<E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for BsTree<E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "[")?;
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                write!(fmt, ", ")?;
            }
            write!(fmt, "{element}")?;
        }
        write!(fmt, "]")
    }
}

impl<'a, E> IntoIterator for &'a BsTree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, E> Iter<'a, E> {
    fn push_left(&mut self, mut link: &'a Link<E>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}
