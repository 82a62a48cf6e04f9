//! Sequences that receive the elements of a tree in sorted order.

use std::collections::{LinkedList, VecDeque};

/// A growable sequence that keeps elements in the order they were appended.
///
/// Trees export their contents through this trait, so any of the standard
/// sequence types can be used as the target:
///
/// ```
/// use ordered_trees::AvlTree;
/// use std::collections::VecDeque;
///
/// let tree: AvlTree<i32> = [3, 1, 2].into_iter().collect();
/// let elements: VecDeque<i32> = tree.elements();
/// assert_eq!(elements, [1, 2, 3]);
/// ```
pub trait Sequence<T>: Default + IntoIterator<Item = T> {
    /// Appends an element at the end of the sequence.
    fn append(&mut self, item: T);

    /// Returns the number of elements in the sequence.
    fn len(&self) -> usize;

    /// Returns true if the sequence contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Sequence<T> for Vec<T> {
    fn append(&mut self, item: T) {
        self.push(item);
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

impl<T> Sequence<T> for VecDeque<T> {
    fn append(&mut self, item: T) {
        self.push_back(item);
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> Sequence<T> for LinkedList<T> {
    fn append(&mut self, item: T) {
        self.push_back(item);
    }

    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}
