//! An ordered set implemented with a splay tree.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::sequence::Sequence;

/// An ordered set implemented with a splay tree.
///
/// The tree keeps no balance information. Instead, every insert, lookup and
/// removal moves the last node it touched to the root, so recently used
/// elements are cheap to reach again. This happens on failure as well:
/// a lookup of a missing element still splays the last node it visited.
///
/// ```
/// use ordered_trees::{SplayTree, TreeError};
/// let mut tree = SplayTree::new();
/// for value in [9, 17, 27] {
///     tree.insert(value).unwrap();
/// }
/// assert_eq!(tree.root(), Some(&27));
/// assert_eq!(tree.find(&17), Ok(&17));
/// assert_eq!(tree.root(), Some(&17));
/// assert_eq!(tree.find(&10), Err(TreeError::ElementNotFound));
/// assert_eq!(tree.root(), Some(&9));
/// ```
pub struct SplayTree<E> {
    root: Link<E>,
    last: Link<E>,
    num_nodes: usize,
    marker: PhantomData<Box<Node<E>>>,
}

struct Node<E> {
    element: E,
    left: Link<E>,
    right: Link<E>,
    parent: Link<E>,
}

type NodePtr<E> = NonNull<Node<E>>;
type Link<E> = Option<NodePtr<E>>;
type LinkPtr<E> = NonNull<Link<E>>;

/// An iterator over the elements of a splay tree in ascending order.
///
/// Iterating does not splay.
pub struct Iter<'a, E> {
    next: Link<E>,
    remaining: usize,
    marker: PhantomData<&'a Node<E>>,
}

impl<E: Ord> SplayTree<E> {
    /// Creates an empty tree.
    /// No memory is allocated until the first element is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            last: None,
            num_nodes: 0,
            marker: PhantomData,
        }
    }

    /// Inserts an element into the tree and splays it to the root.
    ///
    /// If an equal element is already present, that element is splayed to the
    /// root instead and the insertion fails.
    pub fn insert(&mut self, element: E) -> Result<(), TreeError> {
        let result = match self.find_insert_pos(&element) {
            Err(existing_ptr) => {
                self.last = Some(existing_ptr);
                Err(TreeError::DuplicateElement)
            }
            Ok((parent, mut link_ptr)) => {
                let node_ptr = Node::create(parent, element);
                unsafe {
                    *link_ptr.as_mut() = Some(node_ptr);
                }
                self.num_nodes += 1;
                self.last = Some(node_ptr);
                Ok(())
            }
        };
        self.splay();
        result
    }

    /// Returns a reference to the element equal to the given value.
    ///
    /// The found element is splayed to the root. If there is none, the last
    /// node visited by the search is splayed instead.
    pub fn find<Q>(&mut self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let found = self.search(value);
        self.splay();
        found
            .map(|node_ptr| &unsafe { &*node_ptr.as_ptr() }.element)
            .ok_or(TreeError::ElementNotFound)
    }

    /// Returns a mutable reference to the element equal to the given value.
    ///
    /// Splays like [`find`](Self::find). The element must not be changed in
    /// a way that alters its ordering relative to the other elements.
    pub fn find_mut<Q>(&mut self, value: &Q) -> Result<&mut E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let found = self.search(value);
        self.splay();
        found
            .map(|node_ptr| &mut unsafe { &mut *node_ptr.as_ptr() }.element)
            .ok_or(TreeError::ElementNotFound)
    }

    /// Returns true if the tree contains an element equal to the given value.
    /// Splays like [`find`](Self::find).
    pub fn contains<Q>(&mut self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let found = self.search(value);
        self.splay();
        found.is_some()
    }

    /// Removes the element equal to the given value from the tree and returns it.
    ///
    /// Afterwards the parent of the unlinked node is splayed to the root.
    /// If there is no such element, the last node visited is splayed instead.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(node_ptr) = self.search(value) else {
            self.splay();
            return Err(TreeError::ElementNotFound);
        };
        let unlinked_ptr = self.unlink_node(node_ptr);
        self.num_nodes -= 1;
        let element = unsafe { Node::destroy(unlinked_ptr) };
        self.splay();
        Ok(element)
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_node_ptr) = self.root {
                assert!(root_node_ptr.as_ref().parent.is_none());
            }

            // Last touched node is either gone or has been splayed to the root
            assert!(self.last.is_none() || self.last == self.root);

            // Check tree nodes
            let mut num_nodes = 0;
            let mut stack: Vec<NodePtr<E>> = self.root.into_iter().collect();
            while let Some(node_ptr) = stack.pop() {
                if let Some(left_ptr) = node_ptr.as_ref().left {
                    assert!(left_ptr.as_ref().parent == Some(node_ptr));
                    assert!(left_ptr.as_ref().element < node_ptr.as_ref().element);
                    stack.push(left_ptr);
                }
                if let Some(right_ptr) = node_ptr.as_ref().right {
                    assert!(right_ptr.as_ref().parent == Some(node_ptr));
                    assert!(right_ptr.as_ref().element > node_ptr.as_ref().element);
                    stack.push(right_ptr);
                }
                num_nodes += 1;
            }

            // Check number of nodes
            assert_eq!(num_nodes, self.num_nodes);
        }
    }

    /// Descends towards the given value, recording every visited node as last.
    fn search<Q>(&mut self, value: &Q) -> Link<E>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.last = None;
        let mut current = self.root;
        while let Some(node_ptr) = current {
            self.last = Some(node_ptr);
            current = unsafe {
                match value.cmp(node_ptr.as_ref().element.borrow()) {
                    Ordering::Equal => return Some(node_ptr),
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        None
    }

    /// Finds the empty link where the element belongs,
    /// or the node holding an equal element.
    fn find_insert_pos(&mut self, element: &E) -> Result<(Link<E>, LinkPtr<E>), NodePtr<E>> {
        let mut parent: Link<E> = None;
        let mut link_ptr: LinkPtr<E> = unsafe { LinkPtr::new_unchecked(&mut self.root) };
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                parent = Some(node_ptr);
                match element.cmp(&node_ptr.as_ref().element) {
                    Ordering::Equal => return Err(node_ptr),
                    Ordering::Less => {
                        link_ptr = LinkPtr::new_unchecked(&mut node_ptr.as_mut().left);
                    }
                    Ordering::Greater => {
                        link_ptr = LinkPtr::new_unchecked(&mut node_ptr.as_mut().right);
                    }
                }
            }
        }
        Ok((parent, link_ptr))
    }

    /// Detaches the node holding the element of `node_ptr` and returns it.
    /// A node with two children trades elements with its in-order successor,
    /// which is detached in its place. The parent of the detached node becomes last.
    fn unlink_node(&mut self, node_ptr: NodePtr<E>) -> NodePtr<E> {
        unsafe {
            let mut unlink_ptr = node_ptr;
            if let (Some(_), Some(right_ptr)) = (node_ptr.as_ref().left, node_ptr.as_ref().right) {
                let successor_ptr = leftmost(right_ptr);
                mem::swap(
                    &mut (*node_ptr.as_ptr()).element,
                    &mut (*successor_ptr.as_ptr()).element,
                );
                unlink_ptr = successor_ptr;
            }

            let child = unlink_ptr.as_ref().left.or(unlink_ptr.as_ref().right);
            let parent = unlink_ptr.as_ref().parent;
            if let Some(mut child_ptr) = child {
                child_ptr.as_mut().parent = parent;
            }
            match parent {
                None => self.root = child,
                Some(mut parent_ptr) => {
                    if parent_ptr.as_ref().left == Some(unlink_ptr) {
                        parent_ptr.as_mut().left = child;
                    } else {
                        parent_ptr.as_mut().right = child;
                    }
                }
            }
            self.last = parent;
            unlink_ptr
        }
    }

    /// Moves the last touched node to the root by zig, zig-zig and zig-zag steps.
    fn splay(&mut self) {
        let Some(node_ptr) = self.last else {
            return;
        };
        unsafe {
            while let Some(parent_ptr) = node_ptr.as_ref().parent {
                let node_is_left = parent_ptr.as_ref().left == Some(node_ptr);
                match parent_ptr.as_ref().parent {
                    None => {
                        trace!(step = "zig", "splay");
                        if node_is_left {
                            self.rotate_right(parent_ptr);
                        } else {
                            self.rotate_left(parent_ptr);
                        }
                    }
                    Some(grand_ptr) => {
                        let parent_is_left = grand_ptr.as_ref().left == Some(parent_ptr);
                        match (parent_is_left, node_is_left) {
                            (true, true) => {
                                trace!(step = "zig-zig", "splay");
                                self.rotate_right(grand_ptr);
                                self.rotate_right(parent_ptr);
                            }
                            (false, false) => {
                                trace!(step = "zig-zig", "splay");
                                self.rotate_left(grand_ptr);
                                self.rotate_left(parent_ptr);
                            }
                            (true, false) => {
                                trace!(step = "zig-zag", "splay");
                                self.rotate_left(parent_ptr);
                                self.rotate_right(grand_ptr);
                            }
                            (false, true) => {
                                trace!(step = "zig-zag", "splay");
                                self.rotate_right(parent_ptr);
                                self.rotate_left(grand_ptr);
                            }
                        }
                    }
                }
            }
        }
        debug_assert!(self.root == Some(node_ptr));
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<E>) {
        unsafe {
            let Some(mut right_ptr) = node_ptr.as_ref().right else {
                panic!("cannot rotate left without a right child");
            };
            node_ptr.as_mut().right = right_ptr.as_ref().left;
            if let Some(mut right_left_ptr) = right_ptr.as_ref().left {
                right_left_ptr.as_mut().parent = Some(node_ptr);
            }

            right_ptr.as_mut().parent = node_ptr.as_ref().parent;
            match node_ptr.as_ref().parent {
                None => self.root = Some(right_ptr),
                Some(mut parent_ptr) => {
                    if parent_ptr.as_ref().left == Some(node_ptr) {
                        parent_ptr.as_mut().left = Some(right_ptr);
                    } else {
                        parent_ptr.as_mut().right = Some(right_ptr);
                    }
                }
            }

            right_ptr.as_mut().left = Some(node_ptr);
            node_ptr.as_mut().parent = Some(right_ptr);
        }
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<E>) {
        unsafe {
            let Some(mut left_ptr) = node_ptr.as_ref().left else {
                panic!("cannot rotate right without a left child");
            };
            node_ptr.as_mut().left = left_ptr.as_ref().right;
            if let Some(mut left_right_ptr) = left_ptr.as_ref().right {
                left_right_ptr.as_mut().parent = Some(node_ptr);
            }

            left_ptr.as_mut().parent = node_ptr.as_ref().parent;
            match node_ptr.as_ref().parent {
                None => self.root = Some(left_ptr),
                Some(mut parent_ptr) => {
                    if parent_ptr.as_ref().left == Some(node_ptr) {
                        parent_ptr.as_mut().left = Some(left_ptr);
                    } else {
                        parent_ptr.as_mut().right = Some(left_ptr);
                    }
                }
            }

            left_ptr.as_mut().right = Some(node_ptr);
            node_ptr.as_mut().parent = Some(left_ptr);
        }
    }
}

impl<E> SplayTree<E> {
    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the element at the root of the tree.
    /// After any insert, lookup or removal this is the last element touched.
    pub fn root(&self) -> Option<&E> {
        self.root
            .map(|root_ptr| &unsafe { &*root_ptr.as_ptr() }.element)
    }

    /// Returns the number of levels of the tree, zero for an empty tree.
    ///
    /// Computed level by level, as a splay tree may degenerate into a path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut queue: VecDeque<NodePtr<E>> = self.root.into_iter().collect();
        while !queue.is_empty() {
            height += 1;
            for _ in 0..queue.len() {
                if let Some(node_ptr) = queue.pop_front() {
                    unsafe {
                        queue.extend(node_ptr.as_ref().left);
                        queue.extend(node_ptr.as_ref().right);
                    }
                }
            }
        }
        height
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!(nodes = self.num_nodes, "clearing splay tree");
        }
        // Post order deletion: a node is freed once both of its subtrees are gone
        let mut current = self.root;
        while let Some(mut node_ptr) = current {
            unsafe {
                if let Some(left_ptr) = node_ptr.as_ref().left {
                    node_ptr.as_mut().left = None;
                    current = Some(left_ptr);
                } else if let Some(right_ptr) = node_ptr.as_ref().right {
                    node_ptr.as_mut().right = None;
                    current = Some(right_ptr);
                } else {
                    current = node_ptr.as_ref().parent;
                    Node::destroy(node_ptr);
                }
            }
        }
        self.root = None;
        self.last = None;
        self.num_nodes = 0;
    }

    /// Gets an iterator over the elements of the tree in ascending order.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            next: self.root.map(leftmost),
            remaining: self.num_nodes,
            marker: PhantomData,
        }
    }

    /// Copies the elements of the tree, in ascending order, into a new sequence.
    /// Does not splay.
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

impl<E> Drop for SplayTree<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E: Ord> Default for SplayTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord> FromIterator<E> for SplayTree<E> {
    /// Builds a tree from the given elements, skipping duplicates.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::new();
        for element in iter {
            let _ = tree.insert(element);
        }
        tree
    }
}

impl<E: fmt::Debug> fmt::Debug for SplayTree<E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for SplayTree<E> {
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

impl<'a, E> IntoIterator for &'a SplayTree<E> {
    type Item = &'a E;
    type IntoIter = Iter<'a, E>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let node_ptr = self.next?;
        self.next = successor(node_ptr);
        self.remaining -= 1;
        Some(&unsafe { &*node_ptr.as_ptr() }.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> Node<E> {
    fn create(parent: Link<E>, element: E) -> NodePtr<E> {
        let boxed = Box::new(Node {
            element,
            parent,
            left: None,
            right: None,
        });
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    unsafe fn destroy(node_ptr: NodePtr<E>) -> E {
        let boxed = Box::from_raw(node_ptr.as_ptr());
        boxed.element
    }
}

fn leftmost<E>(mut node_ptr: NodePtr<E>) -> NodePtr<E> {
    while let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
        node_ptr = left_ptr;
    }
    node_ptr
}

fn successor<E>(mut node_ptr: NodePtr<E>) -> Link<E> {
    unsafe {
        if let Some(right_ptr) = node_ptr.as_ref().right {
            return Some(leftmost(right_ptr));
        }
        while let Some(parent_ptr) = node_ptr.as_ref().parent {
            if parent_ptr.as_ref().left == Some(node_ptr) {
                return Some(parent_ptr);
            }
            node_ptr = parent_ptr;
        }
        None
    }
}
