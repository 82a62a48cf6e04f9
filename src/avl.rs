//! An ordered set implemented with an AVL tree.

use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

use tracing::{debug, trace};

use crate::error::TreeError;
use crate::sequence::Sequence;

/// An ordered set implemented with an AVL tree.
///
/// Every node keeps the height of its subtree, and the heights of the two
/// subtrees of any node differ by at most one. Duplicate elements are rejected.
///
/// ```
/// use ordered_trees::{AvlTree, TreeError};
/// let mut tree = AvlTree::new();
/// tree.insert(1).unwrap();
/// tree.insert(2).unwrap();
/// tree.insert(3).unwrap();
/// assert_eq!(tree.insert(2), Err(TreeError::DuplicateElement));
/// assert_eq!(tree.height(), 2);
/// assert_eq!(tree.remove(&2), Ok(2));
/// assert_eq!(tree.find(&2), Err(TreeError::ElementNotFound));
/// ```
pub struct AvlTree<E> {
    root: Link<E>,
    num_nodes: usize,
    num_rotations: usize,
    marker: PhantomData<Box<Node<E>>>,
}

struct Node<E> {
    element: E,
    left: Link<E>,
    right: Link<E>,
    parent: Link<E>,
    height: usize,
}

type NodePtr<E> = NonNull<Node<E>>;
type Link<E> = Option<NodePtr<E>>;
type LinkPtr<E> = NonNull<Link<E>>;

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

/// An iterator over the elements of an AVL tree in ascending order.
pub struct Iter<'a, E> {
    next: Link<E>,
    remaining: usize,
    marker: PhantomData<&'a Node<E>>,
}

impl<E: Ord> AvlTree<E> {
    /// Creates an empty tree.
    /// No memory is allocated until the first element is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
            num_rotations: 0,
            marker: PhantomData,
        }
    }

    /// Returns a reference to the element in the tree that is equal to the given value.
    ///
    /// The value may be any borrowed form of the element type, but the ordering
    /// on the borrowed form *must* match the ordering on the element type.
    pub fn find<Q>(&self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value)
            .map(|node_ptr| &unsafe { &*node_ptr.as_ptr() }.element)
            .ok_or(TreeError::ElementNotFound)
    }

    /// Returns true if the tree contains an element equal to the given value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).is_some()
    }

    /// Inserts an element into the tree.
    /// Fails if an equal element is already present, leaving the tree untouched.
    pub fn insert(&mut self, element: E) -> Result<(), TreeError> {
        let (parent, mut link_ptr) = self
            .find_insert_pos(&element)
            .ok_or(TreeError::DuplicateElement)?;
        unsafe {
            *link_ptr.as_mut() = Some(Node::create(parent, element));
        }
        self.num_nodes += 1;
        self.rebalance_once(parent);
        Ok(())
    }

    /// Removes the element equal to the given value from the tree and returns it.
    pub fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_ptr = self.find_node(value).ok_or(TreeError::ElementNotFound)?;
        debug_assert!(self.num_nodes >= 1);
        let unlinked_ptr = self.unlink_node(node_ptr);
        self.num_nodes -= 1;
        Ok(unsafe { Node::destroy(unlinked_ptr) })
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check root link
            if let Some(root_node_ptr) = self.root {
                assert!(root_node_ptr.as_ref().parent.is_none());
            }

            // Check tree nodes
            let mut num_nodes = 0;
            self.preorder(|node_ptr| {
                let mut left_height = 0;
                let mut right_height = 0;

                // Check link for left child node
                if let Some(left_ptr) = node_ptr.as_ref().left {
                    assert!(left_ptr.as_ref().parent == Some(node_ptr));
                    assert!(left_ptr.as_ref().element < node_ptr.as_ref().element);
                    left_height = left_ptr.as_ref().height;
                }

                // Check link for right child node
                if let Some(right_ptr) = node_ptr.as_ref().right {
                    assert!(right_ptr.as_ref().parent == Some(node_ptr));
                    assert!(right_ptr.as_ref().element > node_ptr.as_ref().element);
                    right_height = right_ptr.as_ref().height;
                }

                // Check height
                assert_eq!(
                    node_ptr.as_ref().height,
                    1 + cmp::max(left_height, right_height)
                );

                // Check AVL condition (nearly balance)
                assert!(left_height <= right_height + 1);
                assert!(right_height <= left_height + 1);

                num_nodes += 1;
            });

            // Check number of nodes
            assert_eq!(num_nodes, self.num_nodes);
        }
    }

    fn find_node<Q>(&self, value: &Q) -> Link<E>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(node_ptr) = current {
            current = unsafe {
                match value.cmp(node_ptr.as_ref().element.borrow()) {
                    Ordering::Equal => break,
                    Ordering::Less => node_ptr.as_ref().left,
                    Ordering::Greater => node_ptr.as_ref().right,
                }
            }
        }
        current
    }

    fn find_insert_pos(&mut self, element: &E) -> Option<(Link<E>, LinkPtr<E>)> {
        let mut parent: Link<E> = None;
        let mut link_ptr: LinkPtr<E> = unsafe { LinkPtr::new_unchecked(&mut self.root) };
        unsafe {
            while let Some(mut node_ptr) = *link_ptr.as_ref() {
                parent = Some(node_ptr);
                match element.cmp(&node_ptr.as_ref().element) {
                    Ordering::Equal => return None,
                    Ordering::Less => {
                        link_ptr = LinkPtr::new_unchecked(&mut node_ptr.as_mut().left);
                    }
                    Ordering::Greater => {
                        link_ptr = LinkPtr::new_unchecked(&mut node_ptr.as_mut().right);
                    }
                }
            }
        }
        Some((parent, link_ptr))
    }

    /// Detaches the node holding the element of `node_ptr` and returns it.
    /// A node with two children trades elements with its in-order successor first,
    /// so the detached node never has more than one child.
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

            // Node to-unlink is stem or leaf, splice its child into the parent slot
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

            // Parent node might be out of balance now
            self.rebalance(parent);
            unlink_ptr
        }
    }

    fn left_height(node_ptr: NodePtr<E>) -> usize {
        unsafe { height(node_ptr.as_ref().left) }
    }

    fn right_height(node_ptr: NodePtr<E>) -> usize {
        unsafe { height(node_ptr.as_ref().right) }
    }

    fn adjust_height(mut node_ptr: NodePtr<E>) {
        unsafe {
            node_ptr.as_mut().height =
                1 + cmp::max(Self::left_height(node_ptr), Self::right_height(node_ptr));
        }
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<E>) {
        unsafe {
            let Some(mut right_ptr) = node_ptr.as_ref().right else {
                panic!("cannot rotate left without a right child");
            };
            node_ptr.as_mut().right = right_ptr.as_ref().left;
            if let Some(mut right_left_ptr) = right_ptr.as_mut().left {
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

            Self::adjust_height(node_ptr);
            Self::adjust_height(right_ptr);
        }
        self.num_rotations += 1;
        trace!(rotations = self.num_rotations, "avl rotate left");
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

            Self::adjust_height(node_ptr);
            Self::adjust_height(left_ptr);
        }
        self.num_rotations += 1;
        trace!(rotations = self.num_rotations, "avl rotate right");
    }

    /// Rebalances nodes starting from given position up to the root node.
    fn rebalance(&mut self, start_from: Link<E>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let parent = unsafe { node_ptr.as_ref().parent };
            self.rebalance_node(node_ptr);
            current = parent;
        }
    }

    /// Rebalances nodes starting from given position up to the root node.
    /// Stops after first rebalance operation.
    /// This is enough to restore balance after a single insert operation.
    fn rebalance_once(&mut self, start_from: Link<E>) {
        let mut current = start_from;
        while let Some(node_ptr) = current {
            let parent = unsafe { node_ptr.as_ref().parent };
            let did_rebalance = self.rebalance_node(node_ptr);
            if did_rebalance {
                break;
            }
            current = parent;
        }
    }

    /// Restores AVL condition (balance) at given node if necessary and adjusts height.
    /// A left-heavy or balanced left child gets a single right rotation,
    /// a right-heavy left child a left-right double rotation (and vice versa).
    /// Returns whether rebalancing had been necessary.
    fn rebalance_node(&mut self, node_ptr: NodePtr<E>) -> bool {
        let left_height = Self::left_height(node_ptr);
        let right_height = Self::right_height(node_ptr);
        debug_assert!(left_height <= right_height + 2);
        debug_assert!(right_height <= left_height + 2);
        if left_height > right_height + 1 {
            // Rebalance right
            if let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
                if Self::right_height(left_ptr) > Self::left_height(left_ptr) {
                    self.rotate_left(left_ptr);
                }
            }
            self.rotate_right(node_ptr);
            true
        } else if right_height > left_height + 1 {
            // Rebalance left
            if let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
                if Self::left_height(right_ptr) > Self::right_height(right_ptr) {
                    self.rotate_right(right_ptr);
                }
            }
            self.rotate_left(node_ptr);
            true
        } else {
            Self::adjust_height(node_ptr);
            false
        }
    }
}

impl<E> AvlTree<E> {
    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of levels of the tree, zero for an empty tree.
    pub fn height(&self) -> usize {
        height(self.root)
    }

    /// Returns the element at the root of the tree.
    pub fn root(&self) -> Option<&E> {
        self.root
            .map(|root_ptr| &unsafe { &*root_ptr.as_ptr() }.element)
    }

    /// Returns the number of single rotations performed since the tree was created.
    /// A double rotation counts as two.
    pub fn rotation_count(&self) -> usize {
        self.num_rotations
    }

    /// Returns the number of nodes without children.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        self.preorder(|node_ptr| unsafe {
            if node_ptr.as_ref().left.is_none() && node_ptr.as_ref().right.is_none() {
                leaves += 1;
            }
        });
        leaves
    }

    /// Returns the number of nodes with at least one child.
    pub fn internal_node_count(&self) -> usize {
        self.num_nodes - self.leaf_count()
    }

    /// Returns the number of nodes on each level, starting with the root level.
    pub fn nodes_per_level<S: Sequence<usize>>(&self) -> S {
        let mut levels = S::default();
        let mut queue: VecDeque<NodePtr<E>> = self.root.into_iter().collect();
        while !queue.is_empty() {
            let level_size = queue.len();
            levels.append(level_size);
            for _ in 0..level_size {
                if let Some(node_ptr) = queue.pop_front() {
                    unsafe {
                        queue.extend(node_ptr.as_ref().left);
                        queue.extend(node_ptr.as_ref().right);
                    }
                }
            }
        }
        levels
    }

    /// Clears the tree, deallocating all memory.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!(nodes = self.num_nodes, "clearing avl tree");
        }
        self.postorder(|node_ptr| unsafe {
            Node::destroy(node_ptr);
        });
        self.root = None;
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

    fn preorder<F: FnMut(NodePtr<E>)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<E>)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<E>),
        In: FnMut(NodePtr<E>),
        Post: FnMut(NodePtr<E>),
    {
        if let Some(mut node_ptr) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_ptr);
                        if let Some(left_ptr) = unsafe { node_ptr.as_ref().left } {
                            node_ptr = left_ptr;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(node_ptr);
                        if let Some(right_ptr) = unsafe { node_ptr.as_ref().right } {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        // Post order traversal is used for node deletion,
                        // so make sure not to use node pointer after postorder call.
                        if let Some(parent_ptr) = unsafe { node_ptr.as_ref().parent } {
                            if Some(node_ptr) == unsafe { parent_ptr.as_ref().left } {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        } else {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<E> Drop for AvlTree<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<E: Ord> Default for AvlTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Ord> FromIterator<E> for AvlTree<E> {
    /// Builds a tree from the given elements, skipping duplicates.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = Self::new();
        for element in iter {
            let _ = tree.insert(element);
        }
        tree
    }
}

impl<E: fmt::Debug> fmt::Debug for AvlTree<E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_set().entries(self.iter()).finish()
    }
}

impl<E: fmt::Display> fmt::Display for AvlTree<E> {
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

impl<'a, E> IntoIterator for &'a AvlTree<E> {
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
            height: 1,
        });
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    unsafe fn destroy(node_ptr: NodePtr<E>) -> E {
        let boxed = Box::from_raw(node_ptr.as_ptr());
        boxed.element
    }
}

fn height<E>(link: Link<E>) -> usize {
    match link {
        None => 0,
        Some(node_ptr) => unsafe { node_ptr.as_ref().height },
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
