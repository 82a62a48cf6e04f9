//! Key/value dictionaries backed by the search trees of this crate.

mod pair;

pub use pair::KeyValuePair;

use std::borrow::Borrow;
use std::fmt;

use tracing::debug;

use crate::avl::AvlTree;
use crate::bst::BsTree;
use crate::error::{DictionaryError, TreeError};
use crate::sequence::Sequence;
use crate::splay::SplayTree;

/// A mapping from unique keys to values.
///
/// ```
/// use ordered_trees::{AvlDictionary, Dictionary, DictionaryError};
/// let mut names: Box<dyn Dictionary<i32, &str>> = Box::new(AvlDictionary::<i32, &str>::new());
/// names.insert(9, "Elix").unwrap();
/// names.insert(17, "Monsalve").unwrap();
/// assert_eq!(names.get_value(&17), Ok(&"Monsalve"));
/// assert_eq!(names.get_value(&100), Err(DictionaryError::KeyNotFound));
/// names.set_value(17, "JC Monsalve").unwrap();
/// assert_eq!(names.values(), vec!["Elix", "JC Monsalve"]);
/// ```
pub trait Dictionary<K, V> {
    /// Maps the key to the value.
    /// Fails if the key is already present.
    fn insert(&mut self, key: K, value: V) -> Result<(), DictionaryError>;

    /// Removes the key and returns the value it was mapped to.
    fn remove(&mut self, key: &K) -> Result<V, DictionaryError>;

    /// Returns the value the key is mapped to.
    fn get_value<'a>(&'a mut self, key: &K) -> Result<&'a V, DictionaryError>
    where
        K: 'a;

    /// Replaces the value of a present key by removing the old pair and
    /// inserting the new one. A missing key fails on removal and nothing is inserted.
    fn set_value(&mut self, key: K, value: V) -> Result<(), DictionaryError>;

    /// Returns true if the key is present.
    fn contains(&mut self, key: &K) -> bool;

    /// Returns all keys in ascending order.
    fn keys(&self) -> Vec<K>
    where
        K: Clone;

    /// Returns all values in ascending order of their keys.
    fn values(&self) -> Vec<V>
    where
        V: Clone;

    /// Returns the number of keys.
    fn len(&self) -> usize;

    /// Returns true if the dictionary is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all keys.
    fn clear(&mut self);

    /// Prints all pairs in ascending key order to stdout.
    fn print(&self)
    where
        K: fmt::Display,
        V: fmt::Display;
}

/// The operations a tree offers to a [`TreeDictionary`].
///
/// Lookups take `&mut self`, as some trees restructure themselves on every access.
pub trait SearchTree<E: Ord> {
    /// Inserts an element, failing if an equal one is already present.
    fn insert(&mut self, element: E) -> Result<(), TreeError>;

    /// Removes the element equal to the given value and returns it.
    fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Returns the element equal to the given value.
    fn find<Q>(&mut self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Returns true if an element equal to the given value is present.
    fn contains<Q>(&mut self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized;

    /// Visits all elements in ascending order without restructuring the tree.
    fn for_each<F: FnMut(&E)>(&self, f: F);

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns true if the tree holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all elements.
    fn clear(&mut self);
}

impl<E: Ord> SearchTree<E> for AvlTree<E> {
    fn insert(&mut self, element: E) -> Result<(), TreeError> {
        AvlTree::insert(self, element)
    }

    fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        AvlTree::remove(self, value)
    }

    fn find<Q>(&mut self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        AvlTree::find(self, value)
    }

    fn contains<Q>(&mut self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        AvlTree::contains(self, value)
    }

    fn for_each<F: FnMut(&E)>(&self, f: F) {
        self.iter().for_each(f);
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn clear(&mut self) {
        AvlTree::clear(self);
    }
}

impl<E: Ord> SearchTree<E> for SplayTree<E> {
    fn insert(&mut self, element: E) -> Result<(), TreeError> {
        SplayTree::insert(self, element)
    }

    fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        SplayTree::remove(self, value)
    }

    fn find<Q>(&mut self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        SplayTree::find(self, value)
    }

    fn contains<Q>(&mut self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        SplayTree::contains(self, value)
    }

    fn for_each<F: FnMut(&E)>(&self, f: F) {
        self.iter().for_each(f);
    }

    fn len(&self) -> usize {
        SplayTree::len(self)
    }

    fn clear(&mut self) {
        SplayTree::clear(self);
    }
}

impl<E: Ord> SearchTree<E> for BsTree<E> {
    fn insert(&mut self, element: E) -> Result<(), TreeError> {
        BsTree::insert(self, element)
    }

    fn remove<Q>(&mut self, value: &Q) -> Result<E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        BsTree::remove(self, value)
    }

    fn find<Q>(&mut self, value: &Q) -> Result<&E, TreeError>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        BsTree::find(self, value)
    }

    fn contains<Q>(&mut self, value: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        BsTree::contains(self, value)
    }

    fn for_each<F: FnMut(&E)>(&self, f: F) {
        self.iter().for_each(f);
    }

    fn len(&self) -> usize {
        BsTree::len(self)
    }

    fn clear(&mut self) {
        BsTree::clear(self);
    }
}

/// A dictionary storing its key/value pairs in a search tree.
pub struct TreeDictionary<T> {
    pairs: T,
}

/// A dictionary backed by an AVL tree.
pub type AvlDictionary<K, V> = TreeDictionary<AvlTree<KeyValuePair<K, V>>>;

/// A dictionary backed by an unbalanced binary search tree.
///
/// Keys inserted in ascending order degrade it to a linked list.
pub type BstDictionary<K, V> = TreeDictionary<BsTree<KeyValuePair<K, V>>>;

/// A dictionary backed by a splay tree.
///
/// Looking up a key moves it to the root of the tree,
/// so repeated lookups of the same keys get cheaper.
///
/// ```
/// use ordered_trees::{Dictionary, SplayDictionary};
/// let mut names = SplayDictionary::<i32, &str>::new();
/// names.insert(9, "Elix").unwrap();
/// names.insert(17, "Monsalve").unwrap();
/// names.insert(27, "JuanPa").unwrap();
/// assert_eq!(names.get_value(&17), Ok(&"Monsalve"));
/// assert_eq!(names.as_tree().root().map(|pair| pair.key), Some(17));
/// ```
pub type SplayDictionary<K, V> = TreeDictionary<SplayTree<KeyValuePair<K, V>>>;

impl<T: Default> TreeDictionary<T> {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self {
            pairs: T::default(),
        }
    }
}

impl<T> TreeDictionary<T> {
    /// Returns the underlying tree of pairs.
    pub fn as_tree(&self) -> &T {
        &self.pairs
    }

    /// Copies all keys, in ascending order, into a new sequence.
    pub fn keys_into<K, V, S>(&self) -> S
    where
        T: SearchTree<KeyValuePair<K, V>>,
        K: Ord + Clone,
        S: Sequence<K>,
    {
        let mut keys = S::default();
        self.pairs.for_each(|pair| keys.append(pair.key.clone()));
        keys
    }

    /// Copies all values, in ascending order of their keys, into a new sequence.
    pub fn values_into<K, V, S>(&self) -> S
    where
        T: SearchTree<KeyValuePair<K, V>>,
        K: Ord,
        V: Clone,
        S: Sequence<V>,
    {
        let mut values = S::default();
        self.pairs.for_each(|pair| values.append(pair.value.clone()));
        values
    }
}

impl<K, V, T> Dictionary<K, V> for TreeDictionary<T>
where
    K: Ord,
    T: SearchTree<KeyValuePair<K, V>>,
{
    fn insert(&mut self, key: K, value: V) -> Result<(), DictionaryError> {
        self.pairs
            .insert(KeyValuePair::new(key, value))
            .map_err(|err| {
                debug!(%err, "dictionary insert rejected");
                err.into()
            })
    }

    fn remove(&mut self, key: &K) -> Result<V, DictionaryError> {
        let pair = self.pairs.remove(key)?;
        Ok(pair.value)
    }

    fn get_value<'a>(&'a mut self, key: &K) -> Result<&'a V, DictionaryError>
    where
        K: 'a,
    {
        let pair = self.pairs.find(key)?;
        Ok(&pair.value)
    }

    fn set_value(&mut self, key: K, value: V) -> Result<(), DictionaryError> {
        self.pairs.remove(&key)?;
        self.pairs.insert(KeyValuePair::new(key, value))?;
        Ok(())
    }

    fn contains(&mut self, key: &K) -> bool {
        self.pairs.contains(key)
    }

    fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.keys_into::<K, V, Vec<K>>()
    }

    fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values_into::<K, V, Vec<V>>()
    }

    fn len(&self) -> usize {
        self.pairs.len()
    }

    fn clear(&mut self) {
        self.pairs.clear();
    }

    fn print(&self)
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        let mut pairs = Vec::with_capacity(self.pairs.len());
        self.pairs.for_each(|pair| pairs.push(pair.to_string()));
        println!("[{}]", pairs.join(", "));
    }
}

impl<T: Default> Default for TreeDictionary<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeDictionary<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.pairs, fmt)
    }
}

impl<T: fmt::Display> fmt::Display for TreeDictionary<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.pairs, fmt)
    }
}
