use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// A key with its associated value, ordered and compared by key only.
///
/// Pairs are the elements the dictionaries store in their trees. Since a pair
/// borrows as its key, trees holding pairs can be searched with a bare key.
///
/// ```
/// use ordered_trees::KeyValuePair;
/// let lhs = KeyValuePair::new(1, "one");
/// let rhs = KeyValuePair::new(1, "uno");
/// assert_eq!(lhs, rhs);
/// assert!(KeyValuePair::new(0, "zero") < lhs);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValuePair<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// Splits the pair into key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: PartialEq, V> PartialEq for KeyValuePair<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K: Eq, V> Eq for KeyValuePair<K, V> {}

impl<K: Ord, V> PartialOrd for KeyValuePair<K, V> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, V> Ord for KeyValuePair<K, V> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> Borrow<K> for KeyValuePair<K, V> {
    fn borrow(&self) -> &K {
        &self.key
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for KeyValuePair<K, V> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", self.key, self.value)
    }
}
