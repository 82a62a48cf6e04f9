//! Ordered sets implemented with an AVL tree, a splay tree and a plain
//! binary search tree, and key/value dictionaries built on top of them.
//!
//! All trees reject duplicate elements and report missing ones through
//! [`TreeError`]. The splay tree moves the last node touched by an insert,
//! lookup or removal to its root, even when the operation fails.
//!
//! ```
//! use ordered_trees::{AvlDictionary, Dictionary, SplayDictionary};
//!
//! let mut avl = AvlDictionary::<i32, &str>::new();
//! let mut splay = SplayDictionary::<i32, &str>::new();
//! for (key, name) in [(22, "Adrian"), (8, "Sel"), (17, "Monsalve")] {
//!     avl.insert(key, name).unwrap();
//!     splay.insert(key, name).unwrap();
//! }
//! assert_eq!(avl.keys(), vec![8, 17, 22]);
//! assert_eq!(splay.keys(), avl.keys());
//! ```

pub mod avl;
pub mod bst;
pub mod dictionary;
pub mod error;
pub mod sequence;
pub mod splay;

pub use avl::AvlTree;
pub use bst::BsTree;
pub use dictionary::{
    AvlDictionary, BstDictionary, Dictionary, KeyValuePair, SearchTree, SplayDictionary,
    TreeDictionary,
};
pub use error::{DictionaryError, TreeError};
pub use sequence::Sequence;
pub use splay::SplayTree;
