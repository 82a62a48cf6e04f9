//! Error kinds reported by the trees and the dictionaries built on them.

use thiserror::Error;

/// Error returned by tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TreeError {
    /// An element equal to the inserted one is already in the tree.
    #[error("duplicated element")]
    DuplicateElement,
    /// No element equal to the given one is in the tree.
    #[error("element not found")]
    ElementNotFound,
}

/// Error returned by dictionary operations.
///
/// Each variant is the tree condition of the same name, relabeled for keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DictionaryError {
    /// The key is already mapped to a value.
    #[error("duplicated key")]
    DuplicateKey,
    /// The key is not in the dictionary.
    #[error("key not found")]
    KeyNotFound,
}

impl From<TreeError> for DictionaryError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::DuplicateElement => DictionaryError::DuplicateKey,
            TreeError::ElementNotFound => DictionaryError::KeyNotFound,
        }
    }
}
