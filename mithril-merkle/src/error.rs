//! Crate specific errors

/// Error types related to merkle trees.
///
/// A failed proof verification is not an error: verification always answers
/// with a boolean.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerkleTreeError {
    /// The input given to build a tree, or to decode a proof or a hash, is not acceptable
    #[error("Invalid merkle tree input: {0}")]
    InvalidInput(String),

    /// The requested leaf is not committed in the tree
    #[error("Leaf not found in the merkle tree: {0}")]
    NotFound(String),
}
