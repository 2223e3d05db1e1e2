//! Creation of Merkle trees, computation and verification of inclusion proofs
mod commitment;
mod config;
mod hash;
mod leaf;
mod proof;
mod tree;

pub use commitment::MerkleTreeCommitment;
pub use config::{EmptyTreePolicy, MerkleTreeConfig};
pub use hash::MerkleHash;
pub use leaf::{MerkleTreeLeaf, build_leaves, compute_leaf};
pub use proof::{MerkleProof, MerkleProofStep, Side, verify_inclusion};
pub use tree::{MerkleTree, MerkleTreeNode};

///////////////////
// Level Helpers //
///////////////////

/// Position of the parent in the level above.
fn parent(position: usize) -> usize {
    position / 2
}

/// Positions of the left and right children in the level below, which holds `lower_level_len` nodes.
/// A left child without partner is its own right child.
fn children(position: usize, lower_level_len: usize) -> (usize, usize) {
    let left = 2 * position;
    let right = if left + 1 < lower_level_len { left + 1 } else { left };

    (left, right)
}

/// Position of the sibling in a level of `level_len` nodes, and its side in the pairing.
/// The last node of a level of odd length is its own (right) sibling.
fn sibling(position: usize, level_len: usize) -> (usize, Side) {
    if position % 2 == 1 {
        (position - 1, Side::Left)
    } else if position + 1 < level_len {
        (position + 1, Side::Right)
    } else {
        (position, Side::Right)
    }
}
