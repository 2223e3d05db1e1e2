#![doc = include_str!("../README.md")]
//! Top-level API of Mithril binary Merkle trees.
//!
//! What follows shows how a party holding all the items commits them into a
//! tree, and how another party holding only the root checks that an item was
//! committed.
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use blake2::{Blake2b, digest::consts::U32};
//!
//! use mithril_merkle::{MerkleProof, MerkleTree, MerkleTreeCommitment};
//!
//! type D = Blake2b<U32>; // Setting the hash function for convenience
//!
//! //////////////////
//! // prover side //
//! //////////////////
//!
//! let items = ["a", "b", "c", "d"];
//! let tree = MerkleTree::<D>::from_items(&items)?;
//! let proof = tree.compute_proof(3)?;
//!
//! // Only the root and the proof bytes are sent to the verifier
//! let root_bytes = tree.to_commitment().to_bytes();
//! let proof_bytes = proof.to_bytes();
//!
//! ////////////////////
//! // verifier side //
//! ////////////////////
//!
//! let commitment = MerkleTreeCommitment::<D>::from_bytes(&root_bytes)?;
//! let proof = MerkleProof::<D>::from_bytes(&proof_bytes)?;
//!
//! assert!(commitment.verify_item_membership("d", &proof));
//! assert!(!commitment.verify_item_membership("e", &proof));
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod merkle_tree;

pub use builder::MerkleTreeBuilder;
pub use error::MerkleTreeError;
pub use merkle_tree::{
    EmptyTreePolicy, MerkleHash, MerkleProof, MerkleProofStep, MerkleTree, MerkleTreeCommitment,
    MerkleTreeConfig, MerkleTreeLeaf, MerkleTreeNode, Side, build_leaves, compute_leaf,
    verify_inclusion,
};

/// Mithril-merkle result type
pub type MerkleResult<T> = Result<T, MerkleTreeError>;
