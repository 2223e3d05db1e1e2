use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use digest::Digest;
use serde::{Deserialize, Serialize};

use super::{MerkleHash, MerkleProof, MerkleTreeLeaf, compute_leaf};
use crate::{MerkleResult, MerkleTreeError};

/// `MerkleTree` commitment.
/// This structure differs from `MerkleTree` in that it does not contain all elements, which are not always necessary.
/// Instead, it only contains the root of the tree.
#[derive(Serialize, Deserialize)]
pub struct MerkleTreeCommitment<D: Digest> {
    /// Root of the merkle commitment.
    pub root: MerkleHash,
    #[serde(skip)]
    hasher: PhantomData<D>,
}

impl<D: Digest> MerkleTreeCommitment<D> {
    /// Commitment to a claimed root.
    ///
    /// The root is not validated here: a root that does not have the output size of `D`
    /// never verifies any proof.
    pub fn new(root: MerkleHash) -> Self {
        Self {
            root,
            hasher: PhantomData,
        }
    }

    /// Check an inclusion proof that `leaf` is part of the tree by traveling the whole path until the root.
    pub fn verify_leaf_membership(&self, leaf: &MerkleHash, proof: &MerkleProof<D>) -> bool {
        proof.verify(leaf, &self.root)
    }

    /// Same as [verify_leaf_membership][Self::verify_leaf_membership] for an item that
    /// is hashed into its leaf first.
    pub fn verify_item_membership<L: MerkleTreeLeaf + ?Sized>(
        &self,
        item: &L,
        proof: &MerkleProof<D>,
    ) -> bool {
        self.verify_leaf_membership(&compute_leaf::<D, L>(item), proof)
    }

    /// Convert to bytes
    /// # Layout
    /// * Root of the Merkle commitment
    pub fn to_bytes(&self) -> Vec<u8> {
        self.root.to_vec()
    }

    /// Extract a `MerkleTreeCommitment` from a byte slice.
    /// # Error
    /// The bytes must have the output size of `D`.
    pub fn from_bytes(bytes: &[u8]) -> MerkleResult<Self> {
        let root = MerkleHash::from(bytes);
        if !root.has_width_of::<D>() {
            return Err(MerkleTreeError::InvalidInput(format!(
                "merkle root must be {} bytes long, got {}",
                <D as Digest>::output_size(),
                bytes.len()
            )));
        }

        Ok(Self::new(root))
    }
}

impl<D: Digest> Clone for MerkleTreeCommitment<D> {
    fn clone(&self) -> Self {
        Self::new(self.root.clone())
    }
}

impl<D: Digest> PartialEq for MerkleTreeCommitment<D> {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root
    }
}

impl<D: Digest> Eq for MerkleTreeCommitment<D> {}

impl<D: Digest> Debug for MerkleTreeCommitment<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleTreeCommitment").field("root", &self.root).finish()
    }
}

#[cfg(test)]
mod tests {
    use sha2::Sha256;

    use super::*;
    use crate::MerkleTree;

    #[test]
    fn verify_membership_of_every_item() {
        let items = ["golden-1", "golden-2", "golden-3", "golden-4", "golden-5"];
        let tree = MerkleTree::<Sha256>::from_items(&items).unwrap();
        let commitment = tree.to_commitment();

        for (index, item) in items.iter().enumerate() {
            let proof = tree.compute_proof(index).unwrap();
            assert!(commitment.verify_item_membership(item, &proof));
            assert!(commitment.verify_leaf_membership(&tree.leaves()[index], &proof));
        }
    }

    #[test]
    fn verify_membership_of_unknown_item_fails() {
        let items = ["golden-1", "golden-2", "golden-3"];
        let tree = MerkleTree::<Sha256>::from_items(&items).unwrap();
        let proof = tree.compute_proof(0).unwrap();

        assert!(!tree.to_commitment().verify_item_membership("golden-4", &proof));
    }

    #[test]
    fn bytes_conversions() {
        let tree = MerkleTree::<Sha256>::from_items(&["a", "b", "c"]).unwrap();
        let commitment = tree.to_commitment();

        let decoded = MerkleTreeCommitment::<Sha256>::from_bytes(&commitment.to_bytes()).unwrap();
        assert_eq!(commitment, decoded);

        MerkleTreeCommitment::<Sha256>::from_bytes(&commitment.to_bytes()[1..])
            .expect_err("a truncated root should not decode");
    }

    #[test]
    fn json_conversions() {
        let commitment = MerkleTreeCommitment::<Sha256>::new(MerkleHash::digest::<Sha256>("x"));

        let json = serde_json::to_string(&commitment).unwrap();
        assert_eq!(
            r#"{"root":"2d711642b726b04401627ca9fbac32f5c8530fb1903cc4db02258717921a4881"}"#,
            json
        );

        let decoded: MerkleTreeCommitment<Sha256> = serde_json::from_str(&json).unwrap();
        assert_eq!(commitment, decoded);
    }
}
