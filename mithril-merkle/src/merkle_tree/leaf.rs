use std::borrow::Cow;

use digest::Digest;
use rayon::prelude::*;

use super::MerkleHash;

/// Trait defining the bytes an item commits in a `MerkleTree`.
///
/// The leaf of an item is the digest of these bytes.
pub trait MerkleTreeLeaf {
    /// Bytes of the item as hashed into its leaf
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]>;
}

impl MerkleTreeLeaf for [u8] {
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> MerkleTreeLeaf for [u8; N] {
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl MerkleTreeLeaf for Vec<u8> {
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl MerkleTreeLeaf for str {
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl MerkleTreeLeaf for String {
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<T: MerkleTreeLeaf + ?Sized> MerkleTreeLeaf for &T {
    fn as_bytes_for_merkle_tree(&self) -> Cow<'_, [u8]> {
        (**self).as_bytes_for_merkle_tree()
    }
}

/// Hash a single item into its leaf.
pub fn compute_leaf<D: Digest, L: MerkleTreeLeaf + ?Sized>(item: &L) -> MerkleHash {
    MerkleHash::digest::<D>(item.as_bytes_for_merkle_tree())
}

/// Hash every item into its leaf, preserving the order of the items.
///
/// Items are hashed independently of each other, in parallel.
pub fn build_leaves<D: Digest, L: MerkleTreeLeaf + Sync>(items: &[L]) -> Vec<MerkleHash> {
    items.par_iter().map(|item| compute_leaf::<D, L>(item)).collect()
}
