use digest::Digest;
use slog::{Logger, debug, o, warn};

use crate::{
    MerkleHash, MerkleProof, MerkleResult, MerkleTree, MerkleTreeConfig, MerkleTreeLeaf,
    build_leaves, compute_leaf,
};

/// A [MerkleTree] builder bound to a configuration and a logger.
pub struct MerkleTreeBuilder {
    config: MerkleTreeConfig,
    logger: Logger,
}

impl MerkleTreeBuilder {
    /// Constructor
    pub fn new(config: MerkleTreeConfig, logger: Logger) -> Self {
        Self {
            config,
            logger: logger.new(o!("src" => "MerkleTreeBuilder")),
        }
    }

    /// Configuration used to build trees
    pub fn config(&self) -> &MerkleTreeConfig {
        &self.config
    }

    /// Build the tree committing the given leaves.
    pub fn build<D: Digest>(&self, leaves: &[MerkleHash]) -> MerkleResult<MerkleTree<D>> {
        let tree = MerkleTree::<D>::new_with_config(leaves, &self.config).inspect_err(|error| {
            warn!(self.logger, "Merkle tree construction failed"; "error" => %error);
        })?;
        debug!(
            self.logger, "Built merkle tree";
            "leaves" => tree.number_of_leaves(),
            "depth" => tree.depth(),
            "root" => tree.root_hex(),
        );

        Ok(tree)
    }

    /// Hash the items into leaves then build the tree committing them.
    pub fn build_from_items<D: Digest, L: MerkleTreeLeaf + Sync>(
        &self,
        items: &[L],
    ) -> MerkleResult<MerkleTree<D>> {
        debug!(self.logger, "Hashing items into merkle tree leaves"; "items" => items.len());
        let leaves = build_leaves::<D, L>(items);

        self.build(&leaves)
    }

    /// Get the proof of the first leaf of the tree that is the hash of `item`.
    pub fn compute_proof_for_item<D: Digest, L: MerkleTreeLeaf + ?Sized>(
        &self,
        tree: &MerkleTree<D>,
        item: &L,
    ) -> MerkleResult<MerkleProof<D>> {
        let leaf = compute_leaf::<D, L>(item);
        let proof = tree.compute_proof_for_leaf(&leaf).inspect_err(|error| {
            warn!(self.logger, "Merkle proof computation failed"; "leaf" => leaf.to_hex(), "error" => %error);
        })?;
        debug!(
            self.logger, "Computed merkle proof";
            "leaf" => leaf.to_hex(),
            "steps" => proof.len(),
        );

        Ok(proof)
    }
}
