use std::fmt::{Debug, Display, Formatter};
use std::marker::PhantomData;

use digest::Digest;

use super::{
    EmptyTreePolicy, MerkleHash, MerkleProof, MerkleProofStep, MerkleTreeCommitment,
    MerkleTreeConfig, MerkleTreeLeaf, build_leaves, children, parent, sibling,
};
use crate::{MerkleResult, MerkleTreeError};

/// A node of a `MerkleTree`, borrowed from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleTreeNode<'a> {
    /// Hash of one committed item
    Leaf {
        /// Hash of the leaf
        hash: &'a MerkleHash,
    },

    /// Hash of the concatenation of its two children.
    ///
    /// `left` and `right` are the same hash when the left child had no partner in its level.
    Internal {
        /// Hash of the node
        hash: &'a MerkleHash,
        /// Hash of the left child
        left: &'a MerkleHash,
        /// Hash of the right child
        right: &'a MerkleHash,
    },
}

impl<'a> MerkleTreeNode<'a> {
    /// Hash held by the node
    pub fn hash(&self) -> &'a MerkleHash {
        match *self {
            MerkleTreeNode::Leaf { hash } | MerkleTreeNode::Internal { hash, .. } => hash,
        }
    }
}

/// Tree of hashes, providing a commitment of data and its ordering.
pub struct MerkleTree<D: Digest> {
    /// The nodes are stored level by level:
    /// * `layers[0]` holds the leaves, in the order of the committed items,
    /// * the children of `layers[l][p]` are `layers[l-1][2p]` and `layers[l-1][2p+1]`,
    /// * when `layers[l-1][2p+1]` does not exist, `layers[l-1][2p]` is paired with itself,
    /// * the last layer holds the root only.
    ///
    /// It is empty for a tree built without leaves.
    layers: Vec<Vec<MerkleHash>>,
    /// Root of the tree
    root: MerkleHash,
    /// Phantom type to link the tree with its hasher
    hasher: PhantomData<D>,
}

impl<D: Digest> MerkleTree<D> {
    /// Build the tree committing the given leaves, with the default configuration.
    ///
    /// # Error
    /// Fails if there are no leaves or if a leaf does not have the output size of `D`.
    pub fn new(leaves: &[MerkleHash]) -> MerkleResult<Self> {
        Self::new_with_config(leaves, &MerkleTreeConfig::default())
    }

    /// Build the tree committing the given leaves.
    ///
    /// # Error
    /// Fails if a leaf does not have the output size of `D`, or if there are no
    /// leaves and the configuration rejects empty trees.
    pub fn new_with_config(leaves: &[MerkleHash], config: &MerkleTreeConfig) -> MerkleResult<Self> {
        if leaves.is_empty() {
            return match config.empty_tree_policy {
                EmptyTreePolicy::Reject => Err(MerkleTreeError::InvalidInput(
                    "cannot build a merkle tree without leaves".to_string(),
                )),
                EmptyTreePolicy::EmptyDigest => Ok(Self {
                    layers: vec![],
                    root: MerkleHash::digest::<D>(b""),
                    hasher: PhantomData,
                }),
            };
        }
        if let Some((index, leaf)) =
            leaves.iter().enumerate().find(|(_, leaf)| !leaf.has_width_of::<D>())
        {
            return Err(MerkleTreeError::InvalidInput(format!(
                "leaf {index} is {} bytes long, expected {}",
                leaf.len(),
                <D as Digest>::output_size()
            )));
        }

        let mut layers = Vec::new();
        let mut layer = leaves.to_vec();
        while layer.len() > 1 {
            let parents = compute_parent_layer::<D>(&layer);
            layers.push(std::mem::replace(&mut layer, parents));
        }
        let root = layer[0].clone();
        layers.push(layer);

        Ok(Self {
            layers,
            root,
            hasher: PhantomData,
        })
    }

    /// Hash the items into leaves then build the tree committing them, with the
    /// default configuration.
    pub fn from_items<L: MerkleTreeLeaf + Sync>(items: &[L]) -> MerkleResult<Self> {
        Self::new(&build_leaves::<D, L>(items))
    }

    /// Get the root of the tree.
    pub fn root(&self) -> &MerkleHash {
        &self.root
    }

    /// Hex representation of the root of the tree
    pub fn root_hex(&self) -> String {
        self.root.to_hex()
    }

    /// Leaves of the tree, in the order of the committed items
    pub fn leaves(&self) -> &[MerkleHash] {
        self.layers.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Leaf at the given index
    pub fn leaf(&self, index: usize) -> Option<&MerkleHash> {
        self.leaves().get(index)
    }

    /// Number of leaves committed in the tree
    pub fn number_of_leaves(&self) -> usize {
        self.leaves().len()
    }

    /// Is the tree free of any leaf
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of levels above the leaves, which is also the number of steps of a proof
    pub fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }

    /// All the levels of the tree, leaves first and root last
    pub fn layers(&self) -> &[Vec<MerkleHash>] {
        &self.layers
    }

    /// Position of the first leaf equal to `leaf`
    pub fn index_of(&self, leaf: &MerkleHash) -> Option<usize> {
        self.leaves().iter().position(|candidate| candidate == leaf)
    }

    /// Node at the given level (`0` for the leaves) and position in that level
    pub fn node(&self, level: usize, position: usize) -> Option<MerkleTreeNode<'_>> {
        let hash = self.layers.get(level)?.get(position)?;
        if level == 0 {
            return Some(MerkleTreeNode::Leaf { hash });
        }

        let lower_layer = &self.layers[level - 1];
        let (left_position, right_position) = children(position, lower_layer.len());

        Some(MerkleTreeNode::Internal {
            hash,
            left: lower_layer.get(left_position)?,
            right: lower_layer.get(right_position)?,
        })
    }

    /// Convert merkle tree to a commitment. This function simply returns the root.
    pub fn to_commitment(&self) -> MerkleTreeCommitment<D> {
        MerkleTreeCommitment::new(self.root.clone())
    }

    /// Get a proof (hashes of siblings of the path to the root node, with their side)
    /// for the `index`th leaf of the tree.
    ///
    /// # Error
    /// Fails with `NotFound` if `index` is not lower than the number of leaves.
    pub fn compute_proof(&self, index: usize) -> MerkleResult<MerkleProof<D>> {
        if index >= self.number_of_leaves() {
            return Err(MerkleTreeError::NotFound(format!(
                "leaf index {index} is out of bounds, the tree has {} leaves",
                self.number_of_leaves()
            )));
        }

        let mut position = index;
        let mut steps = Vec::with_capacity(self.depth());
        for layer in &self.layers[..self.depth()] {
            let (sibling_position, side) = sibling(position, layer.len());
            steps.push(MerkleProofStep::new(layer[sibling_position].clone(), side));
            position = parent(position);
        }

        Ok(MerkleProof::from_steps(steps))
    }

    /// Get a proof for the first leaf equal to `leaf`.
    ///
    /// # Error
    /// Fails with `NotFound` if no leaf of the tree is equal to `leaf`.
    pub fn compute_proof_for_leaf(&self, leaf: &MerkleHash) -> MerkleResult<MerkleProof<D>> {
        let index = self
            .index_of(leaf)
            .ok_or_else(|| MerkleTreeError::NotFound(format!("no leaf with hash {leaf}")))?;

        self.compute_proof(index)
    }

    /// Check that `leaf` is committed in this tree using the given proof.
    pub fn verify_proof(&self, leaf: &MerkleHash, proof: &MerkleProof<D>) -> bool {
        proof.verify(leaf, &self.root)
    }
}

fn compute_parent_layer<D: Digest>(layer: &[MerkleHash]) -> Vec<MerkleHash> {
    layer
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            MerkleHash::concatenate::<D>(left, right)
        })
        .collect()
}

impl<D: Digest> Clone for MerkleTree<D> {
    fn clone(&self) -> Self {
        Self {
            layers: self.layers.clone(),
            root: self.root.clone(),
            hasher: PhantomData,
        }
    }
}

impl<D: Digest> PartialEq for MerkleTree<D> {
    fn eq(&self, other: &Self) -> bool {
        self.layers == other.layers && self.root == other.root
    }
}

impl<D: Digest> Eq for MerkleTree<D> {}

impl<D: Digest> Debug for MerkleTree<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleTree")
            .field("root", &self.root)
            .field("number_of_leaves", &self.number_of_leaves())
            .field("depth", &self.depth())
            .finish()
    }
}

impl<D: Digest> Display for MerkleTree<D> {
    /// One line per level, root first.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.layers.is_empty() {
            return writeln!(f, "empty tree, root: {}", self.root);
        }
        for (level, layer) in self.layers.iter().enumerate().rev() {
            let hashes = layer.iter().map(MerkleHash::to_hex).collect::<Vec<_>>().join(", ");
            writeln!(f, "level {level}: {hashes}")?;
        }

        Ok(())
    }
}
