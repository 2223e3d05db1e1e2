use std::fmt::{Debug, Formatter};
use std::marker::PhantomData;

use digest::Digest;
use serde::{Deserialize, Serialize};

use super::MerkleHash;
use crate::{MerkleResult, MerkleTreeError};

/// Size of the length prefix of a serialized `MerkleProof`
const PROOF_LENGTH_PREFIX_SIZE: usize = 8;

/// Side on which a sibling is combined with the current hash when climbing the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The sibling is the left child: `D(sibling || current)`
    Left,
    /// The sibling is the right child: `D(current || sibling)`
    Right,
}

impl Side {
    /// The other side
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    fn to_tag(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Side::Left),
            1 => Some(Side::Right),
            _ => None,
        }
    }
}

/// One step of a `MerkleProof`: a sibling hash and the side it sits on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleProofStep {
    /// Hash of the sibling node
    pub sibling: MerkleHash,
    /// Side of the sibling in the pairing
    pub side: Side,
}

impl MerkleProofStep {
    /// MerkleProofStep factory
    pub fn new(sibling: MerkleHash, side: Side) -> Self {
        Self { sibling, side }
    }
}

/// Inclusion proof of a leaf in a `MerkleTree`.
///
/// Steps are ordered from the leaf up to the root: the first step holds the
/// sibling of the leaf, the last one the sibling of a child of the root.
/// A proof of a tree with a single leaf has no step.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerkleProof<D: Digest> {
    steps: Vec<MerkleProofStep>,
    #[serde(skip)]
    hasher: PhantomData<D>,
}

impl<D: Digest> MerkleProof<D> {
    /// Create a proof from steps, without any validation.
    ///
    /// Steps may come from an untrusted source: malformed steps only make
    /// [verify][Self::verify] return `false`.
    pub fn from_steps(steps: Vec<MerkleProofStep>) -> Self {
        Self {
            steps,
            hasher: PhantomData,
        }
    }

    /// Steps of the proof, leaf-adjacent step first
    pub fn steps(&self) -> &[MerkleProofStep] {
        &self.steps
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Is the proof free of any step (single leaf tree)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Hex representation of the siblings, leaf-adjacent sibling first
    pub fn to_hex_siblings(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.sibling.to_hex()).collect()
    }

    /// Recompute the root of the tree from the leaf and the steps of the proof.
    ///
    /// Returns `None` if the leaf or a sibling does not have the output size of `D`.
    pub fn compute_root(&self, leaf: &MerkleHash) -> Option<MerkleHash> {
        compute_root_from_steps::<D>(leaf, &self.steps)
    }

    /// Check that `leaf` is committed in the tree whose root is `claimed_root`.
    pub fn verify(&self, leaf: &MerkleHash, claimed_root: &MerkleHash) -> bool {
        verify_inclusion::<D>(leaf, &self.steps, claimed_root)
    }

    /// Convert to bytes
    /// # Layout
    /// * Number of steps (as u64)
    /// * For each step: side tag (`0` for left, `1` for right) followed by the sibling hash
    pub fn to_bytes(&self) -> Vec<u8> {
        let hash_size = <D as Digest>::output_size();
        let mut output =
            Vec::with_capacity(PROOF_LENGTH_PREFIX_SIZE + self.steps.len() * (1 + hash_size));
        output.extend_from_slice(&(self.steps.len() as u64).to_be_bytes());
        for step in &self.steps {
            output.push(step.side.to_tag());
            output.extend_from_slice(&step.sibling);
        }

        output
    }

    /// Extract a `MerkleProof` from a byte slice.
    /// # Error
    /// This function fails if the bytes do not follow the layout of [to_bytes][Self::to_bytes]
    /// for the output size of `D`.
    pub fn from_bytes(bytes: &[u8]) -> MerkleResult<Self> {
        let hash_size = <D as Digest>::output_size();
        let step_size = 1 + hash_size;

        let mut u64_bytes = [0u8; PROOF_LENGTH_PREFIX_SIZE];
        u64_bytes.copy_from_slice(bytes.get(..PROOF_LENGTH_PREFIX_SIZE).ok_or_else(|| {
            MerkleTreeError::InvalidInput(format!(
                "serialized proof is {} bytes long, shorter than its length prefix",
                bytes.len()
            ))
        })?);
        let number_of_steps = usize::try_from(u64::from_be_bytes(u64_bytes)).map_err(|_| {
            MerkleTreeError::InvalidInput("number of proof steps does not fit in usize".to_string())
        })?;
        let expected_size = number_of_steps
            .checked_mul(step_size)
            .and_then(|size| size.checked_add(PROOF_LENGTH_PREFIX_SIZE))
            .ok_or_else(|| {
                MerkleTreeError::InvalidInput(format!(
                    "number of proof steps is too large: {number_of_steps}"
                ))
            })?;
        if bytes.len() != expected_size {
            return Err(MerkleTreeError::InvalidInput(format!(
                "serialized proof of {number_of_steps} steps must be {expected_size} bytes long, got {}",
                bytes.len()
            )));
        }

        let steps = bytes[PROOF_LENGTH_PREFIX_SIZE..]
            .chunks_exact(step_size)
            .map(|chunk| {
                let side = Side::from_tag(chunk[0]).ok_or_else(|| {
                    MerkleTreeError::InvalidInput(format!("unknown proof side tag: {}", chunk[0]))
                })?;
                Ok(MerkleProofStep::new(MerkleHash::from(&chunk[1..]), side))
            })
            .collect::<MerkleResult<Vec<_>>>()?;

        Ok(Self::from_steps(steps))
    }
}

impl<D: Digest> Clone for MerkleProof<D> {
    fn clone(&self) -> Self {
        Self::from_steps(self.steps.clone())
    }
}

impl<D: Digest> PartialEq for MerkleProof<D> {
    fn eq(&self, other: &Self) -> bool {
        self.steps == other.steps
    }
}

impl<D: Digest> Eq for MerkleProof<D> {}

impl<D: Digest> Debug for MerkleProof<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerkleProof").field("steps", &self.steps).finish()
    }
}

fn compute_root_from_steps<D: Digest>(
    leaf: &MerkleHash,
    steps: &[MerkleProofStep],
) -> Option<MerkleHash> {
    // No tree addressable by a usize index is deeper than this.
    if !leaf.has_width_of::<D>() || steps.len() > usize::BITS as usize {
        return None;
    }

    steps.iter().try_fold(leaf.clone(), |current, step| {
        if !step.sibling.has_width_of::<D>() {
            return None;
        }
        Some(match step.side {
            Side::Left => MerkleHash::concatenate::<D>(&step.sibling, &current),
            Side::Right => MerkleHash::concatenate::<D>(&current, &step.sibling),
        })
    })
}

/// Check that `leaf` is committed in the tree whose root is `claimed_root`, by
/// climbing the tree with the given proof steps.
///
/// This never fails: malformed inputs (a hash whose width is not the output size
/// of `D`, an impossible number of steps) are simply not a valid proof.
pub fn verify_inclusion<D: Digest>(
    leaf: &MerkleHash,
    steps: &[MerkleProofStep],
    claimed_root: &MerkleHash,
) -> bool {
    claimed_root.has_width_of::<D>()
        && compute_root_from_steps::<D>(leaf, steps).is_some_and(|root| &root == claimed_root)
}
