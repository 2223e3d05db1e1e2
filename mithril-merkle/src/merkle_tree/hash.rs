use std::fmt::{Display, Formatter};
use std::ops::Deref;

use digest::Digest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{MerkleResult, MerkleTreeError};

/// Alias for a byte
type Bytes = Vec<u8>;

/// A hash stored in a node of a Merkle tree.
///
/// Its width is the output size of the digest function of the tree it belongs to.
/// It is serialized as a lowercase hexadecimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MerkleHash {
    hash: Bytes,
}

impl MerkleHash {
    /// MerkleHash factory
    pub fn new(hash: Bytes) -> Self {
        Self { hash }
    }

    /// Hash the given bytes with the digest function `D`
    pub fn digest<D: Digest>(bytes: impl AsRef<[u8]>) -> Self {
        Self::new(D::digest(bytes).to_vec())
    }

    /// Hash of a parent node: `D(left || right)`.
    ///
    /// The left bytes always come first, both when building a tree and when
    /// recomputing a root from a proof.
    pub(crate) fn concatenate<D: Digest>(left: &MerkleHash, right: &MerkleHash) -> Self {
        Self::new(
            D::new()
                .chain_update(left)
                .chain_update(right)
                .finalize()
                .to_vec(),
        )
    }

    /// Create a MerkleHash from a hex representation
    pub fn from_hex(hex: &str) -> MerkleResult<Self> {
        let hash = hex::decode(hex).map_err(|e| {
            MerkleTreeError::InvalidInput(format!("could not decode hash from hex '{hex}': {e}"))
        })?;

        Ok(Self { hash })
    }

    /// Create a hex representation of the MerkleHash
    pub fn to_hex(&self) -> String {
        hex::encode(&self.hash)
    }

    /// Raw bytes of the hash
    pub fn as_bytes(&self) -> &[u8] {
        &self.hash
    }

    /// Check that the hash has exactly the output size of the digest function `D`
    pub fn has_width_of<D: Digest>(&self) -> bool {
        self.hash.len() == <D as Digest>::output_size()
    }
}

impl Deref for MerkleHash {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.hash
    }
}

impl AsRef<[u8]> for MerkleHash {
    fn as_ref(&self) -> &[u8] {
        &self.hash
    }
}

impl From<Bytes> for MerkleHash {
    fn from(other: Bytes) -> Self {
        Self::new(other)
    }
}

impl From<&[u8]> for MerkleHash {
    fn from(other: &[u8]) -> Self {
        Self::new(other.to_vec())
    }
}

impl Display for MerkleHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for MerkleHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for MerkleHash {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}
