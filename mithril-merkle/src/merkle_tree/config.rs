use serde::{Deserialize, Serialize};

/// What building a `MerkleTree` without any leaf produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyTreePolicy {
    /// Building fails with `MerkleTreeError::InvalidInput`
    #[default]
    Reject,

    /// The tree has no leaves and its root is the digest of an empty byte sequence
    EmptyDigest,
}

/// Configuration of the construction of a `MerkleTree`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTreeConfig {
    /// Policy applied when there is no leaf to commit
    #[serde(default)]
    pub empty_tree_policy: EmptyTreePolicy,
}

impl MerkleTreeConfig {
    /// Configuration with the given empty tree policy
    pub fn with_empty_tree_policy(empty_tree_policy: EmptyTreePolicy) -> Self {
        Self { empty_tree_policy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_rejects_empty_trees() {
        assert_eq!(
            EmptyTreePolicy::Reject,
            MerkleTreeConfig::default().empty_tree_policy
        );
    }

    #[test]
    fn deserialize_config_from_json() {
        let config: MerkleTreeConfig =
            serde_json::from_str(r#"{ "empty_tree_policy": "empty_digest" }"#).unwrap();
        assert_eq!(
            MerkleTreeConfig::with_empty_tree_policy(EmptyTreePolicy::EmptyDigest),
            config
        );

        let config: MerkleTreeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(MerkleTreeConfig::default(), config);
    }
}
