use std::marker::PhantomData;

use anyhow::{Context, anyhow};
use digest::Digest;
use slog::{Logger, info};

use mithril_merkle::{MerkleTreeBuilder, MerkleTreeConfig, compute_leaf, verify_inclusion};

use crate::Config;

/// Commits the items in a tree, then proves and verifies the inclusion of the target item.
pub struct Demonstrator<D: Digest> {
    items: Vec<String>,
    target: String,
    builder: MerkleTreeBuilder,
    logger: Logger,
    hasher: PhantomData<D>,
}

impl<D: Digest> Demonstrator<D> {
    pub fn new(config: &Config, tree_config: MerkleTreeConfig, logger: Logger) -> Self {
        Self {
            items: config.items.clone(),
            target: config.prove.clone(),
            builder: MerkleTreeBuilder::new(tree_config, logger.clone()),
            logger,
            hasher: PhantomData,
        }
    }

    pub fn run(&self) -> anyhow::Result<()> {
        //////////////////
        // commit phase //
        //////////////////

        println!("\n>> Commit phase");
        let tree = self
            .builder
            .build_from_items::<D, _>(&self.items)
            .with_context(|| "merkle tree construction failed")?;
        info!(self.logger, "Items committed"; "items" => self.items.len(), "root" => tree.root_hex());
        println!("root: {}", tree.root_hex());
        print!("{tree}");

        /////////////////
        // prove phase //
        /////////////////

        println!("\n>> Prove phase: item {:?}", self.target);
        if !self.items.contains(&self.target) {
            return Err(anyhow!("item {:?} is not committed in the tree", self.target));
        }
        let proof = self
            .builder
            .compute_proof_for_item(&tree, self.target.as_str())
            .with_context(|| format!("proof computation failed for item {:?}", self.target))?;
        println!("{}", serde_json::to_string_pretty(&proof)?);

        //////////////////
        // verify phase //
        //////////////////

        println!("\n>> Verify phase");
        let leaf = compute_leaf::<D, _>(self.target.as_str());
        let verified = verify_inclusion::<D>(&leaf, proof.steps(), tree.root());
        info!(self.logger, "Proof verified"; "item" => &self.target, "verified" => verified);
        println!("verified: {verified}");

        Ok(())
    }
}
