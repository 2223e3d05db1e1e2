mod demonstrator;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use blake2::{Blake2b, digest::consts::U32};
use clap::{Parser, ValueEnum};
use sha2::Sha256;
use slog::{Drain, Level, Logger, o};

use mithril_merkle::MerkleTreeConfig;

use crate::demonstrator::Demonstrator;

/// Simple demonstration of Merkle tree inclusion proofs
#[derive(Parser, Debug, PartialEq, Clone)]
pub struct Config {
    /// Item committed in the tree, repeat for each item in order
    #[clap(long = "item", default_values = ["a", "b", "c", "d"])]
    items: Vec<String>,

    /// Item whose inclusion is proven
    #[clap(long, default_value = "d")]
    prove: String,

    /// Digest function used to hash the leaves and the nodes
    #[clap(long, value_enum, default_value_t = DigestAlgorithm::Blake2b256)]
    digest: DigestAlgorithm,

    /// Configuration file of the tree (json, toml or yaml)
    #[clap(long, env = "MERKLE_CONFIG_FILE")]
    config_file: Option<PathBuf>,

    /// Verbosity level (-v=info, -vv=debug, -vvv=trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Config {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::Warning,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    }

    /// Tree configuration read from the optional configuration file, overridden by
    /// `MERKLE_*` environment variables.
    fn tree_config(&self) -> anyhow::Result<MerkleTreeConfig> {
        let mut builder = config::Config::builder();
        if let Some(path) = &self.config_file {
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        builder
            .add_source(config::Environment::with_prefix("MERKLE"))
            .build()
            .with_context(|| "configuration build error")?
            .try_deserialize()
            .with_context(|| "configuration deserialize error")
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum DigestAlgorithm {
    /// Blake2b with a 256 bits output
    #[value(name = "blake2b256")]
    Blake2b256,
    /// Sha2 with a 256 bits output
    #[value(name = "sha256")]
    Sha256,
}

fn build_logger(log_level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, log_level).fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    Logger::root(Arc::new(drain), o!())
}

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    let logger = build_logger(config.log_level());
    let tree_config = config.tree_config()?;

    println!(">> Launch Merkle tree demonstrator with configuration: \n{config:#?}\n{tree_config:#?}");

    match config.digest {
        DigestAlgorithm::Blake2b256 => {
            Demonstrator::<Blake2b<U32>>::new(&config, tree_config, logger).run()
        }
        DigestAlgorithm::Sha256 => Demonstrator::<Sha256>::new(&config, tree_config, logger).run(),
    }
}
