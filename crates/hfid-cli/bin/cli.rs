use clap::{Parser, ValueEnum};
use hfid_core::alphabet::DEFAULT;
use std::fmt::{Display, Formatter};

pub const NAME_ENV: &str = "HFID_NAME";
pub const PREFIX_ENV: &str = "HFID_PREFIX";
pub const ALPHABET_ENV: &str = "HFID_ALPHABET";
pub const MIN_LENGTH_ENV: &str = "HFID_MIN_LENGTH";
pub const LENGTH_ENV: &str = "HFID_LENGTH";
pub const COUNT_ENV: &str = "HFID_COUNT";
pub const STORAGE_BACKEND_ENV: &str = "HFID_STORAGE";
pub const REDIS_URL_ENV: &str = "HFID_REDIS_URL";
pub const SEED_ENV: &str = "HFID_SEED";

pub const DEFAULT_NAME: &str = "example";
pub const DEFAULT_COUNT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

/// Generates a batch of human-friendly identifiers.
#[derive(Debug, Parser)]
#[command(name = "hfid")]
pub struct CLI {
    /// Generator name, the key of the identifier namespace.
    #[arg(long, env = NAME_ENV, default_value = DEFAULT_NAME)]
    pub name: String,

    #[arg(long, env = PREFIX_ENV, default_value_t = String::new())]
    pub prefix: String,

    #[arg(long, env = ALPHABET_ENV, default_value = DEFAULT)]
    pub alphabet: String,

    #[arg(long, env = MIN_LENGTH_ENV, default_value_t = 1)]
    pub min_length: u8,

    /// Initial width; the stored generator widens itself as it fills up.
    #[arg(long, env = LENGTH_ENV, default_value_t = 1)]
    pub length: u8,

    /// How many identifiers to generate.
    #[arg(long, env = COUNT_ENV, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    /// Seed for reproducible output; the thread-local RNG is used when absent.
    #[arg(long, env = SEED_ENV)]
    pub seed: Option<u64>,
}
