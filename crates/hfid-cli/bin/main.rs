mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use hfid_core::{Generator, GeneratorStore, RandSource, ThreadRandom};
use hfid_storage::{InMemoryGeneratorStore, RedisGeneratorStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CLI::parse();

    info!(
        generator = %config.name,
        storage_backend = %config.storage,
        count = config.count,
        "generating identifiers"
    );

    let descriptor = Generator::new(
        config.name.as_str(),
        config.prefix.as_str(),
        config.alphabet.as_str(),
        config.min_length,
        config.length,
    )?;

    match config.storage {
        StorageBackendArg::InMemory => {
            run(&descriptor, &InMemoryGeneratorStore::new(), &config).await?;
        }
        StorageBackendArg::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            let client = redis::Client::open(redis_url)?;
            let conn = client.get_multiplexed_async_connection().await?;
            run(&descriptor, &RedisGeneratorStore::new(conn), &config).await?;
        }
    }

    Ok(())
}

async fn run<S: GeneratorStore>(
    descriptor: &Generator,
    store: &S,
    config: &CLI,
) -> hfid_core::Result<()> {
    match config.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            emit(descriptor, store, config.count, &mut rng).await
        }
        None => emit(descriptor, store, config.count, &mut ThreadRandom).await,
    }
}

async fn emit<S, R>(
    descriptor: &Generator,
    store: &S,
    count: usize,
    rng: &mut R,
) -> hfid_core::Result<()>
where
    S: GeneratorStore,
    R: RandSource,
{
    let started = Instant::now();
    for _ in 0..count {
        let identifier = hfid_core::generate(descriptor, store, rng).await?;
        println!("{identifier}");
    }

    info!(
        count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated identifiers"
    );
    Ok(())
}
