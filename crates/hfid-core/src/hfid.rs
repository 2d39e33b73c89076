use crate::error::{HfidError, Result};
use crate::generator::Generator;
use crate::random::{RandSource, ThreadRandom};
use crate::store::GeneratorStore;
use tracing::{debug, info, trace, warn};

/// Generates a new identifier for `descriptor`.
///
/// The stored generator is fetched (or created) first. If issuing one more
/// identifier would push the estimated number of issued identifiers past half
/// of the current capacity, the generator is widened by one symbol and
/// persisted. Candidates are then drawn from `rng` in `[0, max_id]` until the
/// store accepts one as new, and that candidate is returned encoded.
///
/// Store errors are returned as is and never retried. Passing the same seeded
/// `rng` against a store that replays the same answers yields the same
/// identifier.
pub async fn generate<S, R>(descriptor: &Generator, store: &S, rng: &mut R) -> Result<String>
where
    S: GeneratorStore + ?Sized,
    R: RandSource + ?Sized,
{
    let (mut generator, issued) = store.insert_or_get(descriptor).await?;
    debug!(
        generator = generator.name(),
        length = generator.length(),
        issued,
        "fetched generator"
    );

    generator.validate().map_err(|err| match err {
        HfidError::CapacityOverflow { .. } => err,
        other => {
            warn!(generator = generator.name(), error = %other, "stored generator is invalid");
            HfidError::MalformedStoredRecord {
                name: generator.name().to_string(),
                reason: other.to_string(),
            }
        }
    })?;

    // Load factor stays below one half.
    let capacity = generator.capacity()?;
    if issued.saturating_add(1) > (capacity / 2) as u64 {
        generator.grow()?;
        store.upsert(&generator).await?;
        info!(
            generator = generator.name(),
            length = generator.length(),
            issued,
            "widened generator"
        );
    }

    let max = generator.max_id()?;
    loop {
        let candidate = rng.random_up_to(max);
        if store.add(candidate, generator.name()).await? {
            debug!(generator = generator.name(), candidate, "issued identifier");
            return generator.encode(candidate);
        }
        trace!(
            generator = generator.name(),
            candidate,
            "candidate already issued, drawing again"
        );
    }
}

/// Same as [`generate`], drawing candidates from the thread-local RNG.
pub async fn generate_with_thread_rng<S>(descriptor: &Generator, store: &S) -> Result<String>
where
    S: GeneratorStore + ?Sized,
{
    generate(descriptor, store, &mut ThreadRandom).await
}
