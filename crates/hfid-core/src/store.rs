use crate::error::Result;
use crate::generator::Generator;
use async_trait::async_trait;

/// Persists generators and tracks the numbers already issued by each of them.
///
/// Every operation is keyed by the generator name and must be atomic on its
/// own; the generation algorithm relies on nothing else for correctness when
/// many callers share a generator. Backend failures are reported as
/// [`HfidError::StoreUnavailable`](crate::HfidError::StoreUnavailable).
#[async_trait]
pub trait GeneratorStore: Send + Sync + 'static {
    /// Creates the generator if no record exists for its name, otherwise reads
    /// the stored one.
    ///
    /// Returns the stored generator and an estimate of the distinct numbers
    /// added for it so far (`0` when the record was just created). When a record
    /// exists, the prefix, alphabet and lengths of `generator` are ignored.
    async fn insert_or_get(&self, generator: &Generator) -> Result<(Generator, u64)>;

    /// Writes the prefix, alphabet and lengths of `generator`, overwriting any
    /// existing record without touching the numbers already added.
    async fn upsert(&self, generator: &Generator) -> Result<()>;

    /// Registers `number` for the generator `name`.
    ///
    /// Returns `true` if the number was not seen before and `false` if it
    /// probably was. Reporting `true` for a number that was already added is
    /// tolerated; reporting `false` for a new one is not.
    async fn add(&self, number: i64, name: &str) -> Result<bool>;
}
