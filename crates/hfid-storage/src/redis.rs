use async_trait::async_trait;
use hfid_core::{Generator, GeneratorStore, HfidError, Result};
use redis::{AsyncCommands, Script};
use tracing::{debug, trace, warn};

const PREFIX_FIELD: &str = "p";
const ALPHABET_FIELD: &str = "e";
const MIN_LENGTH_FIELD: &str = "m";
const LENGTH_FIELD: &str = "l";

/// Writes the generator hash only when it does not exist yet, then reads it
/// back along with the HyperLogLog estimate, all in one atomic step.
///
/// KEYS: generator hash, HyperLogLog. ARGV: prefix, alphabet, min length, length.
const INSERT_OR_GET_SCRIPT: &str = r"
if redis.call('EXISTS', KEYS[1]) == 0 then
  redis.call('HSET', KEYS[1], 'p', ARGV[1], 'e', ARGV[2], 'm', ARGV[3], 'l', ARGV[4])
end
local fields = redis.call('HMGET', KEYS[1], 'p', 'e', 'm', 'l')
return {fields[1], fields[2], fields[3], fields[4], redis.call('PFCOUNT', KEYS[2])}
";

type StoredFields = (
    Option<String>,
    Option<String>,
    Option<String>,
    Option<String>,
    u64,
);

/// A Redis-based implementation of [`GeneratorStore`].
///
/// Each generator is a hash holding its prefix, alphabet and lengths, next to a
/// HyperLogLog of the numbers issued so far. Both keys carry the generator name
/// as a hash tag so they land in the same cluster slot.
#[derive(Debug, Clone)]
pub struct RedisGeneratorStore {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
    insert_or_get: Script,
}

/// Key of the hash holding the generator fields.
fn generator_key(key_prefix: &str, name: &str) -> String {
    format!("{key_prefix}{{{name}}}")
}

/// Key of the HyperLogLog holding the issued numbers.
fn issued_key(key_prefix: &str, name: &str) -> String {
    format!("{}:hll", generator_key(key_prefix, name))
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> HfidError {
    HfidError::StoreUnavailable(format!("{operation}: {err}"))
}

fn malformed(name: &str, reason: String) -> HfidError {
    HfidError::MalformedStoredRecord {
        name: name.to_string(),
        reason,
    }
}

fn required(name: &str, field: &str, value: Option<String>) -> Result<String> {
    value.ok_or_else(|| malformed(name, format!("missing field '{field}'")))
}

fn parse_length(name: &str, field: &str, value: Option<String>) -> Result<u8> {
    let value = required(name, field, value)?;
    value
        .parse::<u8>()
        .map_err(|e| malformed(name, format!("invalid value '{value}' for field '{field}': {e}")))
}

impl RedisGeneratorStore {
    /// Creates a new Redis generator store using the `hfid:` key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, "hfid:")
    }

    /// Creates a new Redis generator store with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A multiplexed Redis connection
    /// * `key_prefix` - Custom prefix for generator keys (e.g., "myapp:hfid:")
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            insert_or_get: Script::new(INSERT_OR_GET_SCRIPT),
        }
    }

    fn parse_generator(name: &str, fields: StoredFields) -> Result<(Generator, u64)> {
        let (prefix, alphabet, min_length, length, issued) = fields;
        let generator = Generator::from_stored(
            name,
            required(name, PREFIX_FIELD, prefix)?,
            required(name, ALPHABET_FIELD, alphabet)?,
            parse_length(name, MIN_LENGTH_FIELD, min_length)?,
            parse_length(name, LENGTH_FIELD, length)?,
        );
        Ok((generator, issued))
    }
}

#[async_trait]
impl GeneratorStore for RedisGeneratorStore {
    async fn insert_or_get(&self, generator: &Generator) -> Result<(Generator, u64)> {
        let name = generator.name();
        trace!(generator = name, "Fetching generator from Redis");

        let mut conn = self.conn.clone();
        let fields: StoredFields = self
            .insert_or_get
            .key(generator_key(&self.key_prefix, name))
            .key(issued_key(&self.key_prefix, name))
            .arg(generator.prefix())
            .arg(generator.alphabet().as_str())
            .arg(generator.min_length().to_string())
            .arg(generator.length().to_string())
            .invoke_async(&mut conn)
            .await
            .map_err(|e| {
                warn!(generator = name, error = %e, "Redis error on insert or get");
                map_redis_error("failed to insert or get generator", e)
            })?;

        let (stored, issued) = Self::parse_generator(name, fields).inspect_err(|e| {
            warn!(generator = name, error = %e, "Stored generator is malformed");
        })?;
        debug!(
            generator = name,
            length = stored.length(),
            issued,
            "Fetched generator from Redis"
        );
        Ok((stored, issued))
    }

    async fn upsert(&self, generator: &Generator) -> Result<()> {
        let name = generator.name();
        trace!(generator = name, "Storing generator in Redis");

        let fields = [
            (PREFIX_FIELD, generator.prefix().to_string()),
            (ALPHABET_FIELD, generator.alphabet().to_string()),
            (MIN_LENGTH_FIELD, generator.min_length().to_string()),
            (LENGTH_FIELD, generator.length().to_string()),
        ];

        let mut conn = self.conn.clone();
        match conn
            .hset_multiple::<_, _, _, ()>(generator_key(&self.key_prefix, name), &fields[..])
            .await
        {
            Ok(()) => {
                debug!(generator = name, length = generator.length(), "Stored generator in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(generator = name, error = %e, "Failed to store generator in Redis");
                Err(map_redis_error("failed to write generator to Redis", e))
            }
        }
    }

    async fn add(&self, number: i64, name: &str) -> Result<bool> {
        let mut conn = self.conn.clone();
        match conn.pfadd::<_, _, bool>(issued_key(&self.key_prefix, name), number).await {
            Ok(changed) => {
                trace!(generator = name, number, changed, "Added number to HyperLogLog");
                Ok(changed)
            }
            Err(e) => {
                warn!(generator = name, error = %e, "Redis error on add");
                Err(map_redis_error("failed to add number to Redis", e))
            }
        }
    }
}
