//! Generator store backends.
//!
//! Each backend implements [`hfid_core::GeneratorStore`].

pub mod memory;
pub mod redis;

pub use hfid_core::GeneratorStore;
pub use memory::InMemoryGeneratorStore;
pub use self::redis::RedisGeneratorStore;
