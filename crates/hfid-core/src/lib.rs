//! Core types and algorithm for human-friendly identifiers (HFIDs).
//!
//! An HFID is a short, fixed-width string over a chosen alphabet, optionally
//! prefixed, that is probabilistically unique within a named [`Generator`].
//! Uniqueness is backed by a [`GeneratorStore`] that keeps the generator
//! record and an approximate set of the numbers already issued.
//!
//! ```no_run
//! # async fn run(store: impl hfid_core::GeneratorStore) -> hfid_core::Result<()> {
//! use hfid_core::{alphabet::DEFAULT, generate_with_thread_rng, Generator};
//!
//! let generator = Generator::new("ticket", "T-", DEFAULT, 1, 1)?;
//! let id = generate_with_thread_rng(&generator, &store).await?;
//! println!("{id}");
//! # Ok(())
//! # }
//! ```

pub mod alphabet;
pub mod error;
pub mod generator;
pub mod hfid;
pub mod math;
pub mod random;
pub mod store;

pub use alphabet::Alphabet;
pub use error::{HfidError, Result};
pub use generator::{Generator, GeneratorSettings};
pub use hfid::{generate, generate_with_thread_rng};
pub use random::{RandSource, ThreadRandom};
pub use store::GeneratorStore;
