use rand::{Rng, RngCore};

/// A source of uniformly distributed candidate numbers.
///
/// Every [`rand`] generator implements this trait, so a seeded
/// `StdRng` can be injected for reproducible identifiers, and tests can plug
/// in a scripted source.
///
/// # Example
/// ```
/// use hfid_core::RandSource;
///
/// struct Fixed;
/// impl RandSource for Fixed {
///     fn random_up_to(&mut self, max: i64) -> i64 {
///         max
///     }
/// }
///
/// assert_eq!(Fixed.random_up_to(9), 9);
/// ```
pub trait RandSource {
    /// Returns a value drawn uniformly from `0..=max`. `max` is never negative.
    fn random_up_to(&mut self, max: i64) -> i64;
}

impl<R: RngCore + ?Sized> RandSource for R {
    fn random_up_to(&mut self, max: i64) -> i64 {
        self.random_range(0..=max)
    }
}

/// A [`RandSource`] backed by the thread-local RNG (`rand::rng()`).
///
/// The type does not hold the RNG, it looks it up on every draw, so it is
/// `Send` and `Sync` even though the thread-local generator is not.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource for ThreadRandom {
    fn random_up_to(&mut self, max: i64) -> i64 {
        rand::rng().random_range(0..=max)
    }
}
