use crate::error::{HfidError, Result};

/// Raises `base` to `exponent`, failing with [`HfidError::Overflow`] as soon as
/// an intermediate product leaves the `i64` range.
///
/// `pow(b, 0)` is `1` for every `b`, including `0`.
pub fn pow(base: i64, exponent: u32) -> Result<i64> {
    let mut result: i64 = 1;
    for _ in 0..exponent {
        result = result.checked_mul(base).ok_or_else(|| {
            HfidError::Overflow(format!("{base} ^ {exponent} does not fit in an i64"))
        })?;
    }
    Ok(result)
}
