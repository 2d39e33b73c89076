use crate::error::{HfidError, Result};
use crate::math::pow;
use std::collections::HashSet;
use std::fmt::Display;

/// Smallest number of symbols an alphabet may have.
pub const MIN_ALPHABET_SIZE: usize = 3;

/// An alphabet containing only decimal digits.
pub const NUMERIC: &str = "0123456789";

/// Decimal digits followed by upper-case English letters.
pub const DEFAULT: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// An ordered set of symbols used as the digits of a numeral system.
///
/// The number of symbols is the radix. An `Alphabet` can be built from any
/// string, so its validity is checked by every [`encode`](Alphabet::encode)
/// and [`decode`](Alphabet::decode) call rather than only at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Alphabet(String);

impl Alphabet {
    pub fn new(symbols: impl Into<String>) -> Self {
        Self(symbols.into())
    }

    /// The [`NUMERIC`] alphabet.
    pub fn numeric() -> Self {
        Self::new(NUMERIC)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of symbols, i.e. the radix.
    pub fn radix(&self) -> usize {
        self.0.chars().count()
    }

    /// The symbol used for the digit zero, if any.
    pub fn zero(&self) -> Option<char> {
        self.0.chars().next()
    }

    /// Checks that the alphabet has at least [`MIN_ALPHABET_SIZE`] symbols and
    /// that none of them repeats.
    pub fn validate(&self) -> Result<()> {
        self.symbols().map(|_| ())
    }

    fn symbols(&self) -> Result<Vec<char>> {
        let symbols: Vec<char> = self.0.chars().collect();
        if symbols.len() < MIN_ALPHABET_SIZE {
            return Err(self.invalid(format!(
                "expected at least {MIN_ALPHABET_SIZE} symbols, got {}",
                symbols.len()
            )));
        }

        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in &symbols {
            if !seen.insert(*symbol) {
                return Err(self.invalid(format!("symbol '{symbol}' is repeated")));
            }
        }
        Ok(symbols)
    }

    pub(crate) fn invalid(&self, reason: String) -> HfidError {
        HfidError::InvalidAlphabet {
            alphabet: self.0.clone(),
            reason,
        }
    }

    /// Encodes `number` most-significant digit first, using as few symbols as
    /// possible. Zero encodes to the first symbol. No padding is applied.
    pub fn encode(&self, number: i64) -> Result<String> {
        let symbols = self.symbols()?;
        if number < 0 {
            return Err(HfidError::NegativeInput(number));
        }

        let radix = symbols.len() as i64;

        // Smallest digit count whose weight exceeds `number`. A weight that
        // overflows is larger than any i64.
        let mut digits: u32 = 1;
        while matches!(pow(radix, digits), Ok(weight) if weight <= number) {
            digits += 1;
        }

        let mut remaining = number;
        let mut encoded = String::with_capacity(digits as usize);
        for position in (0..digits).rev() {
            let weight = pow(radix, position)?;
            let digit = remaining / weight;
            encoded.push(symbols[digit as usize]);
            remaining -= digit * weight;
        }
        Ok(encoded)
    }

    /// Decodes `input` back into a number. Leading zero symbols are accepted and
    /// an empty input decodes to `0`.
    pub fn decode(&self, input: &str) -> Result<i64> {
        let symbols = self.symbols()?;
        let radix = symbols.len() as i64;
        let width = input.chars().count();

        let mut result: i64 = 0;
        for (index, character) in input.chars().enumerate() {
            let value = symbols
                .iter()
                .position(|symbol| *symbol == character)
                .ok_or_else(|| HfidError::InvalidCharacter {
                    character,
                    input: input.to_string(),
                    alphabet: self.0.clone(),
                })? as i64;

            let term = u32::try_from(width - index - 1)
                .ok()
                .and_then(|exponent| pow(radix, exponent).ok())
                .and_then(|weight| value.checked_mul(weight));

            result = term
                .and_then(|term| result.checked_add(term))
                .ok_or_else(|| {
                    HfidError::Overflow(format!(
                        "decoding '{input}' using '{}' does not fit in an i64",
                        self.0
                    ))
                })?;
        }
        Ok(result)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::new(DEFAULT)
    }
}

impl From<&str> for Alphabet {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Alphabet {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
