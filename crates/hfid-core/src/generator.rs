use crate::alphabet::Alphabet;
use crate::error::{HfidError, Result};
use crate::math::pow;
use typed_builder::TypedBuilder;

/// Describes one identifier namespace and how its identifiers are encoded.
///
/// Use [`Generator::new`] (or [`GeneratorSettings`]) to obtain a validated
/// value. The authoritative copy lives in a
/// [`GeneratorStore`](crate::store::GeneratorStore), which may hand back a
/// different prefix, alphabet or lengths than the descriptor passed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator {
    name: String,
    prefix: String,
    alphabet: Alphabet,
    min_length: u8,
    length: u8,
}

impl Generator {
    /// Creates a generator after validating every field.
    ///
    /// # Errors
    ///
    /// - [`HfidError::EmptyName`] if `name` is blank
    /// - [`HfidError::InvalidAlphabet`] if the alphabet is invalid
    /// - [`HfidError::ZeroLength`] if `length` is zero
    /// - [`HfidError::LengthBelowMinimum`] if `length < min_length`
    /// - [`HfidError::CapacityOverflow`] if `radix ^ length` does not fit in an i64
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        alphabet: impl Into<Alphabet>,
        min_length: u8,
        length: u8,
    ) -> Result<Self> {
        let generator = Self::from_stored(name, prefix, alphabet, min_length, length);
        generator.validate()?;
        Ok(generator)
    }

    /// Creates a generator without validation.
    ///
    /// Meant for store adapters rebuilding a record from persisted fields.
    /// Call [`validate`](Self::validate) before relying on the result.
    pub fn from_stored(
        name: impl Into<String>,
        prefix: impl Into<String>,
        alphabet: impl Into<Alphabet>,
        min_length: u8,
        length: u8,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            alphabet: alphabet.into(),
            min_length,
            length,
        }
    }

    /// Re-runs the checks performed by [`Generator::new`].
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(HfidError::EmptyName);
        }

        self.alphabet.validate()?;

        if self.length == 0 {
            return Err(HfidError::ZeroLength);
        }

        if self.length < self.min_length {
            return Err(HfidError::LengthBelowMinimum {
                length: self.length,
                min_length: self.min_length,
            });
        }

        self.capacity().map(|_| ())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn min_length(&self) -> u8 {
        self.min_length
    }

    /// Current encoded width, excluding the prefix.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Number of distinct identifiers at the current length, `radix ^ length`.
    pub fn capacity(&self) -> Result<i64> {
        pow(self.alphabet.radix() as i64, u32::from(self.length)).map_err(|_| {
            HfidError::CapacityOverflow {
                alphabet: self.alphabet.to_string(),
                length: self.length,
            }
        })
    }

    /// Largest number encodable at the current length.
    pub fn max_id(&self) -> Result<i64> {
        self.capacity().map(|capacity| capacity - 1)
    }

    /// Widens the generator by one symbol. The length is left untouched when
    /// the wider capacity does not fit in an `i64`.
    pub(crate) fn grow(&mut self) -> Result<()> {
        let length = self
            .length
            .checked_add(1)
            .ok_or_else(|| HfidError::CapacityOverflow {
                alphabet: self.alphabet.to_string(),
                length: self.length,
            })?;
        let previous = std::mem::replace(&mut self.length, length);
        if let Err(err) = self.max_id() {
            self.length = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Encodes `number` as a prefixed identifier, left-padded with the zero
    /// symbol to exactly [`length`](Self::length) symbols.
    pub fn encode(&self, number: i64) -> Result<String> {
        let max = self.max_id()?;
        if number > max {
            return Err(HfidError::OutOfRange { number, max });
        }

        let digits = self.alphabet.encode(number)?;
        let padding = usize::from(self.length).saturating_sub(digits.chars().count());
        let zero = self
            .alphabet
            .zero()
            .ok_or_else(|| self.alphabet.invalid("no zero symbol".to_string()))?;

        Ok(format!(
            "{}{}{}",
            self.prefix,
            zero.to_string().repeat(padding),
            digits
        ))
    }

    /// Decodes a prefixed identifier back into its number.
    pub fn decode(&self, identifier: &str) -> Result<i64> {
        let digits = identifier
            .strip_prefix(self.prefix.as_str())
            .ok_or_else(|| HfidError::PrefixMismatch {
                input: identifier.to_string(),
                prefix: self.prefix.clone(),
            })?;

        let width = digits.chars().count();
        if width < usize::from(self.min_length) || width > usize::from(self.length) {
            return Err(HfidError::LengthOutOfBounds {
                input: identifier.to_string(),
                width,
                min_length: self.min_length,
                length: self.length,
            });
        }

        self.alphabet.decode(digits)
    }
}

/// Builder-style configuration for a [`Generator`].
///
/// ```
/// use hfid_core::{Generator, GeneratorSettings};
///
/// let settings = GeneratorSettings::builder()
///     .name("invoice")
///     .prefix("INV-")
///     .length(4)
///     .build();
/// let generator = Generator::try_from(settings).unwrap();
/// assert_eq!(generator.encode(35).unwrap(), "INV-000Z");
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct GeneratorSettings {
    #[builder(setter(into))]
    pub name: String,
    #[builder(default, setter(into))]
    pub prefix: String,
    /// Defaults to [`DEFAULT`](crate::alphabet::DEFAULT).
    #[builder(default, setter(into))]
    pub alphabet: Alphabet,
    #[builder(default = 0)]
    pub min_length: u8,
    #[builder(default = 1)]
    pub length: u8,
}

impl TryFrom<GeneratorSettings> for Generator {
    type Error = HfidError;

    fn try_from(settings: GeneratorSettings) -> Result<Self> {
        Generator::new(
            settings.name,
            settings.prefix,
            settings.alphabet,
            settings.min_length,
            settings.length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::NUMERIC;

    fn numeric(prefix: &str, min_length: u8, length: u8) -> Generator {
        Generator::from_stored("a", prefix, NUMERIC, min_length, length)
    }

    #[test]
    fn new_rejects_invalid_alphabet() {
        let err = Generator::new("a", "", "a", 0, 1).unwrap_err();
        assert!(matches!(err, HfidError::InvalidAlphabet { .. }));
    }

    #[test]
    fn new_rejects_zero_length() {
        assert_eq!(
            Generator::new("a", "", "abc", 0, 0),
            Err(HfidError::ZeroLength)
        );
    }

    #[test]
    fn new_rejects_length_below_minimum() {
        assert_eq!(
            Generator::new("a", "", "abc", 2, 1),
            Err(HfidError::LengthBelowMinimum {
                length: 1,
                min_length: 2
            })
        );
    }

    #[test]
    fn new_rejects_overflowing_capacity() {
        let err = Generator::new("a", "", NUMERIC, 20, 20).unwrap_err();
        assert!(matches!(err, HfidError::CapacityOverflow { length: 20, .. }));
    }

    #[test]
    fn new_rejects_blank_name() {
        assert_eq!(
            Generator::new(" ", "", NUMERIC, 2, 2),
            Err(HfidError::EmptyName)
        );
    }

    #[test]
    fn new_keeps_passed_fields() {
        let generator = Generator::new("a", "a_", "abc", 1, 3).unwrap();
        assert_eq!(generator.name(), "a");
        assert_eq!(generator.prefix(), "a_");
        assert_eq!(generator.alphabet().as_str(), "abc");
        assert_eq!(generator.min_length(), 1);
        assert_eq!(generator.length(), 3);
    }

    #[test]
    fn settings_apply_defaults() {
        let settings = GeneratorSettings::builder().name("orders").build();
        let generator = Generator::try_from(settings).unwrap();
        assert_eq!(generator.prefix(), "");
        assert_eq!(generator.alphabet(), &Alphabet::default());
        assert_eq!(generator.min_length(), 0);
        assert_eq!(generator.length(), 1);
    }

    #[test]
    fn settings_are_validated() {
        let settings = GeneratorSettings::builder()
            .name("orders")
            .min_length(3)
            .length(2)
            .build();
        assert!(matches!(
            Generator::try_from(settings),
            Err(HfidError::LengthBelowMinimum { .. })
        ));
    }

    #[test]
    fn max_id_and_capacity() {
        let generator = Generator::from_stored("", "", "abc", 0, 1);
        assert_eq!(generator.max_id(), Ok(2));
        assert_eq!(generator.capacity(), Ok(3));

        let generator = Generator::from_stored("", "", "abcd", 0, 2);
        assert_eq!(generator.max_id(), Ok(15));
        assert_eq!(generator.capacity(), Ok(16));

        let generator = numeric("", 0, 19);
        assert!(matches!(
            generator.max_id(),
            Err(HfidError::CapacityOverflow { .. })
        ));
        assert!(matches!(
            generator.capacity(),
            Err(HfidError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn grow_adds_one_symbol() {
        let mut generator = numeric("", 0, 1);
        generator.grow().unwrap();
        assert_eq!(generator.length(), 2);
        assert_eq!(generator.capacity(), Ok(100));
    }

    #[test]
    fn grow_rejects_overflowing_width() {
        let mut generator = numeric("", 0, 18);
        let err = generator.grow().unwrap_err();
        assert!(matches!(err, HfidError::CapacityOverflow { length: 19, .. }));
        assert_eq!(generator.length(), 18);
    }

    #[test]
    fn encode_pads_with_multibyte_zero_symbol() {
        let generator = Generator::new("a", "", "αβγ", 0, 3).unwrap();
        assert_eq!(generator.encode(1).unwrap(), "ααβ");
    }

    #[test]
    fn encode_pads_and_prefixes() {
        assert_eq!(numeric("", 0, 1).encode(0).unwrap(), "0");
        assert_eq!(numeric("a-", 0, 1).encode(4).unwrap(), "a-4");
        assert_eq!(numeric("", 0, 4).encode(4).unwrap(), "0004");
        assert_eq!(numeric("", 0, 9).encode(123456789).unwrap(), "123456789");
        assert_eq!(
            Generator::from_stored("a", "", "abc", 0, 3).encode(3).unwrap(),
            "aba"
        );
    }

    #[test]
    fn encode_rejects_negative_numbers() {
        assert_eq!(
            numeric("", 0, 2).encode(-1),
            Err(HfidError::NegativeInput(-1))
        );
    }

    #[test]
    fn encode_rejects_numbers_above_max() {
        assert_eq!(
            numeric("", 0, 2).encode(100),
            Err(HfidError::OutOfRange {
                number: 100,
                max: 99
            })
        );
    }

    #[test]
    fn decode_requires_prefix() {
        let err = numeric("a-", 0, 1).decode("01").unwrap_err();
        assert!(matches!(err, HfidError::PrefixMismatch { .. }));
    }

    #[test]
    fn decode_checks_width() {
        for (generator, identifier) in [
            (numeric("a-", 2, 0), "a-0"),
            (numeric("", 2, 0), "0"),
            (numeric("a-", 0, 1), "a-01"),
            (numeric("", 0, 1), "01"),
        ] {
            let err = generator.decode(identifier).unwrap_err();
            assert!(
                matches!(err, HfidError::LengthOutOfBounds { .. }),
                "{identifier}: {err}"
            );
        }
    }

    #[test]
    fn decode_propagates_codec_errors() {
        let err = numeric("", 0, 1).decode("a").unwrap_err();
        assert!(matches!(err, HfidError::InvalidCharacter { .. }));
    }

    #[test]
    fn decode_strips_prefix() {
        assert_eq!(numeric("123", 0, 1).decode("1233"), Ok(3));
    }

    #[test]
    fn padded_identifiers_decode_to_their_number() {
        let generator = Generator::new("a", "X-", "abcde", 2, 6).unwrap();
        let max = generator.max_id().unwrap();
        for number in [0, 1, 4, 5, 124, 3125, max] {
            let identifier = generator.encode(number).unwrap();
            assert_eq!(identifier.len(), 2 + 6);
            assert_eq!(generator.decode(&identifier), Ok(number));
        }
    }
}
