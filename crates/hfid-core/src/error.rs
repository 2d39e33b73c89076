use thiserror::Error;

/// Result type for every fallible HFID operation.
pub type Result<T> = std::result::Result<T, HfidError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HfidError {
    #[error("invalid alphabet '{alphabet}': {reason}")]
    InvalidAlphabet { alphabet: String, reason: String },
    #[error("cannot encode negative number {0}")]
    NegativeInput(i64),
    #[error("invalid character '{character}' encountered while decoding '{input}' using '{alphabet}'")]
    InvalidCharacter {
        character: char,
        input: String,
        alphabet: String,
    },
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
    #[error("generator name cannot be empty")]
    EmptyName,
    #[error("generator length cannot be zero")]
    ZeroLength,
    #[error("length {length} cannot be less than min length {min_length}")]
    LengthBelowMinimum { length: u8, min_length: u8 },
    #[error("alphabet '{alphabet}' with length {length} overflows a 64-bit signed integer")]
    CapacityOverflow { alphabet: String, length: u8 },
    #[error("{number} is out of range, the largest encodable number is {max}")]
    OutOfRange { number: i64, max: i64 },
    #[error("'{input}' does not start with the prefix '{prefix}'")]
    PrefixMismatch { input: String, prefix: String },
    #[error("width {width} of '{input}' is not within [{min_length}, {length}]")]
    LengthOutOfBounds {
        input: String,
        width: usize,
        min_length: u8,
        length: u8,
    },
    #[error("generator store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("stored record for generator '{name}' is malformed: {reason}")]
    MalformedStoredRecord { name: String, reason: String },
}
