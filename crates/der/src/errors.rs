use thiserror::Error;

use crate::tag::Tag;

/// Errors from decoding canonical DER.
///
/// Every variant means the input is not the unique canonical encoding of any
/// value, so none of them are recoverable by retrying.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum DerError {
    /// If we tried to read past the end of the underlying buffer.
    #[error("would overrun end of input")]
    OverrunInput,

    /// If there was extra data in a buffer that we didn't consume reading a
    /// value.
    #[error("extra unnecessary input leftover")]
    ExtraInput,

    /// Found a different tag than the one the schema requires here.
    #[error("unexpected tag (expected {expected}, found {found})")]
    UnexpectedTag {
        /// Tag required by the schema.
        expected: Tag,
        /// Tag actually present.
        found: Tag,
    },

    /// Found a tag the schema has no use for at all.
    #[error("unrecognized tag {0}")]
    UnrecognizedTag(Tag),

    /// High tag number form is never used by the schemas we decode.
    #[error("high tag number form is not supported")]
    HighTagNumber,

    /// Indefinite lengths are a BER feature, forbidden in DER.
    #[error("indefinite length")]
    IndefiniteLength,

    /// Length octets were longer than necessary.
    #[error("nonminimal length encoding")]
    NonminimalLength,

    /// Length did not fit in the width we support.
    #[error("length overflow")]
    LengthOverflow,

    /// Integer had redundant leading octets.
    #[error("nonminimal integer encoding")]
    NonminimalInteger,

    /// Integer had no content octets.
    #[error("empty integer")]
    EmptyInteger,

    /// Integer was negative where only unsigned values are allowed.
    #[error("negative integer")]
    NegativeInteger,

    /// Integer was larger than the schema allows.
    #[error("integer out of range (max {max})")]
    IntegerOverflow {
        /// The largest permitted value.
        max: u64,
    },

    /// Bit string was not in canonical named-bit-list form.
    #[error("invalid bit string: {0}")]
    InvalidBitString(&'static str),

    /// Fixed-size field had the wrong length.
    #[error("invalid length for {field} (expected {expected}, found {found})")]
    InvalidLength {
        /// Name of the field.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// `SET OF` elements were not sorted by their encodings.
    #[error("set elements not in canonical order")]
    UnsortedSet,

    /// Nested constructed values went deeper than the configured limit.
    #[error("nesting depth exceeded limit of {0}")]
    DepthLimitExceeded(usize),

    /// Input buffer was larger than the configured byte budget.
    #[error("input of {len} bytes exceeds budget of {limit} bytes")]
    ByteBudgetExceeded {
        /// The configured budget.
        limit: usize,
        /// The input length.
        len: usize,
    },
}
