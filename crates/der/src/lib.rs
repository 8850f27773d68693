//! Canonical DER encoding framework.
//!
//! Implements the narrow slice of ASN.1 DER needed by the crypto-conditions
//! wire format: single-octet tags, definite lengths, non-negative integers,
//! octet strings, named-bit-list bit strings and sorted `SET OF`.  The reader
//! rejects every non-canonical form, so a value has exactly one accepted
//! encoding.

mod errors;
pub use errors::DerError;

mod limits;
pub use limits::{DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH, DecodeLimits};

mod reader;
pub use reader::DerReader;

mod tag;
pub use tag::Tag;

mod types;
pub use types::{Decode, Encode};

mod util;
pub use util::{decode_buf_exact, encode_to_vec};

mod writer;
pub use writer::DerWriter;
