//! # Crypto-Conditions
//!
//! This crate implements crypto-conditions: compact, hash-based descriptions
//! of a predicate ("conditions") and the structured proofs that satisfy them
//! ("fulfillments").  Anyone holding a condition and a fulfillment can decide,
//! without any secrets, whether the fulfillment satisfies the condition for a
//! given message.
//!
//! ## Core Concepts
//!
//! - **Conditions**: A type, a 32-byte SHA-256 fingerprint, a cost and, for
//!   compound types, the set of types used beneath it.  Represented by the
//!   [`Condition`] struct.
//! - **Fulfillments**: Proofs that derive a condition from their own contents
//!   and check a message.  Represented by the [`Fulfillment`] enum.
//! - **Messages**: Arbitrary bytes.  Signature types sign them, the prefix
//!   type extends them and the preimage type ignores them.
//!
//! Both conditions and fulfillments have exactly one valid binary encoding,
//! DER with implicit context tags.  Any other encoding of the same value is
//! rejected on decode, so a fulfillment can't be re-encoded into a different
//! byte string that still verifies.
//!
//! ## Usage Examples
//!
//! ```rust
//! use cryptocond::{Fulfillment, PreimageSha256Fulfillment, validate_fulfillment};
//!
//! let fulfillment: Fulfillment = PreimageSha256Fulfillment::new(*b"Great Scott!")?.into();
//! let condition = fulfillment.derive_condition().clone();
//!
//! // Verify the parsed values directly.
//! assert!(fulfillment.verify(&condition, b"any message"));
//!
//! // Or verify straight from the encoded bytes.
//! let ok = validate_fulfillment(&condition.encode(), &fulfillment.encode(), b"")?;
//! assert!(ok);
//! # Ok::<(), cryptocond::ConditionError>(())
//! ```
//!
//! ## Supported Types
//!
//! - **Preimage-SHA-256** ([`CryptoConditionType::PreimageSha256`] = 0):
//!   Reveals a preimage of the fingerprint.
//! - **Prefix-SHA-256** ([`CryptoConditionType::PrefixSha256`] = 1):
//!   Prepends a fixed prefix to the message before passing it to a
//!   subfulfillment, bounding the message length.
//! - **Threshold-SHA-256** ([`CryptoConditionType::ThresholdSha256`] = 2):
//!   Requires `k` of `n` subconditions to be fulfilled.
//! - **RSA-SHA-256** ([`CryptoConditionType::RsaSha256`] = 3):
//!   RSA-PSS signature with SHA-256, 1024 to 4096 bit moduli.
//! - **Ed25519-SHA-256** ([`CryptoConditionType::Ed25519Sha256`] = 4):
//!   Ed25519 signature.
//!
//! ## Feature Flags
//!
//! - `serde`: Enables Serialize/Deserialize implementations for [`Condition`]
//!   and [`Fulfillment`]

mod condition;
mod config;
pub mod constants;
mod errors;
mod fulfillments;
mod hashing;
#[cfg(test)]
mod test_utils;
pub mod type_ids;
mod type_set;
mod verifier;

#[cfg(feature = "serde")]
mod serde;

// Only the serde tests use it.
#[cfg(all(test, not(feature = "serde")))]
use serde_json as _;

pub use condition::Condition;
pub use config::ParseConfig;
pub use cryptocond_der::DecodeLimits;
pub use errors::{ConditionError, ConditionResult, ErrorKind};
pub use fulfillments::{
    Ed25519Sha256Fulfillment, Fulfillment, PrefixSha256Fulfillment, PreimageSha256Fulfillment,
    RsaSha256Fulfillment, ThresholdSha256Fulfillment,
};
pub use hashing::Fingerprint;
pub use type_ids::{CryptoConditionType, feature_mask_of};
pub use type_set::ConditionTypeSet;

/// Parses a condition with the default [`ParseConfig`].
pub fn parse_condition(buf: &[u8]) -> ConditionResult<Condition> {
    ParseConfig::default().try_parse_condition(buf)
}

/// Parses a fulfillment with the default [`ParseConfig`].
pub fn parse_fulfillment(buf: &[u8]) -> ConditionResult<Fulfillment> {
    ParseConfig::default().try_parse_fulfillment(buf)
}

/// Checks that an encoded fulfillment satisfies an encoded condition for
/// `message`.
///
/// # Returns
/// * `Ok(true)` if the fulfillment satisfies the condition
/// * `Ok(false)` if both parsed but the fulfillment doesn't satisfy it
/// * `Err(ConditionError)` if either buffer fails to parse
pub fn validate_fulfillment(
    condition_bytes: &[u8],
    fulfillment_bytes: &[u8],
    message: &[u8],
) -> ConditionResult<bool> {
    let condition = parse_condition(condition_bytes)?;
    let fulfillment = parse_fulfillment(fulfillment_bytes)?;
    Ok(fulfillment.verify(&condition, message))
}
