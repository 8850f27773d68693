//! Fulfillment variants and dispatch over them.

mod ed25519;
mod prefix;
mod preimage;
mod rsa_pss;
mod threshold;

use cryptocond_der::{Decode, DerError, DerReader, DerWriter, Encode, encode_to_vec};

pub use ed25519::Ed25519Sha256Fulfillment;
pub use prefix::PrefixSha256Fulfillment;
pub use preimage::PreimageSha256Fulfillment;
pub use rsa_pss::RsaSha256Fulfillment;
pub use threshold::ThresholdSha256Fulfillment;

use crate::condition::Condition;
use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::CryptoConditionType;
use crate::verifier::FulfillmentVerifier;

/// A fulfillment of any registered type.
///
/// Compound variants own their children, so a fulfillment is always a finite
/// tree built bottom-up.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fulfillment {
    /// SHA-256 preimage.
    PreimageSha256(PreimageSha256Fulfillment),
    /// Prefix wrapper around one subfulfillment.
    PrefixSha256(PrefixSha256Fulfillment),
    /// k-of-n threshold.
    ThresholdSha256(ThresholdSha256Fulfillment),
    /// RSA-PSS signature.
    RsaSha256(RsaSha256Fulfillment),
    /// Ed25519 signature.
    Ed25519Sha256(Ed25519Sha256Fulfillment),
}

impl Fulfillment {
    /// Returns the type of this fulfillment.
    pub fn type_id(&self) -> CryptoConditionType {
        match self {
            Fulfillment::PreimageSha256(_) => PreimageSha256Fulfillment::TYPE,
            Fulfillment::PrefixSha256(_) => PrefixSha256Fulfillment::TYPE,
            Fulfillment::ThresholdSha256(_) => ThresholdSha256Fulfillment::TYPE,
            Fulfillment::RsaSha256(_) => RsaSha256Fulfillment::TYPE,
            Fulfillment::Ed25519Sha256(_) => Ed25519Sha256Fulfillment::TYPE,
        }
    }

    /// Returns the condition this fulfillment satisfies.
    pub fn derive_condition(&self) -> &Condition {
        match self {
            Fulfillment::PreimageSha256(f) => f.derived_condition(),
            Fulfillment::PrefixSha256(f) => f.derived_condition(),
            Fulfillment::ThresholdSha256(f) => f.derived_condition(),
            Fulfillment::RsaSha256(f) => f.derived_condition(),
            Fulfillment::Ed25519Sha256(f) => f.derived_condition(),
        }
    }

    /// Checks whether this fulfillment satisfies `condition` for `message`.
    ///
    /// Never fails, a fulfillment either satisfies the condition or it
    /// doesn't.
    pub fn verify(&self, condition: &Condition, message: &[u8]) -> bool {
        match self {
            Fulfillment::PreimageSha256(f) => f.verify(condition, message),
            Fulfillment::PrefixSha256(f) => f.verify(condition, message),
            Fulfillment::ThresholdSha256(f) => f.verify(condition, message),
            Fulfillment::RsaSha256(f) => f.verify(condition, message),
            Fulfillment::Ed25519Sha256(f) => f.verify(condition, message),
        }
    }

    /// Like [`Self::verify`] with the empty message.
    pub fn verify_empty(&self, condition: &Condition) -> bool {
        self.verify(condition, &[])
    }

    /// Encodes the fulfillment into its canonical bytes.
    pub fn encode(&self) -> Vec<u8> {
        encode_to_vec(self)
    }

    /// Decodes a fulfillment from canonical bytes with the default limits.
    pub fn from_bytes(buf: &[u8]) -> ConditionResult<Self> {
        crate::parse_fulfillment(buf)
    }
}

impl Encode for Fulfillment {
    fn write_der(&self, w: &mut DerWriter) {
        match self {
            Fulfillment::PreimageSha256(f) => f.write_der(w),
            Fulfillment::PrefixSha256(f) => f.write_der(w),
            Fulfillment::ThresholdSha256(f) => f.write_der(w),
            Fulfillment::RsaSha256(f) => f.write_der(w),
            Fulfillment::Ed25519Sha256(f) => f.write_der(w),
        }
    }
}

impl Decode for Fulfillment {
    type Error = ConditionError;

    fn read_der(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        r.read_any_constructed(|tag, r| {
            if !tag.is_context_specific() {
                return Err(DerError::UnrecognizedTag(tag).into());
            }

            Ok(match CryptoConditionType::try_from(tag.number())? {
                CryptoConditionType::PreimageSha256 => {
                    PreimageSha256Fulfillment::read_fields(r)?.into()
                }
                CryptoConditionType::PrefixSha256 => {
                    PrefixSha256Fulfillment::read_fields(r)?.into()
                }
                CryptoConditionType::ThresholdSha256 => {
                    ThresholdSha256Fulfillment::read_fields(r)?.into()
                }
                CryptoConditionType::RsaSha256 => {
                    RsaSha256Fulfillment::read_fields(r)?.into()
                }
                CryptoConditionType::Ed25519Sha256 => {
                    Ed25519Sha256Fulfillment::read_fields(r)?.into()
                }
            })
        })
    }
}

macro_rules! impl_variant_api {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $ty {
                /// Returns the condition this fulfillment satisfies.
                pub fn derive_condition(&self) -> &Condition {
                    FulfillmentVerifier::derived_condition(self)
                }

                /// Checks whether this fulfillment satisfies `condition` for
                /// `message`.
                pub fn verify(&self, condition: &Condition, message: &[u8]) -> bool {
                    FulfillmentVerifier::verify(self, condition, message)
                }
            }
        )*
    };
}

impl_variant_api! {
    PreimageSha256Fulfillment,
    PrefixSha256Fulfillment,
    ThresholdSha256Fulfillment,
    RsaSha256Fulfillment,
    Ed25519Sha256Fulfillment,
}

macro_rules! impl_from_variant {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Fulfillment {
                fn from(f: $ty) -> Self {
                    Fulfillment::$variant(f)
                }
            }
        )*
    };
}

impl_from_variant! {
    PreimageSha256 => PreimageSha256Fulfillment,
    PrefixSha256 => PrefixSha256Fulfillment,
    ThresholdSha256 => ThresholdSha256Fulfillment,
    RsaSha256 => RsaSha256Fulfillment,
    Ed25519Sha256 => Ed25519Sha256Fulfillment,
}
