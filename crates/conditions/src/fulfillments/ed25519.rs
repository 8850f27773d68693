//! Implementation for Ed25519 signature fulfillments.

use cryptocond_der::{DerReader, DerWriter, Encode, Tag};
use ed25519_dalek::{Signature, VerifyingKey};
use tracing::debug;

use crate::condition::Condition;
use crate::constants::{ED25519_COST, ED25519_PUBLIC_KEY_LEN, ED25519_SIGNATURE_LEN};
use crate::errors::{ConditionError, ConditionResult};
use crate::hashing::fingerprint_sequence;
use crate::type_ids::CryptoConditionType;
use crate::type_set::ConditionTypeSet;
use crate::verifier::FulfillmentVerifier;

const PUBLIC_KEY_TAG: Tag = Tag::context(0);
const SIGNATURE_TAG: Tag = Tag::context(1);

/// Ed25519 signature fulfillment.
///
/// This fulfillment provides:
/// - public key: 32-byte compressed Edwards point
/// - signature: 64-byte signature over the message
///
/// The key bytes are only decompressed at verification time, so an invalid
/// point decodes fine and then fails to verify.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ed25519Sha256Fulfillment {
    public_key: [u8; ED25519_PUBLIC_KEY_LEN],
    signature: [u8; ED25519_SIGNATURE_LEN],
    condition: Condition,
}

impl Ed25519Sha256Fulfillment {
    /// Creates a new instance from a public key and signature.
    pub fn new(
        public_key: [u8; ED25519_PUBLIC_KEY_LEN],
        signature: [u8; ED25519_SIGNATURE_LEN],
    ) -> Self {
        let fingerprint =
            fingerprint_sequence(|w| w.write_octet_string(PUBLIC_KEY_TAG, &public_key));

        Self {
            public_key,
            signature,
            condition: Condition::new_unchecked(
                Self::TYPE,
                fingerprint,
                ED25519_COST,
                ConditionTypeSet::empty(),
            ),
        }
    }

    /// Like [`Self::new`], taking slices and checking their lengths.
    pub fn from_slices(public_key: &[u8], signature: &[u8]) -> ConditionResult<Self> {
        let public_key = <[u8; ED25519_PUBLIC_KEY_LEN]>::try_from(public_key).map_err(|_| {
            ConditionError::constraint(
                Self::TYPE,
                format!(
                    "expected {ED25519_PUBLIC_KEY_LEN}-byte public key, got {} bytes",
                    public_key.len()
                ),
            )
        })?;
        let signature = <[u8; ED25519_SIGNATURE_LEN]>::try_from(signature).map_err(|_| {
            ConditionError::constraint(
                Self::TYPE,
                format!(
                    "expected {ED25519_SIGNATURE_LEN}-byte signature, got {} bytes",
                    signature.len()
                ),
            )
        })?;
        Ok(Self::new(public_key, signature))
    }

    /// Gets the public key bytes.
    pub fn public_key(&self) -> &[u8; ED25519_PUBLIC_KEY_LEN] {
        &self.public_key
    }

    /// Gets the signature bytes.
    pub fn signature(&self) -> &[u8; ED25519_SIGNATURE_LEN] {
        &self.signature
    }

    pub(crate) fn read_fields(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        let public_key = r.read_fixed(PUBLIC_KEY_TAG, "public key")?;
        let signature = r.read_fixed(SIGNATURE_TAG, "signature")?;
        Ok(Self::new(public_key, signature))
    }
}

impl FulfillmentVerifier for Ed25519Sha256Fulfillment {
    const TYPE: CryptoConditionType = CryptoConditionType::Ed25519Sha256;

    fn derived_condition(&self) -> &Condition {
        &self.condition
    }

    fn verify_message(&self, message: &[u8]) -> bool {
        let key = match VerifyingKey::from_bytes(&self.public_key) {
            Ok(key) => key,
            Err(e) => {
                debug!(ty = %Self::TYPE, %e, "invalid public key");
                return false;
            }
        };

        let signature = Signature::from_bytes(&self.signature);
        match key.verify_strict(message, &signature) {
            Ok(()) => true,
            Err(e) => {
                debug!(ty = %Self::TYPE, %e, "signature rejected");
                false
            }
        }
    }
}

impl Encode for Ed25519Sha256Fulfillment {
    fn write_der(&self, w: &mut DerWriter) {
        w.write_constructed(Self::TYPE.tag(), |w| {
            w.write_octet_string(PUBLIC_KEY_TAG, &self.public_key);
            w.write_octet_string(SIGNATURE_TAG, &self.signature);
        });
    }
}
