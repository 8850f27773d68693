//! Implementation for RSA-PSS SHA-256 signature fulfillments.

use cryptocond_der::{DerReader, DerWriter, Encode, Tag};
use rsa::{BigUint, Pss, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::condition::Condition;
use crate::constants::{
    RSA_MAX_MODULUS_LEN, RSA_MIN_MODULUS_LEN, RSA_PSS_SALT_LEN, RSA_PUBLIC_EXPONENT,
};
use crate::errors::{ConditionError, ConditionResult};
use crate::hashing::fingerprint_sequence;
use crate::type_ids::CryptoConditionType;
use crate::type_set::ConditionTypeSet;
use crate::verifier::FulfillmentVerifier;

const MODULUS_TAG: Tag = Tag::context(0);
const SIGNATURE_TAG: Tag = Tag::context(1);

/// RSA-PSS signature fulfillment.
///
/// This fulfillment provides:
/// - modulus: big-endian RSA modulus, 128 to 512 bytes, no leading zero
/// - signature: PSS signature over the message, as long as the modulus
///
/// The public exponent is always 65537.  SHA-256 is used for the message
/// hash and MGF1, and the salt length is pinned to 32 bytes so a signature
/// has only one valid form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RsaSha256Fulfillment {
    modulus: Vec<u8>,
    signature: Vec<u8>,
    condition: Condition,
}

impl RsaSha256Fulfillment {
    /// Creates a new instance, checking the modulus and signature sizes.
    pub fn new(
        modulus: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
    ) -> ConditionResult<Self> {
        let modulus = modulus.into();
        let signature = signature.into();

        if !(RSA_MIN_MODULUS_LEN..=RSA_MAX_MODULUS_LEN).contains(&modulus.len()) {
            return Err(ConditionError::constraint(
                Self::TYPE,
                format!(
                    "modulus of {} bytes outside {RSA_MIN_MODULUS_LEN}..={RSA_MAX_MODULUS_LEN}",
                    modulus.len()
                ),
            ));
        }

        if modulus[0] == 0 {
            return Err(ConditionError::constraint(
                Self::TYPE,
                "modulus has a leading zero byte",
            ));
        }

        if signature.len() != modulus.len() {
            return Err(ConditionError::constraint(
                Self::TYPE,
                format!(
                    "signature of {} bytes does not match {}-byte modulus",
                    signature.len(),
                    modulus.len()
                ),
            ));
        }

        let fingerprint = fingerprint_sequence(|w| w.write_octet_string(MODULUS_TAG, &modulus));
        let cost = (modulus.len() as u64).pow(2);
        let condition = Condition::new(Self::TYPE, fingerprint, cost, ConditionTypeSet::empty())?;

        Ok(Self {
            modulus,
            signature,
            condition,
        })
    }

    /// Gets the modulus bytes.
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Gets the signature bytes.
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    pub(crate) fn read_fields(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        let modulus = r.read_octet_string(MODULUS_TAG)?;
        let signature = r.read_octet_string(SIGNATURE_TAG)?;
        Self::new(modulus, signature)
    }
}

impl FulfillmentVerifier for RsaSha256Fulfillment {
    const TYPE: CryptoConditionType = CryptoConditionType::RsaSha256;

    fn derived_condition(&self) -> &Condition {
        &self.condition
    }

    fn verify_message(&self, message: &[u8]) -> bool {
        let key = match RsaPublicKey::new(
            BigUint::from_bytes_be(&self.modulus),
            BigUint::from(RSA_PUBLIC_EXPONENT),
        ) {
            Ok(key) => key,
            Err(e) => {
                debug!(ty = %Self::TYPE, %e, "unusable public key");
                return false;
            }
        };

        let hashed = Sha256::digest(message);
        let scheme = Pss::new_with_salt::<Sha256>(RSA_PSS_SALT_LEN);
        match key.verify(scheme, &hashed, &self.signature) {
            Ok(()) => true,
            Err(e) => {
                debug!(ty = %Self::TYPE, %e, "signature rejected");
                false
            }
        }
    }
}

impl Encode for RsaSha256Fulfillment {
    fn write_der(&self, w: &mut DerWriter) {
        w.write_constructed(Self::TYPE.tag(), |w| {
            w.write_octet_string(MODULUS_TAG, &self.modulus);
            w.write_octet_string(SIGNATURE_TAG, &self.signature);
        });
    }
}
