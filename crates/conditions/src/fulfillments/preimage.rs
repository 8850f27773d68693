//! Implementation for SHA-256 preimage fulfillments.

use cryptocond_der::{DerReader, DerWriter, Encode, Tag};

use crate::condition::Condition;
use crate::constants::MAX_COST;
use crate::errors::{ConditionError, ConditionResult};
use crate::hashing::sha256;
use crate::type_ids::CryptoConditionType;
use crate::type_set::ConditionTypeSet;
use crate::verifier::FulfillmentVerifier;

const PREIMAGE_TAG: Tag = Tag::context(0);

/// Fulfillment revealing the preimage of a SHA-256 fingerprint.
///
/// The message is never looked at, anyone who learns the preimage can
/// fulfill the condition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PreimageSha256Fulfillment {
    preimage: Vec<u8>,
    condition: Condition,
}

impl PreimageSha256Fulfillment {
    /// Creates a new instance from the preimage.
    ///
    /// Fails only if the preimage is longer than the largest representable
    /// cost.
    pub fn new(preimage: impl Into<Vec<u8>>) -> ConditionResult<Self> {
        let preimage = preimage.into();
        let cost = preimage.len() as u64;
        if cost > MAX_COST {
            return Err(ConditionError::constraint(
                Self::TYPE,
                format!("preimage of {cost} bytes exceeds maximum cost"),
            ));
        }

        let condition = Condition::new(
            Self::TYPE,
            sha256(&preimage),
            cost,
            ConditionTypeSet::empty(),
        )?;

        Ok(Self {
            preimage,
            condition,
        })
    }

    /// Gets the preimage.
    pub fn preimage(&self) -> &[u8] {
        &self.preimage
    }

    pub(crate) fn read_fields(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        let preimage = r.read_octet_string(PREIMAGE_TAG)?;
        Self::new(preimage)
    }
}

impl FulfillmentVerifier for PreimageSha256Fulfillment {
    const TYPE: CryptoConditionType = CryptoConditionType::PreimageSha256;

    fn derived_condition(&self) -> &Condition {
        &self.condition
    }

    fn verify_message(&self, _message: &[u8]) -> bool {
        true
    }
}

impl Encode for PreimageSha256Fulfillment {
    fn write_der(&self, w: &mut DerWriter) {
        w.write_constructed(Self::TYPE.tag(), |w| {
            w.write_octet_string(PREIMAGE_TAG, &self.preimage);
        });
    }
}
