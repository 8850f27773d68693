//! Implementation for prefix fulfillments.

use cryptocond_der::{Decode, DerReader, DerWriter, Encode, Tag};
use tracing::debug;

use crate::condition::Condition;
use crate::constants::{MAX_COST, PREFIX_COST_OVERHEAD};
use crate::errors::{ConditionError, ConditionResult};
use crate::hashing::fingerprint_sequence;
use crate::type_ids::CryptoConditionType;
use crate::verifier::FulfillmentVerifier;

use super::Fulfillment;

const PREFIX_TAG: Tag = Tag::context(0);
const MAX_MESSAGE_LENGTH_TAG: Tag = Tag::context(1);
const SUBFULFILLMENT_TAG: Tag = Tag::context_constructed(2);

/// Fulfillment that prepends a fixed prefix to the message and hands the
/// result to a subfulfillment.
///
/// Messages longer than `max_message_length` are refused before the
/// subfulfillment sees them.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrefixSha256Fulfillment {
    prefix: Vec<u8>,
    max_message_length: u32,
    subfulfillment: Box<Fulfillment>,
    condition: Condition,
}

impl PrefixSha256Fulfillment {
    /// Creates a new instance wrapping `subfulfillment`.
    ///
    /// Fails if the resulting cost doesn't fit in the cost range.
    pub fn new(
        prefix: impl Into<Vec<u8>>,
        max_message_length: u32,
        subfulfillment: Fulfillment,
    ) -> ConditionResult<Self> {
        let prefix = prefix.into();
        let subcondition = subfulfillment.derive_condition();

        let cost = prefix.len() as u64
            + max_message_length as u64
            + subcondition.cost()
            + PREFIX_COST_OVERHEAD;
        if cost > MAX_COST {
            return Err(ConditionError::constraint(
                Self::TYPE,
                format!("cost {cost} exceeds maximum {MAX_COST}"),
            ));
        }

        let fingerprint = fingerprint_sequence(|w| {
            w.write_octet_string(PREFIX_TAG, &prefix);
            w.write_uint(MAX_MESSAGE_LENGTH_TAG, max_message_length as u64);
            w.write_constructed(SUBFULFILLMENT_TAG, |w| subcondition.write_der(w));
        });

        let subtypes = subcondition
            .subtypes()
            .with(subcondition.type_id())
            .without(Self::TYPE);

        let condition = Condition::new(Self::TYPE, fingerprint, cost, subtypes)?;

        Ok(Self {
            prefix,
            max_message_length,
            subfulfillment: Box::new(subfulfillment),
            condition,
        })
    }

    /// Gets the prefix.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// Gets the longest message this fulfillment accepts.
    pub fn max_message_length(&self) -> u32 {
        self.max_message_length
    }

    /// Gets the wrapped subfulfillment.
    pub fn subfulfillment(&self) -> &Fulfillment {
        &self.subfulfillment
    }

    pub(crate) fn read_fields(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        let prefix = r.read_octet_string(PREFIX_TAG)?;
        let max_message_length = r.read_uint(MAX_MESSAGE_LENGTH_TAG, u32::MAX as u64)? as u32;
        let subfulfillment = r.read_constructed(SUBFULFILLMENT_TAG, Fulfillment::read_der)?;
        Self::new(prefix, max_message_length, subfulfillment)
    }
}

impl FulfillmentVerifier for PrefixSha256Fulfillment {
    const TYPE: CryptoConditionType = CryptoConditionType::PrefixSha256;

    fn derived_condition(&self) -> &Condition {
        &self.condition
    }

    fn verify_message(&self, message: &[u8]) -> bool {
        if message.len() as u64 > self.max_message_length as u64 {
            debug!(
                ty = %Self::TYPE,
                len = message.len(),
                max = self.max_message_length,
                "message too long"
            );
            return false;
        }

        let mut prefixed = Vec::with_capacity(self.prefix.len() + message.len());
        prefixed.extend_from_slice(&self.prefix);
        prefixed.extend_from_slice(message);

        let sub = &self.subfulfillment;
        sub.verify(sub.derive_condition(), &prefixed)
    }
}

impl Encode for PrefixSha256Fulfillment {
    fn write_der(&self, w: &mut DerWriter) {
        w.write_constructed(Self::TYPE.tag(), |w| {
            w.write_octet_string(PREFIX_TAG, &self.prefix);
            w.write_uint(MAX_MESSAGE_LENGTH_TAG, self.max_message_length as u64);
            w.write_constructed(SUBFULFILLMENT_TAG, |w| self.subfulfillment.write_der(w));
        });
    }
}
