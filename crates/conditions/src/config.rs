//! Parsing configuration.

use cryptocond_der::{DecodeLimits, decode_buf_exact};
use tracing::trace;

use crate::condition::Condition;
use crate::errors::ConditionResult;
use crate::fulfillments::Fulfillment;

/// Config for parsing conditions and fulfillments from untrusted bytes.
///
/// The limits bound nesting depth and total input size.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ParseConfig {
    limits: DecodeLimits,
}

impl ParseConfig {
    /// Constructs a new instance.
    pub fn new(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    /// Gets the decoder limits.
    pub fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Attempts to parse a condition from a buffer containing exactly one
    /// encoded condition.
    pub fn try_parse_condition(&self, buf: &[u8]) -> ConditionResult<Condition> {
        decode_buf_exact(buf, &self.limits)
            .inspect_err(|e| trace!(%e, len = buf.len(), "rejected condition"))
    }

    /// Attempts to parse a fulfillment from a buffer containing exactly one
    /// encoded fulfillment.
    pub fn try_parse_fulfillment(&self, buf: &[u8]) -> ConditionResult<Fulfillment> {
        decode_buf_exact(buf, &self.limits)
            .inspect_err(|e| trace!(%e, len = buf.len(), "rejected fulfillment"))
    }
}
