//! Fulfillment verification trait definition.
//!
//! This module provides the [`FulfillmentVerifier`] trait that every
//! fulfillment type implements.  The dispatch over all types lives on
//! [`crate::Fulfillment`].

use tracing::debug;

use crate::condition::Condition;
use crate::type_ids::CryptoConditionType;

/// Base trait for type-specific fulfillment logic.
///
/// Verification always has two halves: the condition derived from the
/// fulfillment must equal the one being checked, and the type-specific check
/// against the message must pass.  Compound types recurse through their
/// children's implementations of this same trait.
pub(crate) trait FulfillmentVerifier {
    /// The type this implementation handles.
    const TYPE: CryptoConditionType;

    /// The condition this fulfillment satisfies, computed at construction.
    fn derived_condition(&self) -> &Condition;

    /// Type-specific check against a message, assuming the condition matched.
    fn verify_message(&self, message: &[u8]) -> bool;

    /// Verifies that this fulfillment satisfies `condition` for `message`.
    fn verify(&self, condition: &Condition, message: &[u8]) -> bool {
        if self.derived_condition() != condition {
            debug!(ty = %Self::TYPE, "derived condition does not match");
            return false;
        }

        self.verify_message(message)
    }
}
