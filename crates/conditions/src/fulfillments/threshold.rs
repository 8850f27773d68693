//! Implementation for k-of-n threshold fulfillments.

use cryptocond_der::{Decode, DerReader, DerWriter, Encode, Tag};
use tracing::debug;

use crate::condition::Condition;
use crate::constants::{MAX_COST, MAX_THRESHOLD, THRESHOLD_SUBCONDITION_COST};
use crate::errors::{ConditionError, ConditionResult};
use crate::hashing::fingerprint_sequence;
use crate::type_ids::CryptoConditionType;
use crate::type_set::ConditionTypeSet;
use crate::verifier::FulfillmentVerifier;

use super::Fulfillment;

const SUBFULFILLMENTS_TAG: Tag = Tag::context_constructed(0);
const SUBCONDITIONS_TAG: Tag = Tag::context_constructed(1);

const FP_THRESHOLD_TAG: Tag = Tag::context(0);
const FP_SUBCONDITIONS_TAG: Tag = Tag::context_constructed(1);

/// Fulfillment of a k-of-n threshold.
///
/// Carries exactly `k` subfulfillments, plus the conditions of the branches
/// that weren't fulfilled.  Both lists are kept sorted by their encodings so
/// that the same logical proof has exactly one encoding, regardless of the
/// order the branches were supplied in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThresholdSha256Fulfillment {
    subfulfillments: Vec<Fulfillment>,
    subconditions: Vec<Condition>,
    condition: Condition,
}

impl ThresholdSha256Fulfillment {
    /// Creates a new instance requiring `threshold` of the branches.
    ///
    /// `subfulfillments` must contain exactly `threshold` entries, any more
    /// would allow several encodings of the same proof.
    pub fn new(
        threshold: usize,
        mut subfulfillments: Vec<Fulfillment>,
        mut subconditions: Vec<Condition>,
    ) -> ConditionResult<Self> {
        if threshold == 0 || threshold > MAX_THRESHOLD {
            return Err(ConditionError::constraint(
                Self::TYPE,
                format!("threshold {threshold} out of range 1..={MAX_THRESHOLD}"),
            ));
        }

        if subfulfillments.len() != threshold {
            return Err(ConditionError::constraint(
                Self::TYPE,
                format!(
                    "expected exactly {threshold} subfulfillments, got {}",
                    subfulfillments.len()
                ),
            ));
        }

        subfulfillments.sort_by_cached_key(|f| f.encode());
        subconditions.sort();

        let all_conds = subfulfillments
            .iter()
            .map(Fulfillment::derive_condition)
            .chain(subconditions.iter())
            .collect::<Vec<_>>();

        let cost = threshold_cost(threshold, &all_conds).ok_or_else(|| {
            ConditionError::constraint(Self::TYPE, format!("cost exceeds maximum {MAX_COST}"))
        })?;

        let subtypes = all_conds
            .iter()
            .fold(ConditionTypeSet::empty(), |acc, c| {
                acc.union(c.subtypes()).with(c.type_id())
            })
            .without(Self::TYPE);

        let fingerprint = fingerprint_sequence(|w| {
            w.write_uint(FP_THRESHOLD_TAG, threshold as u64);
            w.write_set_of(
                FP_SUBCONDITIONS_TAG,
                all_conds.iter().map(|c| c.to_der()).collect(),
            );
        });

        let condition = Condition::new(Self::TYPE, fingerprint, cost, subtypes)?;

        Ok(Self {
            subfulfillments,
            subconditions,
            condition,
        })
    }

    /// Gets the threshold, which is always the number of subfulfillments.
    pub fn threshold(&self) -> usize {
        self.subfulfillments.len()
    }

    /// Gets the subfulfillments, in canonical order.
    pub fn subfulfillments(&self) -> &[Fulfillment] {
        &self.subfulfillments
    }

    /// Gets the conditions of the unfulfilled branches, in canonical order.
    pub fn subconditions(&self) -> &[Condition] {
        &self.subconditions
    }

    pub(crate) fn read_fields(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        let subfulfillments = r.read_set_of(SUBFULFILLMENTS_TAG, Fulfillment::read_der)?;
        let subconditions = r.read_set_of(SUBCONDITIONS_TAG, Condition::read_der)?;
        Self::new(subfulfillments.len(), subfulfillments, subconditions)
    }
}

/// Sum of the `k` largest costs plus the per-branch overhead, or `None` if it
/// doesn't fit in the cost range.
fn threshold_cost(k: usize, conds: &[&Condition]) -> Option<u64> {
    let mut costs = conds.iter().map(|c| c.cost()).collect::<Vec<_>>();
    costs.sort_unstable_by(|a, b| b.cmp(a));

    let largest = costs
        .iter()
        .take(k)
        .try_fold(0u64, |acc, c| acc.checked_add(*c))?;
    let overhead = (conds.len() as u64).checked_mul(THRESHOLD_SUBCONDITION_COST)?;
    let cost = largest.checked_add(overhead)?;
    (cost <= MAX_COST).then_some(cost)
}

impl FulfillmentVerifier for ThresholdSha256Fulfillment {
    const TYPE: CryptoConditionType = CryptoConditionType::ThresholdSha256;

    fn derived_condition(&self) -> &Condition {
        &self.condition
    }

    fn verify_message(&self, message: &[u8]) -> bool {
        for (i, sub) in self.subfulfillments.iter().enumerate() {
            if !sub.verify(sub.derive_condition(), message) {
                debug!(ty = %Self::TYPE, index = i, "subfulfillment failed");
                return false;
            }
        }

        true
    }
}

impl Encode for ThresholdSha256Fulfillment {
    fn write_der(&self, w: &mut DerWriter) {
        w.write_constructed(Self::TYPE.tag(), |w| {
            w.write_set_of(
                SUBFULFILLMENTS_TAG,
                self.subfulfillments.iter().map(Fulfillment::encode).collect(),
            );
            w.write_set_of(
                SUBCONDITIONS_TAG,
                self.subconditions.iter().map(Condition::encode).collect(),
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::fulfillments::PreimageSha256Fulfillment;
    use crate::test_utils::{assert_error_kind, ed25519_fixture};

    fn preimage(data: &[u8]) -> Fulfillment {
        PreimageSha256Fulfillment::new(data).unwrap().into()
    }

    #[test]
    fn test_one_of_one_vector() {
        let f = ThresholdSha256Fulfillment::new(1, vec![preimage(b"")], Vec::new()).unwrap();
        let cond = f.derive_condition();

        assert_eq!(hex::encode(f.to_der()), "a208a004a0028000a100");
        assert_eq!(
            hex::encode(cond.fingerprint()),
            "b4b84136df48a71d73f4985c04c6767a778ecb65ba7023b4506823beee7631b9"
        );
        assert_eq!(cond.cost(), 1024);
        assert_eq!(
            cond.subtypes().iter().collect::<Vec<_>>(),
            [CryptoConditionType::PreimageSha256]
        );
        assert!(f.verify(cond, b""));
    }

    #[test]
    fn test_exact_subfulfillment_count() {
        let a = preimage(b"alpha");
        let b = preimage(b"bravo");
        let c = preimage(b"charlie");

        let too_few = ThresholdSha256Fulfillment::new(
            2,
            vec![a.clone()],
            vec![b.derive_condition().clone(), c.derive_condition().clone()],
        );
        assert_error_kind(too_few, ErrorKind::ConstraintViolation);

        let too_many =
            ThresholdSha256Fulfillment::new(2, vec![a.clone(), b.clone(), c.clone()], Vec::new());
        assert_error_kind(too_many, ErrorKind::ConstraintViolation);

        let exact =
            ThresholdSha256Fulfillment::new(2, vec![a, b], vec![c.derive_condition().clone()])
                .unwrap();
        assert_eq!(exact.threshold(), 2);
        assert!(exact.verify(exact.derive_condition(), b""));
    }

    #[test]
    fn test_threshold_range() {
        assert_error_kind(
            ThresholdSha256Fulfillment::new(0, Vec::new(), Vec::new()),
            ErrorKind::ConstraintViolation,
        );
    }

    #[test]
    fn test_submission_order_independent() {
        let a = preimage(b"alpha");
        let b: Fulfillment = ed25519_fixture(7, b"msg").into();
        let c = preimage(b"charlie").derive_condition().clone();
        let d = preimage(b"delta").derive_condition().clone();

        let x = ThresholdSha256Fulfillment::new(
            2,
            vec![a.clone(), b.clone()],
            vec![c.clone(), d.clone()],
        )
        .unwrap();
        let y = ThresholdSha256Fulfillment::new(2, vec![b, a], vec![d, c]).unwrap();

        assert_eq!(x, y);
        assert_eq!(x.to_der(), y.to_der());
    }

    #[test]
    fn test_cost_takes_largest_branches() {
        let small = preimage(&[0; 10]);
        let large = preimage(&[0; 100]).derive_condition().clone();

        let f = ThresholdSha256Fulfillment::new(1, vec![small], vec![large]).unwrap();
        assert_eq!(f.derive_condition().cost(), 100 + 2 * 1024);
    }

    #[test]
    fn test_subtypes_union() {
        let signed: Fulfillment = ed25519_fixture(1, b"").into();
        let nested =
            ThresholdSha256Fulfillment::new(1, vec![preimage(b"x")], Vec::new()).unwrap();

        let f = ThresholdSha256Fulfillment::new(
            1,
            vec![signed],
            vec![nested.derive_condition().clone()],
        )
        .unwrap();

        assert_eq!(
            f.derive_condition().subtypes().iter().collect::<Vec<_>>(),
            [
                CryptoConditionType::PreimageSha256,
                CryptoConditionType::Ed25519Sha256
            ]
        );
    }

    #[test]
    fn test_failing_branch_fails_threshold() {
        let signed: Fulfillment = ed25519_fixture(5, b"right").into();
        let f = ThresholdSha256Fulfillment::new(1, vec![signed], Vec::new()).unwrap();
        let cond = f.derive_condition();

        assert!(f.verify(cond, b"right"));
        assert!(!f.verify(cond, b"wrong"));
    }
}
