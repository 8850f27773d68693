//! Conditions, the published half of a crypto-condition.

use core::cmp::Ordering;
use core::fmt;

use cryptocond_der::{Decode, DerError, DerReader, DerWriter, Encode, Tag, encode_to_vec};

use crate::constants::{FINGERPRINT_LEN, MAX_COST};
use crate::errors::{ConditionError, ConditionResult};
use crate::hashing::Fingerprint;
use crate::type_ids::CryptoConditionType;
use crate::type_set::ConditionTypeSet;

const FINGERPRINT_TAG: Tag = Tag::context(0);
const COST_TAG: Tag = Tag::context(1);
const SUBTYPES_TAG: Tag = Tag::context(2);

/// A condition: the type, fingerprint and cost a fulfillment has to match.
///
/// Equality is structural.  Two conditions are equal exactly when their
/// encodings are, and ordering follows the encoded bytes, which is the order
/// conditions take inside a threshold.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Condition {
    ty: CryptoConditionType,
    fingerprint: Fingerprint,
    cost: u64,
    /// Always empty for simple types.
    subtypes: ConditionTypeSet,
}

impl Condition {
    /// Creates a new condition, checking the cost bound and that only
    /// compound types carry subtypes.
    pub fn new(
        ty: CryptoConditionType,
        fingerprint: Fingerprint,
        cost: u64,
        subtypes: ConditionTypeSet,
    ) -> ConditionResult<Self> {
        if cost > MAX_COST {
            return Err(ConditionError::constraint(
                ty,
                format!("cost {cost} exceeds maximum {MAX_COST}"),
            ));
        }

        if !ty.is_compound() && !subtypes.is_empty() {
            return Err(ConditionError::constraint(
                ty,
                "simple condition types have no subtypes",
            ));
        }

        Ok(Self {
            ty,
            fingerprint,
            cost,
            subtypes,
        })
    }

    /// Constructs a new instance without validating it.
    ///
    /// Callers must pass a cost within [`MAX_COST`] and empty subtypes for
    /// simple types.
    pub(crate) fn new_unchecked(
        ty: CryptoConditionType,
        fingerprint: Fingerprint,
        cost: u64,
        subtypes: ConditionTypeSet,
    ) -> Self {
        debug_assert!(cost <= MAX_COST);
        debug_assert!(ty.is_compound() || subtypes.is_empty());
        Self {
            ty,
            fingerprint,
            cost,
            subtypes,
        }
    }

    /// Like [`Self::new`], taking the fingerprint as a slice and checking its
    /// length.
    pub fn from_fingerprint_slice(
        ty: CryptoConditionType,
        fingerprint: &[u8],
        cost: u64,
        subtypes: ConditionTypeSet,
    ) -> ConditionResult<Self> {
        let fingerprint = Fingerprint::try_from(fingerprint).map_err(|_| {
            ConditionError::constraint(
                ty,
                format!(
                    "expected {FINGERPRINT_LEN}-byte fingerprint, got {} bytes",
                    fingerprint.len()
                ),
            )
        })?;
        Self::new(ty, fingerprint, cost, subtypes)
    }

    /// Gets the condition type.
    pub fn type_id(&self) -> CryptoConditionType {
        self.ty
    }

    /// Gets the fingerprint.
    pub fn fingerprint(&self) -> &Fingerprint {
        &self.fingerprint
    }

    /// Gets the cost.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Gets the subtypes, empty for simple types.
    pub fn subtypes(&self) -> ConditionTypeSet {
        self.subtypes
    }

    /// Encodes the condition into its canonical bytes.
    pub fn encode(&self) -> Vec<u8> {
        encode_to_vec(self)
    }

    /// Decodes a condition from canonical bytes with the default limits.
    pub fn from_bytes(buf: &[u8]) -> ConditionResult<Self> {
        crate::parse_condition(buf)
    }

    /// Decodes the fields inside the `CHOICE` wrapper once the type is known.
    pub(crate) fn read_fields(
        ty: CryptoConditionType,
        r: &mut DerReader<'_>,
    ) -> ConditionResult<Self> {
        let fingerprint = r.read_fixed(FINGERPRINT_TAG, "fingerprint")?;
        let cost = r.read_uint(COST_TAG, MAX_COST)?;
        let subtypes = if ty.is_compound() {
            ConditionTypeSet::from_bits(r.read_named_bits(SUBTYPES_TAG)?)?
        } else {
            ConditionTypeSet::empty()
        };
        Self::new(ty, fingerprint, cost, subtypes)
    }
}

impl Encode for Condition {
    fn write_der(&self, w: &mut DerWriter) {
        w.write_constructed(self.ty.tag(), |w| {
            w.write_octet_string(FINGERPRINT_TAG, &self.fingerprint);
            w.write_uint(COST_TAG, self.cost);
            if self.ty.is_compound() {
                w.write_named_bits(SUBTYPES_TAG, self.subtypes.bits());
            }
        });
    }
}

impl Decode for Condition {
    type Error = ConditionError;

    fn read_der(r: &mut DerReader<'_>) -> ConditionResult<Self> {
        r.read_any_constructed(|tag, r| {
            if !tag.is_context_specific() {
                return Err(DerError::UnrecognizedTag(tag).into());
            }
            let ty = CryptoConditionType::try_from(tag.number())?;
            Self::read_fields(ty, r)
        })
    }
}

impl Ord for Condition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_der().cmp(&other.to_der())
    }
}

impl PartialOrd for Condition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.ty)?;
        for b in &self.fingerprint {
            write!(f, "{b:02x}")?;
        }
        write!(f, ":{}", self.cost)?;
        if self.ty.is_compound() {
            write!(f, ":{}", self.subtypes)?;
        }
        Ok(())
    }
}
