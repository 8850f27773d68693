//! Sets of condition types, as carried in the subtypes field.

use core::fmt;

use crate::errors::{ConditionError, ConditionResult};
use crate::type_ids::{ALL_TYPES, CryptoConditionType};

/// Bits that correspond to registered types.
const KNOWN_BITS: u32 = (1 << ALL_TYPES.len()) - 1;

/// A set of condition types, stored as a bitmask indexed by ordinal.
#[derive(Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ConditionTypeSet(u32);

impl ConditionTypeSet {
    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Builds a set from a bitmask, rejecting bits for unregistered types.
    pub fn from_bits(bits: u32) -> ConditionResult<Self> {
        let unknown = bits & !KNOWN_BITS;
        if unknown != 0 {
            return Err(ConditionError::UnsupportedTypeOrdinal(
                unknown.trailing_zeros() as u64,
            ));
        }
        Ok(Self(bits))
    }

    /// Returns the raw bitmask.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns if the set has no members.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of members.
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns if `ty` is a member.
    pub const fn contains(self, ty: CryptoConditionType) -> bool {
        self.0 & (1 << ty.as_u8()) != 0
    }

    /// Returns a copy with `ty` added.
    pub const fn with(self, ty: CryptoConditionType) -> Self {
        Self(self.0 | (1 << ty.as_u8()))
    }

    /// Returns a copy with `ty` removed.
    pub const fn without(self, ty: CryptoConditionType) -> Self {
        Self(self.0 & !(1 << ty.as_u8()))
    }

    /// Returns the union of two sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Iterates the members in ordinal order.
    pub fn iter(self) -> impl Iterator<Item = CryptoConditionType> {
        ALL_TYPES.into_iter().filter(move |ty| self.contains(*ty))
    }

    /// Returns the union of the feature masks of all members.
    pub fn required_features(self) -> u32 {
        self.iter().fold(0, |acc, ty| acc | ty.feature_mask())
    }
}

impl FromIterator<CryptoConditionType> for ConditionTypeSet {
    fn from_iter<I: IntoIterator<Item = CryptoConditionType>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Debug for ConditionTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for ConditionTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ty) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
