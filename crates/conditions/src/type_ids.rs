//! The registry of crypto-condition types.
//!
//! This module defines the [`CryptoConditionType`] enum covering the five
//! standard types.  The table is a set of `const` lookups, so there is nothing
//! to initialize and nothing that can change at runtime; adding a type means
//! extending every exhaustive match below.

use core::fmt;
use std::str::FromStr;

use cryptocond_der::Tag;

use crate::constants::{
    FEATURE_ED25519, FEATURE_PREFIX, FEATURE_PREIMAGE, FEATURE_RSA_PSS, FEATURE_SHA256,
    FEATURE_THRESHOLD,
};
use crate::errors::{ConditionError, ConditionResult};

/// Crypto-condition type identifiers.
///
/// Each variant has a stable ordinal that doubles as its tag number in the
/// binary format and as its bit position in a subtypes set.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CryptoConditionType {
    /// SHA-256 hash preimage.
    PreimageSha256 = 0,

    /// Prefix prepended to the message before a subfulfillment checks it.
    PrefixSha256 = 1,

    /// m-of-n threshold over subconditions.
    ThresholdSha256 = 2,

    /// RSA-PSS signature with SHA-256.
    RsaSha256 = 3,

    /// Ed25519 signature, fingerprinted with SHA-256.
    Ed25519Sha256 = 4,
}

/// Every registered type, in ordinal order.
pub const ALL_TYPES: [CryptoConditionType; 5] = [
    CryptoConditionType::PreimageSha256,
    CryptoConditionType::PrefixSha256,
    CryptoConditionType::ThresholdSha256,
    CryptoConditionType::RsaSha256,
    CryptoConditionType::Ed25519Sha256,
];

impl CryptoConditionType {
    /// Converts the enum to its underlying ordinal.
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Returns the registered name, as used in condition URIs.
    pub const fn name(self) -> &'static str {
        match self {
            CryptoConditionType::PreimageSha256 => "preimage-sha-256",
            CryptoConditionType::PrefixSha256 => "prefix-sha-256",
            CryptoConditionType::ThresholdSha256 => "threshold-sha-256",
            CryptoConditionType::RsaSha256 => "rsa-sha-256",
            CryptoConditionType::Ed25519Sha256 => "ed25519-sha-256",
        }
    }

    /// Returns the feature bits a verifier needs to process this type.
    pub const fn feature_mask(self) -> u32 {
        match self {
            CryptoConditionType::PreimageSha256 => FEATURE_SHA256 | FEATURE_PREIMAGE,
            CryptoConditionType::PrefixSha256 => FEATURE_SHA256 | FEATURE_PREFIX,
            CryptoConditionType::ThresholdSha256 => FEATURE_SHA256 | FEATURE_THRESHOLD,
            CryptoConditionType::RsaSha256 => FEATURE_SHA256 | FEATURE_RSA_PSS,
            CryptoConditionType::Ed25519Sha256 => FEATURE_SHA256 | FEATURE_ED25519,
        }
    }

    /// Returns if conditions of this type carry a subtypes set.
    pub const fn is_compound(self) -> bool {
        matches!(
            self,
            CryptoConditionType::PrefixSha256 | CryptoConditionType::ThresholdSha256
        )
    }

    /// Looks up a type by ordinal.
    pub fn by_ordinal(ordinal: u64) -> ConditionResult<Self> {
        let byte =
            u8::try_from(ordinal).map_err(|_| ConditionError::UnsupportedTypeOrdinal(ordinal))?;
        Self::try_from(byte)
    }

    /// Looks up a type by its registered name.
    pub fn by_name(name: &str) -> ConditionResult<Self> {
        name.parse()
    }

    /// Tag of the `CHOICE` alternative for this type.
    pub(crate) const fn tag(self) -> Tag {
        Tag::context_constructed(self.as_u8())
    }
}

/// Returns the feature bits a verifier needs to process `ty`.
pub const fn feature_mask_of(ty: CryptoConditionType) -> u32 {
    ty.feature_mask()
}

impl From<CryptoConditionType> for u8 {
    fn from(ty: CryptoConditionType) -> Self {
        ty as u8
    }
}

impl TryFrom<u8> for CryptoConditionType {
    type Error = ConditionError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CryptoConditionType::PreimageSha256),
            1 => Ok(CryptoConditionType::PrefixSha256),
            2 => Ok(CryptoConditionType::ThresholdSha256),
            3 => Ok(CryptoConditionType::RsaSha256),
            4 => Ok(CryptoConditionType::Ed25519Sha256),
            invalid => Err(ConditionError::UnsupportedTypeOrdinal(invalid as u64)),
        }
    }
}

impl fmt::Display for CryptoConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CryptoConditionType {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_TYPES
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConditionError::UnsupportedTypeName(s.to_string()))
    }
}
