//! Numeric constants fixed by the crypto-conditions format.

/// Length of every fingerprint, the SHA-256 output size.
pub const FINGERPRINT_LEN: usize = 32;

/// Largest cost a condition may declare.
pub const MAX_COST: u64 = u32::MAX as u64;

/// Fixed cost added by a prefix condition on top of its parts.
pub const PREFIX_COST_OVERHEAD: u64 = 1024;

/// Cost charged per subcondition of a threshold condition.
pub const THRESHOLD_SUBCONDITION_COST: u64 = 1024;

/// Largest threshold a threshold condition may require.
pub const MAX_THRESHOLD: usize = 65535;

/// Smallest accepted RSA modulus, in bytes.
pub const RSA_MIN_MODULUS_LEN: usize = 128;

/// Largest accepted RSA modulus, in bytes.
pub const RSA_MAX_MODULUS_LEN: usize = 512;

/// RSA public exponent, not carried on the wire.
pub const RSA_PUBLIC_EXPONENT: u32 = 65537;

/// PSS salt length, pinned to the digest length.
pub const RSA_PSS_SALT_LEN: usize = 32;

/// Cost of every Ed25519 condition.
pub const ED25519_COST: u64 = 131072;

/// Ed25519 public key size in bytes.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;

/// Ed25519 signature size in bytes.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Feature bit: SHA-256 digests.
pub const FEATURE_SHA256: u32 = 0x01;

/// Feature bit: preimage matching.
pub const FEATURE_PREIMAGE: u32 = 0x02;

/// Feature bit: message prefixing.
pub const FEATURE_PREFIX: u32 = 0x04;

/// Feature bit: m-of-n thresholds.
pub const FEATURE_THRESHOLD: u32 = 0x08;

/// Feature bit: RSA-PSS signatures.
pub const FEATURE_RSA_PSS: u32 = 0x10;

/// Feature bit: Ed25519 signatures.
pub const FEATURE_ED25519: u32 = 0x20;
