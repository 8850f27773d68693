//! Test utilities shared by the unit tests of the fulfillment types.
//!
//! The RSA vectors come from a fixed 1024-bit key so no test has to generate
//! keys.

use core::fmt::Debug;

use ed25519_dalek::{Signer, SigningKey};

use crate::errors::{ConditionResult, ErrorKind};
use crate::fulfillments::{Ed25519Sha256Fulfillment, RsaSha256Fulfillment};

/// Message signed by both RSA signatures below.
pub(crate) const RSA_MESSAGE: &[u8] = b"Doc Brown";

/// 1024-bit modulus, big-endian.
pub(crate) const RSA_MODULUS_HEX: &str = "c7af4c2a2656c3f93474a86e9a14e0fa28eb8e8e8ee2d5d9289fde3a4abc1c5491a7b53d48e38722435590234c510f01a569902743d0d8d2bbcd1964ef151ac8c648677aefc9389e085d0612f21f8d5e30115b8053c1842904617e5aa1ec02c444451ca927e6d38d96d348ba2d8d3632206db9366c90e62ab75555bd0f277a27";

/// PSS signature over [`RSA_MESSAGE`] with a 32-byte salt.
pub(crate) const RSA_SIGNATURE_HEX: &str = "2f5779957ad7d2de026d74f70cbc2779ff650b28c8744a7e9ff1090ccb3d5bbb2f0fd1bec84ac3c8f851684e348f5a75ef3d03a44415131ccfe07523e0c0571abb36644780d06a17d329352697a31dda10a55eec1b6167bba2351be4b586848cd1bb78e8797b5fbc578fc998b0bde68b98069178cbdd5c21888bec5201112424";

/// PSS signature over [`RSA_MESSAGE`] with an empty salt.
pub(crate) const RSA_SIGNATURE_NO_SALT_HEX: &str = "995db12e73c6568ff7c048194091b5f77570d3c5b30796ee93072120447c087a20b9b9a2c4fbbe391273c46c0e5a62f259e5b5f6ce33692a053d4b48b85ca4f21733a4ddf9d079faf0edb1fcea3e23a36ac3c5ceeb8ccf20af8482977ea0d05793ac7b0e1a879d7a6f0f087e4fb1426befe2426632429795a250cbf946d039cc";

/// Asserts that a result is an error of the given kind.
pub(crate) fn assert_error_kind<T: Debug>(result: ConditionResult<T>, expected: ErrorKind) {
    let err = result.unwrap_err();
    assert_eq!(err.kind(), expected, "unexpected error: {err:?}");
}

/// Builds the RSA fulfillment for [`RSA_MESSAGE`].
pub(crate) fn rsa_fixture() -> RsaSha256Fulfillment {
    let modulus = hex::decode(RSA_MODULUS_HEX).unwrap();
    let signature = hex::decode(RSA_SIGNATURE_HEX).unwrap();
    RsaSha256Fulfillment::new(modulus, signature).unwrap()
}

/// Signs `message` with a key derived from a repeated seed byte.
pub(crate) fn ed25519_fixture(seed: u8, message: &[u8]) -> Ed25519Sha256Fulfillment {
    let sk = SigningKey::from_bytes(&[seed; 32]);
    let sig = sk.sign(message);
    Ed25519Sha256Fulfillment::new(sk.verifying_key().to_bytes(), sig.to_bytes())
}
