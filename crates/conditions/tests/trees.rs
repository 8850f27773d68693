//! Randomly shaped fulfillment trees must survive a decode and verify
//! against their own condition.

#![expect(unused_crate_dependencies, reason = "shared dev-dependencies")]

use cryptocond::{
    Ed25519Sha256Fulfillment, Fulfillment, PrefixSha256Fulfillment, PreimageSha256Fulfillment,
    ThresholdSha256Fulfillment, parse_condition, parse_fulfillment,
};
use ed25519_dalek::{Signer, SigningKey};
use proptest::prelude::*;

/// Shape of a tree, turned into a fulfillment once the message is known.
#[derive(Clone, Debug)]
enum Shape {
    Preimage(Vec<u8>),
    Ed25519(u8),
    /// Prefix, and how much room to leave above the message length.
    Prefix(Vec<u8>, u32, Box<Shape>),
    /// Fulfilled branches, and preimages of the unfulfilled ones.
    Threshold(Vec<Shape>, Vec<Vec<u8>>),
}

fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..max)
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        bytes(16).prop_map(Shape::Preimage),
        any::<u8>().prop_map(Shape::Ed25519),
    ];

    leaf.prop_recursive(3, 12, 3, |inner| {
        prop_oneof![
            (bytes(8), 0u32..16, inner.clone())
                .prop_map(|(prefix, slack, sub)| Shape::Prefix(prefix, slack, Box::new(sub))),
            (
                prop::collection::vec(inner, 1..4),
                prop::collection::vec(bytes(8), 0..3)
            )
                .prop_map(|(subs, rest)| Shape::Threshold(subs, rest)),
        ]
    })
}

fn preimage(data: &[u8]) -> Fulfillment {
    PreimageSha256Fulfillment::new(data).unwrap().into()
}

/// Builds the fulfillment for `shape`, signing whatever message reaches each
/// Ed25519 leaf.
fn build(shape: &Shape, message: &[u8]) -> Fulfillment {
    match shape {
        Shape::Preimage(data) => preimage(data),
        Shape::Ed25519(seed) => {
            let sk = SigningKey::from_bytes(&[*seed; 32]);
            let sig = sk.sign(message);
            Ed25519Sha256Fulfillment::new(sk.verifying_key().to_bytes(), sig.to_bytes()).into()
        }
        Shape::Prefix(prefix, slack, sub) => {
            let inner = [prefix.as_slice(), message].concat();
            let max_len = message.len() as u32 + slack;
            PrefixSha256Fulfillment::new(prefix.clone(), max_len, build(sub, &inner))
                .unwrap()
                .into()
        }
        Shape::Threshold(subs, rest) => {
            let fulfilled = subs.iter().map(|s| build(s, message)).collect::<Vec<_>>();
            let unfulfilled = rest
                .iter()
                .map(|data| preimage(data).derive_condition().clone())
                .collect();
            ThresholdSha256Fulfillment::new(fulfilled.len(), fulfilled, unfulfilled)
                .unwrap()
                .into()
        }
    }
}

proptest! {
    #[test]
    fn proptest_tree_roundtrip_and_verify(s in shape(), msg in bytes(32)) {
        let f = build(&s, &msg);
        let cond = f.derive_condition();

        let back = parse_fulfillment(&f.encode()).unwrap();
        prop_assert_eq!(&back, &f);
        prop_assert_eq!(&parse_condition(&cond.encode()).unwrap(), cond);

        prop_assert!(f.verify(cond, &msg));
        prop_assert!(back.verify(cond, &msg));
    }
}
