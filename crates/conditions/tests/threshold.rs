//! Threshold semantics and canonical ordering across encodings.

#![expect(unused_crate_dependencies, reason = "shared dev-dependencies")]

use cryptocond::{
    Condition, CryptoConditionType, Ed25519Sha256Fulfillment, ErrorKind, Fulfillment,
    PreimageSha256Fulfillment, ThresholdSha256Fulfillment, parse_fulfillment,
};
use cryptocond_der::{DerWriter, Tag};
use ed25519_dalek::{Signer, SigningKey};

const MESSAGE: &[u8] = b"release escrow 42";

fn signed(seed: u8, message: &[u8]) -> Fulfillment {
    let sk = SigningKey::from_bytes(&[seed; 32]);
    let sig = sk.sign(message);
    Ed25519Sha256Fulfillment::new(sk.verifying_key().to_bytes(), sig.to_bytes()).into()
}

fn preimage(data: &[u8]) -> Fulfillment {
    PreimageSha256Fulfillment::new(data).unwrap().into()
}

fn cond(f: &Fulfillment) -> Condition {
    f.derive_condition().clone()
}

/// Three branches: two signers and a preimage.
fn branches() -> [Fulfillment; 3] {
    [signed(1, MESSAGE), signed(2, MESSAGE), preimage(b"backup key")]
}

/// Writes a threshold fulfillment with the sets in exactly the given order.
fn raw_threshold(fulfillments: &[&[u8]], conditions: &[&[u8]]) -> Vec<u8> {
    let mut w = DerWriter::new();
    w.write_constructed(Tag::context_constructed(2), |w| {
        w.write_constructed(Tag::context_constructed(0), |w| {
            for f in fulfillments {
                w.write_raw(f);
            }
        });
        w.write_constructed(Tag::context_constructed(1), |w| {
            for c in conditions {
                w.write_raw(c);
            }
        });
    });
    w.into_vec()
}

#[test]
fn test_two_of_three_any_pair() {
    let [a, b, c] = branches();
    let reference = ThresholdSha256Fulfillment::new(2, vec![a.clone(), b.clone()], vec![cond(&c)])
        .unwrap();
    let target = reference.derive_condition().clone();

    let pairs = [
        (a.clone(), b.clone(), cond(&c)),
        (a.clone(), c.clone(), cond(&b)),
        (b.clone(), c.clone(), cond(&a)),
    ];
    for (x, y, rest) in pairs {
        let f: Fulfillment = ThresholdSha256Fulfillment::new(2, vec![x, y], vec![rest])
            .unwrap()
            .into();
        assert_eq!(f.derive_condition(), &target);
        assert!(f.verify(&target, MESSAGE));
        assert!(!f.verify(&target, b"release escrow 43"));
    }

    assert_eq!(target.type_id(), CryptoConditionType::ThresholdSha256);
    assert_eq!(
        target.subtypes().iter().collect::<Vec<_>>(),
        [
            CryptoConditionType::PreimageSha256,
            CryptoConditionType::Ed25519Sha256
        ]
    );
}

#[test]
fn test_wrong_count_rejected_at_construction() {
    let [a, b, c] = branches();

    let one = ThresholdSha256Fulfillment::new(2, vec![a.clone()], vec![cond(&b), cond(&c)]);
    assert_eq!(one.unwrap_err().kind(), ErrorKind::ConstraintViolation);

    let three = ThresholdSha256Fulfillment::new(2, vec![a, b, c], Vec::new());
    assert_eq!(three.unwrap_err().kind(), ErrorKind::ConstraintViolation);
}

#[test]
fn test_wrong_count_on_wire_never_verifies() {
    let [a, b, c] = branches();
    let target = ThresholdSha256Fulfillment::new(2, vec![a.clone(), b.clone()], vec![cond(&c)])
        .unwrap()
        .derive_condition()
        .clone();

    // On the wire the threshold is the number of subfulfillments, so extra or
    // missing ones describe a different condition.
    let over = ThresholdSha256Fulfillment::new(3, vec![a.clone(), b.clone(), c.clone()], Vec::new())
        .unwrap();
    let over = parse_fulfillment(&Fulfillment::from(over).encode()).unwrap();
    assert_ne!(over.derive_condition(), &target);
    assert!(!over.verify(&target, MESSAGE));

    let under = ThresholdSha256Fulfillment::new(1, vec![a], vec![cond(&b), cond(&c)]).unwrap();
    let under = parse_fulfillment(&Fulfillment::from(under).encode()).unwrap();
    assert_ne!(under.derive_condition(), &target);
    assert!(!under.verify(&target, MESSAGE));
}

#[test]
fn test_submission_order_irrelevant() {
    let [a, b, c] = branches();
    let d = cond(&preimage(b"fourth"));

    let x = ThresholdSha256Fulfillment::new(
        2,
        vec![a.clone(), c.clone()],
        vec![cond(&b), d.clone()],
    )
    .unwrap();
    let y = ThresholdSha256Fulfillment::new(2, vec![c, a], vec![d, cond(&b)]).unwrap();

    assert_eq!(
        Fulfillment::from(x).encode(),
        Fulfillment::from(y).encode()
    );
}

#[test]
fn test_unsorted_sets_rejected() {
    let [a, b, c] = branches();
    let mut fuls = [a.encode(), c.encode()];
    fuls.sort();
    let mut conds = [cond(&b).encode(), cond(&preimage(b"fourth")).encode()];
    conds.sort();

    let sorted = raw_threshold(&[&fuls[0], &fuls[1]], &[&conds[0], &conds[1]]);
    let f = parse_fulfillment(&sorted).unwrap();
    assert_eq!(f.encode(), sorted);
    assert!(f.verify(f.derive_condition(), MESSAGE));

    let bad_fuls = raw_threshold(&[&fuls[1], &fuls[0]], &[&conds[0], &conds[1]]);
    assert_eq!(
        parse_fulfillment(&bad_fuls).unwrap_err().kind(),
        ErrorKind::MalformedEncoding
    );

    let bad_conds = raw_threshold(&[&fuls[0], &fuls[1]], &[&conds[1], &conds[0]]);
    assert_eq!(
        parse_fulfillment(&bad_conds).unwrap_err().kind(),
        ErrorKind::MalformedEncoding
    );
}

#[test]
fn test_subfulfillment_checked_against_own_condition() {
    // A branch signed over a different message fails the whole threshold,
    // even though its condition is part of the set.
    let a = signed(1, MESSAGE);
    let b = signed(2, b"something else");
    let c = preimage(b"backup key");

    let f = ThresholdSha256Fulfillment::new(2, vec![a, b], vec![cond(&c)]).unwrap();
    assert!(!f.derive_condition().subtypes().is_empty());

    let f = Fulfillment::from(f);
    assert!(!f.verify(f.derive_condition(), MESSAGE));
}
