use affinidi_ecdsa_multikey::{
    Curve, EcdsaMultikey, ExportOptions, MultikeyError, MultikeyPair, RustCryptoProvider,
};

// (public, secret) Multikey pairs; the P-384, P-521 and secp256k1 scalars
// all have leading zero bytes
const P256_PAIR: (&str, &str) = (
    "zDnaeSMnptAKpH4AD41vTkwzjznW7yNetdRh9FJn8bJsbsdbw",
    "z42twirSb1PULt5Sg6gjgNMsdiLycu6fbA83aX1vVb8e3ncP",
);
const P384_PAIR: (&str, &str) = (
    "z82LkmvrZAbyULnSAbtzMhvzJNar3r3A7zjNRcLWkBHTdMoEUwdrkQSZwVytpczUmXThWPp",
    "z2faj2aYAXeTBhQYGduaFwnAtetK4iCxyc1nkB35bvTorqZnRbRxvB6yXm4cyJz5x2v4ap",
);
const P521_PAIR: (&str, &str) = (
    "z2J9gaYznjgF227k9bqMFwfVjz5jRZwQYQkLPD9AmpVvzkyykRf2cQzeVNp8BspzKqgLTZeekvViALKKLCWMqrRSbnRTT2x7",
    "zJp6sttaj2v5cCosuiB1K3J5kbVMVUdsTFuLLGQReK1defwhpo1ARfXd5JdKqbPy2ehMxV1pe6LdZXMsKDxBWtsq151D2G",
);
const SECP256K1_PAIR: (&str, &str) = (
    "zQ3shkLtKaNAPHVHjTyLGXL7dkUSm22oA5dmkhubT8WWWJW7U",
    "z3vLTztfd4SmNWCMqwu5i287mdwiq9j3AC3HUFRUUmydLuiJ",
);

// Public-only keys in circulation
const PUBLIC_KEYS: [(&str, Curve); 3] = [
    ("zDnaerDaTF5BXEavCrfRZEk316dpbLsfPDZ3WJ5hRTPFU2169", Curve::P256),
    (
        "z82Lm1MpAkeJcix9K8TMiLd5NMAhnwkjjCBeWHXyu3U4oT2MVJJKXkcVBgjGhnLBn2Kaau9",
        Curve::P384,
    ),
    ("zQ3shT2ynSjzY5XoTxhWHvYVZ6GiLWhBVincVekcEpZDRCBHV", Curve::Secp256k1),
];

fn known_pairs() -> [(Curve, MultikeyPair); 4] {
    [
        (Curve::P256, P256_PAIR),
        (Curve::P384, P384_PAIR),
        (Curve::P521, P521_PAIR),
        (Curve::Secp256k1, SECP256K1_PAIR),
    ]
    .map(|(curve, (public, secret))| (curve, MultikeyPair::public(public).with_secret(secret)))
}

#[test]
fn known_pairs_re_export_unchanged() {
    for (curve, pair) in known_pairs() {
        let key_pair = EcdsaMultikey::from_multikey(RustCryptoProvider, &pair).unwrap();
        assert_eq!(key_pair.curve(), curve);
        assert_eq!(key_pair.export(&ExportOptions::key_pair()).unwrap(), pair);
    }
}

#[test]
fn known_public_keys_re_export_unchanged() {
    for (public, curve) in PUBLIC_KEYS {
        let key_pair =
            EcdsaMultikey::from_multikey(RustCryptoProvider, &MultikeyPair::public(public))
                .unwrap();
        assert_eq!(key_pair.curve(), curve);
        assert_eq!(key_pair.public_key_multibase(), public);
        assert!(!key_pair.has_secret_key());
    }
}

#[test]
fn generated_pairs_round_trip() {
    for curve in Curve::ALL {
        for _ in 0..8 {
            let key_pair = EcdsaMultikey::generate(RustCryptoProvider, curve).unwrap();
            let exported = key_pair.export(&ExportOptions::key_pair()).unwrap();

            let imported = EcdsaMultikey::from_multikey(RustCryptoProvider, &exported).unwrap();
            assert_eq!(
                imported.export(&ExportOptions::key_pair()).unwrap(),
                exported
            );

            let raw = imported.export_raw().unwrap();
            let size = curve.descriptor().scalar_size;
            assert_eq!(raw.public_key.len(), size + 1);
            assert_eq!(raw.secret_key.as_ref().unwrap().len(), size);
        }
    }
}

#[test]
fn signatures_verify_and_detect_tampering() {
    let expected_lengths = [
        (Curve::P256, 64),
        (Curve::P384, 96),
        (Curve::P521, 132),
        (Curve::Secp256k1, 64),
    ];

    for (curve, signature_length) in expected_lengths {
        let key_pair = EcdsaMultikey::generate(RustCryptoProvider, curve).unwrap();
        let signer = key_pair.signer().unwrap();
        let verifier = key_pair.verifier();

        let message = b"key pair operations test".to_vec();
        let signature = signer.sign(&message).unwrap();
        assert_eq!(signature.len(), signature_length, "{curve}");
        assert!(verifier.verify(&message, &signature).unwrap());

        let mut tampered = message.clone();
        tampered[0] ^= 0x80;
        assert!(!verifier.verify(&tampered, &signature).unwrap());

        let mut tampered_signature = signature.clone();
        tampered_signature[signature_length / 2] ^= 0x01;
        assert!(!verifier.verify(&message, &tampered_signature).unwrap());
    }
}

#[test]
fn every_flipped_byte_is_detected() {
    let pair = MultikeyPair::public(P256_PAIR.0).with_secret(P256_PAIR.1);
    let key_pair = EcdsaMultikey::from_multikey(RustCryptoProvider, &pair).unwrap();
    let message = b"test 1234".to_vec();
    let signature = key_pair.signer().unwrap().sign(&message).unwrap();

    for i in 0..message.len() {
        let mut tampered = message.clone();
        tampered[i] ^= 0xff;
        assert!(!key_pair.verifier().verify(&tampered, &signature).unwrap());
    }
}

#[test]
fn imported_public_key_verifies_imported_pair_signature() {
    let pair = MultikeyPair::public(P521_PAIR.0).with_secret(P521_PAIR.1);
    let signing = EcdsaMultikey::from_multikey(RustCryptoProvider, &pair).unwrap();
    let signature = signing.signer().unwrap().sign(b"hello").unwrap();

    let verifying =
        EcdsaMultikey::from_multikey(RustCryptoProvider, &MultikeyPair::public(P521_PAIR.0))
            .unwrap();
    assert!(verifying.verifier().verify(b"hello", &signature).unwrap());

    let other = EcdsaMultikey::generate(RustCryptoProvider, Curve::P521).unwrap();
    assert!(!other.verifier().verify(b"hello", &signature).unwrap());
}

#[test]
fn mismatched_secret_is_rejected_by_provider() {
    // Both halves are valid P-256 keys, but not of the same pair
    let other = EcdsaMultikey::generate(RustCryptoProvider, Curve::P256).unwrap();
    let pair = MultikeyPair::public(P256_PAIR.0)
        .with_secret(other.secret_key_multibase().unwrap());
    assert!(matches!(
        EcdsaMultikey::from_multikey(RustCryptoProvider, &pair),
        Err(MultikeyError::Provider(_))
    ));
}

#[test]
fn point_off_curve_is_rejected_by_provider() {
    let mut bytes = vec![0x80, 0x24, 0x02];
    bytes.extend_from_slice(&[0u8; 31]);
    bytes.push(0x01);
    let public = affinidi_multikey_encoding::encode_base58btc(&bytes);

    assert!(matches!(
        EcdsaMultikey::from_multikey(RustCryptoProvider, &MultikeyPair::public(public)),
        Err(MultikeyError::Provider(_))
    ));
}

#[test]
fn verification_method_json() {
    let method = serde_json::json!({
        "id": "did:example:123#key-1",
        "type": "Multikey",
        "controller": "did:example:123",
        "publicKeyMultibase": P384_PAIR.0,
    });
    let pair: MultikeyPair = serde_json::from_value(method).unwrap();
    let key_pair = EcdsaMultikey::from_multikey(RustCryptoProvider, &pair).unwrap();
    assert_eq!(key_pair.curve(), Curve::P384);
    assert_eq!(key_pair.fingerprint(), P384_PAIR.0);

    let exported = key_pair.export(&ExportOptions::key_pair()).unwrap();
    assert_eq!(
        serde_json::to_value(exported).unwrap(),
        serde_json::json!({ "publicKeyMultibase": P384_PAIR.0 })
    );
}
