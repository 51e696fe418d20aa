//! SM2 integration tests (spec §8).

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use sm2_oaep::hash::HashAlg;
use sm2_oaep::sm2::{
    curve::group, sm2_sign_message, sm2_verify_message, Sm2PrivateKey, Signature,
};

const DA: [u8; 32] =
    hex_literal::hex!("3945208F7B2144B13F36E38AC6D39F95889393692860B51A42FB81EF4DF7C5B8");
const USER_ID: &[u8] = b"1234567812345678";
const MSG: &[u8] = b"message digest";

#[test]
fn sample_vector_round_trips() {
    let g = group();
    let key = Sm2PrivateKey::from_bytes(&g, &DA).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(200);
    let sig = sm2_sign_message(&g, &key, HashAlg::Sm3, USER_ID, MSG, &mut rng).unwrap();
    assert!(sm2_verify_message(
        &g,
        key.public(),
        HashAlg::Sm3,
        USER_ID,
        MSG,
        &sig
    ));
}

#[test]
fn malleability_rejects_out_of_range_components() {
    let g = group();
    let key = Sm2PrivateKey::from_bytes(&g, &DA).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(201);
    let sig = sm2_sign_message(&g, &key, HashAlg::Sm3, USER_ID, MSG, &mut rng).unwrap();

    let n = g.order.modulus();
    let n_bytes = {
        use crypto_bigint::Encoding;
        n.to_be_bytes()
    };
    let forged = Signature::from_parts(n_bytes, *sig.s());
    assert!(!sm2_verify_message(
        &g,
        key.public(),
        HashAlg::Sm3,
        USER_ID,
        MSG,
        &forged
    ));
}

#[test]
fn wrong_identity_rejects() {
    let g = group();
    let key = Sm2PrivateKey::from_bytes(&g, &DA).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(202);
    let sig = sm2_sign_message(&g, &key, HashAlg::Sm3, USER_ID, MSG, &mut rng).unwrap();
    assert!(!sm2_verify_message(
        &g,
        key.public(),
        HashAlg::Sm3,
        b"someone_else",
        MSG,
        &sig
    ));
}

#[test]
fn tamper_one_bit_of_r_rejects() {
    let g = group();
    let key = Sm2PrivateKey::from_bytes(&g, &DA).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(203);
    let sig = sm2_sign_message(&g, &key, HashAlg::Sm3, USER_ID, MSG, &mut rng).unwrap();
    let mut r = *sig.r();
    r[0] ^= 0x01;
    let tampered = Signature::from_parts(r, *sig.s());
    assert!(!sm2_verify_message(
        &g,
        key.public(),
        HashAlg::Sm3,
        USER_ID,
        MSG,
        &tampered
    ));
}

#[test]
fn der_round_trip_and_canonicality() {
    let g = group();
    let key = Sm2PrivateKey::from_bytes(&g, &DA).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(204);
    let sig = sm2_sign_message(&g, &key, HashAlg::Sm3, USER_ID, MSG, &mut rng).unwrap();

    let der = sig.to_der();
    let parsed = Signature::from_der(&der).unwrap();
    assert_eq!(parsed, sig);

    let mut tampered_der = der.clone();
    tampered_der.push(0x00);
    assert!(Signature::from_der(&tampered_der).is_err());
}

/// An RNG that replays a fixed byte string, so `sm2_sign_hash`'s per-attempt
/// nonce `k` is pinned instead of drawn from a seeded PRNG stream.
struct FixedRng<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> FixedRng<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl rand_core::RngCore for FixedRng<'_> {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.try_fill_bytes(dest).expect("FixedRng exhausted");
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        let end = self.pos + dest.len();
        let src = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| rand_core::Error::from(core::num::NonZeroU32::new(1).unwrap()))?;
        dest.copy_from_slice(src);
        self.pos = end;
        Ok(())
    }
}

impl rand_core::CryptoRng for FixedRng<'_> {}

/// SM2 known-answer test with the nonce `k` mocked to a fixed value (spec
/// §8: "SM2 RFC test vector ... `r, s` match the published fixed vector
/// when `k` is seeded deterministically"). No full GM/T 0003.5 Appendix A
/// `k`/`r`/`s` triple was retrieved offline in this pack, so `k` below is a
/// fixed, clearly synthetic value rather than the published one, and the
/// resulting `(r, s)` is pinned as a golden value recorded from this
/// implementation — an exact byte-for-byte regression check that a fixed
/// nonce and fixed inputs must always reproduce, which the randomized
/// round-trip tests above cannot provide.
#[test]
fn sm2_known_answer_vector_with_fixed_nonce() {
    use sm2_oaep::sm2::sm2_sign_hash;
    use sm2_oaep::sm2::sm2_verify_hash;

    const K: [u8; 32] =
        hex_literal::hex!("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f");
    const GOLDEN_R: [u8; 32] =
        hex_literal::hex!("b4e8cabcabcead21d0e38f7ec2fc91c281d18bdb1b10ea25d8d68f73d1f62104");
    const GOLDEN_S: [u8; 32] =
        hex_literal::hex!("aec39e8339450e13a7363bd450511c6e66acef7edc5b73b1a1aaa420a92f9dec");

    let g = group();
    let key = Sm2PrivateKey::from_bytes(&g, &DA).unwrap();
    let e_digest = [0x11u8; 32];

    let mut rng = FixedRng::new(&K);
    let sig = sm2_sign_hash(&g, &key, &e_digest, &mut rng).unwrap();
    assert!(sm2_verify_hash(&g, key.public(), &sig, &e_digest));
    eprintln!("R_HEX={}", hex_string(sig.r()));
    eprintln!("S_HEX={}", hex_string(sig.s()));
    assert_eq!(*sig.r(), GOLDEN_R, "r must match the pinned golden value");
    assert_eq!(*sig.s(), GOLDEN_S, "s must match the pinned golden value");

    // Determinism: signing again with the same fixed nonce reproduces the
    // same signature byte-for-byte.
    let mut rng2 = FixedRng::new(&K);
    let sig2 = sm2_sign_hash(&g, &key, &e_digest, &mut rng2).unwrap();
    assert_eq!(sig, sig2);
}

fn hex_string(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
