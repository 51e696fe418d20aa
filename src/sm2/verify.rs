//! SM2 signature verification (spec §4.6).
//!
//! Unlike sign, verify has no secret scalar to protect — spec §4.6: "All
//! comparisons are value comparisons; no secret-dependent timing is
//! required" — so this is ordinary branching code, not constant-time.

use crypto_bigint::{Encoding, U256};

use crate::ec::Group;
use crate::hash::HashAlg;
use crate::sm2::key::Sm2PublicKey;
use crate::sm2::signature::Signature;
use crate::sm2::za;

/// `sm2_verify_hash(key, (r, s), e_digest) → bool`.
pub fn sm2_verify_hash(group: &Group, key: &Sm2PublicKey, sig: &Signature, e_digest: &[u8]) -> bool {
    let n = &group.order;

    let r = match n.from_bytes_checked(sig.r()) {
        Ok(v) if !v.is_zero() => v,
        _ => return false,
    };
    let s = match n.from_bytes_checked(sig.s()) {
        Ok(v) if !v.is_zero() => v,
        _ => return false,
    };

    let t = r.add(s);
    if t.is_zero() {
        return false;
    }

    let pa = match group.point_from_affine(key.x, key.y) {
        Ok(p) => p,
        Err(_) => return false,
    };

    let s_int = U256::from_be_bytes(s.to_bytes());
    let t_int = U256::from_be_bytes(t.to_bytes());
    let p = group.double_scalar_mul(&s_int, &t_int, &pa);
    if p.is_identity() {
        return false;
    }

    let (x1, _) = match p.to_affine() {
        Some(v) => v,
        None => return false,
    };
    let x1_n = n.elem(&x1.to_bytes());
    let e = n.reduce_be_bytes(e_digest);
    r == e.add(x1_n)
}

/// `sm2_verify_message(key, hash, user_id, msg, (r, s)) → bool`.
pub fn sm2_verify_message(
    group: &Group,
    key: &Sm2PublicKey,
    hash: HashAlg,
    user_id: &[u8],
    msg: &[u8],
    sig: &Signature,
) -> bool {
    let za = match za::compute_za(hash, user_id, key, group) {
        Ok(v) => v,
        Err(_) => return false,
    };
    let e_digest = hash.hash_concat(&[&za, msg]);
    sm2_verify_hash(group, key, sig, &e_digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sm2::curve::group;
    use crate::sm2::key::Sm2PrivateKey;
    use crate::sm2::sign::{sm2_sign_hash, sm2_sign_message};
    use rand_core::SeedableRng;

    #[test]
    fn round_trip_hash() {
        let g = group();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(10);
        let key = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let digest = [0x11u8; 32];
        let sig = sm2_sign_hash(&g, &key, &digest, &mut rng).unwrap();
        assert!(sm2_verify_hash(&g, key.public(), &sig, &digest));
    }

    #[test]
    fn round_trip_message() {
        let g = group();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(11);
        let key = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let sig = sm2_sign_message(
            &g,
            &key,
            HashAlg::Sm3,
            b"1234567812345678",
            b"message digest",
            &mut rng,
        )
        .unwrap();
        assert!(sm2_verify_message(
            &g,
            key.public(),
            HashAlg::Sm3,
            b"1234567812345678",
            b"message digest",
            &sig
        ));
    }

    #[test]
    fn wrong_identity_is_rejected() {
        let g = group();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(12);
        let key = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let sig = sm2_sign_message(&g, &key, HashAlg::Sm3, b"alice", b"msg", &mut rng).unwrap();
        assert!(!sm2_verify_message(
            &g,
            key.public(),
            HashAlg::Sm3,
            b"bob",
            b"msg",
            &sig
        ));
    }

    #[test]
    fn tampered_bit_of_r_is_rejected() {
        let g = group();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(13);
        let key = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let digest = [0x22u8; 32];
        let sig = sm2_sign_hash(&g, &key, &digest, &mut rng).unwrap();
        let mut r = *sig.r();
        r[31] ^= 0x01;
        let tampered = Signature::from_parts(r, *sig.s());
        assert!(!sm2_verify_hash(&g, key.public(), &tampered, &digest));
    }

    #[test]
    fn out_of_range_components_are_rejected() {
        let g = group();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(14);
        let key = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let digest = [0x33u8; 32];
        let sig = sm2_sign_hash(&g, &key, &digest, &mut rng).unwrap();
        let zero_r = Signature::from_parts([0u8; 32], *sig.s());
        assert!(!sm2_verify_hash(&g, key.public(), &zero_r, &digest));
        let n_as_s = Signature::from_parts(*sig.r(), g.order.modulus().to_be_bytes());
        assert!(!sm2_verify_hash(&g, key.public(), &n_as_s, &digest));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let g = group();
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(15);
        let key_a = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let key_b = Sm2PrivateKey::generate(&g, &mut rng).unwrap();
        let digest = [0x44u8; 32];
        let sig = sm2_sign_hash(&g, &key_a, &digest, &mut rng).unwrap();
        assert!(!sm2_verify_hash(&g, key_b.public(), &sig, &digest));
    }
}
