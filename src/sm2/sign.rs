//! SM2 signature generation (spec §4.5).

use crypto_bigint::{Encoding, U256};
use rand_core::CryptoRngCore;

use crate::ec::Group;
use crate::errors::{Error, Result};
use crate::hash::HashAlg;
use crate::sm2::key::Sm2PrivateKey;
use crate::sm2::signature::Signature;
use crate::sm2::za;

/// Retry cap for the sign loop (spec §4.5: "an implementer must still bound
/// iterations (e.g., 32)").
const MAX_SIGN_ATTEMPTS: u32 = 32;

/// `sm2_sign_hash(key, e_digest) → (r, s) | Err`: signs an already-computed
/// pre-hash digest, treating it as opaque (no ZA pre-hashing).
pub fn sm2_sign_hash(
    group: &Group,
    key: &Sm2PrivateKey,
    e_digest: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    let n = &group.order;
    let e = n.reduce_be_bytes(e_digest);

    let one_plus_d = key.scalar.add(n.one());
    let inv = one_plus_d.invert().map_err(|_| Error::BadKey)?;

    for _ in 0..MAX_SIGN_ATTEMPTS {
        let k = n.random_nonzero(rng)?;
        let k_int = U256::from_be_bytes(k.to_bytes());
        let kg = group.scalar_mul_base(&k_int);
        let (x1, _) = kg.to_affine().ok_or(Error::InvalidArguments)?;
        let x1_n = n.elem(&x1.to_bytes());

        let r = e.add(x1_n);
        if r.is_zero() {
            continue;
        }
        // r + k == n  iff  (r + k) mod n == 0, given 0 < r, k < n so
        // 0 < r + k < 2n: the only multiple of n in that range is n itself.
        if r.add(k).is_zero() {
            continue;
        }

        let s = inv.mul(k.sub(r.mul(key.scalar)));
        return Ok(Signature::from_parts(r.to_bytes(), s.to_bytes()));
    }
    Err(Error::SignRetryExhausted)
}

/// `sm2_sign_message(key, hash, user_id, msg) → (r, s) | Err`: computes the
/// ZA-bound pre-hash and signs it.
pub fn sm2_sign_message(
    group: &Group,
    key: &Sm2PrivateKey,
    hash: HashAlg,
    user_id: &[u8],
    msg: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    let za = za::compute_za(hash, user_id, key.public(), group)?;
    let e_digest = hash.hash_concat(&[&za, msg]);
    sm2_sign_hash(group, key, &e_digest, rng)
}
