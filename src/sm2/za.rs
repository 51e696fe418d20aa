//! The SM2 user-identity pre-hash `ZA` (GM/T 0003.2 §5.5).
//!
//! `spec.md` §4.4 and §9 delegate `ZA`'s exact byte layout to a collaborator
//! ("an implementer must consult the SM2 standard and not infer it from
//! surrounding code" — see `SPEC_FULL.md` §B.4). GM/T 0003.2 defines it as:
//!
//! `ZA = Hash(ENTL_A ‖ ID_A ‖ a ‖ b ‖ xG ‖ yG ‖ xA ‖ yA)`
//!
//! where `ENTL_A` is the two-byte big-endian bit length of the identity
//! string, and every curve/point field is encoded as a fixed-width
//! big-endian byte string the width of the prime field (32 bytes here).

use alloc::vec::Vec;

use crate::ec::Group;
use crate::errors::{Error, Result};
use crate::hash::HashAlg;
use crate::sm2::key::Sm2PublicKey;

/// Computes `ZA` for `user_id` under `public`, using `hash` as both the
/// identity-binding hash and (by convention, per GM/T 0003.2) the message
/// digest hash used downstream.
///
/// Fails with [`Error::InvalidArguments`] if `user_id`'s bit length does not
/// fit in the 16-bit `ENTL` field (`user_id` longer than 8191 bytes).
pub fn compute_za(hash: HashAlg, user_id: &[u8], public: &Sm2PublicKey, group: &Group) -> Result<Vec<u8>> {
    let bit_len: u16 = user_id
        .len()
        .checked_mul(8)
        .and_then(|bits| u16::try_from(bits).ok())
        .ok_or(Error::InvalidArguments)?;
    let entl = bit_len.to_be_bytes();

    let a = group.curve.a.to_bytes();
    let b = group.curve.b.to_bytes();
    let (gx, gy) = group.g.to_affine().ok_or(Error::InvalidArguments)?;
    let gx = gx.to_bytes();
    let gy = gy.to_bytes();
    let xa = public.x.to_bytes();
    let ya = public.y.to_bytes();

    Ok(hash.hash_concat(&[&entl, user_id, &a, &b, &gx, &gy, &xa, &ya]))
}
