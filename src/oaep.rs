//! OAEP encoding/decoding ([RFC 8017 §7.1]), generalized over the RSA
//! trapdoor this crate does not implement: callers supply `emLen` directly
//! (there is no `RsaPublicKey` here to read it from) and the hash used for
//! the label digest and for MGF1 are independent runtime values rather than
//! compile-time type parameters, per the donor's own "hash pluggable at
//! runtime" design note.
//!
//! [RFC 8017 §7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

use alloc::vec;
use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::errors::{Error, Result};
use crate::hash::HashAlg;

/// Maximum label length the MGF1 counter can address without risking
/// `2^32` distinct counter blocks; in practice no caller comes close.
const MAX_MGF_INPUT_LEN: u64 = 1 << 32;

/// `mgf1(seed, len, hash)`: expands `seed` into exactly `len` pseudorandom
/// bytes by concatenating `hash(seed ‖ I2OSP(i, 4))` for `i = 0, 1, …`.
pub fn mgf1(seed: &[u8], len: usize, hash: HashAlg) -> Result<Vec<u8>> {
    let mut out = vec![0u8; len];
    mgf1_xor(&mut out, seed, hash)?;
    Ok(out)
}

/// XORs the MGF1 mask of the given length (`data.len()`) into `data` in
/// place, so callers never have to materialize the mask and the data
/// separately.
fn mgf1_xor(data: &mut [u8], seed: &[u8], hash: HashAlg) -> Result<()> {
    let h_len = hash.output_size();
    if h_len == 0 {
        return Err(Error::MgfLengthInvalid);
    }
    let block_count = (data.len() as u64 + h_len as u64 - 1) / h_len as u64;
    if block_count > MAX_MGF_INPUT_LEN {
        return Err(Error::MgfLengthInvalid);
    }

    let mut counter: u32 = 0;
    let mut done = 0;
    while done < data.len() {
        let block = hash.hash_concat(&[seed, &counter.to_be_bytes()]);
        let take = core::cmp::min(h_len, data.len() - done);
        for (d, b) in data[done..done + take].iter_mut().zip(block.iter()) {
            *d ^= b;
        }
        done += take;
        counter = counter.wrapping_add(1);
    }
    Ok(())
}

/// `oaep_encode(msg, label, emLen, hash, mgf_hash)`.
pub fn oaep_encode(
    rng: &mut impl CryptoRngCore,
    msg: &[u8],
    label: &[u8],
    em_len: usize,
    hash: HashAlg,
    mgf_hash: HashAlg,
) -> Result<Vec<u8>> {
    let h_len = hash.output_size();

    if em_len < 2 * h_len + 2 {
        return Err(Error::KeySizeTooSmall);
    }
    if msg.len() > em_len - 2 * h_len - 2 {
        return Err(Error::DataTooLargeForKeySize);
    }

    let l_hash = hash.hash(label);

    let db_len = em_len - h_len - 1;
    let mut db = vec![0u8; db_len];
    db[..h_len].copy_from_slice(&l_hash);
    let ps_end = db_len - msg.len() - 1;
    db[ps_end] = 0x01;
    db[ps_end + 1..].copy_from_slice(msg);

    let mut seed = vec![0u8; h_len];
    rng.try_fill_bytes(&mut seed)
        .map_err(|_| Error::RandomFailure)?;

    mgf1_xor(&mut db, &seed, mgf_hash)?; // db := maskedDB
    mgf1_xor(&mut seed, &db, mgf_hash)?; // seed := maskedSeed

    let mut em = Vec::with_capacity(em_len);
    em.push(0x00);
    em.extend_from_slice(&seed);
    em.extend_from_slice(&db);
    Ok(em)
}

/// `oaep_decode(em, emLen_modulus, label, hash, mgf_hash)`.
///
/// `modulus_len` is the byte length of the RSA modulus (`emLen_modulus`);
/// the internal block length used for the MGF/DB computation is
/// `modulus_len - 1`, matching `oaep_encode`'s `emLen`. `em` need not
/// already be `modulus_len - 1` bytes — a big-integer decode step upstream
/// may have stripped leading zero bytes — so it is left-padded into a
/// fixed-size buffer here.
///
/// Every check after the initial length validation folds into a single
/// `bad` flag rather than returning early, and the single resulting error
/// (if any) is always [`Error::OaepDecoding`], never a variant that would
/// tell a caller *which* check failed: a Manger-style attacker who can
/// distinguish "bad padding" from "bad label hash" from "no 0x01 found" can
/// decrypt RSA-OAEP ciphertexts one bit at a time.
pub fn oaep_decode(
    em: &[u8],
    modulus_len: usize,
    label: &[u8],
    hash: HashAlg,
    mgf_hash: HashAlg,
) -> Result<Vec<u8>> {
    let h_len = hash.output_size();

    // Depends only on the modulus length, not on any secret: safe to fail fast.
    if modulus_len < 2 * h_len + 2 {
        return Err(Error::OaepDecoding);
    }
    let block_len = modulus_len - 1;
    let db_len = block_len - h_len;

    // `em` longer than the block is invalid, but per `rsa_oaep.c`'s own
    // comment on this exact check ("signalling this error immediately ...
    // might allow for side-channel attacks ... so we use a 'bad' flag"),
    // this must not return early: clamp into the fixed-size buffer and let
    // the rest of the computation run regardless, folding the failure into
    // the same `bad` accumulator as every other check below.
    let mut bad = Choice::from((em.len() > block_len) as u8);
    let flen = core::cmp::min(em.len(), block_len);
    let lzero = block_len - flen;

    let mut buf = vec![0u8; block_len];
    buf[lzero..].copy_from_slice(&em[..flen]);

    let (masked_seed, masked_db) = buf.split_at_mut(h_len);

    let mut seed = masked_seed.to_vec();
    mgf1_xor(&mut seed, masked_db, mgf_hash)?;
    let mut db = masked_db.to_vec();
    mgf1_xor(&mut db, &seed, mgf_hash)?;
    debug_assert_eq!(db.len(), db_len);

    let expected_l_hash = hash.hash(label);
    bad |= !db[..h_len].ct_eq(&expected_l_hash[..]);

    // Scan for the 0x01 separator without branching on the byte identity:
    // `found` latches the first index where db[i] == 1 and no earlier byte
    // was nonzero; any earlier nonzero byte that isn't 0x01 sets `bad`.
    let mut found = Choice::from(0u8);
    let mut still_zero = Choice::from(1u8);
    let mut sep_index = 0u64;
    for (i, &byte) in db[h_len..].iter().enumerate() {
        let is_zero = Choice::from((byte == 0) as u8);
        let is_one = Choice::from((byte == 1) as u8);

        let this_is_sep = still_zero & is_one & !found;
        sep_index = u64::conditional_select(&sep_index, &(i as u64), this_is_sep);
        found |= this_is_sep;

        // A nonzero byte encountered before the separator that is not 0x01
        // is malformed padding.
        bad |= still_zero & !is_zero & !is_one;

        still_zero &= is_zero;
    }
    bad |= !found;

    if bool::from(bad) {
        return Err(Error::OaepDecoding);
    }
    Ok(db[h_len + sep_index as usize + 1..].to_vec())
}

/// As [`oaep_decode`], but writes the recovered plaintext into the
/// caller-supplied `out` instead of allocating a fresh `Vec`, returning the
/// number of bytes written.
///
/// Spec §4.3 step 8: "If the output buffer is shorter than the recovered
/// plaintext, fail with `DataTooLarge`." This check runs only after the
/// padding itself has been accepted — a caller who only ever calls this with
/// a buffer sized for their protocol's maximum plaintext never observes it,
/// and unlike the padding checks above it is not required to be
/// constant-time (spec doesn't list it as part of the Manger-oracle
/// surface: buffer capacity is a property of the caller, not of the
/// ciphertext).
pub fn oaep_decode_into(
    out: &mut [u8],
    em: &[u8],
    modulus_len: usize,
    label: &[u8],
    hash: HashAlg,
    mgf_hash: HashAlg,
) -> Result<usize> {
    let plaintext = oaep_decode(em, modulus_len, label, hash, mgf_hash)?;
    if plaintext.len() > out.len() {
        return Err(Error::DataTooLarge);
    }
    out[..plaintext.len()].copy_from_slice(&plaintext);
    Ok(plaintext.len())
}
