//! OAEP integration tests (spec §8).

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use sm2_oaep::hash::HashAlg;
use sm2_oaep::oaep::{mgf1, oaep_decode, oaep_decode_into, oaep_encode};
use sm2_oaep::Error;

#[test]
fn round_trip_across_message_lengths_and_hashes() {
    let mut rng = ChaCha8Rng::seed_from_u64(100);
    for hash in [HashAlg::Sha1, HashAlg::Sha256] {
        for msg_len in [0usize, 1, 16, 100] {
            let msg = alloc_msg(msg_len);
            let em = oaep_encode(&mut rng, &msg, b"label", 256, hash, hash).unwrap();
            let decoded = oaep_decode(&em[1..], 256, b"label", hash, hash).unwrap();
            assert_eq!(decoded, msg);
        }
    }
}

#[test]
fn label_mismatch_always_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(101);
    let em = oaep_encode(&mut rng, b"Hello", b"", 256, HashAlg::Sha1, HashAlg::Sha1).unwrap();
    let result = oaep_decode(&em[1..], 256, b"A", HashAlg::Sha1, HashAlg::Sha1);
    assert_eq!(result, Err(Error::OaepDecoding));
}

#[test]
fn short_output_buffer_rejected() {
    // spec §8: "OAEP short-output reject. Decode a valid encoding into a
    // buffer of length mLen − 1: returns DataTooLarge."
    let mut rng = ChaCha8Rng::seed_from_u64(102);
    let msg = b"a message to encode";
    let em = oaep_encode(&mut rng, msg, b"", 256, HashAlg::Sha256, HashAlg::Sha256).unwrap();
    let mut out = vec![0u8; msg.len() - 1];
    let result = oaep_decode_into(&mut out, &em[1..], 256, b"", HashAlg::Sha256, HashAlg::Sha256);
    assert_eq!(result, Err(Error::DataTooLarge));
}

#[test]
fn mgf1_known_concatenation_matches_sha1() {
    // spec §8: "MGF1 SHA-1, seed = 0x0102030405, len = 50."
    let seed = [0x01u8, 0x02, 0x03, 0x04, 0x05];
    let out = mgf1(&seed, 50, HashAlg::Sha1).unwrap();
    assert_eq!(out.len(), 50);

    use sha1::{Digest, Sha1};
    let mut expected = Vec::new();
    for i in 0u32..3 {
        let mut h = Sha1::new();
        h.update(seed);
        h.update(i.to_be_bytes());
        expected.extend_from_slice(&h.finalize());
    }
    expected.truncate(50);
    assert_eq!(out, expected);
}

fn alloc_msg(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

/// An RNG that replays a fixed byte string instead of sampling randomly, so
/// `oaep_encode`'s seed (and nothing else about its output) is pinned.
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

/// OAEP-SHA1 known-answer test (spec §8: "OAEP-SHA1, 2048-bit modulus, empty
/// label", seed `0x18b776ea…`, msg `"Hello"`). `spec.md` quotes only a seed
/// prefix, not the full 20-byte seed (no full vector was retrieved offline
/// in this pack), so the seed's first four bytes match the documented
/// prefix and the rest is a fixed, clearly synthetic filler; the resulting
/// `EM` is pinned as a golden value recorded from this implementation,
/// giving an exact byte-for-byte regression check in place of the
/// self-consistent round-trip tests above.
#[test]
fn oaep_sha1_known_answer_vector() {
    const SEED: [u8; 20] = hex_literal::hex!("18b776ea000102030405060708090a0b0c0d0e0f");
    const GOLDEN_EM: [u8; 256] = hex_literal::hex!(
        "0033e126829a8ff1f5bb0199ca8190c8acd7fc950ce8019ab59efb47b9f7bd49"
        "fbe8182b752b2a0e92bd0d0df54d8d7e9ed884ec963ed39c0f011957a79658c0"
        "8414e24c84da3e30006596ef9bb3f4fe7b6cb3a1810631ec258a372a61d2961d"
        "51e580e83fc6283f8fd3535079f6256ce611ffc783f421fa4eb48b3cb25499b3"
        "4f26685b5a75ef24834731a4d2b8ace308fdbd8d38ad480ffd6dbc229a37bb02"
        "48044b1c50fec8cd138151772207661552b5f6f96d1dbff743aedd9574760bda"
        "12559bb20b68d3b69669e0579404eae503fa3e150b509ef27f3c0c16db45dfeb"
        "4448bcb5a3d9d35d23fd9f3cb87b7c4d6baf43e5f3b7f082454f1569e1ec3b90"
    );
    let mut rng = FixedRng::new(&SEED);
    let em = oaep_encode(&mut rng, b"Hello", b"", 256, HashAlg::Sha1, HashAlg::Sha1).unwrap();

    assert_eq!(em.len(), 256);
    assert_eq!(em[0], 0x00);
    assert_eq!(em, GOLDEN_EM.to_vec(), "EM must match the pinned golden value byte-for-byte");

    let decoded = oaep_decode(&em[1..], 256, b"", HashAlg::Sha1, HashAlg::Sha1).unwrap();
    assert_eq!(decoded, b"Hello");

    // Determinism: re-encoding with the same fixed seed reproduces `em`
    // byte-for-byte.
    let mut rng2 = FixedRng::new(&SEED);
    let em2 = oaep_encode(&mut rng2, b"Hello", b"", 256, HashAlg::Sha1, HashAlg::Sha1).unwrap();
    assert_eq!(em, em2);
}
