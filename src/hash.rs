//! Runtime-selectable hash algorithms.
//!
//! OAEP and SM2 both need "a hash, chosen at runtime" rather than a
//! compile-time type parameter (the two OAEP hashes — label hash and MGF1
//! hash — can differ per call, and a caller picks SM3 vs SHA-256 for SM2 per
//! message). [`HashAlg`] is a small closed enum rather than a `dyn Digest`
//! trait object, so no allocation is needed to dispatch a hash call.

use alloc::vec::Vec;

#[cfg(any(feature = "sha1", feature = "sha2"))]
use digest::Digest;

use crate::sm3::Sm3;

/// A hash algorithm, identified by name, with a fixed output length.
///
/// Mirrors the `(init, update, finalize)` streaming contract in spec terms,
/// but exposes it as "hash these byte slices, concatenated" since every
/// caller in this crate already knows its input in full before hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HashAlg {
    /// SHA-1. Kept for interoperability with legacy OAEP deployments (the
    /// historical RFC 8017 default); not used by SM2.
    #[cfg(feature = "sha1")]
    Sha1,
    /// SHA-256.
    #[cfg(feature = "sha2")]
    Sha256,
    /// SHA-384.
    #[cfg(feature = "sha2")]
    Sha384,
    /// SHA-512.
    #[cfg(feature = "sha2")]
    Sha512,
    /// SM3, the hash mandated by GM/T 0004 and used by SM2 signing.
    Sm3,
}

impl HashAlg {
    /// Digest output size in bytes (`hLen`).
    pub const fn output_size(self) -> usize {
        match self {
            #[cfg(feature = "sha1")]
            Self::Sha1 => 20,
            #[cfg(feature = "sha2")]
            Self::Sha256 => 32,
            #[cfg(feature = "sha2")]
            Self::Sha384 => 48,
            #[cfg(feature = "sha2")]
            Self::Sha512 => 64,
            Self::Sm3 => 32,
        }
    }

    /// Hashes the concatenation of `parts`, in order, returning a
    /// `output_size()`-byte digest.
    pub fn hash_concat(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            #[cfg(feature = "sha1")]
            Self::Sha1 => digest_concat::<sha1::Sha1>(parts),
            #[cfg(feature = "sha2")]
            Self::Sha256 => digest_concat::<sha2::Sha256>(parts),
            #[cfg(feature = "sha2")]
            Self::Sha384 => digest_concat::<sha2::Sha384>(parts),
            #[cfg(feature = "sha2")]
            Self::Sha512 => digest_concat::<sha2::Sha512>(parts),
            Self::Sm3 => {
                let mut h = Sm3::new();
                for part in parts {
                    h.update(part);
                }
                h.finalize().to_vec()
            }
        }
    }

    /// Hashes a single byte slice.
    pub fn hash(self, data: &[u8]) -> Vec<u8> {
        self.hash_concat(&[data])
    }
}

#[cfg(any(feature = "sha1", feature = "sha2"))]
fn digest_concat<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut h = D::new();
    for part in parts {
        h.update(part);
    }
    h.finalize().to_vec()
}
