//! Error types.

/// Alias for [`core::result::Result`] with this crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types.
///
/// The OAEP decode path deliberately collapses every internal check into a
/// single [`Error::OaepDecoding`] variant: reporting which sub-check failed
/// is itself a Manger-style oracle.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
#[non_exhaustive]
pub enum Error {
    /// MGF1 output length would require more counter values than the
    /// 4-byte counter can address, or the hash has a zero-length output.
    MgfLengthInvalid,

    /// OAEP-encoded message would not fit in the requested block size.
    DataTooLargeForKeySize,

    /// Block size is too small for two hash outputs plus the padding bytes.
    KeySizeTooSmall,

    /// OAEP decoding failed. Intentionally uninformative about which check
    /// failed — see module docs.
    OaepDecoding,

    /// OAEP decoded successfully, but the plaintext does not fit in the
    /// caller-supplied output buffer.
    DataTooLarge,

    /// The random source failed to produce bytes.
    RandomFailure,

    /// SM2 signature verification rejected the signature.
    BadSignature,

    /// DER re-encoding of a parsed SM2 signature did not reproduce the
    /// input byte-for-byte (non-canonical encoding, trailing data, ...).
    InvalidEncoding,

    /// Hashing the message or the ZA digest failed.
    DigestFailure,

    /// The SM2 signing loop exhausted its retry budget without producing a
    /// valid `(r, s)` pair. Only reachable with a degenerate RNG.
    SignRetryExhausted,

    /// `1 + dA ≡ 0 mod n`: the private key is malformed.
    BadKey,

    /// An argument (range, length) was invalid.
    InvalidArguments,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let msg = match self {
            Self::MgfLengthInvalid => "requested MGF1 output length is not representable",
            Self::DataTooLargeForKeySize => "data too large for the requested block size",
            Self::KeySizeTooSmall => "block size too small for the chosen hash",
            Self::OaepDecoding => "OAEP decoding error",
            Self::DataTooLarge => "decoded plaintext does not fit in the output buffer",
            Self::RandomFailure => "random number generator failed",
            Self::BadSignature => "signature verification failed",
            Self::InvalidEncoding => "signature is not canonically DER-encoded",
            Self::DigestFailure => "digest computation failed",
            Self::SignRetryExhausted => "signing loop exceeded its retry budget",
            Self::BadKey => "private key is malformed",
            Self::InvalidArguments => "invalid arguments",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl From<Error> for signature::Error {
    fn from(err: Error) -> Self {
        Self::from_source(err)
    }
}

#[cfg(not(feature = "std"))]
impl From<Error> for signature::Error {
    fn from(_err: Error) -> Self {
        Self::new()
    }
}
