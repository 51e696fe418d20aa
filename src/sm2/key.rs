//! SM2 key pairs.
//!
//! Key generation and serialization are out of scope (spec §1), but signing
//! and verifying need *some* in-memory key representation to operate on, so
//! this crate defines the minimal one: a private scalar and its public
//! point, both already range-checked field/scalar elements. Shaped after
//! the donor's `RsaPublicKey`/`RsaPrivateKey` split in `src/key.rs` —
//! `Drop` zeroizes only the secret half.

use rand_core::CryptoRngCore;

use crate::bigint::Elem;
use crate::ec::Group;
use crate::errors::{Error, Result};

/// `PA = [dA]G`, the public point, as affine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sm2PublicKey {
    pub(crate) x: Elem,
    pub(crate) y: Elem,
}

impl Sm2PublicKey {
    /// Builds a public key from big-endian affine coordinates, checking
    /// that the point lies on the curve.
    pub fn from_affine_bytes(group: &Group, x: &[u8], y: &[u8]) -> Result<Self> {
        let x = group.field.from_bytes_checked(x)?;
        let y = group.field.from_bytes_checked(y)?;
        if !group.is_on_curve(x, y) {
            return Err(Error::InvalidArguments);
        }
        Ok(Self { x, y })
    }

    /// The public point's affine `x` coordinate, big-endian.
    pub fn x(&self) -> [u8; 32] {
        self.x.to_bytes()
    }

    /// The public point's affine `y` coordinate, big-endian.
    pub fn y(&self) -> [u8; 32] {
        self.y.to_bytes()
    }
}

/// `(dA, PA)`: the private scalar and its derived public point.
///
/// `scalar` is the only secret here; `public` is a pure function of it and
/// is not zeroized.
#[derive(Debug, Clone)]
pub struct Sm2PrivateKey {
    pub(crate) scalar: Elem,
    pub(crate) public: Sm2PublicKey,
}

impl Sm2PrivateKey {
    /// Draws `dA` uniformly from `[1, n-1]` and derives `PA = [dA]G`.
    pub fn generate(group: &Group, rng: &mut impl CryptoRngCore) -> Result<Self> {
        let scalar = group.order.random_nonzero(rng)?;
        Self::from_scalar(group, scalar)
    }

    /// Builds a private key from a big-endian scalar, range-checked against
    /// `[1, n-1]`.
    pub fn from_bytes(group: &Group, da: &[u8]) -> Result<Self> {
        let scalar = group.order.from_bytes_checked(da)?;
        if scalar.is_zero() {
            return Err(Error::InvalidArguments);
        }
        Self::from_scalar(group, scalar)
    }

    fn from_scalar(group: &Group, scalar: Elem) -> Result<Self> {
        let scalar_bytes = scalar.to_bytes();
        let d = crypto_bigint::U256::from_be_slice(&scalar_bytes);
        let public_point = group.scalar_mul_base(&d);
        let (x, y) = public_point
            .to_affine()
            .ok_or(Error::InvalidArguments)?;
        Ok(Self {
            scalar,
            public: Sm2PublicKey { x, y },
        })
    }

    /// The derived public key.
    pub fn public(&self) -> &Sm2PublicKey {
        &self.public
    }
}

impl Drop for Sm2PrivateKey {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.scalar.zeroize();
    }
}
