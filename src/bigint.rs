//! 256-bit modular integer arithmetic backing SM2's field and scalar rings.
//!
//! SM2 needs two independent moduli of the same width — the field modulus
//! `p` and the group order `n` — so this wraps [`crypto_bigint::DynResidue`]
//! (a runtime-modulus Montgomery residue) rather than the crate's
//! const-generic `Residue`, which bakes the modulus into the type. A
//! [`Field`] is just a `DynResidueParams<4>` plus the convenience
//! constructors and sampling this crate's callers need; elements are
//! [`Elem`], thin wrappers around `DynResidue<4>`.

use crypto_bigint::{
    modular::runtime_mod::{DynResidue, DynResidueParams},
    Encoding, NonZero, U256,
};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

use crate::errors::{Error, Result};

const LIMBS: usize = U256::LIMBS;

/// An odd modulus (the field prime `p`, or the group order `n`) and the
/// Montgomery parameters derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    params: DynResidueParams<LIMBS>,
    modulus: U256,
}

impl Field {
    /// Builds a `Field` from a big-endian modulus. The modulus must be odd;
    /// every modulus SM2 uses (`p`, `n`) is.
    pub fn new(modulus_be: &[u8]) -> Self {
        let modulus = U256::from_be_slice(modulus_be);
        Self {
            params: DynResidueParams::new(&modulus),
            modulus,
        }
    }

    /// The modulus itself, as a residue-free element (used for range checks
    /// against `p` and `n` directly rather than through `Elem`).
    pub fn modulus(&self) -> U256 {
        self.modulus
    }

    /// Lifts a big-endian, already-reduced byte string into the field.
    /// Does not check that the value is `< modulus`; use [`Field::from_bytes_checked`]
    /// at trust boundaries.
    pub fn elem(&self, be_bytes: &[u8]) -> Elem {
        Elem(DynResidue::new(&U256::from_be_slice(be_bytes), self.params))
    }

    /// Lifts a big-endian byte string, rejecting it if it is not strictly
    /// less than the modulus (SM2 requires its scalars and coordinates to
    /// lie in `[0, p)` / `[0, n)`).
    #[allow(clippy::wrong_self_convention)]
    pub fn from_bytes_checked(&self, be_bytes: &[u8]) -> Result<Elem> {
        if be_bytes.len() != 32 {
            return Err(Error::InvalidArguments);
        }
        let value = U256::from_be_slice(be_bytes);
        if value >= self.modulus {
            return Err(Error::InvalidArguments);
        }
        Ok(Elem(DynResidue::new(&value, self.params)))
    }

    /// The additive identity.
    pub fn zero(&self) -> Elem {
        Elem(DynResidue::new(&U256::ZERO, self.params))
    }

    /// The multiplicative identity.
    pub fn one(&self) -> Elem {
        Elem(DynResidue::new(&U256::ONE, self.params))
    }

    /// Reduces an arbitrary-length big-endian byte string mod the modulus,
    /// via Horner's rule (`acc := acc*256 + byte`, one step per input byte,
    /// each step performed in the field). Needed because SM2's message
    /// pre-hash `e` may come from a hash wider than the 32-byte scalar
    /// field (e.g. SHA-512), and — unlike ECDSA's conventional "truncate to
    /// the leftmost n-bits" shortcut — GM/T 0003.2 and the reference
    /// OpenSSL-derived implementation (`BN_bin2bn` followed by
    /// `BN_mod_add`) treat the full digest as one arbitrary-precision
    /// integer reduced mod `n`, not a truncated prefix.
    pub fn reduce_be_bytes(&self, bytes: &[u8]) -> Elem {
        let base256 = {
            let mut buf = [0u8; 32];
            buf[30] = 1;
            self.elem(&buf)
        };
        let mut acc = self.zero();
        for &byte in bytes {
            let mut buf = [0u8; 32];
            buf[31] = byte;
            acc = acc.mul(base256).add(self.elem(&buf));
        }
        acc
    }

    /// Draws a uniformly random element of `[1, modulus)` by rejection
    /// sampling, as SM2 signing requires for its per-signature nonce `k`.
    ///
    /// Unlike [`crypto_bigint::RandomMod`] (which fills its buffer through
    /// `CryptoRngCore::fill_bytes`, an infallible call that panics on RNG
    /// failure), this goes through `try_fill_bytes` so a failing RNG
    /// surfaces as [`Error::RandomFailure`] instead of a panic, per spec
    /// §4.5 step 1.
    pub fn random_nonzero(&self, rng: &mut impl CryptoRngCore) -> Result<Elem> {
        let modulus = NonZero::new(self.modulus).expect("SM2 moduli are nonzero");
        loop {
            let mut buf = [0u8; 32];
            rng.try_fill_bytes(&mut buf)
                .map_err(|_| Error::RandomFailure)?;
            let candidate = U256::from_be_bytes(buf);
            if candidate != U256::ZERO && candidate < *modulus.as_ref() {
                return Ok(Elem(DynResidue::new(&candidate, self.params)));
            }
        }
    }
}

/// An element of a [`Field`], held in Montgomery form.
///
/// Elements from different `Field`s (e.g. one reduced mod `p`, the other mod
/// `n`) must never be mixed; the arithmetic methods below debug-assert this
/// in the underlying `DynResidue` operator impls but do not check it at
/// release time, matching `crypto_bigint`'s own contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elem(DynResidue<LIMBS>);

impl Elem {
    /// Reduces `self` back to a canonical big-endian byte string.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0.retrieve().to_be_bytes()
    }

    /// `self + rhs mod modulus`.
    pub fn add(self, rhs: Elem) -> Elem {
        Elem(self.0 + rhs.0)
    }

    /// `self - rhs mod modulus`.
    pub fn sub(self, rhs: Elem) -> Elem {
        Elem(self.0 - rhs.0)
    }

    /// `-self mod modulus`.
    pub fn neg(self) -> Elem {
        Elem(-self.0)
    }

    /// `self * rhs mod modulus`.
    pub fn mul(self, rhs: Elem) -> Elem {
        Elem(self.0 * rhs.0)
    }

    /// `self * self mod modulus`.
    pub fn square(self) -> Elem {
        Elem(self.0.square())
    }

    /// `self^-1 mod modulus`, if `self` is invertible (nonzero, given an odd
    /// prime modulus).
    pub fn invert(self) -> Result<Elem> {
        let (inv, is_some) = self.0.invert();
        if is_some.into() {
            Ok(Elem(inv))
        } else {
            Err(Error::InvalidArguments)
        }
    }

    /// Constant-time zero test.
    pub fn is_zero(self) -> bool {
        self.0.retrieve() == U256::ZERO
    }
}

impl ConditionallySelectable for Elem {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Elem(DynResidue::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Elem {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl zeroize::Zeroize for Elem {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
