#![cfg_attr(not(feature = "std"), no_std)]

//! RSA-OAEP message encoding and SM2 elliptic-curve signatures.
//!
//! This crate implements two cryptographic transforms layered on top of a
//! big-integer and elliptic-curve facility built on [`crypto_bigint`]:
//!
//! - [`oaep`]: the OAEP encode/decode transform from [RFC 8017 §7.1], applied
//!   before/after the RSA trapdoor permutation (which this crate does not
//!   implement — key generation and raw modular exponentiation are out of
//!   scope).
//! - [`sm2`]: the SM2 elliptic-curve signature scheme over the `sm2p256v1`
//!   curve, including the user-identity pre-hash ("ZA") defined by GM/T
//!   0003.2.
//!
//! [RFC 8017 §7.1]: https://datatracker.ietf.org/doc/html/rfc8017#section-7.1

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub use rand_core;
pub use signature;

mod bigint;
mod ec;
mod sm3;

pub mod errors;
pub mod hash;
pub mod oaep;
pub mod sm2;

pub use crate::{
    bigint::{Elem, Field},
    ec::{Curve, Group, Point},
    errors::{Error, Result},
    hash::HashAlg,
};
