//! The SM2 elliptic-curve signature scheme (GM/T 0003), over the
//! `sm2p256v1` curve.
//!
//! Four entry points, per spec §6:
//!
//! - [`sm2_sign_hash`] / [`sm2_verify_hash`] operate on an already-computed
//!   pre-hash digest, treating it as opaque.
//! - [`sm2_sign_message`] / [`sm2_verify_message`] additionally perform the
//!   user-identity pre-hash ([`za::compute_za`], GM/T 0003.2) before
//!   delegating to the `_hash` variant.
//!
//! A signature's wire form is DER (`Signature::to_der`/`from_der`);
//! `from_der` is the one place this crate checks DER canonicality, per spec
//! §6/§8.

pub mod curve;
pub mod key;
pub mod signature;
pub mod za;

mod sign;
mod verify;

pub use key::{Sm2PrivateKey, Sm2PublicKey};
pub use sign::{sm2_sign_hash, sm2_sign_message};
pub use signature::Signature;
pub use verify::{sm2_verify_hash, sm2_verify_message};
