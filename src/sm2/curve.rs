//! `sm2p256v1` domain parameters (GM/T 0003.5).
//!
//! Same curve shape as NIST P-256 (`a = p - 3`, 256-bit prime field and
//! order) but with China's own prime, coefficients, and base point.

use crate::bigint::Field;
use crate::ec::{Curve, Group, Point};

const P: [u8; 32] = [
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];
const B: [u8; 32] = [
    0x28, 0xe9, 0xfa, 0x9e, 0x9d, 0x9f, 0x5e, 0x34, 0x4d, 0x5a, 0x9e, 0x4b, 0xcf, 0x65, 0x09, 0xa7,
    0xf3, 0x97, 0x89, 0xf5, 0x15, 0xab, 0x8f, 0x92, 0xdd, 0xbc, 0xbd, 0x41, 0x4d, 0x94, 0x0e, 0x93,
];
const GX: [u8; 32] = [
    0x32, 0xc4, 0xae, 0x2c, 0x1f, 0x19, 0x81, 0x19, 0x5f, 0x99, 0x04, 0x46, 0x6a, 0x39, 0xc9, 0x94,
    0x8f, 0xe3, 0x0b, 0xbf, 0xf2, 0x66, 0x0b, 0xe1, 0x71, 0x5a, 0x45, 0x89, 0x33, 0x4c, 0x74, 0xc7,
];
const GY: [u8; 32] = [
    0xbc, 0x37, 0x36, 0xa2, 0xf4, 0xf6, 0x77, 0x9c, 0x59, 0xbd, 0xce, 0xe3, 0x6b, 0x69, 0x21, 0x53,
    0xd0, 0xa9, 0x87, 0x7c, 0xc6, 0x2a, 0x47, 0x40, 0x02, 0xdf, 0x32, 0xe5, 0x21, 0x39, 0xf0, 0xa0,
];
const N: [u8; 32] = [
    0xff, 0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0x72, 0x03, 0xdf, 0x6b, 0x21, 0xc6, 0x05, 0x2b, 0x53, 0xbb, 0xf4, 0x09, 0x39, 0xd5, 0x41, 0x23,
];

/// Builds the `sm2p256v1` group: field `p`, curve `y^2 = x^3 - 3x + b`, base
/// point `G`, and order `n`.
pub fn group() -> Group {
    let field = Field::new(&P);
    let order = Field::new(&N);
    let a = field.modulus().wrapping_sub(&crypto_bigint::U256::from(3u8));
    let curve = Curve {
        a: field.elem(&crypto_bigint_to_be(a)),
        b: field.elem(&B),
    };
    let g = Point::from_affine(field.elem(&GX), field.elem(&GY), &field);
    Group {
        curve,
        field,
        g,
        order,
    }
}

fn crypto_bigint_to_be(value: crypto_bigint::U256) -> [u8; 32] {
    use crypto_bigint::Encoding;
    value.to_be_bytes()
}
