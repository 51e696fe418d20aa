//! `(r, s)` pairs and their DER wire form.
//!
//! Spec §6 treats DER encoding as a collaborator's job in general, but
//! singles out one check the core itself must perform: `sm2_verify_message`
//! must reject a signature whose DER encoding isn't canonical (extra leading
//! zeros, BER-form lengths, trailing bytes — spec §8 property 8). The
//! simplest way to guarantee that without hand-rolling a validating parser
//! is to parse leniently, re-encode strictly, and compare byte-for-byte
//! (`SPEC_FULL.md` §B.7) — implemented here as `Signature::from_der`, which
//! is the only place DER bytes ever enter this crate.

use alloc::vec::Vec;

use crate::errors::{Error, Result};

/// `(r, s)`, the components of an SM2 signature, each already range-checked
/// against `[1, n-1]` by the caller of `from_parts` (sign/verify perform
/// that check; this type itself does not).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    /// Builds a signature from raw big-endian `r`, `s`.
    pub fn from_parts(r: [u8; 32], s: [u8; 32]) -> Self {
        Self { r, s }
    }

    /// `r`, big-endian.
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// `s`, big-endian.
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Encodes as `SEQUENCE { INTEGER r, INTEGER s }`, minimal-length DER.
    pub fn to_der(&self) -> Vec<u8> {
        let mut content = Vec::new();
        encode_integer(&self.r, &mut content);
        encode_integer(&self.s, &mut content);
        let mut out = Vec::with_capacity(content.len() + 4);
        out.push(0x30);
        encode_length(content.len(), &mut out);
        out.extend_from_slice(&content);
        out
    }

    /// Parses a DER `SEQUENCE { INTEGER, INTEGER }`, rejecting the input
    /// unless re-encoding the parsed value reproduces it byte-for-byte —
    /// catching non-minimal lengths, superfluous leading zero bytes, and
    /// trailing data without needing a validating parser.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let mut pos = 0;
        let seq = read_tlv(der, &mut pos, 0x30)?;

        let mut inner = 0;
        let r_bytes = read_tlv(seq, &mut inner, 0x02)?;
        let s_bytes = read_tlv(seq, &mut inner, 0x02)?;

        let sig = Signature {
            r: pad_to_32(r_bytes)?,
            s: pad_to_32(s_bytes)?,
        };
        if sig.to_der() != der {
            return Err(Error::InvalidEncoding);
        }
        Ok(sig)
    }
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let mut v = bytes;
    while v.len() > 1 && v[0] == 0 {
        v = &v[1..];
    }
    v
}

fn pad_to_32(bytes: &[u8]) -> Result<[u8; 32]> {
    let trimmed = trim_leading_zeros(bytes);
    if trimmed.len() > 32 {
        return Err(Error::InvalidEncoding);
    }
    let mut out = [0u8; 32];
    out[32 - trimmed.len()..].copy_from_slice(trimmed);
    Ok(out)
}

fn encode_integer(value: &[u8; 32], out: &mut Vec<u8>) {
    let trimmed = trim_leading_zeros(value);
    let needs_pad = trimmed[0] & 0x80 != 0;
    let content_len = trimmed.len() + needs_pad as usize;

    out.push(0x02);
    encode_length(content_len, out);
    if needs_pad {
        out.push(0x00);
    }
    out.extend_from_slice(trimmed);
}

fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let len_bytes = (len as u64).to_be_bytes();
    let first_nonzero = len_bytes.iter().position(|&b| b != 0).unwrap_or(7);
    let bytes = &len_bytes[first_nonzero..];
    out.push(0x80 | bytes.len() as u8);
    out.extend_from_slice(bytes);
}

fn read_length(input: &[u8], pos: &mut usize) -> Result<usize> {
    let first = *input.get(*pos).ok_or(Error::InvalidEncoding)?;
    *pos += 1;
    if first & 0x80 == 0 {
        return Ok(first as usize);
    }
    let num_bytes = (first & 0x7f) as usize;
    if num_bytes == 0 || num_bytes > 8 {
        return Err(Error::InvalidEncoding);
    }
    let bytes = input.get(*pos..*pos + num_bytes).ok_or(Error::InvalidEncoding)?;
    *pos += num_bytes;
    let mut len: usize = 0;
    for &b in bytes {
        len = (len << 8) | b as usize;
    }
    Ok(len)
}

fn read_tlv<'a>(input: &'a [u8], pos: &mut usize, expected_tag: u8) -> Result<&'a [u8]> {
    let tag = *input.get(*pos).ok_or(Error::InvalidEncoding)?;
    if tag != expected_tag {
        return Err(Error::InvalidEncoding);
    }
    *pos += 1;
    let len = read_length(input, pos)?;
    let start = *pos;
    let end = start.checked_add(len).ok_or(Error::InvalidEncoding)?;
    let content = input.get(start..end).ok_or(Error::InvalidEncoding)?;
    *pos = end;
    Ok(content)
}
