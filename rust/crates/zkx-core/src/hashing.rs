// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use std::fmt;
use std::str::FromStr;

use blake2::Blake2b512;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};
use sha3::{Sha3_224, Sha3_256, Sha3_384, Sha3_512};
use zeroize::Zeroize;

use crate::curve::{CurveName, Point, Scalar};
use crate::types::{ZkxError, ZkxResult};

/// Hash functions available for the Fiat-Shamir challenge and key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashAlgorithm {
    #[serde(rename = "sha224")]
    Sha224,
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha384")]
    Sha384,
    #[serde(rename = "sha512")]
    Sha512,
    #[serde(rename = "sha3_224")]
    Sha3_224,
    #[serde(rename = "sha3_256")]
    Sha3_256,
    #[serde(rename = "sha3_384")]
    Sha3_384,
    #[serde(rename = "sha3_512")]
    Sha3_512,
    #[serde(rename = "blake2b")]
    Blake2b,
}

impl HashAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha224 => "sha224",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Sha3_224 => "sha3_224",
            HashAlgorithm::Sha3_256 => "sha3_256",
            HashAlgorithm::Sha3_384 => "sha3_384",
            HashAlgorithm::Sha3_512 => "sha3_512",
            HashAlgorithm::Blake2b => "blake2b",
        }
    }

    /// Digest length in bytes.
    pub fn output_length(self) -> usize {
        match self {
            HashAlgorithm::Sha224 | HashAlgorithm::Sha3_224 => 28,
            HashAlgorithm::Sha256 | HashAlgorithm::Sha3_256 => 32,
            HashAlgorithm::Sha384 | HashAlgorithm::Sha3_384 => 48,
            HashAlgorithm::Sha512 | HashAlgorithm::Sha3_512 | HashAlgorithm::Blake2b => 64,
        }
    }

    /// Hashes the concatenation of `parts`.
    pub fn digest(self, parts: &[&[u8]]) -> Vec<u8> {
        match self {
            HashAlgorithm::Sha224 => digest_parts::<Sha224>(parts),
            HashAlgorithm::Sha256 => digest_parts::<Sha256>(parts),
            HashAlgorithm::Sha384 => digest_parts::<Sha384>(parts),
            HashAlgorithm::Sha512 => digest_parts::<Sha512>(parts),
            HashAlgorithm::Sha3_224 => digest_parts::<Sha3_224>(parts),
            HashAlgorithm::Sha3_256 => digest_parts::<Sha3_256>(parts),
            HashAlgorithm::Sha3_384 => digest_parts::<Sha3_384>(parts),
            HashAlgorithm::Sha3_512 => digest_parts::<Sha3_512>(parts),
            HashAlgorithm::Blake2b => digest_parts::<Blake2b512>(parts),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = ZkxError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "sha224" => Ok(HashAlgorithm::Sha224),
            "sha256" => Ok(HashAlgorithm::Sha256),
            "sha384" => Ok(HashAlgorithm::Sha384),
            "sha512" => Ok(HashAlgorithm::Sha512),
            "sha3_224" => Ok(HashAlgorithm::Sha3_224),
            "sha3_256" => Ok(HashAlgorithm::Sha3_256),
            "sha3_384" => Ok(HashAlgorithm::Sha3_384),
            "sha3_512" => Ok(HashAlgorithm::Sha3_512),
            "blake2b" => Ok(HashAlgorithm::Blake2b),
            _ => Err(ZkxError::InvalidAlgorithm),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = D::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

/// One value fed into [`hash_to_scalar`].
///
/// Each variant has a single canonical byte form: bytes are taken as-is, text
/// as UTF-8, integers and scalars as minimal big-endian (zero is one `0x00`
/// byte) and points as their compressed encoding. `Integer(n)` and a scalar
/// holding `n` therefore hash identically.
#[derive(Debug, Clone, Copy)]
pub enum HashInput<'a> {
    Bytes(&'a [u8]),
    Text(&'a str),
    Integer(u64),
    Scalar(&'a Scalar),
    Point(&'a Point),
}

impl HashInput<'_> {
    fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            HashInput::Bytes(bytes) => out.extend_from_slice(bytes),
            HashInput::Text(text) => out.extend_from_slice(text.as_bytes()),
            HashInput::Integer(value) => write_minimal(&value.to_be_bytes(), out),
            HashInput::Scalar(scalar) => write_minimal(scalar.as_bytes(), out),
            HashInput::Point(point) => out.extend_from_slice(point.as_bytes()),
        }
    }
}

fn write_minimal(be: &[u8], out: &mut Vec<u8>) {
    let skip = be.iter().take_while(|b| **b == 0).count().min(be.len() - 1);
    out.extend_from_slice(&be[skip..]);
}

/// Hashes `inputs` followed by `salt` and reduces the digest modulo the curve order.
///
/// # Errors
///
/// Propagates reduction failures from [`CurveName::reduce`].
pub fn hash_to_scalar(
    curve: CurveName,
    algorithm: HashAlgorithm,
    salt: &[u8],
    inputs: &[HashInput<'_>],
) -> ZkxResult<Scalar> {
    let mut buffer = Vec::new();
    for input in inputs {
        input.write_to(&mut buffer);
    }
    buffer.extend_from_slice(salt);
    let mut digest = algorithm.digest(&[&buffer]);
    buffer.zeroize();
    let scalar = curve.reduce(&digest);
    digest.zeroize();
    scalar
}
