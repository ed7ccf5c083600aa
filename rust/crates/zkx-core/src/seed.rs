// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::crypto;
use crate::types::{constant_time_eq, ZkxError, ZkxResult, MAX_SEED_PADDING, SEED_LENGTH};

/// A 32-byte session secret. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LENGTH]);

impl Seed {
    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Self(bytes)
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if `bytes` is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> ZkxResult<Self> {
        let array: [u8; SEED_LENGTH] = bytes.try_into().map_err(|_| ZkxError::InvalidInput)?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.0
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for Seed {}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&codec::encode_b64(&self.0))
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut bytes = codec::b64_bytes::deserialize(deserializer)?;
        let seed = Seed::from_slice(&bytes).map_err(serde::de::Error::custom);
        bytes.zeroize();
        seed
    }
}

/// Mints session seeds as `SHA-256(random padding ‖ phrase)`, with the padding
/// length itself drawn uniformly from `[0, max_padding)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedGenerator {
    max_padding: u32,
}

impl Default for SeedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedGenerator {
    pub fn new() -> Self {
        Self { max_padding: MAX_SEED_PADDING }
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if `max_padding` is zero.
    pub fn with_max_padding(max_padding: u32) -> ZkxResult<Self> {
        if max_padding == 0 {
            return Err(ZkxError::InvalidInput);
        }
        Ok(Self { max_padding })
    }

    pub fn max_padding(&self) -> u32 {
        self.max_padding
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::EntropyUnavailable`] if the random source is unavailable.
    pub fn generate(&self, phrase: &str) -> ZkxResult<Seed> {
        let padding = crypto::random_uniform(self.max_padding)?;
        let mut material = crypto::random_vec(padding as usize)?;
        material.extend_from_slice(phrase.as_bytes());
        let mut digest: [u8; SEED_LENGTH] = Sha256::digest(&material).into();
        material.zeroize();
        let seed = Seed(digest);
        digest.zeroize();
        Ok(seed)
    }
}
