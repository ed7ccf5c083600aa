// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

//! Keyed-hash substitution cipher over fixed-length chunks.
//!
//! Each chunk of `symbol_count` characters is replaced by the lower-case hex
//! HMAC of its UTF-8 bytes under the session seed. Decryption is a table
//! lookup: the decrypting side enumerates every chunk over [`ALPHABET`] once
//! and indexes the digests. The table has `94^symbol_count` entries, so only
//! small chunk lengths are practical.
//!
//! A message round-trips when its length is a multiple of `symbol_count`.
//! A shorter final chunk encrypts fine but has no table entry.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac, SimpleHmac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sha3::Sha3_224;

use crate::seed::Seed;
use crate::types::{ZkxError, ZkxResult, ALPHABET, ALPHABET_LENGTH};

const TABLE_PREALLOCATION_LIMIT: usize = 1 << 20;

/// Keyed hash used by the cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherAlgorithm {
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha3_224")]
    Sha3_224,
}

impl CipherAlgorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            CipherAlgorithm::Sha256 => "sha256",
            CipherAlgorithm::Sha3_224 => "sha3_224",
        }
    }

    /// Width of one encrypted chunk in hex characters.
    pub fn digest_hex_len(self) -> usize {
        match self {
            CipherAlgorithm::Sha256 => 64,
            CipherAlgorithm::Sha3_224 => 56,
        }
    }
}

impl FromStr for CipherAlgorithm {
    type Err = ZkxError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "sha256" => Ok(CipherAlgorithm::Sha256),
            "sha3_224" => Ok(CipherAlgorithm::Sha3_224),
            _ => Err(ZkxError::InvalidAlgorithm),
        }
    }
}

impl fmt::Display for CipherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Keyed once; each digest works on a clone of the initialised state.
#[derive(Clone)]
enum KeyedMac {
    Sha256(Hmac<Sha256>),
    Sha3_224(SimpleHmac<Sha3_224>),
}

impl KeyedMac {
    fn new(algorithm: CipherAlgorithm, key: &[u8]) -> ZkxResult<Self> {
        match algorithm {
            CipherAlgorithm::Sha256 => <Hmac<Sha256> as Mac>::new_from_slice(key)
                .map(KeyedMac::Sha256)
                .map_err(|_| ZkxError::InvalidInput),
            CipherAlgorithm::Sha3_224 => <SimpleHmac<Sha3_224> as Mac>::new_from_slice(key)
                .map(KeyedMac::Sha3_224)
                .map_err(|_| ZkxError::InvalidInput),
        }
    }

    fn digest_hex(&self, chunk: &[u8]) -> String {
        match self {
            KeyedMac::Sha256(prototype) => {
                let mut mac = prototype.clone();
                mac.update(chunk);
                hex::encode(mac.finalize().into_bytes())
            }
            KeyedMac::Sha3_224(prototype) => {
                let mut mac = prototype.clone();
                mac.update(chunk);
                hex::encode(mac.finalize().into_bytes())
            }
        }
    }
}

/// Seed-keyed chunk cipher; decrypt-capable once its table is built.
#[derive(Clone)]
pub struct ChunkCipher {
    algorithm: CipherAlgorithm,
    symbol_count: usize,
    mac: KeyedMac,
    table: Option<HashMap<String, usize>>,
}

impl ChunkCipher {
    /// Creates an encrypt-only cipher keyed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if `symbol_count` is zero.
    pub fn new(algorithm: CipherAlgorithm, secret: &[u8], symbol_count: usize) -> ZkxResult<Self> {
        if symbol_count == 0 {
            return Err(ZkxError::InvalidInput);
        }
        Ok(Self { algorithm, symbol_count, mac: KeyedMac::new(algorithm, secret)?, table: None })
    }

    /// Creates an encrypt-only cipher keyed with a session seed.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if `symbol_count` is zero.
    pub fn from_seed(algorithm: CipherAlgorithm, seed: &Seed, symbol_count: usize) -> ZkxResult<Self> {
        Self::new(algorithm, seed.as_bytes(), symbol_count)
    }

    /// Creates a cipher and builds its decrypt table.
    ///
    /// # Errors
    ///
    /// See [`Self::new`] and [`Self::build_decrypt_table`].
    pub fn with_decrypt_table(
        algorithm: CipherAlgorithm,
        secret: &[u8],
        symbol_count: usize,
    ) -> ZkxResult<Self> {
        let mut cipher = Self::new(algorithm, secret, symbol_count)?;
        cipher.build_decrypt_table()?;
        Ok(cipher)
    }

    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    pub fn has_decrypt_table(&self) -> bool {
        self.table.is_some()
    }

    /// Number of entries in the decrypt table, if built.
    pub fn table_len(&self) -> Option<usize> {
        self.table.as_ref().map(HashMap::len)
    }

    /// Enumerates every chunk over the alphabet and indexes its digest.
    ///
    /// Rebuilding an existing table is a no-op.
    ///
    /// # Errors
    ///
    /// - [`ZkxError::InvalidInput`] if `94^symbol_count` overflows `usize`.
    /// - [`ZkxError::DigestCollision`] if two chunks share a digest.
    pub fn build_decrypt_table(&mut self) -> ZkxResult<()> {
        if self.table.is_some() {
            return Ok(());
        }
        let exponent = u32::try_from(self.symbol_count).map_err(|_| ZkxError::InvalidInput)?;
        let count = ALPHABET_LENGTH.checked_pow(exponent).ok_or(ZkxError::InvalidInput)?;
        let mut entries = HashMap::with_capacity(count.min(TABLE_PREALLOCATION_LIMIT));
        let mut chunk = vec![0u8; self.symbol_count];
        for index in 0..count {
            decode_index(index, &mut chunk);
            if entries.insert(self.mac.digest_hex(&chunk), index).is_some() {
                return Err(ZkxError::DigestCollision);
            }
        }
        self.table = Some(entries);
        Ok(())
    }

    /// Lower-case hex digest of one chunk.
    pub fn encrypt_chunk(&self, chunk: &str) -> String {
        self.mac.digest_hex(chunk.as_bytes())
    }

    /// Splits `message` into `symbol_count`-character chunks (the last may be
    /// shorter) and concatenates their digests.
    pub fn encrypt_message(&self, message: &str) -> String {
        let chars: Vec<char> = message.chars().collect();
        chars
            .chunks(self.symbol_count)
            .map(|chunk| self.encrypt_chunk(&chunk.iter().collect::<String>()))
            .collect()
    }

    /// Inverts [`Self::encrypt_message`] by table lookup.
    ///
    /// # Errors
    ///
    /// - [`ZkxError::MissingDecryptTable`] on an encrypt-only cipher.
    /// - [`ZkxError::MisalignedCiphertext`] if the ciphertext length is not a
    ///   multiple of `symbol_count`.
    /// - [`ZkxError::UnknownChunk`] if any digest is not in the table.
    pub fn decrypt_message(&self, ciphertext: &str) -> ZkxResult<String> {
        let table = self.table.as_ref().ok_or(ZkxError::MissingDecryptTable)?;
        if ciphertext.len() % self.symbol_count != 0 {
            return Err(ZkxError::MisalignedCiphertext);
        }
        let mut plaintext = Vec::with_capacity(ciphertext.len() / self.algorithm.digest_hex_len() * self.symbol_count);
        let mut chunk = vec![0u8; self.symbol_count];
        for piece in ciphertext.as_bytes().chunks(self.algorithm.digest_hex_len()) {
            let digest = std::str::from_utf8(piece).map_err(|_| ZkxError::UnknownChunk)?;
            let index = table.get(digest).ok_or(ZkxError::UnknownChunk)?;
            decode_index(*index, &mut chunk);
            plaintext.extend_from_slice(&chunk);
        }
        String::from_utf8(plaintext).map_err(|_| ZkxError::UnknownChunk)
    }
}

impl fmt::Debug for ChunkCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkCipher")
            .field("algorithm", &self.algorithm)
            .field("symbol_count", &self.symbol_count)
            .field("table_len", &self.table_len())
            .finish_non_exhaustive()
    }
}

/// Whether every character of `message` is in [`ALPHABET`], i.e. whether a
/// message of aligned length can be decrypted by the peer.
pub fn is_encodable(message: &str) -> bool {
    message.chars().all(|c| ALPHABET.contains(c))
}

// Mixed-radix decode, first character most significant.
fn decode_index(mut index: usize, chunk: &mut [u8]) {
    let symbols = ALPHABET.as_bytes();
    for slot in chunk.iter_mut().rev() {
        *slot = symbols[index % ALPHABET_LENGTH];
        index /= ALPHABET_LENGTH;
    }
}
