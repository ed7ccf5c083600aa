// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cipher::CipherAlgorithm;
use crate::curve::CurveName;
use crate::hashing::HashAlgorithm;
use crate::jwt::TokenAlgorithm;
use crate::types::{
    ZkxError, ZkxResult, DEFAULT_ISSUER, DEFAULT_SALT_SIZE, DEFAULT_SYMBOL_COUNT,
    DEFAULT_TOKEN_VALIDITY_SECS, MAX_SALT_SIZE,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub curve: CurveName,
    pub hash_algorithm: HashAlgorithm,
    pub salt_size: usize,
    /// Challenge token size; the curve order's bit length when unset.
    pub token_bits: Option<usize>,
    pub jwt: Option<JwtConfig>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            curve: CurveName::Secp256k1,
            hash_algorithm: HashAlgorithm::Sha3_256,
            salt_size: DEFAULT_SALT_SIZE,
            token_bits: None,
            jwt: None,
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ZkxResult<()> {
        if self.salt_size == 0 || self.salt_size > MAX_SALT_SIZE {
            return Err(ZkxError::InvalidConfig);
        }
        if self.token_bits == Some(0) {
            return Err(ZkxError::InvalidConfig);
        }
        if let Some(jwt) = &self.jwt {
            jwt.validate()?;
        }
        Ok(())
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: TokenAlgorithm,
    pub issuer: String,
    pub validity_secs: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: TokenAlgorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            validity_secs: DEFAULT_TOKEN_VALIDITY_SECS,
        }
    }
}

impl JwtConfig {
    pub fn validate(&self) -> ZkxResult<()> {
        if self.secret.is_empty() || self.issuer.is_empty() || self.validity_secs == 0 {
            return Err(ZkxError::InvalidConfig);
        }
        Ok(())
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("validity_secs", &self.validity_secs)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CipherConfig {
    pub algorithm: CipherAlgorithm,
    pub symbol_count: usize,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self { algorithm: CipherAlgorithm::Sha256, symbol_count: DEFAULT_SYMBOL_COUNT }
    }
}

impl CipherConfig {
    pub fn validate(&self) -> ZkxResult<()> {
        if self.symbol_count == 0 {
            return Err(ZkxError::InvalidConfig);
        }
        Ok(())
    }
}

/// Everything one end of a session needs, loadable from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub identity: IdentityConfig,
    pub cipher: CipherConfig,
    pub seed_phrase: String,
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidConfig`] if the file cannot be read, parsed
    /// or validated.
    pub fn load_from_file(path: impl AsRef<Path>) -> ZkxResult<Self> {
        let data = fs::read_to_string(path).map_err(|_| ZkxError::InvalidConfig)?;
        Self::from_toml_str(&data)
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidConfig`] if the text cannot be parsed or validated.
    pub fn from_toml_str(data: &str) -> ZkxResult<Self> {
        let cfg: Self = toml::from_str(data).map_err(|_| ZkxError::InvalidConfig)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `ZKX_CURVE`, `ZKX_HASH_ALGORITHM`,
    /// `ZKX_CIPHER_ALGORITHM` and `ZKX_SYMBOL_COUNT` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidConfig`] for unparseable values.
    pub fn from_env() -> ZkxResult<Self> {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("ZKX_CURVE") {
            cfg.identity.curve = v.parse().map_err(|_| ZkxError::InvalidConfig)?;
        }
        if let Ok(v) = std::env::var("ZKX_HASH_ALGORITHM") {
            cfg.identity.hash_algorithm = v.parse().map_err(|_| ZkxError::InvalidConfig)?;
        }
        if let Ok(v) = std::env::var("ZKX_CIPHER_ALGORITHM") {
            cfg.cipher.algorithm = v.parse().map_err(|_| ZkxError::InvalidConfig)?;
        }
        if let Ok(v) = std::env::var("ZKX_SYMBOL_COUNT") {
            cfg.cipher.symbol_count = v.parse().map_err(|_| ZkxError::InvalidConfig)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> ZkxResult<()> {
        self.identity.validate()?;
        self.cipher.validate()
    }
}
