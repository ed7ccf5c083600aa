// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

//! HMAC-signed tokens carrying an identity [`Signature`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use jsonwebtoken::{decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::Signature;
use crate::types::{SecureBytes, ZkxError, ZkxResult};

/// Supported token MAC algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TokenAlgorithm {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl TokenAlgorithm {
    fn jwt_algorithm(self) -> Algorithm {
        match self {
            TokenAlgorithm::HS256 => Algorithm::HS256,
            TokenAlgorithm::HS384 => Algorithm::HS384,
            TokenAlgorithm::HS512 => Algorithm::HS512,
        }
    }
}

impl FromStr for TokenAlgorithm {
    type Err = ZkxError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_uppercase().as_str() {
            "HS256" => Ok(TokenAlgorithm::HS256),
            "HS384" => Ok(TokenAlgorithm::HS384),
            "HS512" => Ok(TokenAlgorithm::HS512),
            _ => Err(ZkxError::InvalidAlgorithm),
        }
    }
}

impl fmt::Display for TokenAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Serialize, Deserialize)]
struct Claims {
    signature: Signature,
    iat: u64,
    nbf: u64,
    exp: u64,
    iss: String,
}

/// Issues and checks identity tokens under one secret.
#[derive(Debug, Clone)]
pub struct TokenSigner {
    secret: SecureBytes,
    algorithm: TokenAlgorithm,
    issuer: String,
}

impl TokenSigner {
    /// # Errors
    ///
    /// Returns [`ZkxError::MissingSecret`] if `secret` is empty.
    pub fn new(secret: &[u8], algorithm: TokenAlgorithm, issuer: impl Into<String>) -> ZkxResult<Self> {
        if secret.is_empty() {
            return Err(ZkxError::MissingSecret);
        }
        Ok(Self {
            secret: SecureBytes::from_slice(secret),
            algorithm,
            issuer: issuer.into(),
        })
    }

    pub fn algorithm(&self) -> TokenAlgorithm {
        self.algorithm
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Wraps `signature` in a token valid from now for `validity`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::CryptoError`] if encoding fails.
    pub fn issue(&self, signature: &Signature, validity: Duration) -> ZkxResult<String> {
        let now = get_current_timestamp();
        let claims = Claims {
            signature: signature.clone(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(validity.as_secs()),
            iss: self.issuer.clone(),
        };
        encode(
            &Header::new(self.algorithm.jwt_algorithm()),
            &claims,
            &EncodingKey::from_secret(self.secret.data()),
        )
        .map_err(|_| ZkxError::CryptoError)
    }

    /// Checks the token MAC, validity window and issuer, and returns the
    /// embedded signature.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidToken`] on any failure.
    pub fn verify(&self, token: &str) -> ZkxResult<Signature> {
        let mut validation = Validation::new(self.algorithm.jwt_algorithm());
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss"]);
        decode::<Claims>(token, &DecodingKey::from_secret(self.secret.data()), &validation)
            .map(|data| data.claims.signature)
            .map_err(|_| ZkxError::InvalidToken)
    }
}
