// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

//! Schnorr proof of knowledge of a secret over a named curve.
//!
//! The private key is `key = H(secret)` reduced modulo N and the public
//! signature is `S = key · G`. A proof over a context string is
//! `c = H(context, r · G)`, `m = r − c · key`, and it is accepted iff
//! `H(context, m · G + c · S) == c`. Every hash appends the params salt.

use std::time::Duration;

use crate::config::IdentityConfig;
use crate::crypto;
use crate::curve::{CurveName, Point, Scalar};
use crate::hashing::{self, HashAlgorithm, HashInput};
use crate::jwt::{TokenAlgorithm, TokenSigner};
use crate::models::{Proof, Signature, SignedEnvelope, ZeroKnowledgeParams};
use crate::types::{constant_time_eq, ZkxError, ZkxResult, DEFAULT_ISSUER, DEFAULT_TOKEN_VALIDITY_SECS, MAX_SALT_SIZE};

/// A proving and verifying context bound to one set of [`ZeroKnowledgeParams`].
#[derive(Debug, Clone)]
pub struct ZkIdentity {
    params: ZeroKnowledgeParams,
    signer: Option<TokenSigner>,
    token_bits: usize,
    token_validity: Duration,
}

impl ZkIdentity {
    /// Creates a context with a fresh random salt of `salt_size` bytes.
    ///
    /// # Errors
    ///
    /// - [`ZkxError::InvalidCurve`] for an unknown curve name.
    /// - [`ZkxError::InvalidAlgorithm`] for an unknown hash or token algorithm.
    /// - [`ZkxError::InvalidInput`] if `salt_size` is zero or too large, or
    ///   `jwt_secret` is empty.
    pub fn new(
        curve_name: &str,
        hash_algorithm: &str,
        jwt_secret: Option<&[u8]>,
        jwt_algorithm: Option<&str>,
        salt_size: usize,
    ) -> ZkxResult<Self> {
        let curve: CurveName = curve_name.parse()?;
        let algorithm: HashAlgorithm = hash_algorithm.parse()?;
        let token_algorithm: TokenAlgorithm = match jwt_algorithm {
            Some(name) => name.parse()?,
            None => TokenAlgorithm::default(),
        };
        if salt_size == 0 || salt_size > MAX_SALT_SIZE {
            return Err(ZkxError::InvalidInput);
        }
        let signer = match jwt_secret {
            Some(secret) => Some(
                TokenSigner::new(secret, token_algorithm, DEFAULT_ISSUER)
                    .map_err(|_| ZkxError::InvalidInput)?,
            ),
            None => None,
        };
        let params = ZeroKnowledgeParams { algorithm, curve, salt: crypto::random_vec(salt_size)? };
        Ok(Self {
            token_bits: curve.order_bits(),
            params,
            signer,
            token_validity: Duration::from_secs(DEFAULT_TOKEN_VALIDITY_SECS),
        })
    }

    /// Creates a context from a validated [`IdentityConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidConfig`] if the configuration does not validate.
    pub fn from_config(config: &IdentityConfig) -> ZkxResult<Self> {
        config.validate()?;
        let (signer, token_validity) = match &config.jwt {
            Some(jwt) => (
                Some(TokenSigner::new(jwt.secret.as_bytes(), jwt.algorithm, jwt.issuer.clone())?),
                Duration::from_secs(jwt.validity_secs),
            ),
            None => (None, Duration::from_secs(DEFAULT_TOKEN_VALIDITY_SECS)),
        };
        let params = ZeroKnowledgeParams {
            algorithm: config.hash_algorithm,
            curve: config.curve,
            salt: crypto::random_vec(config.salt_size)?,
        };
        Ok(Self {
            token_bits: config.token_bits.unwrap_or_else(|| config.curve.order_bits()),
            params,
            signer,
            token_validity,
        })
    }

    /// Rebuilds a context around parameters received from a peer.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if the salt is empty or too large.
    pub fn from_params(params: ZeroKnowledgeParams) -> ZkxResult<Self> {
        if params.salt.is_empty() || params.salt.len() > MAX_SALT_SIZE {
            return Err(ZkxError::InvalidInput);
        }
        Ok(Self {
            token_bits: params.curve.order_bits(),
            params,
            signer: None,
            token_validity: Duration::from_secs(DEFAULT_TOKEN_VALIDITY_SECS),
        })
    }

    /// Attaches a token signer, replacing any existing one.
    pub fn with_token_signer(mut self, signer: TokenSigner) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn params(&self) -> &ZeroKnowledgeParams {
        &self.params
    }

    pub fn token_validity(&self) -> Duration {
        self.token_validity
    }

    /// Hashes `inputs` with this context's algorithm and salt, reduced modulo N.
    ///
    /// # Errors
    ///
    /// Propagates reduction failures.
    pub fn hash_to_scalar(&self, inputs: &[HashInput<'_>]) -> ZkxResult<Scalar> {
        hashing::hash_to_scalar(self.params.curve, self.params.algorithm, &self.params.salt, inputs)
    }

    /// Computes `k · G`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidScalar`] if `k` is zero or not canonical.
    pub fn point_from_scalar(&self, k: &Scalar) -> ZkxResult<Point> {
        self.params.curve.mul_base(k)
    }

    fn private_key(&self, secret: &[u8]) -> ZkxResult<Scalar> {
        self.hash_to_scalar(&[HashInput::Bytes(secret)])
    }

    /// Derives the public signature of `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidScalar`] in the negligible case that the
    /// derived key is zero.
    pub fn create_signature(&self, secret: &[u8]) -> ZkxResult<Signature> {
        let key = self.private_key(secret)?;
        Ok(Signature { params: self.params.clone(), signature: self.point_from_scalar(&key)? })
    }

    /// Proves knowledge of `secret` bound to `context`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::EntropyUnavailable`] if no nonce can be drawn.
    pub fn create_proof(&self, secret: &[u8], context: &[u8]) -> ZkxResult<Proof> {
        let curve = self.params.curve;
        let key = self.private_key(secret)?;
        let r = loop {
            let candidate = curve.random_scalar()?;
            if !candidate.is_zero() {
                break candidate;
            }
        };
        let commitment = curve.mul_base(&r)?;
        let c = self.hash_to_scalar(&[HashInput::Bytes(context), HashInput::Point(&commitment)])?;
        let m = curve.sub_mul(&r, &c, &key)?;
        Ok(Proof { params: self.params.clone(), c, m })
    }

    /// Checks `proof` against `signature` for `context`.
    ///
    /// The hash domain is rebuilt from the signature's params, so any context
    /// can verify any signature. Malformed inputs verify as `false`.
    pub fn verify(&self, context: &[u8], signature: &Signature, proof: Proof) -> bool {
        verify_proof(context, signature, &proof).unwrap_or(false)
    }

    /// Proves knowledge of `secret` bound to `data`.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::create_proof`] failures.
    pub fn sign(&self, secret: &[u8], data: &str) -> ZkxResult<SignedEnvelope> {
        Ok(SignedEnvelope { data: data.to_string(), proof: self.create_proof(secret, data.as_bytes())? })
    }

    pub fn verify_envelope(&self, envelope: SignedEnvelope, signature: &Signature) -> bool {
        self.verify(envelope.data.as_bytes(), signature, envelope.proof)
    }

    /// Draws a fresh challenge of `ceil(token_bits / 8)` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::EntropyUnavailable`] if the random source is unavailable.
    pub fn generate_token(&self) -> ZkxResult<Vec<u8>> {
        crypto::random_vec(self.token_bits.div_ceil(8))
    }

    /// Wraps `signature` in a signed token.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::MissingSecret`] if no token secret is configured.
    pub fn issue_token(&self, signature: &Signature, validity: Duration) -> ZkxResult<String> {
        self.signer.as_ref().ok_or(ZkxError::MissingSecret)?.issue(signature, validity)
    }

    /// Recovers the signature from a token issued under this context's secret.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::MissingSecret`] if no token secret is configured,
    /// [`ZkxError::InvalidToken`] if the token does not verify.
    pub fn verify_token(&self, token: &str) -> ZkxResult<Signature> {
        self.signer.as_ref().ok_or(ZkxError::MissingSecret)?.verify(token)
    }

    /// Accepts an envelope whose data is a token from [`Self::issue_token`]
    /// and whose proof is bound to that token string.
    pub fn login(&self, envelope: SignedEnvelope) -> bool {
        match self.verify_token(&envelope.data) {
            Ok(signature) => self.verify_envelope(envelope, &signature),
            Err(_) => false,
        }
    }
}

fn verify_proof(context: &[u8], signature: &Signature, proof: &Proof) -> ZkxResult<bool> {
    if proof.params != signature.params {
        return Ok(false);
    }
    let params = &signature.params;
    let curve = params.curve;
    curve.validate_scalar(&proof.c)?;
    curve.validate_scalar(&proof.m)?;
    let commitment = curve.mul_base_add(&proof.m, &proof.c, &signature.signature)?;
    let expected = hashing::hash_to_scalar(
        curve,
        params.algorithm,
        &params.salt,
        &[HashInput::Bytes(context), HashInput::Point(&commitment)],
    )?;
    Ok(constant_time_eq(expected.as_bytes(), proof.c.as_bytes()))
}
