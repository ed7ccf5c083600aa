// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use std::fmt;

use zkx_core::cipher::ChunkCipher;
use zkx_core::config::{CipherConfig, SessionConfig};
use zkx_core::identity::ZkIdentity;
use zkx_core::seed::SeedGenerator;
use zkx_core::types::{SecureBytes, ZkxError, ZkxResult};
use zeroize::Zeroize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProverPhase {
    Idle,
    SignatureSent,
    TokenReceived,
    ProofSent,
    Authenticated,
    KeyExchanged,
    Established,
    Closed,
    Error,
}

/// Mutable per-session state of the prover.
#[derive(Debug)]
pub struct ProverState {
    pub phase: ProverPhase,
    pub token: Vec<u8>,
    pub cipher: Option<ChunkCipher>,
    pub expected_confirmation: String,
    pub pending_echo: Option<String>,
}

impl ProverState {
    pub fn new() -> Self {
        Self {
            phase: ProverPhase::Idle,
            token: Vec::new(),
            cipher: None,
            expected_confirmation: String::new(),
            pending_echo: None,
        }
    }

    pub(crate) fn expect_phase(&self, phase: ProverPhase) -> ZkxResult<()> {
        if self.phase != phase {
            return Err(ZkxError::UnexpectedPhase);
        }
        Ok(())
    }

    pub(crate) fn settle<T>(&mut self, result: ZkxResult<T>) -> ZkxResult<T> {
        if result.is_err() {
            self.phase = ProverPhase::Error;
            self.cipher = None;
        }
        result
    }
}

impl Default for ProverState {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProverState {
    fn drop(&mut self) {
        self.token.zeroize();
    }
}

/// Long-lived prover configuration: the identity, its secret and the
/// cipher parameters used once authenticated.
pub struct Prover {
    identity: ZkIdentity,
    secret: SecureBytes,
    cipher: CipherConfig,
    seed_phrase: String,
    seed_generator: SeedGenerator,
}

impl fmt::Debug for Prover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Prover")
            .field("identity", &self.identity)
            .field("secret", &self.secret)
            .field("cipher", &self.cipher)
            .field("seed_phrase", &"[REDACTED]")
            .field("seed_generator", &self.seed_generator)
            .finish()
    }
}

impl Prover {
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if `secret` is empty,
    /// [`ZkxError::InvalidConfig`] if `cipher` does not validate.
    pub fn new(
        identity: ZkIdentity,
        secret: &[u8],
        cipher: CipherConfig,
        seed_phrase: &str,
    ) -> ZkxResult<Self> {
        if secret.is_empty() {
            return Err(ZkxError::InvalidInput);
        }
        cipher.validate()?;
        Ok(Self {
            identity,
            secret: SecureBytes::from_slice(secret),
            cipher,
            seed_phrase: seed_phrase.to_string(),
            seed_generator: SeedGenerator::new(),
        })
    }

    /// # Errors
    ///
    /// See [`ZkIdentity::from_config`] and [`Self::new`].
    pub fn from_config(config: &SessionConfig, secret: &[u8]) -> ZkxResult<Self> {
        let identity = ZkIdentity::from_config(&config.identity)?;
        Self::new(identity, secret, config.cipher.clone(), &config.seed_phrase)
    }

    pub fn with_seed_generator(mut self, seed_generator: SeedGenerator) -> Self {
        self.seed_generator = seed_generator;
        self
    }

    pub fn identity(&self) -> &ZkIdentity {
        &self.identity
    }

    pub fn cipher_config(&self) -> &CipherConfig {
        &self.cipher
    }

    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.data()
    }

    pub(crate) fn seed_phrase(&self) -> &str {
        &self.seed_phrase
    }

    pub(crate) fn seed_generator(&self) -> &SeedGenerator {
        &self.seed_generator
    }
}
