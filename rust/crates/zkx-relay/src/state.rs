// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use zkx_core::cipher::ChunkCipher;
use zkx_core::config::{CipherConfig, SessionConfig};
use zkx_core::identity::ZkIdentity;
use zkx_core::models::Signature;
use zkx_core::types::{ZkxError, ZkxResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifierPhase {
    Idle,
    SignatureReceived,
    TokenIssued,
    ProofReceived,
    Authenticated,
    KeyExchanged,
    Established,
    Closed,
    Error,
}

/// Mutable per-session state of the verifier.
#[derive(Debug)]
pub struct VerifierState {
    pub phase: VerifierPhase,
    pub signature: Option<Signature>,
    pub token: Vec<u8>,
    pub cipher: Option<ChunkCipher>,
}

impl VerifierState {
    pub fn new() -> Self {
        Self { phase: VerifierPhase::Idle, signature: None, token: Vec::new(), cipher: None }
    }

    pub(crate) fn expect_phase(&self, phase: VerifierPhase) -> ZkxResult<()> {
        if self.phase != phase {
            return Err(ZkxError::UnexpectedPhase);
        }
        Ok(())
    }

    pub(crate) fn settle<T>(&mut self, result: ZkxResult<T>) -> ZkxResult<T> {
        if result.is_err() {
            self.phase = VerifierPhase::Error;
            self.cipher = None;
        }
        result
    }
}

impl Default for VerifierState {
    fn default() -> Self {
        Self::new()
    }
}

/// Long-lived verifier configuration.
#[derive(Debug)]
pub struct Verifier {
    identity: ZkIdentity,
    cipher: CipherConfig,
}

impl Verifier {
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidConfig`] if `cipher` does not validate.
    pub fn new(identity: ZkIdentity, cipher: CipherConfig) -> ZkxResult<Self> {
        cipher.validate()?;
        Ok(Self { identity, cipher })
    }

    /// # Errors
    ///
    /// See [`ZkIdentity::from_config`] and [`Self::new`].
    pub fn from_config(config: &SessionConfig) -> ZkxResult<Self> {
        Self::new(ZkIdentity::from_config(&config.identity)?, config.cipher.clone())
    }

    pub fn identity(&self) -> &ZkIdentity {
        &self.identity
    }

    pub fn cipher_config(&self) -> &CipherConfig {
        &self.cipher
    }
}
