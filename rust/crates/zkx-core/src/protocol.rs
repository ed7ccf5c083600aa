// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use serde::{Deserialize, Serialize};

use crate::codec::b64_bytes;
use crate::models::{Proof, Signature};
use crate::seed::Seed;
use crate::types::{ZkxError, ZkxResult};

/// One message of the handshake, encoded as a JSON object tagged by `"type"`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// Prover → verifier: public signature.
    Signature { signature: Signature },
    /// Verifier → prover: random challenge token.
    Challenge {
        #[serde(with = "b64_bytes")]
        token: Vec<u8>,
    },
    /// Prover → verifier: proof bound to the challenge.
    Proof { proof: Proof },
    /// Verifier → prover: outcome of proof verification.
    Verdict { verified: bool },
    /// Prover → verifier: session seed.
    Seed { seed: Seed },
    /// Verifier → prover: keyed digest of the empty chunk.
    KeyConfirmation { digest: String },
    /// Encrypted message body in either direction.
    Ciphertext { body: String },
    Close,
}

impl Frame {
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidProtocolMessage`] if serialization fails.
    pub fn encode(&self) -> ZkxResult<String> {
        serde_json::to_string(self).map_err(|_| ZkxError::InvalidProtocolMessage)
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidProtocolMessage`] for malformed or unknown frames.
    pub fn decode(text: &str) -> ZkxResult<Self> {
        serde_json::from_str(text).map_err(|_| ZkxError::InvalidProtocolMessage)
    }

    /// Wire tag of this frame, safe to log.
    pub fn kind(&self) -> &'static str {
        match self {
            Frame::Signature { .. } => "signature",
            Frame::Challenge { .. } => "challenge",
            Frame::Proof { .. } => "proof",
            Frame::Verdict { .. } => "verdict",
            Frame::Seed { .. } => "seed",
            Frame::KeyConfirmation { .. } => "key_confirmation",
            Frame::Ciphertext { .. } => "ciphertext",
            Frame::Close => "close",
        }
    }
}
