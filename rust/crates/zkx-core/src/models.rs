// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec::b64_bytes;
use crate::curve::{CurveName, Point, Scalar};
use crate::hashing::HashAlgorithm;
use crate::types::{ZkxError, ZkxResult};

/// Domain parameters shared by a signature and every proof made against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZeroKnowledgeParams {
    pub algorithm: HashAlgorithm,
    pub curve: CurveName,
    #[serde(with = "b64_bytes")]
    pub salt: Vec<u8>,
}

/// Public commitment `H(secret) · G` of a registered identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub params: ZeroKnowledgeParams,
    pub signature: Point,
}

/// A single-use Schnorr proof `(c, m)`.
///
/// Not `Clone`: [`crate::identity::ZkIdentity::verify`] consumes it.
#[derive(Debug, Serialize, Deserialize)]
pub struct Proof {
    pub params: ZeroKnowledgeParams,
    pub c: Scalar,
    pub m: Scalar,
}

/// Data together with a proof bound to it.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub data: String,
    pub proof: Proof,
}

/// JSON encoding for the identity models.
pub trait JsonModel: Serialize + DeserializeOwned {
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidProtocolMessage`] if serialization fails.
    fn to_json(&self) -> ZkxResult<String> {
        serde_json::to_string(self).map_err(|_| ZkxError::InvalidProtocolMessage)
    }

    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidProtocolMessage`] for malformed JSON, bad
    /// base64 or oversized scalars.
    fn from_json(json: &str) -> ZkxResult<Self> {
        serde_json::from_str(json).map_err(|_| ZkxError::InvalidProtocolMessage)
    }
}

impl JsonModel for ZeroKnowledgeParams {}
impl JsonModel for Signature {}
impl JsonModel for Proof {}
impl JsonModel for SignedEnvelope {}
