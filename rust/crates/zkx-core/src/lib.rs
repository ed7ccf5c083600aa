// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

//! Core library for the ZKX identity handshake.
//!
//! A prover demonstrates knowledge of a secret with a Schnorr proof over a
//! named elliptic curve, bound to a fresh challenge from the verifier. After a
//! positive verdict the prover sends a session seed and both ends key a
//! keyed-hash chunk cipher with it.
//!
//! # Crate layout
//!
//! * [`types`] -- shared constants, error types, and secure byte containers.
//! * [`crypto`] -- libsodium initialisation and secure randomness.
//! * [`curve`] -- named curves, scalars and points.
//! * [`hashing`] -- hash algorithms and hashing to scalars.
//! * [`models`] -- params, signatures and proofs with their JSON form.
//! * [`identity`] -- proof creation and verification.
//! * [`jwt`] -- signed tokens carrying a signature.
//! * [`seed`] -- session seed generation.
//! * [`cipher`] -- keyed-hash chunk cipher.
//! * [`protocol`] -- handshake frames.
//! * [`transport`] -- in-process channel links.
//! * [`config`] -- TOML configuration.

/// Shared helpers for base64 encoding.
pub mod codec;
/// Keyed-hash substitution cipher.
pub mod cipher;
/// TOML session configuration.
pub mod config;
/// Low-level primitives wrapping libsodium.
pub mod crypto;
/// Named curves and group arithmetic.
pub mod curve;
/// Hash algorithms and hash-to-scalar.
pub mod hashing;
/// Schnorr identity proofs.
pub mod identity;
/// Signed identity tokens.
pub mod jwt;
/// Identity data models.
pub mod models;
/// Handshake wire frames.
pub mod protocol;
/// Session seed generation.
pub mod seed;
/// Channel links between prover and verifier.
pub mod transport;
/// Shared constants, error types, and secure byte containers.
pub mod types;
