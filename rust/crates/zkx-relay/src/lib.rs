// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake Relay (Verifier)
// Licensed under the MIT License

//! Verifier side of the ZKX identity handshake.
//!
//! Receives the prover's signature, issues a random challenge, checks the
//! Schnorr proof bound to it and, after a positive verdict, keys a
//! decrypt-capable chunk cipher with the prover's seed and echoes messages.

/// Signature, challenge and proof verification steps.
mod authentication;
/// Async driver running the verifier over a link.
mod driver;
/// Seed acceptance and encrypted messaging steps.
mod session;
/// Verifier phases, per-session state and configuration.
mod state;

pub use authentication::{accept_signature, issue_challenge, verify_proof};
pub use driver::{run_verifier, VerifierReport};
pub use session::{accept_seed, close, key_confirmation, open_message};
pub use state::{Verifier, VerifierPhase, VerifierState};
