// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use zkx_core::protocol::Frame;
use zkx_core::types::{ZkxError, ZkxResult};

use crate::state::{Verifier, VerifierPhase, VerifierState};

/// Stores the prover's public signature after checking its point encoding.
///
/// # Errors
///
/// Returns [`ZkxError::InvalidProtocolMessage`] for anything but a signature
/// frame, [`ZkxError::InvalidPoint`] for a malformed commitment.
pub fn accept_signature(frame: Frame, state: &mut VerifierState) -> ZkxResult<()> {
    state.expect_phase(VerifierPhase::Idle)?;
    let signature = match frame {
        Frame::Signature { signature } => signature,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    let result = signature.params.curve.validate_point(&signature.signature);
    state.settle(result)?;
    state.signature = Some(signature);
    state.phase = VerifierPhase::SignatureReceived;
    Ok(())
}

/// Draws a fresh challenge token and returns the challenge frame.
///
/// # Errors
///
/// Returns [`ZkxError::EntropyUnavailable`] if no token can be drawn.
pub fn issue_challenge(verifier: &Verifier, state: &mut VerifierState) -> ZkxResult<Frame> {
    state.expect_phase(VerifierPhase::SignatureReceived)?;
    let result = verifier.identity().generate_token();
    let token = state.settle(result)?;
    state.token = token.clone();
    state.phase = VerifierPhase::TokenIssued;
    Ok(Frame::Challenge { token })
}

/// Verifies the proof against the stored signature and challenge and returns
/// the verdict frame.
///
/// A rejected proof is not an error: the state moves to `Closed` and the
/// verdict carries `verified: false`.
///
/// # Errors
///
/// Returns [`ZkxError::InvalidProtocolMessage`] for anything but a proof frame.
pub fn verify_proof(
    verifier: &Verifier,
    frame: Frame,
    state: &mut VerifierState,
) -> ZkxResult<Frame> {
    state.expect_phase(VerifierPhase::TokenIssued)?;
    let proof = match frame {
        Frame::Proof { proof } => proof,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    state.phase = VerifierPhase::ProofReceived;
    let signature = match state.signature.as_ref() {
        Some(signature) => signature,
        None => return state.settle(Err(ZkxError::UnexpectedPhase)),
    };
    let verified = verifier.identity().verify(&state.token, signature, proof);
    state.phase = if verified { VerifierPhase::Authenticated } else { VerifierPhase::Closed };
    Ok(Frame::Verdict { verified })
}
