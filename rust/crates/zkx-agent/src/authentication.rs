// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use zkx_core::protocol::Frame;
use zkx_core::types::{ZkxError, ZkxResult};

use crate::state::{Prover, ProverPhase, ProverState};

/// Produces the signature frame that opens the handshake.
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] unless the state is `Idle`.
pub fn begin_authentication(prover: &Prover, state: &mut ProverState) -> ZkxResult<Frame> {
    state.expect_phase(ProverPhase::Idle)?;
    let result = prover.identity().create_signature(prover.secret());
    let signature = state.settle(result)?;
    state.phase = ProverPhase::SignatureSent;
    Ok(Frame::Signature { signature })
}

/// Stores the verifier's challenge token.
///
/// # Errors
///
/// Returns [`ZkxError::InvalidProtocolMessage`] for anything but a non-empty
/// challenge frame.
pub fn accept_challenge(frame: Frame, state: &mut ProverState) -> ZkxResult<()> {
    state.expect_phase(ProverPhase::SignatureSent)?;
    let token = match frame {
        Frame::Challenge { token } if !token.is_empty() => token,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    state.token = token;
    state.phase = ProverPhase::TokenReceived;
    Ok(())
}

/// Proves knowledge of the secret bound to the stored challenge.
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] unless a challenge has been accepted.
pub fn create_proof(prover: &Prover, state: &mut ProverState) -> ZkxResult<Frame> {
    state.expect_phase(ProverPhase::TokenReceived)?;
    let result = prover.identity().create_proof(prover.secret(), &state.token);
    let proof = state.settle(result)?;
    state.phase = ProverPhase::ProofSent;
    Ok(Frame::Proof { proof })
}

/// Applies the verifier's verdict: `Authenticated` on acceptance, `Closed`
/// otherwise. Returns the verdict.
///
/// # Errors
///
/// Returns [`ZkxError::InvalidProtocolMessage`] for anything but a verdict frame.
pub fn accept_verdict(frame: Frame, state: &mut ProverState) -> ZkxResult<bool> {
    state.expect_phase(ProverPhase::ProofSent)?;
    let verified = match frame {
        Frame::Verdict { verified } => verified,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    state.phase = if verified { ProverPhase::Authenticated } else { ProverPhase::Closed };
    Ok(verified)
}
