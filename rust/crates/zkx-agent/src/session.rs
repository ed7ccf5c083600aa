// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use zkx_core::cipher::{is_encodable, ChunkCipher};
use zkx_core::protocol::Frame;
use zkx_core::types::{constant_time_eq, ZkxError, ZkxResult};

use crate::state::{Prover, ProverPhase, ProverState};

/// Mints a session seed, keys an encrypt-only cipher with it and returns the
/// seed frame.
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] unless the prover is authenticated,
/// [`ZkxError::EntropyUnavailable`] if no seed can be drawn.
pub fn begin_key_exchange(prover: &Prover, state: &mut ProverState) -> ZkxResult<Frame> {
    state.expect_phase(ProverPhase::Authenticated)?;
    let result = prover.seed_generator().generate(prover.seed_phrase()).and_then(|seed| {
        let config = prover.cipher_config();
        ChunkCipher::from_seed(config.algorithm, &seed, config.symbol_count).map(|cipher| (seed, cipher))
    });
    let (seed, cipher) = state.settle(result)?;
    state.expected_confirmation = cipher.encrypt_chunk("");
    state.cipher = Some(cipher);
    state.phase = ProverPhase::KeyExchanged;
    Ok(Frame::Seed { seed })
}

/// Checks that the verifier keyed its cipher with the same seed.
///
/// # Errors
///
/// Returns [`ZkxError::VerificationFailed`] if the confirmation digest differs.
pub fn accept_key_confirmation(frame: Frame, state: &mut ProverState) -> ZkxResult<()> {
    state.expect_phase(ProverPhase::KeyExchanged)?;
    let digest = match frame {
        Frame::KeyConfirmation { digest } => digest,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    if !constant_time_eq(digest.as_bytes(), state.expected_confirmation.as_bytes()) {
        return state.settle(Err(ZkxError::VerificationFailed));
    }
    state.phase = ProverPhase::Established;
    Ok(())
}

/// Encrypts `message` and remembers the ciphertext for [`confirm_echo`].
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] outside `Established` or while an
/// earlier message is still awaiting its echo, [`ZkxError::InvalidInput`] if
/// `message` has characters outside the cipher alphabet. Neither changes the
/// state.
pub fn seal_message(message: &str, state: &mut ProverState) -> ZkxResult<Frame> {
    state.expect_phase(ProverPhase::Established)?;
    if state.pending_echo.is_some() {
        return Err(ZkxError::UnexpectedPhase);
    }
    if !is_encodable(message) {
        return Err(ZkxError::InvalidInput);
    }
    let cipher = state.cipher.as_ref().ok_or(ZkxError::UnexpectedPhase)?;
    let body = cipher.encrypt_message(message);
    state.pending_echo = Some(body.clone());
    Ok(Frame::Ciphertext { body })
}

/// Checks the verifier's echo against the last sealed ciphertext.
///
/// # Errors
///
/// Returns [`ZkxError::VerificationFailed`] if the echo differs.
pub fn confirm_echo(frame: Frame, state: &mut ProverState) -> ZkxResult<()> {
    state.expect_phase(ProverPhase::Established)?;
    let expected = state.pending_echo.take().ok_or(ZkxError::UnexpectedPhase)?;
    let body = match frame {
        Frame::Ciphertext { body } => body,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    if !constant_time_eq(body.as_bytes(), expected.as_bytes()) {
        return state.settle(Err(ZkxError::VerificationFailed));
    }
    Ok(())
}

/// Ends the session from any phase and returns the close frame.
pub fn close(state: &mut ProverState) -> Frame {
    state.phase = ProverPhase::Closed;
    state.cipher = None;
    state.pending_echo = None;
    Frame::Close
}
