// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use zkx_core::cipher::ChunkCipher;
use zkx_core::protocol::Frame;
use zkx_core::types::{ZkxError, ZkxResult};

use crate::state::{Verifier, VerifierPhase, VerifierState};

/// Keys a decrypt-capable cipher with the prover's seed.
///
/// Builds the full decrypt table, so this is the expensive step for larger
/// symbol counts.
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] unless authenticated (in particular
/// after a rejected proof), [`ZkxError::DigestCollision`] if the table
/// cannot be built.
pub fn accept_seed(verifier: &Verifier, frame: Frame, state: &mut VerifierState) -> ZkxResult<()> {
    state.expect_phase(VerifierPhase::Authenticated)?;
    let seed = match frame {
        Frame::Seed { seed } => seed,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    let config = verifier.cipher_config();
    let result =
        ChunkCipher::with_decrypt_table(config.algorithm, seed.as_bytes(), config.symbol_count);
    let cipher = state.settle(result)?;
    state.cipher = Some(cipher);
    state.phase = VerifierPhase::KeyExchanged;
    Ok(())
}

/// Returns the key confirmation frame: the keyed digest of the empty chunk.
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] unless a seed has been accepted.
pub fn key_confirmation(state: &mut VerifierState) -> ZkxResult<Frame> {
    state.expect_phase(VerifierPhase::KeyExchanged)?;
    let digest = state.cipher.as_ref().ok_or(ZkxError::UnexpectedPhase)?.encrypt_chunk("");
    state.phase = VerifierPhase::Established;
    Ok(Frame::KeyConfirmation { digest })
}

/// Decrypts a ciphertext frame and returns the plaintext together with the
/// echo frame carrying its re-encryption.
///
/// # Errors
///
/// Returns [`ZkxError::UnexpectedPhase`] outside `Established`, or any
/// decryption error.
pub fn open_message(frame: Frame, state: &mut VerifierState) -> ZkxResult<(String, Frame)> {
    state.expect_phase(VerifierPhase::Established)?;
    let body = match frame {
        Frame::Ciphertext { body } => body,
        _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
    };
    let cipher = state.cipher.as_ref().ok_or(ZkxError::UnexpectedPhase)?;
    let result = cipher.decrypt_message(&body).map(|plaintext| {
        let echo = cipher.encrypt_message(&plaintext);
        (plaintext, Frame::Ciphertext { body: echo })
    });
    state.settle(result)
}

/// Ends the session from any phase and returns the close frame.
pub fn close(state: &mut VerifierState) -> Frame {
    state.phase = VerifierPhase::Closed;
    state.cipher = None;
    Frame::Close
}
