// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use tracing::{debug, info, warn, Instrument, Span};
use zkx_core::protocol::Frame;
use zkx_core::transport::Link;
use zkx_core::types::{ZkxError, ZkxResult};

use crate::authentication::{accept_signature, issue_challenge, verify_proof};
use crate::session::{accept_seed, close, key_confirmation, open_message};
use crate::state::{Verifier, VerifierPhase, VerifierState};

/// Outcome of a completed verifier session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifierReport {
    pub authenticated: bool,
    /// Decrypted message bodies, in arrival order.
    pub received: Vec<String>,
    pub phase: VerifierPhase,
}

/// Runs the verifier side of the handshake over `link` and echoes every
/// ciphertext until the prover closes.
///
/// All log output goes to `span`.
///
/// # Errors
///
/// Returns the first error of any step or of the link.
pub async fn run_verifier(verifier: &Verifier, mut link: Link, span: Span) -> ZkxResult<VerifierReport> {
    async move {
        let result = drive(verifier, &mut link).await;
        if let Err(error) = &result {
            warn!(%error, "verifier session failed");
        }
        link.close();
        result
    }
    .instrument(span)
    .await
}

async fn drive(verifier: &Verifier, link: &mut Link) -> ZkxResult<VerifierReport> {
    let mut state = VerifierState::new();

    accept_signature(receive(link).await?, &mut state)?;
    send(link, &issue_challenge(verifier, &mut state)?)?;

    let verdict = verify_proof(verifier, receive(link).await?, &mut state)?;
    send(link, &verdict)?;
    if state.phase != VerifierPhase::Authenticated {
        warn!("identity proof rejected");
        return Ok(VerifierReport { authenticated: false, received: Vec::new(), phase: state.phase });
    }
    info!("prover authenticated");

    accept_seed(verifier, receive(link).await?, &mut state)?;
    send(link, &key_confirmation(&mut state)?)?;
    info!(symbol_count = verifier.cipher_config().symbol_count, "session established");

    let mut received = Vec::new();
    loop {
        match receive(link).await? {
            Frame::Close => {
                close(&mut state);
                break;
            }
            frame @ Frame::Ciphertext { .. } => {
                let (plaintext, echo) = open_message(frame, &mut state)?;
                send(link, &echo)?;
                received.push(plaintext);
            }
            _ => return state.settle(Err(ZkxError::InvalidProtocolMessage)),
        }
    }
    info!(messages = received.len(), "session closed");
    Ok(VerifierReport { authenticated: true, received, phase: state.phase })
}

fn send(link: &Link, frame: &Frame) -> ZkxResult<()> {
    debug!(kind = frame.kind(), "sending frame");
    link.send_frame(frame)
}

async fn receive(link: &mut Link) -> ZkxResult<Frame> {
    let frame = link.recv_frame().await?;
    debug!(kind = frame.kind(), "received frame");
    Ok(frame)
}
