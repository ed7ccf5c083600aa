// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use tracing::{debug, info, warn, Instrument, Span};
use zkx_core::protocol::Frame;
use zkx_core::transport::Link;
use zkx_core::types::ZkxResult;

use crate::authentication::{accept_challenge, accept_verdict, begin_authentication, create_proof};
use crate::session::{accept_key_confirmation, begin_key_exchange, close, confirm_echo, seal_message};
use crate::state::{Prover, ProverPhase, ProverState};

/// Outcome of a completed prover session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProverReport {
    pub authenticated: bool,
    pub messages_echoed: usize,
    pub phase: ProverPhase,
}

/// Runs the prover side of the handshake over `link`, then sends each of
/// `messages` and checks its echo, then closes.
///
/// All log output goes to `span`.
///
/// # Errors
///
/// Returns the first error of any step or of the link.
pub async fn run_prover(
    prover: &Prover,
    mut link: Link,
    messages: &[&str],
    span: Span,
) -> ZkxResult<ProverReport> {
    async move {
        let result = drive(prover, &mut link, messages).await;
        if let Err(error) = &result {
            warn!(%error, "prover session failed");
        }
        link.close();
        result
    }
    .instrument(span)
    .await
}

async fn drive(prover: &Prover, link: &mut Link, messages: &[&str]) -> ZkxResult<ProverReport> {
    let mut state = ProverState::new();

    send(link, &begin_authentication(prover, &mut state)?)?;
    accept_challenge(receive(link).await?, &mut state)?;
    send(link, &create_proof(prover, &mut state)?)?;

    if !accept_verdict(receive(link).await?, &mut state)? {
        warn!("identity proof rejected by verifier");
        return Ok(ProverReport { authenticated: false, messages_echoed: 0, phase: state.phase });
    }
    info!(curve = %prover.identity().params().curve, "authenticated");

    send(link, &begin_key_exchange(prover, &mut state)?)?;
    accept_key_confirmation(receive(link).await?, &mut state)?;
    info!(symbol_count = prover.cipher_config().symbol_count, "session established");

    let mut messages_echoed = 0;
    for message in messages {
        send(link, &seal_message(message, &mut state)?)?;
        confirm_echo(receive(link).await?, &mut state)?;
        messages_echoed += 1;
    }

    send(link, &close(&mut state))?;
    info!(messages_echoed, "session closed");
    Ok(ProverReport { authenticated: true, messages_echoed, phase: state.phase })
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
