// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake Agent (Prover)
// Licensed under the MIT License

mod authentication;
mod driver;
mod session;
mod state;

pub use authentication::{accept_challenge, accept_verdict, begin_authentication, create_proof};
pub use driver::{run_prover, ProverReport};
pub use session::{accept_key_confirmation, begin_key_exchange, close, confirm_echo, seal_message};
pub use state::{Prover, ProverPhase, ProverState};
