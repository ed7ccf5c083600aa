use std::io;
use std::sync::{Arc, Mutex};

use zkx_agent::*;
use zkx_core::cipher::{ChunkCipher, CipherAlgorithm};
use zkx_core::config::{CipherConfig, SessionConfig};
use zkx_core::identity::ZkIdentity;
use zkx_core::protocol::Frame;
use zkx_core::seed::SeedGenerator;
use zkx_core::transport::link_pair;
use zkx_core::types::*;
use zkx_relay::{
    accept_seed, accept_signature, issue_challenge, key_confirmation, open_message, run_verifier,
    verify_proof, Verifier, VerifierPhase, VerifierState,
};

const ALICE: &[u8] = b"alice secret";

fn identity(curve: &str) -> ZkIdentity {
    ZkIdentity::new(curve, "sha3_256", None, None, 16).unwrap()
}

fn prover(curve: &str, secret: &[u8], symbol_count: usize) -> Prover {
    let cipher = CipherConfig { symbol_count, ..CipherConfig::default() };
    Prover::new(identity(curve), secret, cipher, "jack")
        .unwrap()
        .with_seed_generator(SeedGenerator::with_max_padding(4096).unwrap())
}

fn verifier(symbol_count: usize) -> Verifier {
    let cipher = CipherConfig { symbol_count, ..CipherConfig::default() };
    Verifier::new(identity("secp256k1"), cipher).unwrap()
}

#[test]
fn sans_io_handshake_and_echo() {
    let prover = prover("ristretto255", ALICE, 1);
    let verifier = verifier(1);
    let mut p = ProverState::new();
    let mut v = VerifierState::new();

    accept_signature(begin_authentication(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_challenge(issue_challenge(&verifier, &mut v).unwrap(), &mut p).unwrap();
    let verdict = verify_proof(&verifier, create_proof(&prover, &mut p).unwrap(), &mut v).unwrap();
    assert!(accept_verdict(verdict, &mut p).unwrap());
    assert_eq!(p.phase, ProverPhase::Authenticated);
    assert_eq!(v.phase, VerifierPhase::Authenticated);

    accept_seed(&verifier, begin_key_exchange(&prover, &mut p).unwrap(), &mut v).unwrap();
    assert_eq!(p.phase, ProverPhase::KeyExchanged);
    accept_key_confirmation(key_confirmation(&mut v).unwrap(), &mut p).unwrap();
    assert_eq!(p.phase, ProverPhase::Established);
    assert_eq!(v.phase, VerifierPhase::Established);

    for message in ["hello", "", "Mixed_Case&punctuation!"] {
        let (plaintext, echo) = open_message(seal_message(message, &mut p).unwrap(), &mut v).unwrap();
        assert_eq!(plaintext, message);
        confirm_echo(echo, &mut p).unwrap();
    }

    assert!(matches!(close(&mut p), Frame::Close));
    assert_eq!(p.phase, ProverPhase::Closed);
    assert!(p.cipher.is_none());
}

#[test]
fn impostor_is_closed_on_both_sides() {
    let alice_signature = identity("secp256k1").create_signature(ALICE).unwrap();
    let mallory = prover("secp256k1", b"mallory secret", 1);
    let verifier = verifier(1);
    let mut p = ProverState::new();
    let mut v = VerifierState::new();

    begin_authentication(&mallory, &mut p).unwrap();
    accept_signature(Frame::Signature { signature: alice_signature }, &mut v).unwrap();
    accept_challenge(issue_challenge(&verifier, &mut v).unwrap(), &mut p).unwrap();
    let verdict = verify_proof(&verifier, create_proof(&mallory, &mut p).unwrap(), &mut v).unwrap();

    assert!(!accept_verdict(verdict, &mut p).unwrap());
    assert_eq!(p.phase, ProverPhase::Closed);
    assert_eq!(v.phase, VerifierPhase::Closed);
    assert_eq!(begin_key_exchange(&mallory, &mut p).unwrap_err(), ZkxError::UnexpectedPhase);
}

#[test]
fn prover_steps_out_of_order_are_rejected() {
    let prover = prover("secp256k1", ALICE, 1);
    let mut p = ProverState::new();
    assert_eq!(create_proof(&prover, &mut p).unwrap_err(), ZkxError::UnexpectedPhase);
    assert_eq!(seal_message("hi", &mut p).unwrap_err(), ZkxError::UnexpectedPhase);
    assert_eq!(
        accept_verdict(Frame::Verdict { verified: true }, &mut p).unwrap_err(),
        ZkxError::UnexpectedPhase
    );
    assert_eq!(p.phase, ProverPhase::Idle);

    begin_authentication(&prover, &mut p).unwrap();
    assert_eq!(begin_authentication(&prover, &mut p).unwrap_err(), ZkxError::UnexpectedPhase);
    assert_eq!(
        accept_challenge(Frame::Challenge { token: Vec::new() }, &mut p).unwrap_err(),
        ZkxError::InvalidProtocolMessage
    );
    assert_eq!(p.phase, ProverPhase::Error);
}

#[test]
fn wrong_key_confirmation_fails_verification() {
    let prover = prover("P-256", ALICE, 1);
    let verifier = verifier(1);
    let mut p = ProverState::new();
    let mut v = VerifierState::new();
    accept_signature(begin_authentication(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_challenge(issue_challenge(&verifier, &mut v).unwrap(), &mut p).unwrap();
    let verdict = verify_proof(&verifier, create_proof(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_verdict(verdict, &mut p).unwrap();
    begin_key_exchange(&prover, &mut p).unwrap();

    let forged = Frame::KeyConfirmation { digest: "0".repeat(64) };
    assert_eq!(accept_key_confirmation(forged, &mut p).unwrap_err(), ZkxError::VerificationFailed);
    assert_eq!(p.phase, ProverPhase::Error);
    assert!(p.cipher.is_none());
}

#[test]
fn echo_mismatch_fails_verification() {
    let prover = prover("secp256k1", ALICE, 1);
    let verifier = verifier(1);
    let mut p = ProverState::new();
    let mut v = VerifierState::new();
    accept_signature(begin_authentication(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_challenge(issue_challenge(&verifier, &mut v).unwrap(), &mut p).unwrap();
    let verdict = verify_proof(&verifier, create_proof(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_verdict(verdict, &mut p).unwrap();
    accept_seed(&verifier, begin_key_exchange(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_key_confirmation(key_confirmation(&mut v).unwrap(), &mut p).unwrap();

    assert_eq!(
        confirm_echo(Frame::Ciphertext { body: String::new() }, &mut p).unwrap_err(),
        ZkxError::UnexpectedPhase
    );
    seal_message("hello", &mut p).unwrap();
    assert_eq!(seal_message("again", &mut p).unwrap_err(), ZkxError::UnexpectedPhase);
    let forged = Frame::Ciphertext { body: "ff".repeat(32) };
    assert_eq!(confirm_echo(forged, &mut p).unwrap_err(), ZkxError::VerificationFailed);
    assert_eq!(p.phase, ProverPhase::Error);
}

#[test]
fn non_alphabet_message_is_refused_before_sending() {
    let prover = prover("secp256k1", ALICE, 1);
    let verifier = verifier(1);
    let mut p = ProverState::new();
    let mut v = VerifierState::new();
    accept_signature(begin_authentication(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_challenge(issue_challenge(&verifier, &mut v).unwrap(), &mut p).unwrap();
    let verdict = verify_proof(&verifier, create_proof(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_verdict(verdict, &mut p).unwrap();
    accept_seed(&verifier, begin_key_exchange(&prover, &mut p).unwrap(), &mut v).unwrap();
    accept_key_confirmation(key_confirmation(&mut v).unwrap(), &mut p).unwrap();

    for message in ["two words", "tab\there", "caf\u{e9}"] {
        assert_eq!(seal_message(message, &mut p).unwrap_err(), ZkxError::InvalidInput, "{message}");
    }
    assert_eq!(p.phase, ProverPhase::Established);
    assert!(p.pending_echo.is_none());

    let (plaintext, echo) = open_message(seal_message("two-words", &mut p).unwrap(), &mut v).unwrap();
    assert_eq!(plaintext, "two-words");
    confirm_echo(echo, &mut p).unwrap();
}

#[test]
fn prover_debug_redacts_secret_and_seed_phrase() {
    let prover = prover("secp256k1", ALICE, 1);
    let printed = format!("{prover:?}");
    assert!(printed.contains("seed_phrase: \"[REDACTED]\""), "{printed}");
    assert!(!printed.contains("jack"), "{printed}");
    assert!(!printed.contains("alice"), "{printed}");
}

#[tokio::test]
async fn drivers_complete_a_session() {
    let prover = prover("secp256k1", ALICE, 1);
    let verifier = verifier(1);
    let (prover_end, verifier_end) = link_pair();
    let messages = ["hello", "second-message", "~!@#"];

    let (prover_report, verifier_report) = tokio::join!(
        run_prover(&prover, prover_end, &messages, tracing::info_span!("prover")),
        run_verifier(&verifier, verifier_end, tracing::info_span!("verifier")),
    );
    let prover_report = prover_report.unwrap();
    let verifier_report = verifier_report.unwrap();

    assert!(prover_report.authenticated);
    assert_eq!(prover_report.messages_echoed, messages.len());
    assert_eq!(prover_report.phase, ProverPhase::Closed);
    assert!(verifier_report.authenticated);
    assert_eq!(verifier_report.received, messages);
    assert_eq!(verifier_report.phase, VerifierPhase::Closed);
}

#[tokio::test]
async fn drivers_with_two_symbol_chunks() {
    let prover = prover("ristretto255", ALICE, 2);
    let verifier = verifier(2);
    let (prover_end, verifier_end) = link_pair();
    let messages = ["abcd", "Zz09"];

    let (prover_report, verifier_report) = tokio::join!(
        run_prover(&prover, prover_end, &messages, tracing::Span::none()),
        run_verifier(&verifier, verifier_end, tracing::Span::none()),
    );
    assert_eq!(prover_report.unwrap().messages_echoed, 2);
    assert_eq!(verifier_report.unwrap().received, messages);
}

#[tokio::test]
async fn drivers_from_config() {
    let cfg = SessionConfig::from_toml_str(
        "seed_phrase = \"jack\"\n[identity]\ncurve = \"P-256\"\n[cipher]\nalgorithm = \"sha3_224\"",
    )
    .unwrap();
    let prover = Prover::from_config(&cfg, ALICE).unwrap();
    let verifier = Verifier::from_config(&cfg).unwrap();
    let (prover_end, verifier_end) = link_pair();

    let (prover_report, verifier_report) = tokio::join!(
        run_prover(&prover, prover_end, &["config-driven"], tracing::Span::none()),
        run_verifier(&verifier, verifier_end, tracing::Span::none()),
    );
    assert!(prover_report.unwrap().authenticated);
    assert_eq!(verifier_report.unwrap().received, ["config-driven"]);
}

#[tokio::test]
async fn prover_driver_stops_on_non_alphabet_message() {
    let prover = prover("secp256k1", ALICE, 1);
    let verifier = verifier(1);
    let (prover_end, verifier_end) = link_pair();

    let (prover_report, verifier_report) = tokio::join!(
        run_prover(&prover, prover_end, &["ok", "not ok"], tracing::Span::none()),
        run_verifier(&verifier, verifier_end, tracing::Span::none()),
    );
    assert_eq!(prover_report.unwrap_err(), ZkxError::InvalidInput);
    assert_eq!(verifier_report.unwrap_err(), ZkxError::ChannelClosed);
}

#[tokio::test]
async fn verifier_driver_fails_on_undecryptable_chunk() {
    let prover = prover("secp256k1", ALICE, 1);
    let verifier = verifier(1);
    let (mut sender, verifier_end) = link_pair();

    let session = async move {
        let mut p = ProverState::new();
        sender.send_frame(&begin_authentication(&prover, &mut p).unwrap()).unwrap();
        accept_challenge(sender.recv_frame().await.unwrap(), &mut p).unwrap();
        sender.send_frame(&create_proof(&prover, &mut p).unwrap()).unwrap();
        assert!(accept_verdict(sender.recv_frame().await.unwrap(), &mut p).unwrap());

        let seed_frame = begin_key_exchange(&prover, &mut p).unwrap();
        let seed = match &seed_frame {
            Frame::Seed { seed } => seed.clone(),
            other => panic!("unexpected frame {other:?}"),
        };
        sender.send_frame(&seed_frame).unwrap();
        accept_key_confirmation(sender.recv_frame().await.unwrap(), &mut p).unwrap();

        let cipher = ChunkCipher::from_seed(CipherAlgorithm::Sha256, &seed, 1).unwrap();
        let body = cipher.encrypt_message("a b");
        sender.send_frame(&Frame::Ciphertext { body }).unwrap();
        sender.recv().await
    };

    let (after, report) =
        tokio::join!(session, run_verifier(&verifier, verifier_end, tracing::Span::none()));
    assert_eq!(report.unwrap_err(), ZkxError::UnknownChunk);
    assert_eq!(after.unwrap_err(), ZkxError::ChannelClosed);
}

#[tokio::test]
async fn verifier_closes_after_failed_proof() {
    let verifier = verifier(1);
    let (mut attacker, verifier_end) = link_pair();
    let alice_signature = identity("secp256k1").create_signature(ALICE).unwrap();
    let mallory = identity("secp256k1");

    let attack = async move {
        attacker.send_frame(&Frame::Signature { signature: alice_signature }).unwrap();
        let token = match attacker.recv_frame().await.unwrap() {
            Frame::Challenge { token } => token,
            other => panic!("unexpected frame {other:?}"),
        };
        let proof = mallory.create_proof(b"mallory secret", &token).unwrap();
        attacker.send_frame(&Frame::Proof { proof }).unwrap();
        let verdict = attacker.recv_frame().await.unwrap();
        let after = attacker.recv().await;
        (verdict, after)
    };

    let ((verdict, after), report) =
        tokio::join!(attack, run_verifier(&verifier, verifier_end, tracing::Span::none()));
    assert!(matches!(verdict, Frame::Verdict { verified: false }));
    assert_eq!(after.unwrap_err(), ZkxError::ChannelClosed);
    let report = report.unwrap();
    assert!(!report.authenticated);
    assert_eq!(report.phase, VerifierPhase::Closed);
}

#[tokio::test]
async fn prover_wakes_when_verifier_disappears() {
    let prover = prover("secp256k1", ALICE, 1);
    let (prover_end, mut verifier_end) = link_pair();

    let vanish = async move {
        let first = verifier_end.recv_frame().await.unwrap();
        verifier_end.close();
        first
    };
    let (result, first) = tokio::join!(
        run_prover(&prover, prover_end, &[], tracing::Span::none()),
        vanish,
    );
    assert!(matches!(first, Frame::Signature { .. }));
    assert_eq!(result.unwrap_err(), ZkxError::ChannelClosed);
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn driver_logs_milestones_without_secrets() {
    let buffer = SharedBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let prover = prover("secp256k1", ALICE, 1);
    let verifier = verifier(1);
    let (prover_end, verifier_end) = link_pair();
    let (prover_report, verifier_report) = tokio::join!(
        run_prover(&prover, prover_end, &["classified"], tracing::info_span!("prover", peer = "relay")),
        run_verifier(&verifier, verifier_end, tracing::info_span!("verifier")),
    );
    prover_report.unwrap();
    verifier_report.unwrap();

    let logs = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
    assert!(logs.contains("session established"));
    assert!(logs.contains("prover"));
    assert!(logs.contains("kind=\"seed\""));
    assert!(!logs.contains("classified"));
    assert!(!logs.contains("alice secret"));
    assert!(!logs.contains("jack"));
}
