use zkx_core::cipher::{ChunkCipher, CipherAlgorithm};
use zkx_core::config::CipherConfig;
use zkx_core::identity::ZkIdentity;
use zkx_core::protocol::Frame;
use zkx_core::seed::{Seed, SeedGenerator};
use zkx_core::transport::link_pair;
use zkx_core::types::*;
use zkx_relay::*;

const SECRET: &[u8] = b"alice secret";

fn verifier() -> Verifier {
    let identity = ZkIdentity::new("secp256k1", "sha3_256", None, None, 16).unwrap();
    Verifier::new(identity, CipherConfig::default()).unwrap()
}

fn prover_identity() -> ZkIdentity {
    ZkIdentity::new("secp256k1", "sha3_256", None, None, 16).unwrap()
}

/// Drives the verifier up to its verdict using `proof_secret` for the proof.
fn authenticate(verifier: &Verifier, proof_secret: &[u8]) -> (VerifierState, bool) {
    let prover = prover_identity();
    let mut state = VerifierState::new();
    let signature = prover.create_signature(SECRET).unwrap();
    accept_signature(Frame::Signature { signature }, &mut state).unwrap();
    assert_eq!(state.phase, VerifierPhase::SignatureReceived);

    let token = match issue_challenge(verifier, &mut state).unwrap() {
        Frame::Challenge { token } => token,
        other => panic!("unexpected frame {other:?}"),
    };
    assert_eq!(token.len(), 32);
    assert_eq!(state.phase, VerifierPhase::TokenIssued);

    let proof = prover.create_proof(proof_secret, &token).unwrap();
    match verify_proof(verifier, Frame::Proof { proof }, &mut state).unwrap() {
        Frame::Verdict { verified } => (state, verified),
        other => panic!("unexpected frame {other:?}"),
    }
}

#[test]
fn honest_prover_reaches_established() {
    let verifier = verifier();
    let (mut state, verified) = authenticate(&verifier, SECRET);
    assert!(verified);
    assert_eq!(state.phase, VerifierPhase::Authenticated);

    let seed = SeedGenerator::new().generate("jack").unwrap();
    accept_seed(&verifier, Frame::Seed { seed: seed.clone() }, &mut state).unwrap();
    assert_eq!(state.phase, VerifierPhase::KeyExchanged);

    let prover_cipher = ChunkCipher::from_seed(CipherAlgorithm::Sha256, &seed, 1).unwrap();
    match key_confirmation(&mut state).unwrap() {
        Frame::KeyConfirmation { digest } => assert_eq!(digest, prover_cipher.encrypt_chunk("")),
        other => panic!("unexpected frame {other:?}"),
    }
    assert_eq!(state.phase, VerifierPhase::Established);

    let body = prover_cipher.encrypt_message("hello");
    let (plaintext, echo) = open_message(Frame::Ciphertext { body: body.clone() }, &mut state).unwrap();
    assert_eq!(plaintext, "hello");
    match echo {
        Frame::Ciphertext { body: echoed } => assert_eq!(echoed, body),
        other => panic!("unexpected frame {other:?}"),
    }

    assert!(matches!(close(&mut state), Frame::Close));
    assert_eq!(state.phase, VerifierPhase::Closed);
}

#[test]
fn rejected_proof_closes_and_refuses_seed() {
    let verifier = verifier();
    let (mut state, verified) = authenticate(&verifier, b"wrong secret");
    assert!(!verified);
    assert_eq!(state.phase, VerifierPhase::Closed);

    let seed = Seed::from_bytes([1u8; SEED_LENGTH]);
    assert_eq!(
        accept_seed(&verifier, Frame::Seed { seed }, &mut state).unwrap_err(),
        ZkxError::UnexpectedPhase
    );
    assert_eq!(
        open_message(Frame::Ciphertext { body: String::new() }, &mut state).unwrap_err(),
        ZkxError::UnexpectedPhase
    );
    assert_eq!(state.phase, VerifierPhase::Closed);
}

#[test]
fn steps_out_of_order_are_rejected() {
    let verifier = verifier();
    let mut state = VerifierState::new();
    assert_eq!(issue_challenge(&verifier, &mut state).unwrap_err(), ZkxError::UnexpectedPhase);
    assert_eq!(key_confirmation(&mut state).unwrap_err(), ZkxError::UnexpectedPhase);
    assert_eq!(state.phase, VerifierPhase::Idle);

    let (mut state, _) = authenticate(&verifier, SECRET);
    let signature = prover_identity().create_signature(SECRET).unwrap();
    assert_eq!(
        accept_signature(Frame::Signature { signature }, &mut state).unwrap_err(),
        ZkxError::UnexpectedPhase
    );
}

#[test]
fn wrong_frame_moves_to_error() {
    let verifier = verifier();
    let mut state = VerifierState::new();
    assert_eq!(
        accept_signature(Frame::Close, &mut state).unwrap_err(),
        ZkxError::InvalidProtocolMessage
    );
    assert_eq!(state.phase, VerifierPhase::Error);

    let (mut state, _) = authenticate(&verifier, SECRET);
    assert_eq!(
        accept_seed(&verifier, Frame::Verdict { verified: true }, &mut state).unwrap_err(),
        ZkxError::InvalidProtocolMessage
    );
    assert_eq!(state.phase, VerifierPhase::Error);
}

#[test]
fn malformed_signature_point_moves_to_error() {
    let mut signature = prover_identity().create_signature(SECRET).unwrap();
    signature.signature = zkx_core::curve::Point::from_bytes(vec![0x05; 33]);
    let mut state = VerifierState::new();
    let error = accept_signature(Frame::Signature { signature }, &mut state).unwrap_err();
    assert_eq!(error, ZkxError::InvalidPoint);
    assert_eq!(state.phase, VerifierPhase::Error);
}

#[test]
fn undecryptable_message_moves_to_error() {
    let verifier = verifier();
    let (mut state, _) = authenticate(&verifier, SECRET);
    let seed = SeedGenerator::new().generate("jack").unwrap();
    accept_seed(&verifier, Frame::Seed { seed }, &mut state).unwrap();
    key_confirmation(&mut state).unwrap();

    let error = open_message(Frame::Ciphertext { body: "f".repeat(64) }, &mut state).unwrap_err();
    assert_eq!(error, ZkxError::UnknownChunk);
    assert_eq!(state.phase, VerifierPhase::Error);
    assert!(state.cipher.is_none());
}

#[test]
fn chunk_outside_alphabet_moves_to_error() {
    let verifier = verifier();
    let (mut state, _) = authenticate(&verifier, SECRET);
    let seed = SeedGenerator::new().generate("jack").unwrap();
    accept_seed(&verifier, Frame::Seed { seed: seed.clone() }, &mut state).unwrap();
    key_confirmation(&mut state).unwrap();

    let sender = ChunkCipher::from_seed(CipherAlgorithm::Sha256, &seed, 1).unwrap();
    let body = sender.encrypt_message("a b");
    let error = open_message(Frame::Ciphertext { body }, &mut state).unwrap_err();
    assert_eq!(error, ZkxError::UnknownChunk);
    assert_eq!(state.phase, VerifierPhase::Error);
}

#[test]
fn verifier_from_config() {
    let cfg = zkx_core::config::SessionConfig::from_toml_str("[cipher]\nsymbol_count = 2").unwrap();
    let verifier = Verifier::from_config(&cfg).unwrap();
    assert_eq!(verifier.cipher_config().symbol_count, 2);
    assert!(Verifier::new(prover_identity(), CipherConfig { symbol_count: 0, ..CipherConfig::default() }).is_err());
}

#[tokio::test]
async fn driver_reports_closed_channel() {
    let verifier = verifier();
    let (prover_end, verifier_end) = link_pair();
    prover_end.close();
    let error = run_verifier(&verifier, verifier_end, tracing::Span::none()).await.unwrap_err();
    assert_eq!(error, ZkxError::ChannelClosed);
}
