//! Randomized property-based tests for the identity proof and the chunk cipher.

use proptest::prelude::*;
use zkx_agent::*;
use zkx_core::cipher::{ChunkCipher, CipherAlgorithm};
use zkx_core::config::CipherConfig;
use zkx_core::identity::ZkIdentity;
use zkx_core::protocol::Frame;
use zkx_core::seed::Seed;
use zkx_core::types::*;
use zkx_relay::{accept_signature, issue_challenge, verify_proof, Verifier, VerifierPhase, VerifierState};

const CURVES: [&str; 3] = ["secp256k1", "P-256", "ristretto255"];

fn identity(curve: &str) -> ZkIdentity {
    ZkIdentity::new(curve, "sha3_256", None, None, 16).unwrap()
}

fn alphabet_text(max_len: usize) -> impl Strategy<Value = String> {
    let symbols: Vec<char> = ALPHABET.chars().collect();
    prop::collection::vec(prop::sample::select(symbols), 0..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_honest_proof_always_verifies(
        secret in prop::collection::vec(any::<u8>(), 1..=64),
        context in prop::collection::vec(any::<u8>(), 0..=64),
        curve in prop::sample::select(CURVES.to_vec()),
    ) {
        let zk = identity(curve);
        let signature = zk.create_signature(&secret).unwrap();
        let proof = zk.create_proof(&secret, &context).unwrap();
        prop_assert!(zk.verify(&context, &signature, proof), "honest proof must verify on {}", curve);
    }

    #[test]
    fn prop_other_secret_never_verifies(
        secret in prop::collection::vec(any::<u8>(), 1..=32),
        other in prop::collection::vec(any::<u8>(), 1..=32),
        curve in prop::sample::select(CURVES.to_vec()),
    ) {
        prop_assume!(secret != other);
        let zk = identity(curve);
        let signature = zk.create_signature(&secret).unwrap();
        let proof = zk.create_proof(&other, b"challenge").unwrap();
        prop_assert!(!zk.verify(b"challenge", &signature, proof));
    }

    #[test]
    fn prop_proof_is_bound_to_its_context(
        context in prop::collection::vec(any::<u8>(), 1..=32),
        replayed in prop::collection::vec(any::<u8>(), 1..=32),
    ) {
        prop_assume!(context != replayed);
        let zk = identity("secp256k1");
        let signature = zk.create_signature(b"alice").unwrap();
        let proof = zk.create_proof(b"alice", &context).unwrap();
        prop_assert!(!zk.verify(&replayed, &signature, proof));
    }

    #[test]
    fn prop_verifier_accepts_only_the_key_holder(
        secret in prop::collection::vec(any::<u8>(), 1..=32),
        honest in any::<bool>(),
    ) {
        let cipher = CipherConfig::default();
        let prover = Prover::new(identity("ristretto255"), &secret, cipher.clone(), "jack").unwrap();
        let verifier = Verifier::new(identity("ristretto255"), cipher).unwrap();
        let mut p = ProverState::new();
        let mut v = VerifierState::new();

        let opening = begin_authentication(&prover, &mut p).unwrap();
        let presented = if honest {
            opening
        } else {
            let stranger = identity("ristretto255").create_signature(b"someone else").unwrap();
            Frame::Signature { signature: stranger }
        };
        accept_signature(presented, &mut v).unwrap();
        accept_challenge(issue_challenge(&verifier, &mut v).unwrap(), &mut p).unwrap();
        let verdict = verify_proof(&verifier, create_proof(&prover, &mut p).unwrap(), &mut v).unwrap();

        prop_assert_eq!(accept_verdict(verdict, &mut p).unwrap(), honest);
        let expected = if honest { VerifierPhase::Authenticated } else { VerifierPhase::Closed };
        prop_assert_eq!(v.phase, expected);
    }

    #[test]
    fn prop_single_symbol_cipher_round_trips(
        seed in any::<[u8; SEED_LENGTH]>(),
        message in alphabet_text(48),
    ) {
        let seed = Seed::from_bytes(seed);
        let sender = ChunkCipher::from_seed(CipherAlgorithm::Sha256, &seed, 1).unwrap();
        let receiver = ChunkCipher::with_decrypt_table(CipherAlgorithm::Sha256, seed.as_bytes(), 1).unwrap();
        let ciphertext = sender.encrypt_message(&message);
        prop_assert_eq!(ciphertext.len(), message.len() * 64);
        prop_assert_eq!(receiver.decrypt_message(&ciphertext).unwrap(), message);
    }

    #[test]
    fn prop_aligned_pairs_round_trip(
        seed in any::<[u8; SEED_LENGTH]>(),
        message in alphabet_text(16),
    ) {
        prop_assume!(message.len() % 2 == 0);
        let seed = Seed::from_bytes(seed);
        let sender = ChunkCipher::from_seed(CipherAlgorithm::Sha3_224, &seed, 2).unwrap();
        let receiver = ChunkCipher::with_decrypt_table(CipherAlgorithm::Sha3_224, seed.as_bytes(), 2).unwrap();
        prop_assert_eq!(receiver.decrypt_message(&sender.encrypt_message(&message)).unwrap(), message);
    }

    #[test]
    fn prop_misaligned_ciphertext_is_rejected(
        seed in any::<[u8; SEED_LENGTH]>(),
        garbage in "[0-9a-f]{1,200}",
    ) {
        prop_assume!(garbage.len() % 2 != 0);
        let receiver = ChunkCipher::with_decrypt_table(CipherAlgorithm::Sha256, &seed, 2).unwrap();
        prop_assert_eq!(receiver.decrypt_message(&garbage).unwrap_err(), ZkxError::MisalignedCiphertext);
    }
}
