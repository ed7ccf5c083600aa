// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a serialized scalar (challenge, response, private key) in bytes.
pub const SCALAR_LENGTH: usize = 32;
/// Length of a session seed (SHA-256 digest) in bytes.
pub const SEED_LENGTH: usize = 32;
/// Upper bound (exclusive) on the random padding drawn by the seed generator.
pub const MAX_SEED_PADDING: u32 = 1 << 20;
/// Default salt size for zero-knowledge parameters in bytes.
pub const DEFAULT_SALT_SIZE: usize = 16;
/// Largest salt accepted by an identity context.
pub const MAX_SALT_SIZE: usize = 1024;
/// Default chunk length of the keyed-hash cipher.
pub const DEFAULT_SYMBOL_COUNT: usize = 1;
/// Widest digest any supported hash produces, in bytes.
pub const MAX_DIGEST_LENGTH: usize = 64;
/// Default issuer claim for identity tokens.
pub const DEFAULT_ISSUER: &str = "zkx";
/// Default identity token validity in seconds.
pub const DEFAULT_TOKEN_VALIDITY_SECS: u64 = 3600;

const _: () = assert!(SCALAR_LENGTH == 32);
const _: () = assert!(SEED_LENGTH == 32);
const _: () = assert!(DEFAULT_SALT_SIZE <= MAX_SALT_SIZE);

/// The chunk cipher alphabet, in enumeration order.
///
/// Letters (lower then upper case), digits, then the 32 printable ASCII
/// punctuation characters. Both ends must agree on the exact order, since the
/// decrypt table is indexed by position in this string.
pub const ALPHABET: &str = concat!(
    "abcdefghijklmnopqrstuvwxyz",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZ",
    "0123456789",
    "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~",
);
/// Number of symbols in [`ALPHABET`].
pub const ALPHABET_LENGTH: usize = 94;

const _: () = assert!(ALPHABET.len() == ALPHABET_LENGTH);

/// Enumerates all error conditions of the identity, cipher and session layers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ZkxError {
    /// An input parameter has an invalid value or length.
    #[error("invalid input parameter")]
    InvalidInput,
    /// The curve name is not one of the supported named curves.
    #[error("unsupported curve name")]
    InvalidCurve,
    /// The hash, cipher or token algorithm name is not supported.
    #[error("unsupported algorithm")]
    InvalidAlgorithm,
    /// A token operation was attempted without a configured token secret.
    #[error("no token secret configured")]
    MissingSecret,
    /// Ciphertext length is not a multiple of the chunk length.
    #[error("ciphertext is not aligned to the chunk length")]
    MisalignedCiphertext,
    /// A ciphertext digest is not present in the decrypt table.
    #[error("ciphertext contains an unknown chunk digest")]
    UnknownChunk,
    /// Two distinct chunks produced the same keyed digest.
    #[error("keyed digest collision while building the decrypt table")]
    DigestCollision,
    /// Decryption was requested from an encrypt-only cipher.
    #[error("cipher has no decrypt table")]
    MissingDecryptTable,
    /// A verification step that cannot be represented as a boolean outcome failed.
    #[error("verification failed")]
    VerificationFailed,
    /// The identity token is malformed, expired, not yet valid, or wrongly signed.
    #[error("invalid token")]
    InvalidToken,
    /// The secure random source could not be initialised.
    #[error("secure random source unavailable")]
    EntropyUnavailable,
    /// A curve point encoding is malformed or not on the curve.
    #[error("invalid curve point")]
    InvalidPoint,
    /// A scalar encoding is not canonical for the curve order.
    #[error("invalid scalar")]
    InvalidScalar,
    /// A protocol frame has an unexpected format or content.
    #[error("protocol message has invalid format")]
    InvalidProtocolMessage,
    /// A session step was invoked in the wrong phase.
    #[error("operation not permitted in the current session phase")]
    UnexpectedPhase,
    /// The peer closed its side of the channel.
    #[error("channel closed")]
    ChannelClosed,
    /// A configuration file or value is invalid.
    #[error("invalid configuration")]
    InvalidConfig,
    /// A low-level cryptographic primitive returned an error code.
    #[error("cryptographic operation failed")]
    CryptoError,
}

/// Convenience alias for `Result<T, ZkxError>`.
pub type ZkxResult<T> = Result<T, ZkxError>;

/// A heap-allocated byte buffer that is zeroized on drop.
///
/// Wraps a `Vec<u8>` and implements `Zeroize + ZeroizeOnDrop` so that
/// identity secrets and token keys are scrubbed from memory when no longer needed.
/// The `Debug` implementation redacts the contents.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct SecureBytes(Vec<u8>);

impl SecureBytes {
    /// Creates a buffer by copying the given slice.
    pub fn from_slice(data: &[u8]) -> Self {
        Self(data.to_vec())
    }

    /// Returns an immutable reference to the underlying bytes.
    pub fn data(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of bytes in the buffer.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Deref for SecureBytes {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for SecureBytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl std::fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureBytes([REDACTED; {}])", self.0.len())
    }
}

/// Compares two byte slices in constant time using libsodium's `sodium_memcmp`.
///
/// Returns `true` if the slices are equal, `false` otherwise. If the lengths
/// differ, returns `false` immediately (length itself is not secret).
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    if a.is_empty() {
        return true;
    }
    // SAFETY: Both pointers come from valid slices. Length equality is verified before the call.
    unsafe {
        libsodium_sys::sodium_memcmp(
            a.as_ptr() as *const _,
            b.as_ptr() as *const _,
            a.len(),
        ) == 0
    }
}

/// Returns `true` if every byte in `data` is zero, checked in constant time.
pub fn is_all_zero(data: &[u8]) -> bool {
    // SAFETY: Pointer comes from a valid slice.
    unsafe { libsodium_sys::sodium_is_zero(data.as_ptr(), data.len()) == 1 }
}
