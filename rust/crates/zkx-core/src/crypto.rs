// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

use std::sync::OnceLock;

use crate::types::{ZkxError, ZkxResult};

static SODIUM_READY: OnceLock<bool> = OnceLock::new();

/// Initialises libsodium once per process.
///
/// Every function that draws randomness calls this first, so callers only need
/// it to surface [`ZkxError::EntropyUnavailable`] early.
///
/// # Errors
///
/// Returns [`ZkxError::EntropyUnavailable`] if `sodium_init` fails, which
/// happens when the system random source cannot be opened.
pub fn init() -> ZkxResult<()> {
    // SAFETY: sodium_init is thread-safe and idempotent; 0 = initialised, 1 = already initialised.
    let ready = *SODIUM_READY.get_or_init(|| unsafe { libsodium_sys::sodium_init() >= 0 });
    if ready {
        Ok(())
    } else {
        Err(ZkxError::EntropyUnavailable)
    }
}

/// Fills `buf` with cryptographically secure random bytes.
///
/// An empty buffer is a no-op.
///
/// # Errors
///
/// Returns [`ZkxError::EntropyUnavailable`] if libsodium cannot be initialised.
pub fn random_bytes(buf: &mut [u8]) -> ZkxResult<()> {
    init()?;
    if buf.is_empty() {
        return Ok(());
    }
    // SAFETY: buf is a valid mutable slice; length matches buf.len().
    unsafe {
        libsodium_sys::randombytes_buf(buf.as_mut_ptr() as *mut _, buf.len());
    }
    Ok(())
}

/// Returns a freshly allocated vector of `len` secure random bytes.
///
/// # Errors
///
/// Returns [`ZkxError::EntropyUnavailable`] if libsodium cannot be initialised.
pub fn random_vec(len: usize) -> ZkxResult<Vec<u8>> {
    let mut out = vec![0u8; len];
    random_bytes(&mut out)?;
    Ok(out)
}

/// Returns a uniformly distributed integer in `[0, upper_bound)`.
///
/// # Errors
///
/// Returns [`ZkxError::InvalidInput`] if `upper_bound` is zero.
/// Returns [`ZkxError::EntropyUnavailable`] if libsodium cannot be initialised.
pub fn random_uniform(upper_bound: u32) -> ZkxResult<u32> {
    if upper_bound == 0 {
        return Err(ZkxError::InvalidInput);
    }
    init()?;
    // SAFETY: Pure function of its argument and the internal CSPRNG state.
    Ok(unsafe { libsodium_sys::randombytes_uniform(upper_bound) })
}
