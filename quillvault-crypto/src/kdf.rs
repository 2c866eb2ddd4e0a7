//! Password-based key derivation.
//!
//! PBKDF2-HMAC-SHA-256. The iteration count is persisted next to the
//! wrapped master key so the cost can be raised for new wraps without
//! breaking existing ones. Derivation is deliberately slow; callers on a
//! latency-sensitive runtime should run it on a blocking pool.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;

use crate::key::{Salt, WrappingKey, KEY_SIZE};

/// PBKDF2 cost parameters persisted alongside the wrapped master key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KdfParams {
    pub iterations: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: 600_000,
        }
    }
}

/// Derives a key-encryption key from a password.
///
/// Deterministic in (password, salt, iterations): the same inputs always
/// yield a KEK that unwraps what the original KEK wrapped. The derived
/// bytes never leave this layer except inside the [`WrappingKey`] handle.
pub fn derive_kek(password: &str, salt: &Salt, params: &KdfParams) -> WrappingKey {
    let mut out = [0u8; KEY_SIZE];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        params.iterations,
        &mut out,
    );
    WrappingKey::from_bytes(out)
}
