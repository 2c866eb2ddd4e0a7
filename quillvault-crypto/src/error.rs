//! Crypto error types.

use thiserror::Error;

/// Result type for primitive crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors from the primitive crypto layer.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// AEAD tag verification failed. Carries no detail: a wrong key, a
    /// wrong nonce, and tampered ciphertext are indistinguishable.
    #[error("authentication failed")]
    Authentication,

    #[error("decoding failed: {0}")]
    Decoding(String),

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
}
