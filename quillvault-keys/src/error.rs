//! Keyring error types.
//!
//! Nothing here is retried: cryptographic failures are non-transient, so
//! the same inputs will always fail the same way. Callers surface the
//! error; they never fall back to plaintext.

use quillvault_crypto::CryptoError;
use thiserror::Error;

/// Result type for key lifecycle and post encryption operations.
pub type KeyringResult<T> = Result<T, KeyringError>;

/// Errors from key lifecycle and post encryption operations.
#[derive(Debug, Error)]
pub enum KeyringError {
    /// Wrong password or wrong recovery key. Deliberately carries no
    /// detail about which input was bad, so callers cannot build a
    /// corruption-vs-credential oracle.
    #[error("incorrect credentials")]
    Authentication,

    /// An encrypted post is missing required fields, or its ciphertext no
    /// longer authenticates against its nonce.
    #[error("unable to read this entry: {0}")]
    CorruptRecord(String),

    /// Malformed base64/UTF-8 from storage. A storage or transport bug,
    /// not user-recoverable.
    #[error("decoding failed: {0}")]
    Decoding(String),

    /// Metadata failed to parse as JSON after an otherwise clean decrypt.
    #[error("metadata serialization failed: {0}")]
    Serialization(String),

    /// Unexpected primitive-layer failure or a blocking task that did not
    /// complete.
    #[error("crypto error: {0}")]
    Crypto(String),
}

impl From<CryptoError> for KeyringError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::Authentication => KeyringError::Authentication,
            CryptoError::Decoding(msg) => KeyringError::Decoding(msg),
            CryptoError::Encryption(msg) => KeyringError::Crypto(msg),
            CryptoError::InvalidKeyLength { .. } => KeyringError::Crypto(e.to_string()),
        }
    }
}
