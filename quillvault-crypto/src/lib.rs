//! Encryption primitives for Quillvault.
//!
//! Provides the content-encryption building blocks for the note service:
//! - PBKDF2-HMAC-SHA-256 for key derivation from passwords
//! - ChaCha20-Poly1305 for authenticated encryption
//! - Secure key handles with zeroization
//!
//! # Architecture
//!
//! Each account has a single master key that encrypts all post content.
//! The master key is never persisted in plaintext — it is stored only in
//! wrapped (AEAD-encrypted) form, twice:
//!
//! 1. **Password path**: wrapped under a KEK derived from the account
//!    password with PBKDF2. Replaced wholesale whenever the password
//!    changes (fresh salt, fresh nonce).
//! 2. **Recovery path**: wrapped under a random recovery key that is shown
//!    to the user exactly once at setup. Survives every password change.
//!
//! Both paths unwrap to the same master key, so changing the password
//! never requires re-encrypting content.

pub mod cipher;
pub mod encoding;
mod error;
mod kdf;
mod key;

pub use cipher::{
    decrypt, decrypt_string, encrypt, encrypt_string, generate_nonce, unwrap_key, wrap_key,
    EncryptedData, NONCE_SIZE, TAG_SIZE,
};
pub use encoding::{base64_to_bytes, bytes_to_base64, bytes_to_text, random_bytes, text_to_bytes};
pub use error::{CryptoError, CryptoResult};
pub use kdf::{derive_kek, KdfParams};
pub use key::{import_raw_key, MasterKey, RecoveryKey, Salt, WrappingKey, KEY_SIZE, SALT_SIZE};
