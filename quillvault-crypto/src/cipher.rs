//! Authenticated encryption: ChaCha20-Poly1305 with 96-bit nonces.
//!
//! Two call shapes:
//! - [`encrypt`]/[`decrypt`] generate a fresh nonce per call and carry it
//!   in [`EncryptedData`] — used for post content.
//! - [`wrap_key`]/[`unwrap_key`] take an explicit nonce and operate on raw
//!   master key bytes — used for the two key-wrap paths, where the nonce
//!   is persisted as its own account field.
//!
//! The Poly1305 tag is the only credential check in the system: a wrong
//! password or recovery key surfaces as a tag failure on unwrap.

use chacha20poly1305::aead::Aead;
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{CryptoError, CryptoResult};
use crate::key::{MasterKey, WrappingKey, KEY_SIZE};

/// AEAD nonce size in bytes (96-bit).
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size in bytes, appended to every ciphertext.
pub const TAG_SIZE: usize = 16;

/// Nonce + ciphertext pair produced by [`encrypt`].
///
/// The ciphertext includes the Poly1305 tag.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptedData {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Generates a fresh random 96-bit nonce.
pub fn generate_nonce() -> [u8; NONCE_SIZE] {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rng().fill_bytes(&mut nonce);
    nonce
}

fn cipher_for(key_bytes: &[u8; KEY_SIZE]) -> ChaCha20Poly1305 {
    ChaCha20Poly1305::new(Key::from_slice(key_bytes))
}

/// Encrypts a byte payload under the master key with a fresh nonce.
///
/// Probabilistic: two calls with identical inputs produce different
/// nonces and different ciphertexts.
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> CryptoResult<EncryptedData> {
    let nonce = generate_nonce();
    let ciphertext = cipher_for(key.as_bytes())
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    Ok(EncryptedData { nonce, ciphertext })
}

/// Decrypts a payload. Fails closed with [`CryptoError::Authentication`]
/// on any bit-flip of nonce or ciphertext, or on a wrong key.
pub fn decrypt(key: &MasterKey, data: &EncryptedData) -> CryptoResult<Vec<u8>> {
    cipher_for(key.as_bytes())
        .decrypt(Nonce::from_slice(&data.nonce), data.ciphertext.as_ref())
        .map_err(|_| CryptoError::Authentication)
}

/// UTF-8 convenience wrapper over [`encrypt`].
pub fn encrypt_string(key: &MasterKey, plaintext: &str) -> CryptoResult<EncryptedData> {
    encrypt(key, plaintext.as_bytes())
}

/// UTF-8 convenience wrapper over [`decrypt`].
pub fn decrypt_string(key: &MasterKey, data: &EncryptedData) -> CryptoResult<String> {
    let bytes = decrypt(key, data)?;
    String::from_utf8(bytes).map_err(|e| CryptoError::Decoding(e.to_string()))
}

/// AEAD-wraps the raw master key bytes under a wrapping key.
pub fn wrap_key(
    master_key: &MasterKey,
    wrapping_key: &WrappingKey,
    nonce: &[u8; NONCE_SIZE],
) -> CryptoResult<Vec<u8>> {
    cipher_for(wrapping_key.as_bytes())
        .encrypt(Nonce::from_slice(nonce), master_key.as_bytes().as_slice())
        .map_err(|e| CryptoError::Encryption(e.to_string()))
}

/// Recovers the master key from wrapped bytes.
///
/// Tag failure means the wrapping key or nonce does not match what
/// produced the ciphertext — this is how a wrong password or wrong
/// recovery key is detected.
pub fn unwrap_key(
    wrapped: &[u8],
    wrapping_key: &WrappingKey,
    nonce: &[u8; NONCE_SIZE],
) -> CryptoResult<MasterKey> {
    let mut plaintext = cipher_for(wrapping_key.as_bytes())
        .decrypt(Nonce::from_slice(nonce), wrapped)
        .map_err(|_| CryptoError::Authentication)?;

    if plaintext.len() != KEY_SIZE {
        let actual = plaintext.len();
        plaintext.zeroize();
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual,
        });
    }

    let mut bytes = [0u8; KEY_SIZE];
    bytes.copy_from_slice(&plaintext);
    plaintext.zeroize();
    Ok(MasterKey::from_bytes(bytes))
}
