//! Byte/text/base64 conversions and random byte generation.
//!
//! Everything the persistence boundary sees is base64 text; everything
//! the cipher layer sees is raw bytes. These helpers are the only
//! crossing point.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::RngCore;

use crate::error::{CryptoError, CryptoResult};

/// Returns `n` bytes from the thread-local CSPRNG.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; n];
    rand::rng().fill_bytes(&mut bytes);
    bytes
}

/// Decodes UTF-8 bytes into a string.
pub fn bytes_to_text(bytes: &[u8]) -> CryptoResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|e| CryptoError::Decoding(e.to_string()))
}

/// Encodes a string as UTF-8 bytes.
pub fn text_to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Standard base64 with padding.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Inverse of [`bytes_to_base64`]. Malformed input is a
/// [`CryptoError::Decoding`].
pub fn base64_to_bytes(text: &str) -> CryptoResult<Vec<u8>> {
    STANDARD
        .decode(text)
        .map_err(|e| CryptoError::Decoding(e.to_string()))
}
