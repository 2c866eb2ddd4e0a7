//! Post content encryption.
//!
//! Content and metadata are encrypted independently, each with its own
//! nonce, so a metadata-only edit never touches content ciphertext and
//! vice versa. The two sub-operations of a single post run concurrently,
//! and batch decryption fans out across posts while preserving input
//! order.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::task;

use quillvault_crypto::{
    base64_to_bytes, bytes_to_base64, decrypt, encrypt, EncryptedData, MasterKey, NONCE_SIZE,
};

use crate::error::{KeyringError, KeyringResult};

/// Persisted per-post projection.
///
/// When `is_encrypted` is true the four ciphertext/iv fields are
/// authoritative and the plaintext fields absent; when false (accounts
/// that never enabled encryption, or legacy rows) the plaintext fields
/// are used instead.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_ciphertext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_iv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_ciphertext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_iv: Option<String>,
    pub is_encrypted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Transient plaintext projection of a post. Never persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct DecryptedPost {
    pub content: String,
    pub metadata: Map<String, Value>,
    pub is_encrypted: bool,
}

/// Runs an AEAD operation on the blocking pool so bulk fan-out never
/// starves the runtime.
async fn run_cipher<T, F>(f: F) -> KeyringResult<T>
where
    F: FnOnce() -> KeyringResult<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| KeyringError::Crypto(e.to_string()))?
}

/// Encrypts a post's content string and metadata map under the master
/// key, producing the four persisted fields with fresh nonces.
pub async fn encrypt_post(
    master_key: &MasterKey,
    content: &str,
    metadata: &Map<String, Value>,
) -> KeyringResult<PostRecord> {
    let metadata_json =
        serde_json::to_string(metadata).map_err(|e| KeyringError::Serialization(e.to_string()))?;

    let content_key = master_key.clone();
    let content_owned = content.to_owned();
    let metadata_key = master_key.clone();

    let (content_enc, metadata_enc) = tokio::try_join!(
        run_cipher(move || {
            encrypt(&content_key, content_owned.as_bytes()).map_err(KeyringError::from)
        }),
        run_cipher(move || {
            encrypt(&metadata_key, metadata_json.as_bytes()).map_err(KeyringError::from)
        }),
    )?;

    Ok(PostRecord {
        content_ciphertext: Some(bytes_to_base64(&content_enc.ciphertext)),
        content_iv: Some(bytes_to_base64(&content_enc.nonce)),
        metadata_ciphertext: Some(bytes_to_base64(&metadata_enc.ciphertext)),
        metadata_iv: Some(bytes_to_base64(&metadata_enc.nonce)),
        is_encrypted: true,
        content: None,
        metadata: None,
    })
}

/// Decodes one ciphertext/iv pair, requiring both fields to be present.
fn encrypted_field(
    ciphertext: Option<&str>,
    iv: Option<&str>,
    field: &str,
) -> KeyringResult<EncryptedData> {
    let (Some(ciphertext), Some(iv)) = (ciphertext, iv) else {
        return Err(KeyringError::CorruptRecord(format!(
            "missing {field} ciphertext or iv"
        )));
    };
    let ciphertext = base64_to_bytes(ciphertext).map_err(|e| KeyringError::Decoding(e.to_string()))?;
    let iv_bytes = base64_to_bytes(iv).map_err(|e| KeyringError::Decoding(e.to_string()))?;
    let nonce: [u8; NONCE_SIZE] = iv_bytes
        .try_into()
        .map_err(|_| KeyringError::CorruptRecord(format!("bad {field} iv length")))?;
    Ok(EncryptedData { nonce, ciphertext })
}

/// Decrypts a single post into its plaintext projection.
///
/// Unencrypted rows pass straight through. Encrypted rows require all
/// four ciphertext/iv fields; a missing field or a tag failure is a
/// [`KeyringError::CorruptRecord`], and metadata that decrypts but fails
/// to parse is a [`KeyringError::Serialization`].
pub async fn decrypt_post(
    master_key: &MasterKey,
    post: &PostRecord,
) -> KeyringResult<DecryptedPost> {
    if !post.is_encrypted {
        return Ok(DecryptedPost {
            content: post.content.clone().unwrap_or_default(),
            metadata: post.metadata.clone().unwrap_or_default(),
            is_encrypted: false,
        });
    }

    let content_data = encrypted_field(
        post.content_ciphertext.as_deref(),
        post.content_iv.as_deref(),
        "content",
    )?;
    let metadata_data = encrypted_field(
        post.metadata_ciphertext.as_deref(),
        post.metadata_iv.as_deref(),
        "metadata",
    )?;

    let content_key = master_key.clone();
    let metadata_key = master_key.clone();

    let (content_bytes, metadata_bytes) = tokio::try_join!(
        run_cipher(move || {
            decrypt(&content_key, &content_data)
                .map_err(|_| KeyringError::CorruptRecord("content failed to decrypt".into()))
        }),
        run_cipher(move || {
            decrypt(&metadata_key, &metadata_data)
                .map_err(|_| KeyringError::CorruptRecord("metadata failed to decrypt".into()))
        }),
    )?;

    let content =
        String::from_utf8(content_bytes).map_err(|e| KeyringError::Decoding(e.to_string()))?;
    let metadata: Map<String, Value> = serde_json::from_slice(&metadata_bytes)
        .map_err(|e| KeyringError::Serialization(e.to_string()))?;

    Ok(DecryptedPost {
        content,
        metadata,
        is_encrypted: true,
    })
}

/// Decrypts a batch of posts concurrently, preserving input order.
///
/// All-or-nothing: one bad record fails the whole batch. That matches the
/// contract existing callers were built against; per-item error isolation
/// would be a behavior change for them.
pub async fn decrypt_posts(
    master_key: &MasterKey,
    posts: &[PostRecord],
) -> KeyringResult<Vec<DecryptedPost>> {
    try_join_all(posts.iter().map(|post| decrypt_post(master_key, post))).await
}
