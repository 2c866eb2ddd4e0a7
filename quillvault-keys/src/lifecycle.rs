//! Master key lifecycle: setup, unlock by password, unlock by recovery
//! key, and rewrap after recovery.
//!
//! Every function is a pure orchestration over the primitive layer; no
//! state is shared between calls. PBKDF2 runs a six-figure iteration
//! count by design, so derivation always happens on the blocking pool
//! rather than the async runtime.

use tokio::task;
use tracing::debug;

use quillvault_crypto::{
    base64_to_bytes, bytes_to_base64, derive_kek, generate_nonce, import_raw_key, unwrap_key,
    wrap_key, KdfParams, MasterKey, RecoveryKey, Salt, WrappingKey, NONCE_SIZE,
};

use crate::account::{EncryptionSetup, PasswordWrappedKey, RecoveryWrappedKey};
use crate::error::{KeyringError, KeyringResult};

/// Runs KEK derivation off the async runtime.
async fn derive_kek_blocking(
    password: String,
    salt: Salt,
    params: KdfParams,
) -> KeyringResult<WrappingKey> {
    task::spawn_blocking(move || derive_kek(&password, &salt, &params))
        .await
        .map_err(|e| KeyringError::Crypto(e.to_string()))
}

fn decode_nonce(text: &str) -> KeyringResult<[u8; NONCE_SIZE]> {
    let bytes = base64_to_bytes(text)?;
    bytes
        .try_into()
        .map_err(|_| KeyringError::Decoding("bad nonce length".into()))
}

/// First-time setup for an account enabling encryption.
///
/// Generates a fresh master key and wraps it twice: under a KEK derived
/// from `password` (fresh salt, default iteration count) and under a
/// newly generated recovery key imported directly as an AEAD key. The
/// returned recovery key is shown to the user once and is not
/// retrievable afterwards.
pub async fn setup_encryption(password: &str) -> KeyringResult<EncryptionSetup> {
    let master_key = MasterKey::generate();
    let salt = Salt::random();
    let params = KdfParams::default();

    let kek = derive_kek_blocking(password.to_owned(), salt.clone(), params).await?;
    let kek_wrap_iv = generate_nonce();
    let wrapped = wrap_key(&master_key, &kek, &kek_wrap_iv)?;

    let recovery_key = RecoveryKey::generate();
    let recovery_wrapping = import_raw_key(recovery_key.as_bytes())?;
    let recovery_wrap_iv = generate_nonce();
    let recovery_wrapped = wrap_key(&master_key, &recovery_wrapping, &recovery_wrap_iv)?;

    debug!("encryption setup complete: master key wrapped for password and recovery paths");

    Ok(EncryptionSetup {
        password_wrap: PasswordWrappedKey {
            kek_salt: bytes_to_base64(salt.as_bytes()),
            encrypted_master_key: bytes_to_base64(&wrapped),
            kek_wrap_iv: bytes_to_base64(&kek_wrap_iv),
            kek_iterations: params.iterations,
        },
        recovery_wrap: RecoveryWrappedKey {
            wrapped_master_key: bytes_to_base64(&recovery_wrapped),
            wrap_iv: bytes_to_base64(&recovery_wrap_iv),
        },
        recovery_key: recovery_key.to_base64(),
        master_key,
    })
}

/// Unlocks the master key with the account password.
///
/// Fails closed: decode errors, salt-length mismatches, and tag failures
/// all surface as [`KeyringError::Authentication`], so a caller cannot
/// distinguish a wrong password from corrupted wrap material.
pub async fn unwrap_master_key(
    password: &str,
    wrap: &PasswordWrappedKey,
) -> KeyringResult<MasterKey> {
    let salt_bytes = base64_to_bytes(&wrap.kek_salt).map_err(|_| KeyringError::Authentication)?;
    let salt = Salt::from_slice(&salt_bytes).map_err(|_| KeyringError::Authentication)?;
    let wrapped =
        base64_to_bytes(&wrap.encrypted_master_key).map_err(|_| KeyringError::Authentication)?;
    let iv = decode_nonce(&wrap.kek_wrap_iv).map_err(|_| KeyringError::Authentication)?;

    let params = KdfParams {
        iterations: wrap.kek_iterations,
    };
    let kek = derive_kek_blocking(password.to_owned(), salt, params).await?;

    unwrap_key(&wrapped, &kek, &iv).map_err(|_| KeyringError::Authentication)
}

/// Unlocks the master key with the one-time recovery key.
///
/// Same fail-closed semantics as [`unwrap_master_key`].
pub async fn unwrap_with_recovery_key(
    recovery_key: &str,
    wrap: &RecoveryWrappedKey,
) -> KeyringResult<MasterKey> {
    let key = RecoveryKey::from_base64(recovery_key).map_err(|_| KeyringError::Authentication)?;
    let wrapping = import_raw_key(key.as_bytes()).map_err(|_| KeyringError::Authentication)?;
    let wrapped =
        base64_to_bytes(&wrap.wrapped_master_key).map_err(|_| KeyringError::Authentication)?;
    let iv = decode_nonce(&wrap.wrap_iv).map_err(|_| KeyringError::Authentication)?;

    unwrap_key(&wrapped, &wrapping, &iv).map_err(|_| KeyringError::Authentication)
}

/// Re-establishes the password path after a recovery-key unlock.
///
/// Generates a brand-new salt and nonce (never reused) and wraps the
/// already-unlocked master key under the new password's KEK. The
/// recovery-path artifacts are untouched and keep unwrapping to the same
/// master key.
pub async fn rewrap_master_key(
    master_key: &MasterKey,
    new_password: &str,
) -> KeyringResult<PasswordWrappedKey> {
    let salt = Salt::random();
    let params = KdfParams::default();

    let kek = derive_kek_blocking(new_password.to_owned(), salt.clone(), params).await?;
    let kek_wrap_iv = generate_nonce();
    let wrapped = wrap_key(master_key, &kek, &kek_wrap_iv)?;

    debug!("master key rewrapped under new password-derived KEK");

    Ok(PasswordWrappedKey {
        kek_salt: bytes_to_base64(salt.as_bytes()),
        encrypted_master_key: bytes_to_base64(&wrapped),
        kek_wrap_iv: bytes_to_base64(&kek_wrap_iv),
        kek_iterations: params.iterations,
    })
}
