//! Persisted account-level key records.
//!
//! The persistence layer stores these fields verbatim and must never log
//! their raw contents. Serde names match the account columns the web tier
//! already uses.

use quillvault_crypto::MasterKey;
use serde::{Deserialize, Serialize};

/// Password-path wrap of the master key.
///
/// Exactly one of these is authoritative per account; a rewrap replaces
/// the whole record (fresh salt, fresh nonce, current iteration count).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordWrappedKey {
    /// base64, 16 bytes
    #[serde(rename = "kekSalt")]
    pub kek_salt: String,
    /// base64 AEAD ciphertext of the raw master key (tag included)
    #[serde(rename = "encryptedMasterKey")]
    pub encrypted_master_key: String,
    /// base64, 12 bytes
    #[serde(rename = "kekWrapIv")]
    pub kek_wrap_iv: String,
    /// PBKDF2 iteration count used for this wrap generation
    #[serde(rename = "kekIterations")]
    pub kek_iterations: u32,
}

/// Recovery-path wrap of the same master key.
///
/// Written once at setup and never touched again: password changes rewrap
/// only the password path, so this record keeps unwrapping to the same
/// master key for the lifetime of the account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecoveryWrappedKey {
    /// base64 AEAD ciphertext of the raw master key (tag included)
    #[serde(rename = "recoveryWrappedMK")]
    pub wrapped_master_key: String,
    /// base64, 12 bytes
    #[serde(rename = "recoveryWrapIv")]
    pub wrap_iv: String,
}

/// Everything produced by first-time encryption setup.
///
/// `recovery_key` is the one-time display form: it is never retrievable
/// again after this struct is dropped, and losing it loses the recovery
/// path permanently.
pub struct EncryptionSetup {
    pub password_wrap: PasswordWrappedKey,
    pub recovery_wrap: RecoveryWrappedKey,
    /// base64 recovery key, shown to the user exactly once
    pub recovery_key: String,
    /// live handle for immediate session use
    pub master_key: MasterKey,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_wrap_serializes_to_account_column_names() {
        let wrap = PasswordWrappedKey {
            kek_salt: "c2FsdA==".into(),
            encrypted_master_key: "d3JhcHBlZA==".into(),
            kek_wrap_iv: "aXY=".into(),
            kek_iterations: 600_000,
        };
        let json = serde_json::to_value(&wrap).unwrap();
        assert_eq!(json["kekSalt"], "c2FsdA==");
        assert_eq!(json["encryptedMasterKey"], "d3JhcHBlZA==");
        assert_eq!(json["kekWrapIv"], "aXY=");
        assert_eq!(json["kekIterations"], 600_000);
    }

    #[test]
    fn recovery_wrap_serializes_to_account_column_names() {
        let wrap = RecoveryWrappedKey {
            wrapped_master_key: "d3JhcHBlZA==".into(),
            wrap_iv: "aXY=".into(),
        };
        let json = serde_json::to_value(&wrap).unwrap();
        assert_eq!(json["recoveryWrappedMK"], "d3JhcHBlZA==");
        assert_eq!(json["recoveryWrapIv"], "aXY=");
    }
}
