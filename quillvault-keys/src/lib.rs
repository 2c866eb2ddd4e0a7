//! Master key lifecycle and post content encryption for Quillvault.
//!
//! Stateless orchestration over `quillvault-crypto`: every operation
//! takes all key material as arguments and returns results, so arbitrary
//! concurrent calls are safe without locking. The unlocked [`MasterKey`]
//! handle is owned exclusively by the caller's session holder, which
//! locks by dropping it (zeroize-on-drop).
//!
//! [`MasterKey`]: quillvault_crypto::MasterKey

pub mod account;
mod error;
pub mod lifecycle;
pub mod post;

pub use account::{EncryptionSetup, PasswordWrappedKey, RecoveryWrappedKey};
pub use error::{KeyringError, KeyringResult};
pub use lifecycle::{
    rewrap_master_key, setup_encryption, unwrap_master_key, unwrap_with_recovery_key,
};
pub use post::{decrypt_post, decrypt_posts, encrypt_post, DecryptedPost, PostRecord};
