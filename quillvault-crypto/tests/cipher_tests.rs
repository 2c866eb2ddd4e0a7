use quillvault_crypto::{
    decrypt, decrypt_string, derive_kek, encrypt, encrypt_string, generate_nonce, import_raw_key,
    unwrap_key, wrap_key, CryptoError, KdfParams, MasterKey, RecoveryKey, Salt, NONCE_SIZE,
};

const TEST_PARAMS: KdfParams = KdfParams { iterations: 1_000 };

#[test]
fn encrypt_decrypt_round_trip() {
    let key = MasterKey::generate();
    let plaintext = b"the quick brown fox";

    let data = encrypt(&key, plaintext).unwrap();
    assert_eq!(decrypt(&key, &data).unwrap(), plaintext);
}

#[test]
fn round_trip_empty_plaintext() {
    let key = MasterKey::generate();
    let data = encrypt(&key, b"").unwrap();
    assert_eq!(decrypt(&key, &data).unwrap(), Vec::<u8>::new());
}

#[test]
fn round_trip_large_plaintext() {
    let key = MasterKey::generate();
    let plaintext = vec![0x42u8; 100_000];
    let data = encrypt(&key, &plaintext).unwrap();
    assert_eq!(decrypt(&key, &data).unwrap(), plaintext);
}

#[test]
fn round_trip_unicode_string() {
    let key = MasterKey::generate();
    let plaintext = "日本語のノート — émojis 🗝🔐 and\u{0000}controls";
    let data = encrypt_string(&key, plaintext).unwrap();
    assert_eq!(decrypt_string(&key, &data).unwrap(), plaintext);
}

#[test]
fn repeated_encryption_is_probabilistic() {
    let key = MasterKey::generate();
    let a = encrypt(&key, b"same plaintext").unwrap();
    let b = encrypt(&key, b"same plaintext").unwrap();
    assert_ne!(a.nonce, b.nonce);
    assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn wrong_key_fails_authentication() {
    let key = MasterKey::generate();
    let wrong = MasterKey::generate();
    let data = encrypt(&key, b"secret").unwrap();
    assert!(matches!(
        decrypt(&wrong, &data),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn tampered_ciphertext_fails_authentication() {
    let key = MasterKey::generate();
    let mut data = encrypt(&key, b"secret").unwrap();
    data.ciphertext[0] ^= 0x01;
    assert!(matches!(
        decrypt(&key, &data),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn tampered_nonce_fails_authentication() {
    let key = MasterKey::generate();
    let mut data = encrypt(&key, b"secret").unwrap();
    data.nonce[0] ^= 0x01;
    assert!(matches!(
        decrypt(&key, &data),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn wrap_unwrap_round_trip() {
    let mk = MasterKey::generate();
    let kek = derive_kek("correct-password", &Salt::random(), &TEST_PARAMS);
    let nonce = generate_nonce();

    let wrapped = wrap_key(&mk, &kek, &nonce).unwrap();
    let unwrapped = unwrap_key(&wrapped, &kek, &nonce).unwrap();
    assert_eq!(mk.as_bytes(), unwrapped.as_bytes());
}

#[test]
fn unwrap_with_wrong_kek_fails() {
    let mk = MasterKey::generate();
    let salt = Salt::random();
    let kek = derive_kek("correct-password", &salt, &TEST_PARAMS);
    let wrong = derive_kek("wrong-password", &salt, &TEST_PARAMS);
    let nonce = generate_nonce();

    let wrapped = wrap_key(&mk, &kek, &nonce).unwrap();
    assert!(matches!(
        unwrap_key(&wrapped, &wrong, &nonce),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn unwrap_with_wrong_nonce_fails() {
    let mk = MasterKey::generate();
    let kek = derive_kek("correct-password", &Salt::random(), &TEST_PARAMS);
    let nonce = generate_nonce();

    let wrapped = wrap_key(&mk, &kek, &nonce).unwrap();
    let mut other = nonce;
    other[NONCE_SIZE - 1] ^= 0xff;
    assert!(matches!(
        unwrap_key(&wrapped, &kek, &other),
        Err(CryptoError::Authentication)
    ));
}

#[test]
fn rederived_kek_unwraps_what_the_original_wrapped() {
    let mk = MasterKey::generate();
    let salt = Salt::random();
    let nonce = generate_nonce();

    let wrapped = wrap_key(&mk, &derive_kek("pw", &salt, &TEST_PARAMS), &nonce).unwrap();
    let again = derive_kek("pw", &salt, &TEST_PARAMS);
    assert_eq!(
        unwrap_key(&wrapped, &again, &nonce).unwrap().as_bytes(),
        mk.as_bytes()
    );
}

#[test]
fn imported_recovery_key_wraps_and_unwraps() {
    let mk = MasterKey::generate();
    let recovery = RecoveryKey::generate();
    let wrapping = import_raw_key(recovery.as_bytes()).unwrap();
    let nonce = generate_nonce();

    let wrapped = wrap_key(&mk, &wrapping, &nonce).unwrap();
    let reimported = import_raw_key(recovery.as_bytes()).unwrap();
    assert_eq!(
        unwrap_key(&wrapped, &reimported, &nonce).unwrap().as_bytes(),
        mk.as_bytes()
    );
}

#[test]
fn encrypted_data_serialization_round_trip() {
    let key = MasterKey::generate();
    let data = encrypt(&key, b"persist me").unwrap();

    let json = serde_json::to_string(&data).unwrap();
    let restored: quillvault_crypto::EncryptedData = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, data);
    assert_eq!(decrypt(&key, &restored).unwrap(), b"persist me");
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn encrypt_decrypt_always_round_trips(
            plaintext in proptest::collection::vec(any::<u8>(), 0..512)
        ) {
            let key = MasterKey::generate();
            let data = encrypt(&key, &plaintext).unwrap();
            prop_assert_eq!(decrypt(&key, &data).unwrap(), plaintext);
        }

        #[test]
        fn flipping_any_ciphertext_bit_fails(
            plaintext in proptest::collection::vec(any::<u8>(), 1..64),
            bit in 0usize..8,
        ) {
            let key = MasterKey::generate();
            let mut data = encrypt(&key, &plaintext).unwrap();
            let idx = plaintext.len() / 2;
            data.ciphertext[idx] ^= 1 << bit;
            prop_assert!(decrypt(&key, &data).is_err());
        }
    }
}
