//! Sealing of stored key material using ChaCha20-Poly1305 AEAD.
//!
//! Private keys of imported accounts and the wallet's master seed never sit in
//! the store as plaintext. They are sealed with a [`KeyCipher`] held by the
//! host; opening them again with a different cipher fails, which the scanner
//! treats as an integrity fault rather than bad user input.
//!
//! # Security Properties
//!
//! - **Confidentiality**: `ChaCha20` stream cipher
//! - **Authenticity**: `Poly1305` MAC
//! - **Nonce**: 96-bit random nonce per encryption
//! - **Key**: 256-bit, zeroized on drop

use crate::error::{Result, WalletError};
use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroizing;

/// Length of the nonce in bytes (96 bits for ChaCha20-Poly1305).
pub const NONCE_LENGTH: usize = 12;

/// Length of a cipher key in bytes.
pub const KEY_LENGTH: usize = 32;

/// Key used to seal and open stored key material.
#[derive(Clone)]
pub struct KeyCipher {
    key: Zeroizing<[u8; KEY_LENGTH]>,
}

impl KeyCipher {
    /// Wrap an existing 256-bit key.
    #[must_use]
    pub fn new(key: [u8; KEY_LENGTH]) -> Self {
        Self {
            key: Zeroizing::new(key),
        }
    }

    /// Generate a fresh random key.
    #[must_use]
    pub fn generate() -> Self {
        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        OsRng.fill_bytes(&mut key[..]);
        Self { key }
    }

    /// Seal a value.
    pub fn seal<T>(&self, value: &T) -> Result<EncryptedField<T>>
    where
        T: Serialize + for<'de> Deserialize<'de>,
    {
        EncryptedField::encrypt(value, &self.key)
    }

    /// Open a sealed value.
    pub fn open<T>(&self, field: &EncryptedField<T>) -> Result<T>
    where
        T: Serialize + for<'de> Deserialize<'de>,
    {
        field.decrypt(&self.key)
    }
}

impl fmt::Debug for KeyCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyCipher(<redacted>)")
    }
}

/// Encrypted value with ciphertext and nonce.
///
/// The generic type `T` represents the plaintext type before encryption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptedField<T> {
    /// Ciphertext + authentication tag (16 bytes)
    ciphertext: Vec<u8>,
    /// Random nonce used for this encryption
    nonce: [u8; NONCE_LENGTH],
    #[serde(skip)]
    _phantom: std::marker::PhantomData<T>,
}

impl<T> EncryptedField<T>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    /// Encrypt a value using the provided key.
    ///
    /// # Errors
    /// Returns `WalletError::Encryption` if encryption or serialization fails.
    pub fn encrypt(value: &T, key: &[u8; KEY_LENGTH]) -> Result<Self> {
        let plaintext = Zeroizing::new(
            serde_json::to_vec(value)
                .map_err(|e| WalletError::Encryption(format!("serialization failed: {e}")))?,
        );

        let nonce_bytes = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let mut nonce = [0u8; NONCE_LENGTH];
        nonce.copy_from_slice(nonce_bytes.as_slice());

        let cipher = ChaCha20Poly1305::new(key.into());
        let ciphertext = cipher
            .encrypt(&nonce_bytes, plaintext.as_slice())
            .map_err(|e| WalletError::Encryption(format!("encryption failed: {e}")))?;

        Ok(Self {
            ciphertext,
            nonce,
            _phantom: std::marker::PhantomData,
        })
    }

    /// Decrypt the value using the provided key.
    ///
    /// # Errors
    /// Returns `WalletError::Decryption` if:
    /// - The key is incorrect
    /// - The ciphertext has been tampered with
    /// - Deserialization fails
    pub fn decrypt(&self, key: &[u8; KEY_LENGTH]) -> Result<T> {
        let cipher = ChaCha20Poly1305::new(key.into());

        let nonce = Nonce::from_slice(&self.nonce);
        let plaintext = Zeroizing::new(
            cipher
                .decrypt(nonce, self.ciphertext.as_ref())
                .map_err(|e| WalletError::Decryption(format!("decryption failed: {e}")))?,
        );

        serde_json::from_slice(&plaintext)
            .map_err(|e| WalletError::Decryption(format!("deserialization failed: {e}")))
    }

    /// Get the size of the ciphertext in bytes.
    #[must_use]
    pub fn ciphertext_len(&self) -> usize {
        self.ciphertext.len()
    }

    /// Get the nonce.
    #[must_use]
    pub fn nonce(&self) -> &[u8; NONCE_LENGTH] {
        &self.nonce
    }
}
