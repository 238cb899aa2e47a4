//! Error types for the wallet module.

use thiserror::Error;

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Encryption operation failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Decryption operation failed (wrong cipher or corrupted data).
    #[error("decryption failed: {0}")]
    Decryption(String),

    /// A master seed is already configured.
    #[error("master seed already configured")]
    SeedAlreadyConfigured,

    /// The operation needs a master seed but none is configured.
    #[error("no master seed configured")]
    NoMasterSeed,
}

impl WalletError {
    /// Whether this error means stored key material could not be processed
    /// with the expected cipher.
    #[must_use]
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::Encryption(_) | Self::Decryption(_))
    }
}

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;
