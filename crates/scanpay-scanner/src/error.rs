use scanpay_wallet::WalletError;
use thiserror::Error;

/// Failures that abort a scan instead of producing an outcome.
///
/// Bad user input never ends up here; it becomes
/// [`Outcome::CompletedWithError`](crate::Outcome::CompletedWithError).
/// A `ScanError` means the host's own stored state could not be used, and the
/// caller should stop the operation rather than retry with another category.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Stored key material could not be sealed or opened
    #[error("wallet integrity fault: {0}")]
    IntegrityFault(#[source] WalletError),

    /// The wallet refused an operation for a reason the claiming category
    /// does not report as an outcome
    #[error("wallet rejected operation: {0}")]
    Wallet(#[source] WalletError),
}

impl ScanError {
    /// Whether the wallet's stored material is unusable.
    #[must_use]
    pub fn is_integrity_fault(&self) -> bool {
        matches!(self, Self::IntegrityFault(_))
    }
}

impl From<WalletError> for ScanError {
    fn from(err: WalletError) -> Self {
        if err.is_integrity_fault() {
            Self::IntegrityFault(err)
        } else {
            Self::Wallet(err)
        }
    }
}

/// Result type alias for scanner operations.
pub type Result<T> = std::result::Result<T, ScanError>;
