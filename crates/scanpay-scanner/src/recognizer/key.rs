use super::Recognizer;
use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::{ErrorCode, Outcome, ScanValue};
use crate::subflow::SubflowRequest;
use scanpay_core::BackupTarget;
use scanpay_wallet::{single_key_account_id, TemporarySource};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// What to do with a scanned private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivateKeyAction {
    /// Keep the key as a permanent single-key account.
    Import,
    /// Spend from the key through a temporary account.
    ColdSpending,
    /// Hand the key back.
    Return,
    /// Confirm the key belongs to an existing account and mark it backed up.
    Verify,
}

impl Recognizer for PrivateKeyAction {
    fn category(&self) -> Category {
        Category::PrivateKey
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        let Some(key) = context.decoders().private_key(payload, context.network()) else {
            return Ok(Outcome::NotMatched);
        };

        let outcome = match self {
            Self::Import => {
                context
                    .wallet()
                    .create_single_key_account(&key, context.cipher())?;
                Outcome::Completed(None)
            }
            Self::ColdSpending => {
                let account = context
                    .wallet()
                    .create_temporary_account(TemporarySource::Key(key));
                Outcome::Suspended(
                    context
                        .subflows()
                        .launch(SubflowRequest::PrepareSpend { account }),
                )
            }
            Self::Return => Outcome::Completed(Some(ScanValue::PrivateKey(key))),
            Self::Verify => {
                let id = single_key_account_id(&key);
                if context.wallet().has_account(&id) {
                    context.wallet().mark_verified(BackupTarget::Account(id));
                    info!(account = %id, "Key backup verified");
                    Outcome::Completed(None)
                } else {
                    warn!("Scanned key matches no account");
                    Outcome::secret_error(ErrorCode::NoSuchRecord)
                }
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::testing::{Harness, GENESIS, WIF};
    use crate::subflow::SubflowKind;
    use scanpay_core::BackupState;
    use scanpay_wallet::WalletStore;

    #[test]
    fn test_non_key_is_not_matched() {
        let harness = Harness::new();
        for action in [
            PrivateKeyAction::Import,
            PrivateKeyAction::ColdSpending,
            PrivateKeyAction::Return,
            PrivateKeyAction::Verify,
        ] {
            let outcome = action
                .attempt(GENESIS, &harness.context)
                .expect("attempt");
            assert!(matches!(outcome, Outcome::NotMatched));
        }
        assert_eq!(harness.wallet.account_count(), 0);
        assert!(harness.launched().is_empty());
    }

    #[test]
    fn test_import_creates_account() {
        let harness = Harness::new();
        let outcome = PrivateKeyAction::Import
            .attempt(WIF, &harness.context)
            .expect("attempt");

        assert!(matches!(outcome, Outcome::Completed(None)));
        assert_eq!(harness.wallet.account_count(), 1);
        assert!(harness.wallet.selected_account().is_some());
    }

    #[test]
    fn test_cold_spending_suspends() {
        let harness = Harness::new();
        let outcome = PrivateKeyAction::ColdSpending
            .attempt(WIF, &harness.context)
            .expect("attempt");

        let Outcome::Suspended(pending) = outcome else {
            panic!("expected a suspended outcome");
        };
        assert_eq!(pending.kind(), SubflowKind::PrepareSpend);

        let launched = harness.launched();
        let [SubflowRequest::PrepareSpend { account }] = launched.as_slice() else {
            panic!("expected one prepare-spend launch");
        };
        let record = harness.wallet.account(account).expect("temporary account");
        assert!(record.is_temporary());
    }

    #[test]
    fn test_return_hands_back_key() {
        let harness = Harness::new();
        let outcome = PrivateKeyAction::Return
            .attempt(WIF, &harness.context)
            .expect("attempt");

        assert!(matches!(
            outcome,
            Outcome::Completed(Some(ScanValue::PrivateKey(key))) if key.to_wif() == WIF
        ));
        assert_eq!(harness.wallet.account_count(), 0);
    }

    #[test]
    fn test_verify_known_key() {
        let harness = Harness::new();
        PrivateKeyAction::Import
            .attempt(WIF, &harness.context)
            .expect("import");

        let outcome = PrivateKeyAction::Verify
            .attempt(WIF, &harness.context)
            .expect("verify");
        assert!(matches!(outcome, Outcome::Completed(None)));

        let id = harness.wallet.selected_account().expect("imported account");
        assert_eq!(
            harness.wallet.backup_state(BackupTarget::Account(id)),
            BackupState::Verified
        );
    }

    #[test]
    fn test_verify_unknown_key() {
        let harness = Harness::new();
        let outcome = PrivateKeyAction::Verify
            .attempt(WIF, &harness.context)
            .expect("verify");

        let Outcome::CompletedWithError(failure) = outcome else {
            panic!("expected an error outcome");
        };
        assert_eq!(failure.code, ErrorCode::NoSuchRecord);
        assert!(failure.payload.is_empty());
    }
}
