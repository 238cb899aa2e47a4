use super::Recognizer;
use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::{ErrorCode, Outcome, ScanValue};
use scanpay_core::BackupTarget;
use scanpay_wallet::WalletError;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// What to do with a scanned master seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterSeedAction {
    /// Compare against the wallet's seed and mark the backup verified.
    Verify,
    /// Configure the wallet from the seed.
    Import,
}

impl Recognizer for MasterSeedAction {
    fn category(&self) -> Category {
        Category::MasterSeed
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        let wallet = context.wallet();
        if *self == Self::Verify && !wallet.has_master_seed() {
            return Ok(Outcome::NotMatched);
        }
        if payload.len() % 2 != 0 {
            return Ok(Outcome::NotMatched);
        }
        let Some(seed) = context.decoders().master_seed(payload) else {
            return Ok(Outcome::NotMatched);
        };

        let outcome = match self {
            Self::Verify => {
                let stored = wallet.master_seed(context.cipher()).map_err(|e| {
                    error!("Stored master seed could not be opened: {}", e);
                    e
                })?;
                if stored == seed {
                    wallet.mark_verified(BackupTarget::MasterSeed);
                    info!("Master seed backup verified");
                    Outcome::Completed(None)
                } else {
                    warn!("Scanned seed differs from the wallet's seed");
                    Outcome::secret_error(ErrorCode::WrongSeed)
                }
            }
            Self::Import => {
                if wallet.has_master_seed() {
                    return Ok(Outcome::secret_error(ErrorCode::SeedAlreadyConfigured));
                }
                match wallet.configure_master_seed(&seed, context.cipher()) {
                    Ok(()) => {}
                    Err(WalletError::SeedAlreadyConfigured) => {
                        warn!("Master seed was configured while importing");
                        return Ok(Outcome::secret_error(ErrorCode::SeedAlreadyConfigured));
                    }
                    Err(e) => return Err(e.into()),
                }
                let account = wallet.derive_additional_account(context.cipher())?;
                wallet.mark_verified(BackupTarget::MasterSeed);
                Outcome::Completed(Some(ScanValue::Account(account)))
            }
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ScanContext;
    use crate::error::ScanError;
    use crate::recognizer::testing::Harness;
    use scanpay_core::{AccountId, BackupState, MasterSeed, Network};
    use scanpay_wallet::{KeyCipher, TemporarySource, Wallet, WalletStore};
    use std::sync::Arc;

    const SEED_HEX: &str = "000102030405060708090a0b0c0d0e0f";
    const OTHER_SEED_HEX: &str = "ffffffffffffffffffffffffffffffff";

    /// Wallet whose seed gets configured by someone else right after
    /// `has_master_seed` answered.
    struct LateSeedWallet {
        inner: Wallet,
    }

    impl WalletStore for LateSeedWallet {
        fn has_account(&self, id: &AccountId) -> bool {
            self.inner.has_account(id)
        }
        fn selected_account(&self) -> Option<AccountId> {
            self.inner.selected_account()
        }
        fn create_single_key_account(
            &self,
            key: &bitcoin::PrivateKey,
            cipher: &KeyCipher,
        ) -> scanpay_wallet::Result<AccountId> {
            self.inner.create_single_key_account(key, cipher)
        }
        fn create_temporary_account(&self, source: TemporarySource) -> AccountId {
            self.inner.create_temporary_account(source)
        }
        fn forget_temporary_account(&self, id: &AccountId) -> bool {
            self.inner.forget_temporary_account(id)
        }
        fn has_master_seed(&self) -> bool {
            false
        }
        fn configure_master_seed(
            &self,
            seed: &MasterSeed,
            cipher: &KeyCipher,
        ) -> scanpay_wallet::Result<()> {
            self.inner.configure_master_seed(seed, cipher)
        }
        fn derive_additional_account(
            &self,
            cipher: &KeyCipher,
        ) -> scanpay_wallet::Result<AccountId> {
            self.inner.derive_additional_account(cipher)
        }
        fn master_seed(&self, cipher: &KeyCipher) -> scanpay_wallet::Result<MasterSeed> {
            self.inner.master_seed(cipher)
        }
        fn mark_verified(&self, target: BackupTarget) {
            self.inner.mark_verified(target);
        }
        fn backup_state(&self, target: BackupTarget) -> BackupState {
            self.inner.backup_state(target)
        }
    }

    fn configured() -> Harness {
        let harness = Harness::new();
        let seed = MasterSeed::from_hex(SEED_HEX).expect("valid seed");
        harness
            .wallet
            .configure_master_seed(&seed, &harness.cipher)
            .expect("configure seed");
        harness
    }

    #[test]
    fn test_import_into_empty_wallet() {
        let harness = Harness::new();
        let outcome = MasterSeedAction::Import
            .attempt(SEED_HEX, &harness.context)
            .expect("attempt");

        let Outcome::Completed(Some(ScanValue::Account(account))) = outcome else {
            panic!("expected the new account");
        };
        assert!(harness.wallet.has_account(&account));
        assert!(harness.wallet.has_master_seed());
        assert_eq!(
            harness.wallet.backup_state(BackupTarget::MasterSeed),
            BackupState::Verified
        );
    }

    #[test]
    fn test_import_refuses_second_seed() {
        let harness = configured();
        let outcome = MasterSeedAction::Import
            .attempt(OTHER_SEED_HEX, &harness.context)
            .expect("attempt");

        let Outcome::CompletedWithError(failure) = outcome else {
            panic!("expected an error outcome");
        };
        assert_eq!(failure.code, ErrorCode::SeedAlreadyConfigured);
        assert!(failure.payload.is_empty());
        assert_eq!(harness.wallet.account_count(), 0);
        let stored = harness
            .wallet
            .master_seed(&harness.cipher)
            .expect("open seed");
        assert_eq!(stored.as_bytes()[0], 0x00);
    }

    #[test]
    fn test_import_losing_race_reports_already_configured() {
        let harness = Harness::new();
        let wallet = Arc::new(LateSeedWallet {
            inner: Wallet::new(Network::Bitcoin),
        });
        let seed = MasterSeed::from_hex(SEED_HEX).expect("valid seed");
        wallet
            .inner
            .configure_master_seed(&seed, &harness.cipher)
            .expect("configure seed");
        let context = ScanContext::new(
            Network::Bitcoin,
            wallet.clone(),
            harness.cipher.clone(),
            harness.launcher.clone(),
        );

        let outcome = MasterSeedAction::Import
            .attempt(OTHER_SEED_HEX, &context)
            .expect("a configured seed is not a fault");

        let Outcome::CompletedWithError(failure) = outcome else {
            panic!("expected an error outcome");
        };
        assert_eq!(failure.code, ErrorCode::SeedAlreadyConfigured);
        assert!(failure.payload.is_empty());
        assert_eq!(wallet.inner.account_count(), 0);
    }

    #[test]
    fn test_verify_matching_seed() {
        let harness = configured();
        let outcome = MasterSeedAction::Verify
            .attempt(SEED_HEX, &harness.context)
            .expect("attempt");
        assert!(matches!(outcome, Outcome::Completed(None)));
        assert_eq!(
            harness.wallet.backup_state(BackupTarget::MasterSeed),
            BackupState::Verified
        );
    }

    #[test]
    fn test_verify_wrong_seed() {
        let harness = configured();
        let outcome = MasterSeedAction::Verify
            .attempt(OTHER_SEED_HEX, &harness.context)
            .expect("attempt");
        assert!(matches!(
            outcome,
            Outcome::CompletedWithError(failure) if failure.code == ErrorCode::WrongSeed
        ));
        assert_ne!(
            harness.wallet.backup_state(BackupTarget::MasterSeed),
            BackupState::Verified
        );
    }

    #[test]
    fn test_verify_without_seed_is_not_matched() {
        let harness = Harness::new();
        let outcome = MasterSeedAction::Verify
            .attempt(SEED_HEX, &harness.context)
            .expect("attempt");
        assert!(matches!(outcome, Outcome::NotMatched));
    }

    #[test]
    fn test_structural_failures_not_matched() {
        let harness = Harness::new();
        // odd length, not hex, wrong entropy length
        for payload in [&SEED_HEX[1..], "zz0102030405060708090a0b0c0d0e0f", "00010203"] {
            let outcome = MasterSeedAction::Import
                .attempt(payload, &harness.context)
                .expect("attempt");
            assert!(matches!(outcome, Outcome::NotMatched), "{payload}");
        }
        assert!(!harness.wallet.has_master_seed());
    }

    #[test]
    fn test_undecryptable_seed_is_fatal() {
        let harness = configured();
        let context = ScanContext::new(
            Network::Bitcoin,
            harness.wallet.clone(),
            KeyCipher::generate(),
            harness.launcher.clone(),
        );

        let result = MasterSeedAction::Verify.attempt(SEED_HEX, &context);
        assert!(matches!(result, Err(ScanError::IntegrityFault(_))));
    }
}
