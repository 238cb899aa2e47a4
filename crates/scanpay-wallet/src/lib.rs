//! Scanpay Wallet - account store consulted and mutated by the scanner.
//!
//! The scanner never reaches for a global wallet; it is handed something
//! implementing [`WalletStore`]. This crate defines that interface and ships
//! [`Wallet`], an in-memory implementation used by hosts without their own
//! persistence layer and by the scanner's tests.
//!
//! # Security Model
//!
//! - Imported private keys and the master seed are sealed with a [`KeyCipher`]
//! - Failing to open sealed material is an integrity fault, not a user error
//! - No key material is ever logged or included in error messages
//!
//! # Example
//!
//! ```rust
//! use scanpay_core::{MasterSeed, Network};
//! use scanpay_wallet::{KeyCipher, Wallet, WalletStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let wallet = Wallet::new(Network::Bitcoin);
//! let cipher = KeyCipher::generate();
//! let seed = MasterSeed::from_bytes(&[7u8; 16]).ok_or("bad seed")?;
//!
//! wallet.configure_master_seed(&seed, &cipher)?;
//! let account = wallet.derive_additional_account(&cipher)?;
//! assert!(wallet.has_account(&account));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backup;
pub mod cipher;
pub mod error;

pub use backup::{BackupRecord, BackupStore};
pub use cipher::{EncryptedField, KeyCipher};
pub use error::{Result, WalletError};

use bitcoin::hashes::{sha256, Hash};
use bitcoin::secp256k1::Secp256k1;
use bitcoin::{Address, PrivateKey};
use scanpay_core::{AccountId, BackupState, BackupTarget, MasterSeed, Network};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;
use zeroize::Zeroizing;

/// Where a temporary account's funds are read from.
#[derive(Debug, Clone)]
pub enum TemporarySource {
    /// A private key that can also sign
    Key(PrivateKey),
    /// An address that can only be watched
    Address(Address),
}

/// Kind of account held by the wallet.
#[derive(Debug, Clone)]
pub enum AccountKind {
    /// Imported single private key, sealed at rest
    SingleKey {
        /// P2PKH address of the key
        address: String,
        /// Sealed WIF encoding of the key
        sealed_key: EncryptedField<String>,
    },
    /// Account derived from the master seed
    Hd {
        /// Derivation index
        index: u32,
    },
    /// Short-lived account spending from a scanned cold-storage key
    ColdKey {
        /// P2PKH address of the key
        address: String,
        /// The key itself, kept only for the lifetime of the account
        key: PrivateKey,
    },
    /// Short-lived account watching a scanned address
    WatchOnly {
        /// Watched address
        address: String,
    },
}

/// Account held by the wallet.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Account identifier
    pub id: AccountId,
    /// What backs the account
    pub kind: AccountKind,
}

impl AccountRecord {
    /// Whether the account only lives for the duration of a single flow.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        matches!(
            self.kind,
            AccountKind::ColdKey { .. } | AccountKind::WatchOnly { .. }
        )
    }
}

/// Wallet operations the scanner depends on.
pub trait WalletStore: Send + Sync {
    /// Whether an account with this identifier exists.
    fn has_account(&self, id: &AccountId) -> bool;

    /// Account the user currently spends from, if any.
    fn selected_account(&self) -> Option<AccountId>;

    /// Import a private key as a permanent single-key account.
    fn create_single_key_account(&self, key: &PrivateKey, cipher: &KeyCipher)
        -> Result<AccountId>;

    /// Register a temporary account for a cold-storage spend or balance check.
    fn create_temporary_account(&self, source: TemporarySource) -> AccountId;

    /// Drop a temporary account once the flow using it has finished.
    ///
    /// Returns `false` when `id` is unknown or names a permanent account,
    /// which is left untouched.
    fn forget_temporary_account(&self, id: &AccountId) -> bool;

    /// Whether a master seed is configured.
    fn has_master_seed(&self) -> bool;

    /// Configure the master seed, sealing it with `cipher`.
    fn configure_master_seed(&self, seed: &MasterSeed, cipher: &KeyCipher) -> Result<()>;

    /// Derive the next account from the master seed.
    fn derive_additional_account(&self, cipher: &KeyCipher) -> Result<AccountId>;

    /// Open the stored master seed.
    fn master_seed(&self, cipher: &KeyCipher) -> Result<MasterSeed>;

    /// Record that the backup of `target` was verified.
    fn mark_verified(&self, target: BackupTarget);

    /// Current backup state of `target`.
    fn backup_state(&self, target: BackupTarget) -> BackupState;
}

/// P2PKH address string controlled by `key`.
#[must_use]
pub fn single_key_address(key: &PrivateKey) -> String {
    let secp = Secp256k1::signing_only();
    let public_key = key.public_key(&secp);
    Address::p2pkh(public_key.pubkey_hash(), key.network).to_string()
}

/// Identifier the single-key account for `key` has (or would have).
#[must_use]
pub fn single_key_account_id(key: &PrivateKey) -> AccountId {
    AccountId::for_address(&single_key_address(key))
}

/// In-memory wallet.
#[derive(Debug)]
pub struct Wallet {
    network: Network,
    accounts: RwLock<HashMap<AccountId, AccountRecord>>,
    selected: RwLock<Option<AccountId>>,
    master_seed: RwLock<Option<EncryptedField<MasterSeed>>>,
    backups: BackupStore,
}

impl Wallet {
    /// Create an empty wallet for `network`.
    #[must_use]
    pub fn new(network: Network) -> Self {
        Self {
            network,
            accounts: RwLock::new(HashMap::new()),
            selected: RwLock::new(None),
            master_seed: RwLock::new(None),
            backups: BackupStore::new(),
        }
    }

    /// Network this wallet operates on.
    #[must_use]
    pub fn network(&self) -> Network {
        self.network
    }

    /// Look up an account.
    #[must_use]
    pub fn account(&self, id: &AccountId) -> Option<AccountRecord> {
        self.accounts
            .read()
            .expect("accounts lock poisoned")
            .get(id)
            .cloned()
    }

    /// Number of accounts, temporary ones included.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.accounts.read().expect("accounts lock poisoned").len()
    }

    /// Make `id` the account used for sending.
    pub fn select_account(&self, id: AccountId) {
        *self.selected.write().expect("selection lock poisoned") = Some(id);
    }

    /// Backup metadata.
    #[must_use]
    pub fn backups(&self) -> &BackupStore {
        &self.backups
    }

    fn insert(&self, record: AccountRecord) {
        let id = record.id;
        let permanent = !record.is_temporary();
        self.accounts
            .write()
            .expect("accounts lock poisoned")
            .insert(id, record);

        if permanent {
            self.select_if_unset(id);
        }
    }

    fn select_if_unset(&self, id: AccountId) {
        let mut selected = self.selected.write().expect("selection lock poisoned");
        if selected.is_none() {
            *selected = Some(id);
        }
    }
}

/// Identifier of the HD account at `index` under `seed`.
fn hd_account_id(seed: &MasterSeed, index: u32) -> AccountId {
    let mut preimage = Zeroizing::new(seed.as_bytes().to_vec());
    preimage.extend_from_slice(&index.to_be_bytes());
    let digest = sha256::Hash::hash(&preimage).to_byte_array();
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    AccountId::from_uuid(Uuid::from_bytes(bytes))
}

impl WalletStore for Wallet {
    fn has_account(&self, id: &AccountId) -> bool {
        self.accounts
            .read()
            .expect("accounts lock poisoned")
            .contains_key(id)
    }

    fn selected_account(&self) -> Option<AccountId> {
        *self.selected.read().expect("selection lock poisoned")
    }

    fn create_single_key_account(
        &self,
        key: &PrivateKey,
        cipher: &KeyCipher,
    ) -> Result<AccountId> {
        let address = single_key_address(key);
        let id = AccountId::for_address(&address);
        if self.has_account(&id) {
            tracing::debug!(account = %id, "single key account already present");
            return Ok(id);
        }

        let wif = Zeroizing::new(key.to_wif());
        let sealed_key = cipher.seal(&*wif)?;
        self.insert(AccountRecord {
            id,
            kind: AccountKind::SingleKey {
                address,
                sealed_key,
            },
        });
        self.backups.set_state(BackupTarget::Account(id), BackupState::NotVerified);

        tracing::info!(account = %id, "created single key account");
        Ok(id)
    }

    fn create_temporary_account(&self, source: TemporarySource) -> AccountId {
        let id = AccountId::generate();
        let kind = match source {
            TemporarySource::Key(key) => AccountKind::ColdKey {
                address: single_key_address(&key),
                key,
            },
            TemporarySource::Address(address) => AccountKind::WatchOnly {
                address: address.to_string(),
            },
        };
        self.insert(AccountRecord { id, kind });

        tracing::info!(account = %id, "created temporary account");
        id
    }

    fn forget_temporary_account(&self, id: &AccountId) -> bool {
        let mut accounts = self.accounts.write().expect("accounts lock poisoned");
        if !accounts.get(id).is_some_and(AccountRecord::is_temporary) {
            return false;
        }
        accounts.remove(id);

        tracing::debug!(account = %id, "forgot temporary account");
        true
    }

    fn has_master_seed(&self) -> bool {
        self.master_seed
            .read()
            .expect("seed lock poisoned")
            .is_some()
    }

    fn configure_master_seed(&self, seed: &MasterSeed, cipher: &KeyCipher) -> Result<()> {
        let mut slot = self.master_seed.write().expect("seed lock poisoned");
        if slot.is_some() {
            return Err(WalletError::SeedAlreadyConfigured);
        }
        *slot = Some(cipher.seal(seed)?);

        tracing::info!("configured master seed");
        Ok(())
    }

    fn derive_additional_account(&self, cipher: &KeyCipher) -> Result<AccountId> {
        let seed = self.master_seed(cipher)?;

        // Index and insert under one write lock so concurrent derivations
        // never share an index.
        let (id, index) = {
            let mut accounts = self.accounts.write().expect("accounts lock poisoned");
            let count = accounts
                .values()
                .filter(|record| matches!(record.kind, AccountKind::Hd { .. }))
                .count();
            let index = u32::try_from(count).unwrap_or(u32::MAX);
            let id = hd_account_id(&seed, index);
            accounts.insert(
                id,
                AccountRecord {
                    id,
                    kind: AccountKind::Hd { index },
                },
            );
            (id, index)
        };
        self.select_if_unset(id);

        tracing::info!(account = %id, index, "derived account from master seed");
        Ok(id)
    }

    fn master_seed(&self, cipher: &KeyCipher) -> Result<MasterSeed> {
        let slot = self.master_seed.read().expect("seed lock poisoned");
        let sealed = slot.as_ref().ok_or(WalletError::NoMasterSeed)?;
        cipher.open(sealed)
    }

    fn mark_verified(&self, target: BackupTarget) {
        self.backups.mark_verified(target);
    }

    fn backup_state(&self, target: BackupTarget) -> BackupState {
        self.backups.state(target)
    }
}
