//! Shared types used across the Scanpay workspace.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use bitcoin::hashes::{sha256, Hash};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Identifier of a wallet account.
///
/// Single-address accounts have deterministic identifiers derived from their
/// address, so the same key or address always maps to the same account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Create a new random `AccountId`.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Derive the identifier a single-address account for `address` would have.
    ///
    /// The identifier is the first 16 bytes of `SHA-256(address)`.
    #[must_use]
    pub fn for_address(address: &str) -> Self {
        let digest = sha256::Hash::hash(address.as_bytes()).to_byte_array();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self(Uuid::from_bytes(bytes))
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bitcoin network the wallet operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// Bitcoin mainnet
    #[default]
    Bitcoin,
    /// Bitcoin testnet3
    Testnet,
    /// Signet
    Signet,
    /// Local regression test network
    Regtest,
}

impl Network {
    /// Convert to the `bitcoin` crate's network type.
    #[must_use]
    pub fn to_bitcoin(self) -> bitcoin::Network {
        match self {
            Self::Bitcoin => bitcoin::Network::Bitcoin,
            Self::Testnet => bitcoin::Network::Testnet,
            Self::Signet => bitcoin::Network::Signet,
            Self::Regtest => bitcoin::Network::Regtest,
        }
    }

    /// Parse a network name as used in configuration files.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bitcoin" | "mainnet" => Some(Self::Bitcoin),
            "testnet" => Some(Self::Testnet),
            "signet" => Some(Self::Signet),
            "regtest" => Some(Self::Regtest),
            _ => None,
        }
    }
}

impl From<Network> for bitcoin::Network {
    fn from(network: Network) -> Self {
        network.to_bitcoin()
    }
}

/// Valid BIP39 entropy lengths in bytes.
const SEED_ENTROPY_LENGTHS: [usize; 5] = [16, 20, 24, 28, 32];

/// Master seed entropy for an HD wallet.
///
/// The entropy is zeroized when dropped and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct MasterSeed {
    entropy: Vec<u8>,
}

impl MasterSeed {
    /// Build a seed from raw entropy.
    ///
    /// Returns `None` unless the length is a valid BIP39 entropy length.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if SEED_ENTROPY_LENGTHS.contains(&bytes.len()) {
            Some(Self {
                entropy: bytes.to_vec(),
            })
        } else {
            None
        }
    }

    /// Build a seed from its hex encoding.
    #[must_use]
    pub fn from_hex(text: &str) -> Option<Self> {
        let mut bytes = hex::decode(text).ok()?;
        let seed = Self::from_bytes(&bytes);
        bytes.zeroize();
        seed
    }

    /// Raw entropy bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.entropy
    }
}

impl fmt::Debug for MasterSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterSeed")
            .field("entropy", &"<redacted>")
            .field("len", &self.entropy.len())
            .finish()
    }
}

/// Something whose backup can be verified by scanning it back in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupTarget {
    /// A single-key account
    Account(AccountId),
    /// The wallet's master seed
    MasterSeed,
}

/// Backup verification state of a [`BackupTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupState {
    /// Nothing recorded yet
    #[default]
    Unknown,
    /// Backup exists but was never checked
    NotVerified,
    /// User proved the backup by scanning it
    Verified,
}
