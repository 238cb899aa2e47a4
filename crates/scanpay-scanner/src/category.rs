//! Content categories and their fixed recognition order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of content a scanned payload can be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// WIF or mini private key
    PrivateKey,
    /// `bitcoin:` payment URI
    BitcoinUri,
    /// Bare address
    Address,
    /// `bitid:` login request
    BitId,
    /// `http(s)` link
    Website,
    /// Hex encoded master seed
    MasterSeed,
    /// Shamir secret share
    SecretShare,
}

impl Category {
    /// Order in which categories are offered a payload. The first one to
    /// claim it wins.
    pub const PRIORITY: [Category; 7] = [
        Category::PrivateKey,
        Category::BitcoinUri,
        Category::Address,
        Category::BitId,
        Category::Website,
        Category::MasterSeed,
        Category::SecretShare,
    ];

    /// Get a human-readable name for the category.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PrivateKey => "Private Key",
            Self::BitcoinUri => "Bitcoin URI",
            Self::Address => "Address",
            Self::BitId => "BitID Request",
            Self::Website => "Website",
            Self::MasterSeed => "Master Seed",
            Self::SecretShare => "Secret Share",
        }
    }

    /// Position in [`Category::PRIORITY`].
    #[must_use]
    pub fn priority(&self) -> usize {
        match self {
            Self::PrivateKey => 0,
            Self::BitcoinUri => 1,
            Self::Address => 2,
            Self::BitId => 3,
            Self::Website => 4,
            Self::MasterSeed => 5,
            Self::SecretShare => 6,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
