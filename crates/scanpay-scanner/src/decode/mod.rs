//! Decoders turning payload text into domain values.
//!
//! Recognizers never parse payloads themselves; they ask a [`Decoders`]
//! implementation. Every method has a default backed by this crate's
//! standard parsers, so hosts only override what they need.
//!
//! Decoders are pure: they never mutate state, and a failure is reported
//! as `None`, never as an error.

mod bitid;
mod key;
mod share;
mod uri;

pub use bitid::BitIdRequest;
pub use key::parse_private_key;
pub use share::{SecretShare, SSS_PREFIX};
pub use uri::BitcoinUri;

use bitcoin::{Address, PrivateKey};
use scanpay_core::{MasterSeed, Network};
use std::str::FromStr;
use url::Url;

/// Parse a bare address, rejecting addresses of other networks.
#[must_use]
pub fn parse_address(text: &str, network: Network) -> Option<Address> {
    Address::from_str(text)
        .ok()?
        .require_network(network.to_bitcoin())
        .ok()
}

/// Per-category decoders consulted by recognizers.
pub trait Decoders: Send + Sync {
    /// WIF or mini private key for `network`.
    fn private_key(&self, text: &str, network: Network) -> Option<PrivateKey> {
        parse_private_key(text, network)
    }

    /// Bare address for `network`.
    fn address(&self, text: &str, network: Network) -> Option<Address> {
        parse_address(text, network)
    }

    /// BIP21 payment URI whose address belongs to `network`.
    fn bitcoin_uri(&self, text: &str, network: Network) -> Option<BitcoinUri> {
        BitcoinUri::parse(text, network)
    }

    /// `BitID` sign-in request.
    fn bitid_request(&self, text: &str) -> Option<BitIdRequest> {
        BitIdRequest::parse(text)
    }

    /// Generic URL syntax check.
    fn url(&self, text: &str) -> Option<Url> {
        Url::parse(text).ok()
    }

    /// Hex encoded master seed entropy.
    fn master_seed(&self, text: &str) -> Option<MasterSeed> {
        MasterSeed::from_hex(text)
    }

    /// Secret share with the `SSS` marker.
    fn secret_share(&self, text: &str) -> Option<SecretShare> {
        SecretShare::parse(text)
    }
}

/// Decoders using only the built-in parsers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardDecoders;

impl Decoders for StandardDecoders {}
