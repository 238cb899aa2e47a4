use bitcoin::hashes::{sha256, Hash};
use bitcoin::secp256k1::SecretKey;
use bitcoin::{NetworkKind, PrivateKey};
use once_cell::sync::Lazy;
use regex::Regex;
use scanpay_core::Network;

/// `S` followed by 21 or 29 base58 characters.
static MINI_KEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^S(?:[1-9A-HJ-NP-Za-km-z]{21}|[1-9A-HJ-NP-Za-km-z]{29})$")
        .expect("Mini key regex is hardcoded and valid")
});

/// Parse a private key in WIF or mini key format.
///
/// Keys encoded for a different network are rejected.
#[must_use]
pub fn parse_private_key(text: &str, network: Network) -> Option<PrivateKey> {
    let kind = NetworkKind::from(network.to_bitcoin());
    let key = PrivateKey::from_wif(text)
        .ok()
        .or_else(|| parse_mini_key(text, kind))?;
    (key.network == kind).then_some(key)
}

/// Mini private key, valid when `SHA-256(key + "?")` starts with a zero
/// byte. The secret is `SHA-256(key)`.
fn parse_mini_key(text: &str, kind: NetworkKind) -> Option<PrivateKey> {
    if !MINI_KEY_PATTERN.is_match(text) {
        return None;
    }

    let check = sha256::Hash::hash(format!("{text}?").as_bytes());
    if check.to_byte_array()[0] != 0 {
        return None;
    }

    let digest = sha256::Hash::hash(text.as_bytes());
    let secret = SecretKey::from_slice(&digest.to_byte_array()).ok()?;
    Some(PrivateKey::new_uncompressed(secret, kind))
}
