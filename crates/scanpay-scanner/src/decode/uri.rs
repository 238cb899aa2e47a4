use super::parse_address;
use bitcoin::{Address, Amount, Denomination};
use scanpay_core::Network;
use url::{form_urlencoded, Url};

const SCHEME: &str = "bitcoin:";

/// Decoded BIP21 payment URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitcoinUri {
    /// Payee address. May be absent when a payment request URL is given.
    pub address: Option<Address>,
    /// Requested amount
    pub amount: Option<Amount>,
    /// Payee label
    pub label: Option<String>,
    /// Free-form message for the payer
    pub message: Option<String>,
    /// BIP72 payment request URL (`r=`)
    pub payment_request: Option<Url>,
}

impl BitcoinUri {
    /// Parse `bitcoin:<address>?<params>`.
    ///
    /// The scheme is matched case-insensitively. Returns `None` when the
    /// address belongs to another network, the amount is malformed, an
    /// unknown `req-` parameter is present, or neither an address nor a
    /// payment request URL is given.
    #[must_use]
    pub fn parse(text: &str, network: Network) -> Option<Self> {
        let scheme = text.get(..SCHEME.len())?;
        if !scheme.eq_ignore_ascii_case(SCHEME) {
            return None;
        }
        let rest = &text[SCHEME.len()..];
        let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
        let path = path.trim_start_matches("//");

        let mut uri = Self {
            address: None,
            amount: None,
            label: None,
            message: None,
            payment_request: None,
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "amount" => {
                    uri.amount = Some(Amount::from_str_in(&value, Denomination::Bitcoin).ok()?);
                }
                "label" => uri.label = Some(value.into_owned()),
                "message" => uri.message = Some(value.into_owned()),
                "r" => uri.payment_request = Some(Url::parse(&value).ok()?),
                other if other.starts_with("req-") => return None,
                _ => {}
            }
        }

        if path.is_empty() {
            uri.payment_request.as_ref()?;
        } else {
            uri.address = Some(parse_address(path, network)?);
        }

        Some(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENESIS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";

    #[test]
    fn test_parse_full_uri() {
        let uri = BitcoinUri::parse(
            &format!("bitcoin:{GENESIS}?amount=0.1&label=Satoshi&message=Thanks%20a%20lot"),
            Network::Bitcoin,
        )
        .expect("valid uri");

        assert_eq!(uri.address.expect("address").to_string(), GENESIS);
        assert_eq!(uri.amount, Some(Amount::from_sat(10_000_000)));
        assert_eq!(uri.label.as_deref(), Some("Satoshi"));
        assert_eq!(uri.message.as_deref(), Some("Thanks a lot"));
        assert!(uri.payment_request.is_none());
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        assert!(BitcoinUri::parse(&format!("BITCOIN:{GENESIS}"), Network::Bitcoin).is_some());
    }

    #[test]
    fn test_payment_request_without_address() {
        let uri = BitcoinUri::parse(
            "bitcoin:?r=https%3A%2F%2Fmerchant.example%2Fpay%2F42",
            Network::Bitcoin,
        )
        .expect("payment request uri");
        assert!(uri.address.is_none());
        assert_eq!(
            uri.payment_request.expect("r").as_str(),
            "https://merchant.example/pay/42"
        );
    }

    #[test]
    fn test_rejections() {
        // no address and no payment request
        assert!(BitcoinUri::parse("bitcoin:", Network::Bitcoin).is_none());
        // garbage address
        assert!(BitcoinUri::parse("bitcoin:garbage", Network::Bitcoin).is_none());
        // wrong network
        assert!(BitcoinUri::parse(&format!("bitcoin:{GENESIS}"), Network::Testnet).is_none());
        // bad amount
        assert!(
            BitcoinUri::parse(&format!("bitcoin:{GENESIS}?amount=lots"), Network::Bitcoin)
                .is_none()
        );
        // required parameter we do not understand
        assert!(
            BitcoinUri::parse(&format!("bitcoin:{GENESIS}?req-foo=1"), Network::Bitcoin).is_none()
        );
        // unknown optional parameters are fine
        assert!(
            BitcoinUri::parse(&format!("bitcoin:{GENESIS}?foo=1"), Network::Bitcoin).is_some()
        );
    }
}
