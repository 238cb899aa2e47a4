use super::{starts_with_ignore_case, Recognizer};
use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::{ErrorCode, Outcome, ScanValue};
use crate::subflow::{SendTarget, SubflowRequest};
use scanpay_wallet::TemporarySource;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SCHEME: &str = "bitcoin";

/// What to do with a scanned payment URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitcoinUriAction {
    /// Pay according to the URI.
    Send,
    /// Hand the whole URI back.
    Return,
    /// Watch the URI's address through a temporary account.
    CheckBalance,
    /// Hand back only the URI's address.
    ReturnAddress,
}

impl Recognizer for BitcoinUriAction {
    fn category(&self) -> Category {
        Category::BitcoinUri
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        if !starts_with_ignore_case(payload, SCHEME) {
            return Ok(Outcome::NotMatched);
        }
        let Some(uri) = context.decoders().bitcoin_uri(payload, context.network()) else {
            warn!("Undecodable bitcoin URI");
            return Ok(Outcome::error(ErrorCode::UnrecognizedFormat, payload));
        };

        let outcome = match self {
            Self::Send => {
                let request = SubflowRequest::Send {
                    from: context.wallet().selected_account(),
                    target: SendTarget::Uri(uri),
                };
                Outcome::Suspended(context.subflows().launch(request))
            }
            Self::Return => Outcome::Completed(Some(ScanValue::BitcoinUri(uri))),
            Self::CheckBalance => match uri.address {
                Some(address) => {
                    let account = context
                        .wallet()
                        .create_temporary_account(TemporarySource::Address(address));
                    Outcome::Suspended(
                        context
                            .subflows()
                            .launch(SubflowRequest::PrepareSpend { account }),
                    )
                }
                None => Outcome::error(ErrorCode::UnrecognizedFormat, payload),
            },
            Self::ReturnAddress => match uri.address {
                Some(address) => Outcome::Completed(Some(ScanValue::Address(address))),
                None => Outcome::error(ErrorCode::UnrecognizedFormat, payload),
            },
        };
        Ok(outcome)
    }
}
