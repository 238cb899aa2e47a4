use super::Recognizer;
use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::{Outcome, ScanValue};
use crate::subflow::{SendTarget, SubflowRequest};
use scanpay_wallet::TemporarySource;
use serde::{Deserialize, Serialize};

/// URI scheme prefix. Payloads carrying it are left to the URI recognizer.
const URI_PREFIX: &str = "bitcoin:";

/// What to do with a scanned address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressAction {
    /// Pay the address from the selected account.
    Send,
    /// Watch the address through a temporary account.
    CheckBalance,
    /// Hand the address back.
    Return,
}

impl Recognizer for AddressAction {
    fn category(&self) -> Category {
        Category::Address
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        if payload.starts_with(URI_PREFIX) {
            return Ok(Outcome::NotMatched);
        }
        let Some(address) = context.decoders().address(payload, context.network()) else {
            return Ok(Outcome::NotMatched);
        };

        let outcome = match self {
            Self::Send => {
                let request = SubflowRequest::Send {
                    from: context.wallet().selected_account(),
                    target: SendTarget::Address(address),
                };
                Outcome::Suspended(context.subflows().launch(request))
            }
            Self::CheckBalance => {
                let account = context
                    .wallet()
                    .create_temporary_account(TemporarySource::Address(address));
                Outcome::Suspended(
                    context
                        .subflows()
                        .launch(SubflowRequest::PrepareSpend { account }),
                )
            }
            Self::Return => Outcome::Completed(Some(ScanValue::Address(address))),
        };
        Ok(outcome)
    }
}
