use super::{starts_with_ignore_case, Recognizer};
use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::{ErrorCode, Outcome};
use crate::subflow::SubflowRequest;
use scanpay_core::FeatureId;
use serde::{Deserialize, Serialize};
use tracing::warn;

const SCHEME: &str = "bitid:";

/// What to do with a scanned `BitID` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BitIdAction {
    /// Sign the challenge and log in.
    Login,
}

impl Recognizer for BitIdAction {
    fn category(&self) -> Category {
        Category::BitId
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        if !context
            .capabilities()
            .is_feature_available(FeatureId::BitIdLogin)
            || !starts_with_ignore_case(payload, SCHEME)
        {
            return Ok(Outcome::NotMatched);
        }

        match self {
            Self::Login => {
                let Some(request) = context.decoders().bitid_request(payload) else {
                    warn!("Undecodable BitID request");
                    return Ok(Outcome::error(ErrorCode::UnrecognizedFormat, payload));
                };
                Ok(Outcome::Suspended(
                    context
                        .subflows()
                        .launch(SubflowRequest::Authenticate(request)),
                ))
            }
        }
    }
}
