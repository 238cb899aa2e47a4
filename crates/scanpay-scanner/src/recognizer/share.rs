use super::Recognizer;
use crate::category::Category;
use crate::context::ScanContext;
use crate::decode::SSS_PREFIX;
use crate::error::Result;
use crate::outcome::{ErrorCode, Outcome, ScanValue};
use crate::subflow::SubflowRequest;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// What to do with a scanned secret share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretShareAction {
    /// Start collecting shares to rebuild the secret.
    StartCombining,
    /// Hand the share back.
    ReturnShare,
}

impl Recognizer for SecretShareAction {
    fn category(&self) -> Category {
        Category::SecretShare
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        if !payload.starts_with(SSS_PREFIX) {
            return Ok(Outcome::NotMatched);
        }
        let Some(share) = context.decoders().secret_share(payload) else {
            warn!("Invalid secret share");
            return Ok(Outcome::error(ErrorCode::InvalidShare, payload));
        };
        debug!(
            threshold = share.threshold(),
            index = share.index(),
            "Scanned secret share"
        );

        let outcome = match self {
            Self::StartCombining => Outcome::Suspended(
                context
                    .subflows()
                    .launch(SubflowRequest::CombineShares(share)),
            ),
            Self::ReturnShare => Outcome::Completed(Some(ScanValue::SecretShare(share))),
        };
        Ok(outcome)
    }
}
