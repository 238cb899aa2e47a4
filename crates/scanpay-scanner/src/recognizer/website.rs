use super::{starts_with_ignore_case, Recognizer};
use crate::category::Category;
use crate::context::ScanContext;
use crate::error::Result;
use crate::outcome::{ErrorCode, Outcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

const SCHEME: &str = "http";

/// What to do with a scanned web link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteAction {
    /// Open the link in the system browser.
    OpenBrowser,
}

impl Recognizer for WebsiteAction {
    fn category(&self) -> Category {
        Category::Website
    }

    fn attempt(&self, payload: &str, context: &ScanContext) -> Result<Outcome> {
        if !starts_with_ignore_case(payload, SCHEME) {
            return Ok(Outcome::NotMatched);
        }

        match self {
            Self::OpenBrowser => {
                let Some(url) = context.decoders().url(payload) else {
                    warn!("Malformed web link");
                    return Ok(Outcome::error(ErrorCode::UnrecognizedFormat, payload));
                };
                if !context.browser().can_open(&url) {
                    return Ok(Outcome::error(ErrorCode::NoBrowser, payload));
                }
                debug!(host = url.host_str().unwrap_or_default(), "Opening link");
                context.browser().open(&url);
                Ok(Outcome::Completed(None))
            }
        }
    }
}
